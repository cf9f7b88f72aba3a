//! YAML table manifests for Tabula: filterable columns, display columns and
//! drag settings declared in one document.

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::TableManifest;
