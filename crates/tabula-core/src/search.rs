//! Case-insensitive substring search over column headers and value domains.

use crate::column::FilterableColumn;

/// Outcome of a search: the matching items, or an explicit "no results".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<T> {
    /// At least one item matched.
    Matches(Vec<T>),
    /// Nothing matched.
    NoResults,
}

impl<T> SearchResult<T> {
    fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::NoResults
        } else {
            Self::Matches(items)
        }
    }

    /// Whether nothing matched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NoResults)
    }

    /// Matching items (empty for `NoResults`).
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Matches(items) => items,
            Self::NoResults => &[],
        }
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Consume into the matching items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Matches(items) => items,
            Self::NoResults => Vec::new(),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Columns whose header contains `query`, ignoring case.
///
/// An empty query returns every column.
pub fn search_columns<'a, I>(columns: I, query: &str) -> SearchResult<&'a FilterableColumn>
where
    I: IntoIterator<Item = &'a FilterableColumn>,
{
    let needle = query.to_lowercase();
    SearchResult::from_vec(
        columns
            .into_iter()
            .filter(|c| contains_ignore_case(&c.header, &needle))
            .collect(),
    )
}

/// Values containing `query`, ignoring case.
///
/// An empty query returns every value.
pub fn search_values<'a, I, S>(values: I, query: &str) -> SearchResult<&'a str>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + 'a + ?Sized,
{
    let needle = query.to_lowercase();
    SearchResult::from_vec(
        values
            .into_iter()
            .map(|v| <S as AsRef<str>>::as_ref(v))
            .filter(|v| contains_ignore_case(v, &needle))
            .collect(),
    )
}
