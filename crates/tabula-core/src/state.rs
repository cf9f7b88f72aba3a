//! Message-driven state management.
//!
//! State objects follow the Elm Architecture: `State + Message → effects`.
//! An update that returns no effects absorbed the message without changing
//! anything; every effect is an immutable snapshot handed to the host.
//!
//! # Examples
//!
//! ```
//! use tabula_core::{State, Store};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Default, Serialize, Deserialize)]
//! struct Flag {
//!     on: bool,
//! }
//!
//! impl State for Flag {
//!     type Message = bool;
//!     type Effect = bool;
//!
//!     fn update(&mut self, msg: bool) -> Vec<bool> {
//!         if self.on == msg {
//!             return Vec::new();
//!         }
//!         self.on = msg;
//!         vec![msg]
//!     }
//! }
//!
//! let mut store = Store::new(Flag::default());
//! assert_eq!(store.dispatch(true), vec![true]);
//! assert!(store.dispatch(true).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Application state trait.
pub trait State: Clone + Serialize + for<'de> Deserialize<'de> {
    /// Message type for state updates
    type Message;

    /// Snapshot emitted to the host after a change
    type Effect: Clone;

    /// Update state in response to a message.
    ///
    /// Returns the effects to deliver; empty when nothing changed.
    fn update(&mut self, msg: Self::Message) -> Vec<Self::Effect>;
}

/// Type alias for effect subscribers.
type Subscriber<E> = Box<dyn FnMut(&E)>;

/// Store owns a state and delivers its effects to subscribers.
pub struct Store<S: State> {
    state: S,
    subscribers: Vec<Subscriber<S::Effect>>,
}

impl<S: State> Store<S> {
    /// Create a new store with initial state.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            subscribers: Vec::new(),
        }
    }

    /// Get current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Consume the store, returning its state.
    pub fn into_state(self) -> S {
        self.state
    }

    /// Dispatch a message, notify subscribers of each effect, and return the effects.
    pub fn dispatch(&mut self, msg: S::Message) -> Vec<S::Effect> {
        let effects = self.state.update(msg);
        for effect in &effects {
            for subscriber in &mut self.subscribers {
                subscriber(effect);
            }
        }
        effects
    }

    /// Subscribe to effects.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&S::Effect) + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<S: State + fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct CounterState {
        count: i32,
    }

    enum CounterMessage {
        Add(i32),
    }

    impl State for CounterState {
        type Message = CounterMessage;
        type Effect = i32;

        fn update(&mut self, msg: Self::Message) -> Vec<i32> {
            match msg {
                CounterMessage::Add(0) => Vec::new(),
                CounterMessage::Add(n) => {
                    self.count += n;
                    vec![self.count]
                }
            }
        }
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(CounterState::default());
        assert_eq!(store.dispatch(CounterMessage::Add(2)), vec![2]);
        assert_eq!(store.state().count, 2);
    }

    #[test]
    fn test_store_subscribers_see_effects_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = Store::new(CounterState::default());
        store.subscribe(move |e| sink.borrow_mut().push(*e));
        store.dispatch(CounterMessage::Add(1));
        store.dispatch(CounterMessage::Add(0));
        store.dispatch(CounterMessage::Add(3));

        assert_eq!(*seen.borrow(), vec![1, 4]);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_store_into_state() {
        let mut store = Store::new(CounterState::default());
        store.dispatch(CounterMessage::Add(5));
        assert_eq!(store.into_state().count, 5);
    }

    #[test]
    fn test_store_debug() {
        let store = Store::new(CounterState::default());
        let debug = format!("{store:?}");
        assert!(debug.contains("Store"));
        assert!(debug.contains("subscribers"));
    }
}
