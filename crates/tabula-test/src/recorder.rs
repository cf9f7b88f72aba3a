//! Records effects delivered to a store's subscribers.

use std::cell::RefCell;
use std::rc::Rc;
use tabula_core::{State, Store};

/// Shared log of effects, filled by a store subscription.
#[derive(Debug)]
pub struct EffectLog<E> {
    effects: Rc<RefCell<Vec<E>>>,
}

impl<E> Clone for EffectLog<E> {
    fn clone(&self) -> Self {
        Self {
            effects: Rc::clone(&self.effects),
        }
    }
}

impl<E: Clone + 'static> EffectLog<E> {
    /// Subscribe a new log to `store`.
    pub fn attach<S>(store: &mut Store<S>) -> Self
    where
        S: State<Effect = E>,
    {
        let log = Self {
            effects: Rc::new(RefCell::new(Vec::new())),
        };
        let sink = Rc::clone(&log.effects);
        store.subscribe(move |effect: &E| sink.borrow_mut().push(effect.clone()));
        log
    }

    /// Effects recorded so far.
    #[must_use]
    pub fn effects(&self) -> Vec<E> {
        self.effects.borrow().clone()
    }

    /// Take and clear the recorded effects.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.effects.borrow_mut())
    }

    /// Number of recorded effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.borrow().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.borrow().is_empty()
    }
}
