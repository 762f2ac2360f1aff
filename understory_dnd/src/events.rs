// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed drag events and a small synchronous publish/subscribe hub.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_dnd::events::Emitter;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut emitter: Emitter<u32> = Emitter::new();
//! let sink = seen.clone();
//! let id = emitter.subscribe(move |v: &u32| sink.borrow_mut().push(*v));
//! emitter.emit(&7);
//! assert!(emitter.unsubscribe(id));
//! emitter.emit(&8);
//! assert_eq!(*seen.borrow(), vec![7]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Lifecycle events published by the [drag coordinator](crate::coordinator::DragCoordinator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragEvent<K> {
    /// A drag session was created.
    Started {
        /// The dragged item.
        active: K,
        /// Its index when the drag began.
        index: usize,
    },
    /// The candidate target index changed during a drag.
    IndexChanged {
        /// The dragged item.
        active: K,
        /// The last reported target index.
        previous: usize,
        /// The new target index.
        current: usize,
    },
    /// A drop committed a new order. Published before the session is destroyed.
    OrderChanged {
        /// The dragged item.
        active: K,
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
        /// The complete collection in its new order.
        order: Vec<K>,
    },
    /// The session ended with a drop (whether or not the order changed).
    Dropped {
        /// The dragged item.
        active: K,
        /// Index before the drop.
        from: usize,
        /// Index after the drop.
        to: usize,
    },
    /// The session was destroyed without committing.
    Cancelled {
        /// The dragged item.
        active: K,
    },
}

/// Handle returned by [`Emitter::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Synchronous listener registry.
///
/// Listeners are invoked in subscription order on the emitting call's stack.
pub struct Emitter<E: ?Sized> {
    next: u64,
    listeners: Vec<(SubscriptionId, Listener<E>)>,
}

impl<E: ?Sized> core::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<E: ?Sized> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> Emitter<E> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            next: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Drop all listeners.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn listeners_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut emitter: Emitter<u8> = Emitter::new();
        let a = log.clone();
        emitter.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = log.clone();
        emitter.subscribe(move |v| b.borrow_mut().push(("b", *v)));
        emitter.emit(&1);
        assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut emitter: Emitter<u8> = Emitter::new();
        let id = emitter.subscribe(|_| {});
        assert_eq!(emitter.len(), 1);
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        assert!(emitter.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut emitter: Emitter<u8> = Emitter::new();
        let first = emitter.subscribe(|_| {});
        emitter.clear();
        let second = emitter.subscribe(|_| {});
        assert_ne!(first, second);
    }

    #[test]
    fn unsized_payloads_are_supported() {
        let total = Rc::new(RefCell::new(0));
        let mut emitter: Emitter<[u32]> = Emitter::new();
        let sink = total.clone();
        emitter.subscribe(move |order: &[u32]| *sink.borrow_mut() += order.len());
        emitter.emit(&[1, 2, 3]);
        assert_eq!(*total.borrow(), 3);
    }
}
