#![forbid(unsafe_code)]

//! Change feed carrying mutation batches from the host to subscribers.
//!
//! # Design
//!
//! [`MutationFeed`] keeps its subscribers in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). Each subscriber is held as a `Weak`
//! reference; the strong `Rc` lives inside the [`Subscription`] guard handed
//! back to the caller. Dropping the guard (or calling
//! [`Subscription::unsubscribe`]) ends delivery.
//!
//! # Performance
//!
//! | Operation          | Complexity                 |
//! |--------------------|----------------------------|
//! | `publish()`        | O(S) where S = subscribers |
//! | `subscribe()`      | O(1) amortized             |
//! | `subscriber_count` | O(S)                       |
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 for each non-empty published batch.
//! 2. Empty batches are dropped without notifying anyone.
//! 3. Subscribers are notified in registration order.
//! 4. No borrow of the feed is held while callbacks run, so a callback may
//!    publish again or subscribe without panicking.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use super::mutation::Mutation;

type CallbackRc = Rc<dyn Fn(&[Mutation])>;
type CallbackWeak = Weak<dyn Fn(&[Mutation])>;

struct FeedInner {
    version: u64,
    next_id: u64,
    subscribers: Vec<CallbackWeak>,
}

/// A shared, cloneable stream of mutation batches.
///
/// Cloning creates a new handle to the **same** feed.
#[derive(Clone)]
pub struct MutationFeed {
    inner: Rc<RefCell<FeedInner>>,
}

impl std::fmt::Debug for MutationFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MutationFeed")
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl Default for MutationFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationFeed {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FeedInner {
                version: 0,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Register `callback` for every future non-empty batch.
    pub fn subscribe(&self, callback: impl Fn(&[Mutation]) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.push(Rc::downgrade(&strong));
            inner.next_id += 1;
            inner.next_id
        };
        debug!(sub_id = id, "Starting feed subscription");
        Subscription {
            id,
            _guard: Box::new(strong),
        }
    }

    /// Deliver `batch` to all live subscribers.
    ///
    /// Returns the number of subscribers notified.
    pub fn publish(&self, batch: &[Mutation]) -> usize {
        if batch.is_empty() {
            return 0;
        }
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            inner.version += 1;
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner
                .subscribers
                .iter()
                .filter_map(Weak::upgrade)
                .collect()
        };
        for callback in &callbacks {
            callback(batch);
        }
        callbacks.len()
    }

    /// Number of non-empty batches published so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of subscribers whose guard is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

/// RAII guard for a feed subscriber.
///
/// Dropping the guard releases the only strong reference to the callback,
/// so the feed's weak entry fails to upgrade from then on.
pub struct Subscription {
    id: u64,
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    /// Stop delivery explicitly.
    pub fn unsubscribe(self) {
        drop(self);
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        debug!(sub_id = self.id, "Stopping feed subscription");
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
