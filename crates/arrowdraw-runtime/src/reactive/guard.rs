#![forbid(unsafe_code)]

//! Re-entrancy guard for recalculation passes.
//!
//! A pass writes styles onto arrow elements. A host that reports those
//! writes synchronously would call back into the recalculator while the pass
//! is still running. [`PassGuard`] marks the running pass in thread-local
//! state so such notifications can be recognized and suppressed.
//!
//! # Usage
//!
//! ```
//! use arrowdraw_runtime::reactive::guard::{PassGuard, in_pass};
//!
//! assert!(!in_pass());
//! {
//!     let _pass = PassGuard::enter().expect("no pass running");
//!     assert!(in_pass());
//!     assert!(PassGuard::enter().is_none());
//! }
//! assert!(!in_pass());
//! ```
//!
//! # Invariants
//!
//! 1. At most one guard is live per thread.
//! 2. The flag is cleared when the guard drops, including during unwinding.

use std::cell::Cell;

thread_local! {
    static PASS_ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Returns true if a recalculation pass is running on this thread.
pub fn in_pass() -> bool {
    PASS_ACTIVE.with(Cell::get)
}

/// RAII marker for a running pass.
#[derive(Debug)]
pub struct PassGuard {
    _private: (),
}

impl PassGuard {
    /// Mark a pass as running. Returns `None` if one already is.
    #[must_use]
    pub fn enter() -> Option<Self> {
        PASS_ACTIVE.with(|active| {
            if active.get() {
                None
            } else {
                active.set(true);
                Some(Self { _private: () })
            }
        })
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        PASS_ACTIVE.with(|active| active.set(false));
    }
}
