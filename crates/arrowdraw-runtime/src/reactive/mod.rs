#![forbid(unsafe_code)]

//! Change notification plumbing for the recalculation loop.
//!
//! # Architecture
//!
//! - [`MutationFeed`]: shared feed of mutation batches with RAII
//!   [`Subscription`] guards.
//! - [`Mutation`] / [`MutationKind`]: change records.
//! - [`ChangeFilter`]: tells layout changes apart from echoes of a pass.
//! - [`PassGuard`]: thread-local marker suppressing re-entrant passes.

pub mod feed;
pub mod guard;
pub mod mutation;

pub use feed::{MutationFeed, Subscription};
pub use guard::{PassGuard, in_pass};
pub use mutation::{ChangeFilter, Mutation, MutationKind};
