#![forbid(unsafe_code)]

//! arrowdraw Runtime
//!
//! This crate keeps connectors between elements positioned while the host's
//! layout changes. It wires the geometry engine in `arrowdraw-core` to a host
//! environment through a small set of traits.
//!
//! # Key Components
//!
//! - [`ReactiveRecalculator`] - Full-pass recomputation driven by a change feed
//! - [`MutationFeed`] - Subscribe/publish feed of mutation batches
//! - [`LayoutHost`] / [`RenderSink`] / [`ElementFactory`] - Host collaborator traits
//! - [`ArrowStyle`] - Style values derived from finished geometry
//! - [`create_arrow`] - Builder for the three elements backing an arrow
//! - [`MemoryHost`] / [`MemoryDocument`] - In-memory host for tests and tools
//! - [`RecalcConfig`] - Search, resolver and styling settings
//!
//! # Role in arrowdraw
//! `arrowdraw-runtime` is the orchestrator. It reads bounds and declarations
//! from the host, runs the per-arrow pipeline for every declared arrow, and
//! writes the resulting styles back. Per-arrow failures are reported, never
//! fatal.
//!
//! # Threading
//! Everything runs on the host's single UI thread. Shared state uses
//! `Rc<RefCell<..>>` and nothing here is `Send`.

pub mod builder;
pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod reactive;
pub mod recalculator;
pub mod render;
pub mod report;

pub use builder::{ArrowHandle, CONTAINER_CLASS, create_arrow, head_id, line_id};
pub use config::{ConfigError, RecalcConfig};
pub use error::HostError;
pub use host::{ElementFactory, LayoutHost, RenderSink};
pub use memory::{DEFAULT_ROOT, Element, MemoryDocument, MemoryHost, Settled};
pub use reactive::{ChangeFilter, Mutation, MutationFeed, MutationKind, PassGuard, Subscription};
pub use recalculator::ReactiveRecalculator;
pub use render::{ArrowStyle, DEFAULT_HEAD_PX, Declarations};
pub use report::{ArrowOutcome, PassReport, RecalcStats};
