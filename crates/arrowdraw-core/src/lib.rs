#![forbid(unsafe_code)]

//! Core: connector geometry between rectangular elements.
//!
//! # Role in arrowdraw
//! `arrowdraw-core` is the geometry engine. Given the resolved bounds of two
//! elements it finds the closest pair of boundary points, derives the
//! connector's length, anchor and rotation, and reports when two elements
//! overlap too much to connect.
//!
//! # Primary responsibilities
//! - **Rect / PixelRect / BoundaryPoint**: bounds snapshots and pixel-grid points.
//! - **PerimeterWalk**: clockwise boundary enumeration.
//! - **ClosestPointSolver**: brute-force (and pruned) closest-pair search.
//! - **OrientationResolver**: length, angle, flip and anchor correction.
//! - **ArrowPipeline**: the per-arrow computation from spec to geometry.
//!
//! # How it fits in the system
//! The runtime (`arrowdraw-runtime`) reads bounds from the host, runs an
//! [`ArrowPipeline`] for every declared arrow on each pass and hands the
//! resulting [`ArrowGeometry`] to the rendering collaborator. Nothing in this
//! crate performs I/O or keeps state between calls.

pub mod arrow;
pub mod closest;
pub mod error;
pub mod orientation;
pub mod perimeter;
pub mod rect;

pub use arrow::{ArrowGeometry, ArrowPipeline, ArrowSpec, Computed, DEFAULT_COLOR};
pub use closest::{ClosestPair, ClosestPointSolver, SearchStrategy};
pub use error::{GeometryError, Result};
pub use orientation::{
    AnchorOverride, AngleMode, DEFAULT_INSET_PX, Orientation, OrientationResolver,
    OverlapFailure, ResolverConfig,
};
pub use perimeter::PerimeterWalk;
pub use rect::{BoundaryPoint, MAX_COORDINATE, PixelRect, Rect};
