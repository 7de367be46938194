#![forbid(unsafe_code)]

//! arrowdraw public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! # Usage
//!
//! ```
//! use arrowdraw::prelude::*;
//!
//! let doc = MemoryDocument::default();
//! doc.edit(|host| {
//!     host.add_element("a", Rect::new(0.0, 0.0, 100.0, 50.0))?;
//!     host.add_element("b", Rect::new(200.0, 0.0, 300.0, 50.0))?;
//!     create_arrow(host, "link", "a", "b", "body", None).map(|_| ())
//! })??;
//!
//! let recalc = arrowdraw::watch(&doc, RecalcConfig::default())?;
//! let geometry = recalc.last_report().and_then(|r| r.geometry("link").cloned());
//! assert_eq!(geometry.map(|g| g.length_px), Some(90.0));
//! # Ok::<(), arrowdraw::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use arrowdraw_core::{
    AnchorOverride, AngleMode, ArrowGeometry, ArrowPipeline, ArrowSpec, BoundaryPoint, ClosestPair,
    ClosestPointSolver, GeometryError, Orientation, OrientationResolver, PerimeterWalk, PixelRect,
    Rect, ResolverConfig, SearchStrategy,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use arrowdraw_runtime::{
    ArrowOutcome, ArrowStyle, ConfigError, ElementFactory, HostError, LayoutHost, MemoryDocument,
    MemoryHost, MutationFeed, PassReport, ReactiveRecalculator, RecalcConfig, RecalcStats,
    RenderSink, create_arrow,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for arrowdraw users.
#[derive(Debug)]
pub enum Error {
    /// A single arrow could not be resolved.
    Geometry(GeometryError),
    /// The host rejected an element operation.
    #[cfg(feature = "runtime")]
    Host(HostError),
    /// Configuration failed to load or validate.
    #[cfg(feature = "runtime")]
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Host(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Host(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<GeometryError> for Error {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}

#[cfg(feature = "runtime")]
impl From<HostError> for Error {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for arrowdraw APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Start recalculating every arrow declared in `document`.
///
/// Runs the initial pass immediately; later passes run whenever the
/// document delivers a layout-relevant batch.
#[cfg(feature = "runtime")]
pub fn watch(
    document: &MemoryDocument,
    config: RecalcConfig,
) -> Result<ReactiveRecalculator<MemoryHost>> {
    Ok(ReactiveRecalculator::activate(
        document.host(),
        document.feed(),
        config,
    )?)
}

pub mod prelude {
    pub use crate::{
        ArrowGeometry, ArrowPipeline, ArrowSpec, Error, Rect, Result, SearchStrategy,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{
        ArrowOutcome, MemoryDocument, MemoryHost, PassReport, ReactiveRecalculator, RecalcConfig,
        create_arrow,
    };

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use arrowdraw_core as core;
#[cfg(feature = "runtime")]
pub use arrowdraw_runtime as runtime;
