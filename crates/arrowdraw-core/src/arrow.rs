#![forbid(unsafe_code)]

//! Arrow declarations, derived geometry and the per-arrow pipeline.
//!
//! ```text
//! Rect(from), Rect(to) ─► PerimeterWalk ─► ClosestPointSolver ─► OrientationResolver ─► ArrowGeometry
//! ```
//!
//! [`ArrowPipeline::compute`] is stateless: the same spec and bounds always
//! produce the same [`ArrowGeometry`], bit for bit.

use serde::{Deserialize, Serialize};

use crate::closest::{ClosestPointSolver, SearchStrategy};
use crate::error::{GeometryError, Result};
use crate::orientation::{AnchorOverride, Orientation, OrientationResolver, ResolverConfig};
use crate::rect::Rect;

/// Color used when a declaration carries none.
pub const DEFAULT_COLOR: &str = "black";

/// A declared connector between two elements.
///
/// Owned by the declaration layer; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrowSpec {
    /// Unique identifier of the arrow.
    pub id: String,
    /// Identifier of the source element.
    pub from: String,
    /// Identifier of the target element.
    pub to: String,
    /// Border color; `None` falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ArrowSpec {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            color: None,
        }
    }

    /// Set the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// The declared color, or `default` when none was given.
    #[must_use]
    pub fn effective_color<'a>(&'a self, default: &'a str) -> &'a str {
        self.color.as_deref().unwrap_or(default)
    }
}

/// Finished connector geometry, ready for the rendering collaborator.
///
/// Recreated on every pass; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowGeometry {
    pub arrow_id: String,
    pub length_px: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub angle_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_override: Option<AnchorOverride>,
    pub color: String,
    /// Length and angle were clamped because the input was degenerate.
    #[serde(default)]
    pub degenerate: bool,
}

impl ArrowGeometry {
    fn from_orientation(spec: &ArrowSpec, orientation: Orientation, color: &str) -> Self {
        Self {
            arrow_id: spec.id.clone(),
            length_px: orientation.length_px,
            origin_x: orientation.origin_x,
            origin_y: orientation.origin_y,
            angle_deg: orientation.angle_deg,
            anchor_override: orientation.anchor_override,
            color: color.to_string(),
            degenerate: orientation.degenerate,
        }
    }
}

/// Result of one pipeline run, with the search cost for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    pub geometry: ArrowGeometry,
    pub pairs_scanned: u64,
}

/// Solver and resolver bundled with a default color.
#[derive(Debug, Clone)]
pub struct ArrowPipeline {
    solver: ClosestPointSolver,
    resolver: OrientationResolver,
    default_color: String,
}

impl Default for ArrowPipeline {
    fn default() -> Self {
        Self::new(
            SearchStrategy::default(),
            ResolverConfig::default(),
            DEFAULT_COLOR,
        )
    }
}

impl ArrowPipeline {
    pub fn new(
        strategy: SearchStrategy,
        resolver: ResolverConfig,
        default_color: impl Into<String>,
    ) -> Self {
        Self {
            solver: ClosestPointSolver::new(strategy),
            resolver: OrientationResolver::new(resolver),
            default_color: default_color.into(),
        }
    }

    #[must_use]
    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Compute geometry for `spec` given the current bounds of its elements.
    pub fn compute(&self, spec: &ArrowSpec, from: &Rect, to: &Rect) -> Result<ArrowGeometry> {
        self.compute_with_cost(spec, from, to)
            .map(|computed| computed.geometry)
    }

    /// Like [`compute`](Self::compute), also reporting how many point pairs
    /// the search evaluated.
    pub fn compute_with_cost(&self, spec: &ArrowSpec, from: &Rect, to: &Rect) -> Result<Computed> {
        let color = spec.effective_color(&self.default_color);

        // Bounds past MAX_COORDINATE would make the perimeter walk unbounded.
        if !(from.is_searchable() && to.is_searchable()) {
            let orientation = Orientation::degenerate_at(0.0, 0.0);
            return Ok(Computed {
                geometry: ArrowGeometry::from_orientation(spec, orientation, color),
                pairs_scanned: 0,
            });
        }

        let pair = self.solver.solve(from, to);
        let orientation = self
            .resolver
            .resolve(&pair, from, to)
            .map_err(|_| GeometryError::Overlap {
                from: spec.from.clone(),
                to: spec.to.clone(),
            })?;

        Ok(Computed {
            geometry: ArrowGeometry::from_orientation(spec, orientation, color),
            pairs_scanned: pair.pairs_scanned,
        })
    }
}
