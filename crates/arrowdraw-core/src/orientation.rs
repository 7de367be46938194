#![forbid(unsafe_code)]

//! Turns a closest-point pair into a connector's length, anchor and angle.
//!
//! # Resolution steps
//!
//! 1. **Length**: distance between the two points minus a visual inset, so
//!    the head stops short of the target's border. Never negative.
//! 2. **Base angle**: in [`AngleMode::SingleQuadrant`], the arctangent of
//!    `dy / dx` in degrees, within [−90, 90]. A vertical segment resolves
//!    to 90 pointing down and −90 pointing up.
//! 3. **Flip**: when the source's left edge lies strictly right of the
//!    target's left edge (the source is *major*), 180 is added so the head
//!    points back toward the target.
//! 4. **Anchor correction**: rectangles that share a horizontal band but
//!    not a column get their anchor `y` moved to the midpoint between the
//!    facing edges; the symmetric rule moves `x` for rectangles that share a
//!    column but not a band. Both may apply.
//! 5. **Overlap**: if neither correction applies and the rectangles overlap
//!    on both axes there is no sensible anchor, and resolution fails.
//!
//! [`AngleMode::FourQuadrant`] replaces steps 2 and 3 with `atan2`, which
//! already orients the segment from source to target.
//!
//! # Degenerate input
//!
//! A rectangle with zero width or height, a coincident point pair, or any
//! non-finite bound resolves with length 0 and angle 0 and sets
//! [`Orientation::degenerate`]. Non-finite values never reach the output.

use serde::{Deserialize, Serialize};

use crate::closest::ClosestPair;
use crate::rect::Rect;

/// Gap left between the head and the target's border, in pixels.
pub const DEFAULT_INSET_PX: f64 = 10.0;

/// How the base angle is derived from the point pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    /// `atan(dy / dx)` plus the major-rectangle flip.
    #[default]
    SingleQuadrant,
    /// `atan2(dy, dx)`; no flip.
    FourQuadrant,
}

/// Resolver tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Pixels subtracted from the segment length.
    pub inset_px: f64,
    /// Angle derivation.
    pub angle_mode: AngleMode,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            inset_px: DEFAULT_INSET_PX,
            angle_mode: AngleMode::default(),
        }
    }
}

/// Anchor coordinates that replace the raw closest point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorOverride {
    /// Replacement x, set when the rectangles share a column.
    pub x: Option<f64>,
    /// Replacement y, set when the rectangles share a band.
    pub y: Option<f64>,
}

/// Resolution failed because the rectangles overlap on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapFailure;

/// Resolved connector orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub length_px: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub angle_deg: f64,
    pub anchor_override: Option<AnchorOverride>,
    /// The major-rectangle flip was applied.
    pub flipped: bool,
    /// Length and angle were clamped to zero.
    pub degenerate: bool,
}

impl Orientation {
    /// Zero-length, zero-angle orientation anchored at `(x, y)`.
    #[must_use]
    pub fn degenerate_at(x: f64, y: f64) -> Self {
        Self {
            length_px: 0.0,
            origin_x: x,
            origin_y: y,
            angle_deg: 0.0,
            anchor_override: None,
            flipped: false,
            degenerate: true,
        }
    }
}

/// Converts closest-point pairs into [`Orientation`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrientationResolver {
    config: ResolverConfig,
}

impl OrientationResolver {
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the orientation of a connector from `from` to `to`.
    pub fn resolve(
        &self,
        pair: &ClosestPair,
        from: &Rect,
        to: &Rect,
    ) -> Result<Orientation, OverlapFailure> {
        if !(from.is_finite() && to.is_finite()) {
            return Ok(Orientation::degenerate_at(
                f64::from(pair.from.x),
                f64::from(pair.from.y),
            ));
        }

        let anchor_override = alignment_anchor(from, to);
        if anchor_override.is_none() && from.overlaps(to) {
            return Err(OverlapFailure);
        }

        let origin_x = anchor_override
            .and_then(|a| a.x)
            .unwrap_or(f64::from(pair.from.x));
        let origin_y = anchor_override
            .and_then(|a| a.y)
            .unwrap_or(f64::from(pair.from.y));

        let mut orientation = Orientation {
            anchor_override,
            ..Orientation::degenerate_at(origin_x, origin_y)
        };

        if from.is_empty() || to.is_empty() || pair.is_coincident() {
            return Ok(orientation);
        }

        let length_px = (pair.distance() - self.config.inset_px).max(0.0);
        let (angle_deg, flipped) = self.angle(pair, from, to);
        if length_px.is_finite() && angle_deg.is_finite() {
            orientation.length_px = length_px;
            orientation.angle_deg = angle_deg;
            orientation.flipped = flipped;
            orientation.degenerate = false;
        }
        Ok(orientation)
    }

    fn angle(&self, pair: &ClosestPair, from: &Rect, to: &Rect) -> (f64, bool) {
        let dx = f64::from(pair.to.x) - f64::from(pair.from.x);
        let dy = f64::from(pair.to.y) - f64::from(pair.from.y);
        match self.config.angle_mode {
            AngleMode::SingleQuadrant => {
                // dx == 0 gives ±inf, so vertical segments land on ±90.
                let base = (dy / dx).atan().to_degrees();
                if is_major(from, to) {
                    (base + 180.0, true)
                } else {
                    (base, false)
                }
            }
            AngleMode::FourQuadrant => (dy.atan2(dx).to_degrees(), false),
        }
    }
}

/// The source lies strictly right of the target, judged by left edges.
#[inline]
pub fn is_major(from: &Rect, to: &Rect) -> bool {
    from.left > to.left
}

/// Anchor correction for rectangles aligned on one axis.
///
/// Band test: `to.top - from.height <= from.top <= to.top + max(from.height, to.height)`
/// with no horizontal overlap. Column test is the same on the x axis with no
/// vertical overlap. The replacement coordinate is the midpoint between the
/// facing edges (the later start and the earlier end on that axis).
pub fn alignment_anchor(from: &Rect, to: &Rect) -> Option<AnchorOverride> {
    let shares_band = within_window(from.top, to.top, from.height(), to.height())
        && !from.overlaps_horizontally(to);
    let shares_column = within_window(from.left, to.left, from.width(), to.width())
        && !from.overlaps_vertically(to);

    let y = shares_band.then(|| (from.top.max(to.top) + from.bottom.min(to.bottom)) / 2.0);
    let x = shares_column.then(|| (from.left.max(to.left) + from.right.min(to.right)) / 2.0);

    if x.is_none() && y.is_none() {
        None
    } else {
        Some(AnchorOverride { x, y })
    }
}

#[inline]
fn within_window(start: f64, other_start: f64, extent: f64, other_extent: f64) -> bool {
    start >= other_start - extent && start <= other_start + extent.max(other_extent)
}
