#![forbid(unsafe_code)]

//! Per-pass results and running counters.

use arrowdraw_core::ArrowGeometry;
use serde::{Deserialize, Serialize};

/// Terminal outcome of one arrow in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ArrowOutcome {
    /// Geometry was computed and written.
    Resolved(ArrowGeometry),
    /// The two elements overlap on both axes; nothing was written.
    OverlapFailure {
        arrow_id: String,
        from: String,
        to: String,
    },
    /// `missing` does not name a live element; the arrow was skipped.
    MissingReference { arrow_id: String, missing: String },
}

impl ArrowOutcome {
    #[must_use]
    pub fn arrow_id(&self) -> &str {
        match self {
            Self::Resolved(geometry) => &geometry.arrow_id,
            Self::OverlapFailure { arrow_id, .. } | Self::MissingReference { arrow_id, .. } => {
                arrow_id
            }
        }
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&ArrowGeometry> {
        match self {
            Self::Resolved(geometry) => Some(geometry),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Resolved(_))
    }
}

impl std::fmt::Display for ArrowOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(g) => write!(
                f,
                "{}: resolved (length {}px, angle {}deg)",
                g.arrow_id, g.length_px, g.angle_deg
            ),
            Self::OverlapFailure { arrow_id, from, to } => write!(
                f,
                "{arrow_id}: elements `{from}` and `{to}` overlap on both axes"
            ),
            Self::MissingReference { arrow_id, missing } => {
                write!(f, "{arrow_id}: element `{missing}` does not exist")
            }
        }
    }
}

/// Everything one recalculation pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassReport {
    /// 1-based pass number.
    pub pass: u64,
    /// One outcome per declared arrow, in declaration order.
    pub outcomes: Vec<ArrowOutcome>,
    /// Point pairs evaluated by the closest-point search across all arrows.
    pub pairs_scanned: u64,
    pub duration_us: u64,
}

impl PassReport {
    pub fn resolved(&self) -> impl Iterator<Item = &ArrowGeometry> {
        self.outcomes.iter().filter_map(ArrowOutcome::geometry)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArrowOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Geometry of `arrow_id`, if it resolved in this pass.
    #[must_use]
    pub fn geometry(&self, arrow_id: &str) -> Option<&ArrowGeometry> {
        self.resolved().find(|g| g.arrow_id == arrow_id)
    }

    /// Every arrow resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Running counters kept by a recalculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcStats {
    /// Passes run to completion.
    pub passes: u64,
    /// Notifications or calls dropped because a pass was already running.
    pub suppressed: u64,
    /// Batches ignored because they held only geometry writes.
    pub skipped: u64,
}
