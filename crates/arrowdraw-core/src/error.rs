#![forbid(unsafe_code)]

//! Per-arrow geometry errors.

use thiserror::Error;

/// Standard result type for geometry computations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Why a connector could not be resolved.
///
/// Geometry errors are scoped to a single arrow; callers record them and
/// continue with the remaining arrows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The two rectangles overlap on both axes, so no anchor can be chosen.
    #[error("elements `{from}` and `{to}` overlap on both axes")]
    Overlap { from: String, to: String },
}

impl GeometryError {
    /// Label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Overlap { .. } => "overlap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GeometryError;

    #[test]
    fn overlap_message_names_both_elements() {
        let error = GeometryError::Overlap {
            from: "outer".into(),
            to: "inner".into(),
        };
        assert_eq!(
            error.to_string(),
            "elements `outer` and `inner` overlap on both axes"
        );
        assert_eq!(error.error_type(), "overlap");
    }
}
