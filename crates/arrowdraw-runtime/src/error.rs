#![forbid(unsafe_code)]

//! Errors raised by host collaborators.

use thiserror::Error;

/// Failure reported by a host while creating or styling elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("element `{0}` does not exist")]
    UnknownElement(String),

    #[error("element `{0}` already exists")]
    DuplicateId(String),

    #[error("element `{0}` cannot be removed")]
    Protected(String),

    #[error("attaching `{child}` under `{parent}` would create a cycle")]
    Cycle { parent: String, child: String },

    #[error("host is busy: {0}")]
    Busy(&'static str),
}

impl HostError {
    /// Label for tracing fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnknownElement(_) => "unknown_element",
            Self::DuplicateId(_) => "duplicate_id",
            Self::Protected(_) => "protected",
            Self::Cycle { .. } => "cycle",
            Self::Busy(_) => "busy",
        }
    }
}
