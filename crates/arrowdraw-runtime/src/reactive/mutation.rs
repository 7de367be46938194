#![forbid(unsafe_code)]

//! Mutation records delivered by the host's change feed.

/// What changed on the target element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Children were inserted or removed.
    ChildList,
    /// A named attribute changed (`style`, `class`, `data-from`, ...).
    Attribute(String),
    /// A style write issued by the recalculator itself.
    GeometryWrite,
}

/// A single change record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mutation {
    /// Identifier of the element the change happened on.
    pub target: String,
    pub kind: MutationKind,
}

impl Mutation {
    pub fn child_list(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: MutationKind::ChildList,
        }
    }

    pub fn attribute(target: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: MutationKind::Attribute(name.into()),
        }
    }

    pub fn geometry_write(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: MutationKind::GeometryWrite,
        }
    }

    /// The record was authored by a recalculation pass.
    #[must_use]
    pub fn is_geometry_write(&self) -> bool {
        matches!(self.kind, MutationKind::GeometryWrite)
    }
}

/// Classifies mutation batches.
///
/// A batch is layout-relevant when at least one record is something other
/// than a geometry write. Batches made only of geometry writes are echoes of
/// a previous pass and must not start another one, which is what lets the
/// recalculation loop reach a fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeFilter;

impl ChangeFilter {
    #[must_use]
    pub fn is_layout_relevant(&self, batch: &[Mutation]) -> bool {
        batch.iter().any(|m| !m.is_geometry_write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_not_relevant() {
        assert!(!ChangeFilter.is_layout_relevant(&[]));
    }

    #[test]
    fn geometry_only_batch_is_skipped() {
        let batch = [
            Mutation::geometry_write("a1"),
            Mutation::geometry_write("line-a1"),
        ];
        assert!(!ChangeFilter.is_layout_relevant(&batch));
    }

    #[test]
    fn any_other_record_makes_batch_relevant() {
        let batch = [
            Mutation::geometry_write("a1"),
            Mutation::attribute("box", "style"),
        ];
        assert!(ChangeFilter.is_layout_relevant(&batch));
        assert!(ChangeFilter.is_layout_relevant(&[Mutation::child_list("body")]));
    }
}
