#![forbid(unsafe_code)]

//! Creates the elements backing a declared arrow.
//!
//! ```text
//! <container>
//! └── div#{id}.arrow-container  data-from data-to [data-color]  (display: none)
//!     ├── div#line-{id}.line
//!     └── div#arrow-{id}.arrow
//! ```
//!
//! The container stays hidden until the first pass resolves the arrow.
//! `data-color` is only written when a color is given; otherwise the
//! recalculator's configured default color applies.

use tracing::debug;

use crate::error::HostError;
use crate::host::ElementFactory;

/// Class marking an arrow container for discovery.
pub const CONTAINER_CLASS: &str = "arrow-container";
pub const LINE_CLASS: &str = "line";
pub const HEAD_CLASS: &str = "arrow";

#[must_use]
pub fn line_id(arrow_id: &str) -> String {
    format!("line-{arrow_id}")
}

#[must_use]
pub fn head_id(arrow_id: &str) -> String {
    format!("arrow-{arrow_id}")
}

/// Identifiers of the three elements created for one arrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowHandle {
    pub container: String,
    pub line: String,
    pub head: String,
}

/// Create and attach the elements for arrow `id` from `from` to `to`.
///
/// Nothing is created when `container` is missing or any of the three ids is
/// already taken.
pub fn create_arrow<F: ElementFactory + ?Sized>(
    factory: &mut F,
    id: &str,
    from: &str,
    to: &str,
    container: &str,
    color: Option<&str>,
) -> Result<ArrowHandle, HostError> {
    if !factory.has_element(container) {
        return Err(HostError::UnknownElement(container.to_string()));
    }
    let handle = ArrowHandle {
        container: id.to_string(),
        line: line_id(id),
        head: head_id(id),
    };
    for taken in [&handle.container, &handle.line, &handle.head] {
        if factory.has_element(taken) {
            return Err(HostError::DuplicateId(taken.clone()));
        }
    }

    factory.create_element(&handle.container, CONTAINER_CLASS)?;
    factory.set_data(&handle.container, "from", from)?;
    factory.set_data(&handle.container, "to", to)?;
    if let Some(color) = color {
        factory.set_data(&handle.container, "color", color)?;
    }
    factory.set_style(&handle.container, "display", "none")?;

    factory.create_element(&handle.line, LINE_CLASS)?;
    factory.create_element(&handle.head, HEAD_CLASS)?;
    factory.append_child(&handle.container, &handle.line)?;
    factory.append_child(&handle.container, &handle.head)?;
    factory.append_child(container, &handle.container)?;

    debug!(arrow_id = id, from, to, container, "Created arrow elements");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LayoutHost;
    use crate::memory::MemoryHost;
    use crate::reactive::Mutation;

    #[test]
    fn creates_hidden_container_with_children() {
        let mut host = MemoryHost::new();
        let handle = create_arrow(&mut host, "a1", "x", "y", "body", Some("red")).unwrap();
        assert_eq!(
            handle,
            ArrowHandle {
                container: "a1".into(),
                line: "line-a1".into(),
                head: "arrow-a1".into(),
            }
        );

        let container = host.element("a1").unwrap();
        assert!(container.has_class(CONTAINER_CLASS));
        assert_eq!(container.data.get("from").map(String::as_str), Some("x"));
        assert_eq!(container.data.get("to").map(String::as_str), Some("y"));
        assert_eq!(container.data.get("color").map(String::as_str), Some("red"));
        assert_eq!(container.children, vec!["line-a1", "arrow-a1"]);
        assert_eq!(host.style("a1", "display"), Some("none"));
        assert_eq!(host.element("line-a1").unwrap().class, LINE_CLASS);
        assert_eq!(host.element("arrow-a1").unwrap().class, HEAD_CLASS);
    }

    #[test]
    fn attaching_reports_one_child_list_change() {
        let mut host = MemoryHost::new();
        create_arrow(&mut host, "a1", "x", "y", "body", None).unwrap();
        assert_eq!(host.take_mutations(), vec![Mutation::child_list("body")]);
    }

    #[test]
    fn color_is_left_to_configuration() {
        let mut host = MemoryHost::new();
        create_arrow(&mut host, "a1", "x", "y", "body", None).unwrap();
        let container = host.element("a1").unwrap();
        assert!(container.data.get("color").is_none());
        assert_eq!(host.declared_arrows()[0].color, None);
    }

    #[test]
    fn missing_container_creates_nothing() {
        let mut host = MemoryHost::new();
        let err = create_arrow(&mut host, "a1", "x", "y", "canvas", None).unwrap_err();
        assert_eq!(err, HostError::UnknownElement("canvas".into()));
        assert_eq!(host.element_count(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut host = MemoryHost::new();
        create_arrow(&mut host, "a1", "x", "y", "body", None).unwrap();
        let err = create_arrow(&mut host, "a1", "y", "x", "body", None).unwrap_err();
        assert_eq!(err, HostError::DuplicateId("a1".into()));

        host.create_element("line-a2", "").unwrap();
        let err = create_arrow(&mut host, "a2", "x", "y", "body", None).unwrap_err();
        assert_eq!(err, HostError::DuplicateId("line-a2".into()));
    }
}
