#![forbid(unsafe_code)]

//! In-memory element tree implementing every host trait.
//!
//! [`MemoryHost`] stands in for a real document: elements carry bounds, a
//! class, `data-*` attributes and an inline style map. Every change to an
//! element attached under the root is queued as a [`Mutation`]; changes to
//! detached elements are not observable, matching how a live document
//! reports them.
//!
//! [`MemoryDocument`] pairs a host with a [`MutationFeed`] and delivers the
//! queued records in batches, one batch per [`deliver`](MemoryDocument::deliver)
//! call.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use arrowdraw_core::{ArrowSpec, Rect};
use rustc_hash::FxHashMap;

use crate::builder::{CONTAINER_CLASS, head_id, line_id};
use crate::error::HostError;
use crate::host::{ElementFactory, LayoutHost, RenderSink};
use crate::reactive::{Mutation, MutationFeed, MutationKind};
use crate::render::{ArrowStyle, Declaration};

/// Identifier of the root element created by [`MemoryHost::new`].
pub const DEFAULT_ROOT: &str = "body";

/// One element of the in-memory tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub id: String,
    pub class: String,
    /// Resolved layout bounds; `None` for elements that take no part in
    /// layout queries.
    pub bounds: Option<Rect>,
    pub data: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

impl Element {
    fn new(id: &str, class: &str) -> Self {
        Self {
            id: id.to_string(),
            class: class.to_string(),
            ..Self::default()
        }
    }

    /// The class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}

/// An element tree with a queue of pending mutation records.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    root: String,
    elements: FxHashMap<String, Element>,
    pending: Vec<Mutation>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// A tree holding only the [`DEFAULT_ROOT`] element.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(DEFAULT_ROOT)
    }

    #[must_use]
    pub fn with_root(root: impl Into<String>) -> Self {
        let root = root.into();
        let mut elements = FxHashMap::default();
        elements.insert(root.clone(), Element::new(&root, ""));
        Self {
            root,
            elements,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Inline style value of `property` on `id`.
    #[must_use]
    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|e| e.style.get(property))
            .map(String::as_str)
    }

    /// Number of elements, the root included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// `id` is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: &str) -> bool {
        let mut current = id;
        // A well-formed tree reaches the root in fewer hops than it has elements.
        for _ in 0..=self.elements.len() {
            if current == self.root {
                return true;
            }
            match self.elements.get(current).and_then(|e| e.parent.as_deref()) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Create an element with `bounds` and attach it under the root.
    pub fn add_element(&mut self, id: &str, bounds: Rect) -> Result<(), HostError> {
        let root = self.root.clone();
        self.add_element_to(&root, id, bounds)
    }

    /// Create an element with `bounds` and attach it under `parent`.
    pub fn add_element_to(&mut self, parent: &str, id: &str, bounds: Rect) -> Result<(), HostError> {
        if !self.elements.contains_key(parent) {
            return Err(HostError::UnknownElement(parent.to_string()));
        }
        self.create_element(id, "")?;
        if let Some(element) = self.elements.get_mut(id) {
            element.bounds = Some(bounds);
        }
        self.append_child(parent, id)
    }

    /// Move or resize an element, as a layout change would.
    pub fn set_bounds(&mut self, id: &str, bounds: Rect) -> Result<(), HostError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownElement(id.to_string()))?;
        element.bounds = Some(bounds);
        self.record(id, MutationKind::Attribute("style".into()));
        Ok(())
    }

    /// Replace the class list of `id`.
    pub fn set_class(&mut self, id: &str, class: &str) -> Result<(), HostError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownElement(id.to_string()))?;
        element.class = class.to_string();
        self.record(id, MutationKind::Attribute("class".into()));
        Ok(())
    }

    /// Remove `id` and its whole subtree.
    pub fn remove_element(&mut self, id: &str) -> Result<(), HostError> {
        if id == self.root {
            return Err(HostError::Protected(id.to_string()));
        }
        let element = self
            .elements
            .get(id)
            .ok_or_else(|| HostError::UnknownElement(id.to_string()))?;
        let parent = element.parent.clone();

        if let Some(parent) = parent {
            self.record(&parent, MutationKind::ChildList);
            if let Some(p) = self.elements.get_mut(&parent) {
                p.children.retain(|c| c != id);
            }
        }

        let mut stack = vec![id.to_string()];
        while let Some(next) = stack.pop() {
            if let Some(removed) = self.elements.remove(&next) {
                stack.extend(removed.children);
            }
        }
        Ok(())
    }

    /// Records queued since the last [`take_mutations`](Self::take_mutations).
    #[must_use]
    pub fn pending_mutations(&self) -> &[Mutation] {
        &self.pending
    }

    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.pending)
    }

    fn record(&mut self, target: &str, kind: MutationKind) {
        if self.is_attached(target) {
            self.pending.push(Mutation {
                target: target.to_string(),
                kind,
            });
        }
    }

    fn write_geometry(&mut self, id: &str, declarations: Vec<Declaration>) {
        if let Some(element) = self.elements.get_mut(id) {
            for (property, value) in declarations {
                element.style.insert(property.to_string(), value);
            }
            self.record(id, MutationKind::GeometryWrite);
        }
    }

    fn require(&self, id: &str) -> Result<(), HostError> {
        if self.elements.contains_key(id) {
            Ok(())
        } else {
            Err(HostError::UnknownElement(id.to_string()))
        }
    }
}

impl LayoutHost for MemoryHost {
    fn bounds(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).and_then(|e| e.bounds)
    }

    fn declared_arrows(&self) -> Vec<ArrowSpec> {
        let mut arrows = Vec::new();
        let mut stack = vec![self.root.as_str()];
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            if element.has_class(CONTAINER_CLASS) {
                if let (Some(from), Some(to)) = (element.data.get("from"), element.data.get("to")) {
                    arrows.push(ArrowSpec {
                        id: element.id.clone(),
                        from: from.clone(),
                        to: to.clone(),
                        color: element.data.get("color").cloned(),
                    });
                }
            }
            stack.extend(element.children.iter().rev().map(String::as_str));
        }
        arrows
    }
}

impl RenderSink for MemoryHost {
    fn apply_arrow_style(&mut self, arrow_id: &str, style: &ArrowStyle) -> Result<(), HostError> {
        let line = line_id(arrow_id);
        let head = head_id(arrow_id);
        self.require(arrow_id)?;
        self.require(&line)?;
        self.require(&head)?;

        let declarations = style.declarations();
        self.write_geometry(arrow_id, declarations.container);
        self.write_geometry(&line, declarations.line);
        self.write_geometry(&head, declarations.head);
        Ok(())
    }

    fn hide_arrow(&mut self, arrow_id: &str) -> Result<(), HostError> {
        self.require(arrow_id)?;
        self.write_geometry(arrow_id, vec![("display", "none".to_string())]);
        Ok(())
    }
}

impl ElementFactory for MemoryHost {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn create_element(&mut self, id: &str, class: &str) -> Result<(), HostError> {
        if self.elements.contains_key(id) {
            return Err(HostError::DuplicateId(id.to_string()));
        }
        self.elements.insert(id.to_string(), Element::new(id, class));
        Ok(())
    }

    fn set_data(&mut self, id: &str, key: &str, value: &str) -> Result<(), HostError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownElement(id.to_string()))?;
        element.data.insert(key.to_string(), value.to_string());
        self.record(id, MutationKind::Attribute(format!("data-{key}")));
        Ok(())
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> Result<(), HostError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownElement(id.to_string()))?;
        element.style.insert(property.to_string(), value.to_string());
        self.record(id, MutationKind::Attribute("style".into()));
        Ok(())
    }

    fn append_child(&mut self, parent: &str, child: &str) -> Result<(), HostError> {
        self.require(parent)?;
        self.require(child)?;
        if child == self.root {
            return Err(HostError::Protected(child.to_string()));
        }

        let mut ancestor = Some(parent.to_string());
        while let Some(current) = ancestor {
            if current == child {
                return Err(HostError::Cycle {
                    parent: parent.to_string(),
                    child: child.to_string(),
                });
            }
            ancestor = self.elements.get(&current).and_then(|e| e.parent.clone());
        }

        let previous = self.elements.get(child).and_then(|e| e.parent.clone());
        if let Some(previous) = previous {
            self.record(&previous, MutationKind::ChildList);
            if let Some(p) = self.elements.get_mut(&previous) {
                p.children.retain(|c| c != child);
            }
        }

        if let Some(c) = self.elements.get_mut(child) {
            c.parent = Some(parent.to_string());
        }
        if let Some(p) = self.elements.get_mut(parent) {
            p.children.push(child.to_string());
        }
        self.record(parent, MutationKind::ChildList);
        Ok(())
    }
}

/// Outcome of [`MemoryDocument::deliver_until_quiet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// Batches published.
    pub rounds: usize,
    /// Records delivered across all batches.
    pub records: usize,
    /// The queue was empty when delivery stopped.
    pub quiet: bool,
}

/// A [`MemoryHost`] shared with a [`MutationFeed`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    host: Rc<RefCell<MemoryHost>>,
    feed: MutationFeed,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new(MemoryHost::new())
    }
}

impl MemoryDocument {
    #[must_use]
    pub fn new(host: MemoryHost) -> Self {
        Self {
            host: Rc::new(RefCell::new(host)),
            feed: MutationFeed::new(),
        }
    }

    /// Shared handle to the host, for [`ReactiveRecalculator::activate`](crate::ReactiveRecalculator::activate).
    #[must_use]
    pub fn host(&self) -> Rc<RefCell<MemoryHost>> {
        Rc::clone(&self.host)
    }

    #[must_use]
    pub fn feed(&self) -> &MutationFeed {
        &self.feed
    }

    /// Run `f` with mutable access to the host.
    pub fn edit<R>(&self, f: impl FnOnce(&mut MemoryHost) -> R) -> Result<R, HostError> {
        let mut host = self
            .host
            .try_borrow_mut()
            .map_err(|_| HostError::Busy("document is borrowed"))?;
        Ok(f(&mut host))
    }

    /// Run `f` with shared access to the host.
    pub fn read<R>(&self, f: impl FnOnce(&MemoryHost) -> R) -> Result<R, HostError> {
        let host = self
            .host
            .try_borrow()
            .map_err(|_| HostError::Busy("document is mutably borrowed"))?;
        Ok(f(&host))
    }

    /// Publish every queued record as one batch.
    ///
    /// The host borrow is released before subscribers run. Returns the number
    /// of records delivered.
    pub fn deliver(&self) -> usize {
        let batch = match self.host.try_borrow_mut() {
            Ok(mut host) => host.take_mutations(),
            Err(_) => return 0,
        };
        self.feed.publish(&batch);
        batch.len()
    }

    /// Deliver batches until the queue stays empty or `max_rounds` batches
    /// have been published.
    pub fn deliver_until_quiet(&self, max_rounds: usize) -> Settled {
        let mut settled = Settled {
            rounds: 0,
            records: 0,
            quiet: false,
        };
        while settled.rounds < max_rounds {
            let delivered = self.deliver();
            if delivered == 0 {
                break;
            }
            settled.rounds += 1;
            settled.records += delivered;
        }
        settled.quiet = self
            .host
            .try_borrow()
            .map(|host| host.pending_mutations().is_empty())
            .unwrap_or(false);
        settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::create_arrow;

    fn rect(l: f64, t: f64, r: f64, b: f64) -> Rect {
        Rect::new(l, t, r, b)
    }

    #[test]
    fn attached_changes_are_queued() {
        let mut host = MemoryHost::new();
        host.add_element("a", rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        host.set_bounds("a", rect(5.0, 0.0, 15.0, 10.0)).unwrap();

        assert_eq!(
            host.take_mutations(),
            vec![
                Mutation::child_list("body"),
                Mutation::attribute("a", "style"),
            ]
        );
        assert!(host.pending_mutations().is_empty());
        assert_eq!(host.bounds("a"), Some(rect(5.0, 0.0, 15.0, 10.0)));
    }

    #[test]
    fn detached_changes_are_silent() {
        let mut host = MemoryHost::new();
        host.create_element("loose", "").unwrap();
        host.set_data("loose", "from", "a").unwrap();
        host.set_style("loose", "display", "none").unwrap();
        assert!(host.pending_mutations().is_empty());
        assert!(!host.is_attached("loose"));
    }

    #[test]
    fn remove_drops_subtree() {
        let mut host = MemoryHost::new();
        host.add_element("outer", rect(0.0, 0.0, 100.0, 100.0)).unwrap();
        host.add_element_to("outer", "inner", rect(10.0, 10.0, 20.0, 20.0))
            .unwrap();
        host.take_mutations();

        host.remove_element("outer").unwrap();
        assert!(host.element("inner").is_none());
        assert_eq!(host.bounds("outer"), None);
        assert_eq!(host.take_mutations(), vec![Mutation::child_list("body")]);
        assert_eq!(
            host.remove_element("body"),
            Err(HostError::Protected("body".into()))
        );
    }

    #[test]
    fn append_rejects_cycles() {
        let mut host = MemoryHost::new();
        host.add_element("a", rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        host.add_element_to("a", "b", rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(
            host.append_child("b", "a"),
            Err(HostError::Cycle {
                parent: "b".into(),
                child: "a".into()
            })
        );
    }

    #[test]
    fn arrows_are_discovered_in_document_order() {
        let mut host = MemoryHost::new();
        host.add_element("x", rect(0.0, 0.0, 10.0, 10.0)).unwrap();
        host.add_element("y", rect(50.0, 0.0, 60.0, 10.0)).unwrap();
        create_arrow(&mut host, "second", "y", "x", "body", None).unwrap();
        create_arrow(&mut host, "first", "x", "y", "x", Some("red")).unwrap();

        let arrows = host.declared_arrows();
        let ids: Vec<_> = arrows.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(arrows[0].color.as_deref(), Some("red"));
        assert_eq!(arrows[1].color, None);
    }

    #[test]
    fn apply_style_writes_three_elements() {
        let mut host = MemoryHost::new();
        create_arrow(&mut host, "a1", "x", "y", "body", Some("blue")).unwrap();
        host.take_mutations();

        let style = ArrowStyle {
            width_px: 90.0,
            left_px: 100.0,
            top_px: 25.0,
            rotation_deg: 0.0,
            color: "blue".into(),
            head_px: 10.0,
        };
        host.apply_arrow_style("a1", &style).unwrap();

        assert_eq!(host.style("a1", "display"), Some("block"));
        assert_eq!(host.style("a1", "left"), Some("100px"));
        assert_eq!(host.style("line-a1", "border-color"), Some("blue"));
        assert_eq!(host.style("arrow-a1", "border-left"), Some("10px solid blue"));
        assert!(host.pending_mutations().iter().all(Mutation::is_geometry_write));
        assert_eq!(host.pending_mutations().len(), 3);
    }

    #[test]
    fn apply_style_to_unknown_arrow_fails() {
        let mut host = MemoryHost::new();
        let style = ArrowStyle {
            width_px: 0.0,
            left_px: 0.0,
            top_px: 0.0,
            rotation_deg: 0.0,
            color: "black".into(),
            head_px: 10.0,
        };
        assert_eq!(
            host.apply_arrow_style("ghost", &style),
            Err(HostError::UnknownElement("ghost".into()))
        );
    }

    #[test]
    fn document_delivers_one_batch_per_call() {
        let doc = MemoryDocument::default();
        let batches = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::clone(&batches);
        let _sub = doc.feed().subscribe(move |batch| b.borrow_mut().push(batch.len()));

        doc.edit(|host| {
            host.add_element("a", rect(0.0, 0.0, 10.0, 10.0)).unwrap();
            host.add_element("b", rect(20.0, 0.0, 30.0, 10.0)).unwrap();
        })
        .unwrap();
        assert_eq!(doc.deliver(), 2);
        assert_eq!(doc.deliver(), 0);
        assert_eq!(*batches.borrow(), vec![2]);
    }

    #[test]
    fn deliver_until_quiet_stops_on_empty_queue() {
        let doc = MemoryDocument::default();
        doc.edit(|host| host.add_element("a", rect(0.0, 0.0, 10.0, 10.0)))
            .unwrap()
            .unwrap();
        let settled = doc.deliver_until_quiet(8);
        assert_eq!(
            settled,
            Settled {
                rounds: 1,
                records: 1,
                quiet: true
            }
        );
    }

    #[test]
    fn edit_while_borrowed_reports_busy() {
        let doc = MemoryDocument::default();
        let host = doc.host();
        let _held = host.borrow_mut();
        assert_eq!(doc.edit(|_| ()), Err(HostError::Busy("document is borrowed")));
        assert_eq!(doc.deliver(), 0);
    }
}
