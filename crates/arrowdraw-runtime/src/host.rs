#![forbid(unsafe_code)]

//! Traits the host environment implements.
//!
//! The runtime never owns the visual tree. It reads bounds and arrow
//! declarations through [`LayoutHost`], writes styles through [`RenderSink`]
//! and creates arrow elements through [`ElementFactory`].

use arrowdraw_core::{ArrowSpec, Rect};

use crate::error::HostError;
use crate::render::ArrowStyle;

/// Read access to resolved layout.
pub trait LayoutHost {
    /// Current bounds of `id` in viewport coordinates, or `None` when no
    /// such element is live.
    fn bounds(&self, id: &str) -> Option<Rect>;

    /// Every arrow currently declared in the document, in document order.
    fn declared_arrows(&self) -> Vec<ArrowSpec>;
}

/// Write access for finished arrow styles.
pub trait RenderSink {
    fn apply_arrow_style(&mut self, arrow_id: &str, style: &ArrowStyle) -> Result<(), HostError>;

    /// Hide an arrow that has never been drawn.
    fn hide_arrow(&mut self, arrow_id: &str) -> Result<(), HostError>;
}

/// Element creation, used by [`create_arrow`](crate::builder::create_arrow).
pub trait ElementFactory {
    fn has_element(&self, id: &str) -> bool;

    /// Create a detached element.
    fn create_element(&mut self, id: &str, class: &str) -> Result<(), HostError>;

    /// Set a `data-*` attribute.
    fn set_data(&mut self, id: &str, key: &str, value: &str) -> Result<(), HostError>;

    /// Set an inline style property.
    fn set_style(&mut self, id: &str, property: &str, value: &str) -> Result<(), HostError>;

    fn append_child(&mut self, parent: &str, child: &str) -> Result<(), HostError>;
}
