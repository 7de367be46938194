#![forbid(unsafe_code)]

//! Style values written onto an arrow's three elements.
//!
//! ```text
//! container  width, left, top, transform, transform-origin, display
//! line       width, border-color
//! head       border-left
//! ```

use arrowdraw_core::ArrowGeometry;
use serde::{Deserialize, Serialize};

/// Arrowhead size in pixels when none is configured.
pub const DEFAULT_HEAD_PX: f64 = 10.0;

/// Finished style for one arrow, derived from its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub width_px: f64,
    pub left_px: f64,
    pub top_px: f64,
    pub rotation_deg: f64,
    pub color: String,
    pub head_px: f64,
}

/// A CSS-like property/value pair.
pub type Declaration = (&'static str, String);

/// Declarations grouped by target element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Declarations {
    pub container: Vec<Declaration>,
    pub line: Vec<Declaration>,
    pub head: Vec<Declaration>,
}

impl ArrowStyle {
    #[must_use]
    pub fn from_geometry(geometry: &ArrowGeometry, head_px: f64) -> Self {
        Self {
            width_px: geometry.length_px,
            left_px: geometry.origin_x,
            top_px: geometry.origin_y,
            rotation_deg: geometry.angle_deg,
            color: geometry.color.clone(),
            head_px,
        }
    }

    /// Render the style as per-element declarations.
    #[must_use]
    pub fn declarations(&self) -> Declarations {
        let width = px(self.width_px);
        Declarations {
            container: vec![
                ("width", width.clone()),
                ("left", px(self.left_px)),
                ("top", px(self.top_px)),
                ("transform", format!("rotate({}deg)", self.rotation_deg)),
                ("transform-origin", "0 0".to_string()),
                ("display", "block".to_string()),
            ],
            line: vec![("width", width), ("border-color", self.color.clone())],
            head: vec![(
                "border-left",
                format!("{} solid {}", px(self.head_px), self.color),
            )],
        }
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}
