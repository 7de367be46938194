//! Scene files: element bounds plus arrow declarations.
//!
//! ```json
//! {
//!   "container": "body",
//!   "elements": [
//!     { "id": "a", "left": 0, "top": 0, "right": 100, "bottom": 50 },
//!     { "id": "b", "left": 200, "top": 0, "right": 300, "bottom": 50 }
//!   ],
//!   "arrows": [{ "id": "ab", "from": "a", "to": "b", "color": "red" }]
//! }
//! ```
//!
//! Each element's snapped perimeter must stay within [`MAX_PERIMETER_PX`].

use std::path::Path;

use arrowdraw_core::{ArrowSpec, Rect};
use arrowdraw_runtime::{DEFAULT_ROOT, MemoryDocument, MemoryHost, create_arrow};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Largest snapped perimeter (in pixels) a scene element may have.
///
/// The closest-point search walks both perimeters, so one arrow costs up to
/// `|P(from)| * |P(to)|` distance evaluations. At this cap (a 4096 px square)
/// that is about 2.7e8 pairs in the worst case.
pub const MAX_PERIMETER_PX: u64 = 16_384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl SceneElement {
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    #[serde(default)]
    pub arrows: Vec<ArrowSpec>,
}

fn default_container() -> String {
    DEFAULT_ROOT.to_string()
}

impl Scene {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Reject elements whose perimeter exceeds [`MAX_PERIMETER_PX`].
    pub fn validate(&self) -> Result<()> {
        for element in &self.elements {
            let perimeter = element.bounds().to_pixels().perimeter_len();
            if perimeter > MAX_PERIMETER_PX {
                return Err(CliError::invalid(format!(
                    "element `{}` perimeter {perimeter} px exceeds the {MAX_PERIMETER_PX} px limit",
                    element.id
                )));
            }
        }
        Ok(())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Build an in-memory document holding every element and arrow.
    ///
    /// Arrows may reference ids the scene does not define; those surface as
    /// missing-reference outcomes when the document is resolved.
    pub fn into_document(self) -> Result<MemoryDocument> {
        let mut host = MemoryHost::with_root(self.container.as_str());
        for element in &self.elements {
            host.add_element(&element.id, element.bounds())?;
        }
        for arrow in &self.arrows {
            create_arrow(
                &mut host,
                &arrow.id,
                &arrow.from,
                &arrow.to,
                &self.container,
                arrow.color.as_deref(),
            )?;
        }
        host.take_mutations();
        Ok(MemoryDocument::new(host))
    }
}
