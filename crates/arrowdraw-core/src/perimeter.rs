#![forbid(unsafe_code)]

//! Clockwise boundary traversal at pixel resolution.
//!
//! [`PerimeterWalk`] enumerates every integer point on a [`PixelRect`]'s
//! boundary exactly once, starting at the top-left corner:
//!
//! ```text
//!   (left,top) ──────────► (right,top)
//!        ▲                      │
//!        │                      ▼
//!  (left,bottom) ◄──────── (right,bottom)
//! ```
//!
//! The walk is finite (`2 * (width + height)` points) and restartable: clone
//! it or build a new one from the same rectangle. Nothing is cached between
//! calls because bounds may change between recomputation passes.
//!
//! # Usage
//!
//! ```
//! use arrowdraw_core::perimeter::PerimeterWalk;
//! use arrowdraw_core::rect::PixelRect;
//!
//! let walk = PerimeterWalk::new(PixelRect::new(0, 0, 2, 1));
//! let points: Vec<_> = walk.map(|p| (p.x, p.y)).collect();
//! assert_eq!(points, vec![(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]);
//! ```

use crate::rect::{BoundaryPoint, PixelRect};

/// Move one pixel clockwise along the edge that contains `point`.
///
/// Corners turn onto the next edge in clockwise order. A rectangle collapsed
/// to a single point maps that point to itself.
///
/// `point` must lie on `rect`'s boundary; other points are returned unchanged.
#[inline]
pub fn advance(point: BoundaryPoint, rect: &PixelRect) -> BoundaryPoint {
    let BoundaryPoint { x, y } = point;
    if y == rect.top && x < rect.right && x >= rect.left {
        BoundaryPoint::new(x + 1, y)
    } else if x == rect.right && y < rect.bottom && y >= rect.top {
        BoundaryPoint::new(x, y + 1)
    } else if y == rect.bottom && x > rect.left && x <= rect.right {
        BoundaryPoint::new(x - 1, y)
    } else if x == rect.left && y > rect.top && y <= rect.bottom {
        BoundaryPoint::new(x, y - 1)
    } else {
        point
    }
}

/// Iterator over a rectangle's boundary points in clockwise order.
#[derive(Debug, Clone)]
pub struct PerimeterWalk {
    rect: PixelRect,
    current: BoundaryPoint,
    remaining: u64,
}

impl PerimeterWalk {
    /// Start a walk at `(left, top)`.
    #[must_use]
    pub fn new(rect: PixelRect) -> Self {
        Self {
            rect,
            current: BoundaryPoint::new(rect.left, rect.top),
            remaining: rect.perimeter_len(),
        }
    }

    /// The rectangle being walked.
    #[must_use]
    pub fn rect(&self) -> PixelRect {
        self.rect
    }
}

impl Iterator for PerimeterWalk {
    type Item = BoundaryPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let point = self.current;
        self.current = advance(point, &self.rect);
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (len, Some(len))
    }
}

impl ExactSizeIterator for PerimeterWalk {}

impl std::iter::FusedIterator for PerimeterWalk {}
