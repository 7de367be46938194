#![forbid(unsafe_code)]

//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// Largest edge magnitude (2^24 px) a rectangle may have and still be searched.
///
/// Bounds past this are treated as degenerate by the arrow pipeline.
pub const MAX_COORDINATE: f64 = 16_777_216.0;

/// A rectangle snapshot as reported by the host layout system.
///
/// Uses viewport coordinates (origin at top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge (always `>= left`).
    pub right: f64,
    /// Bottom edge (always `>= top`).
    pub bottom: f64,
}

impl Rect {
    /// Create a new rectangle from its four edges.
    ///
    /// Swapped edges are normalized so that `right >= left` and
    /// `bottom >= top`.
    #[inline]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width (`right - left`).
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height (`bottom - top`).
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// All four edges are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Finite, with every edge within `±MAX_COORDINATE`.
    #[inline]
    pub fn is_searchable(&self) -> bool {
        self.is_finite()
            && [self.left, self.top, self.right, self.bottom]
                .iter()
                .all(|edge| edge.abs() <= MAX_COORDINATE)
    }

    /// The x-ranges share interior points. Touching edges do not count.
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left < other.right && other.left < self.right
    }

    /// The y-ranges share interior points. Touching edges do not count.
    #[inline]
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top < other.bottom && other.top < self.bottom
    }

    /// Overlap on both axes.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }

    /// Snap outward onto the integer pixel grid that contains this rectangle.
    pub fn to_pixels(&self) -> PixelRect {
        // `as` saturates on overflow and maps NaN to 0.
        PixelRect::new(
            self.left.floor() as i32,
            self.top.floor() as i32,
            self.right.ceil() as i32,
            self.bottom.ceil() as i32,
        )
    }
}

/// A rectangle aligned to the integer pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    /// Create a new pixel rectangle, normalizing swapped edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (left, right) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
        let (top, bottom) = if top <= bottom {
            (top, bottom)
        } else {
            (bottom, top)
        };
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width in pixels.
    #[inline]
    pub const fn width(&self) -> u64 {
        (self.right as i64 - self.left as i64) as u64
    }

    /// Height in pixels.
    #[inline]
    pub const fn height(&self) -> u64 {
        (self.bottom as i64 - self.top as i64) as u64
    }

    /// Number of boundary points in one clockwise traversal.
    ///
    /// A rectangle collapsed to a single point still has that point.
    #[inline]
    pub const fn perimeter_len(&self) -> u64 {
        let len = 2 * (self.width() + self.height());
        if len == 0 { 1 } else { len }
    }

    /// Check if a point lies on one of the four edges.
    #[inline]
    pub const fn on_boundary(&self, point: BoundaryPoint) -> bool {
        let within_x = point.x >= self.left && point.x <= self.right;
        let within_y = point.y >= self.top && point.y <= self.bottom;
        let on_vertical = (point.x == self.left || point.x == self.right) && within_y;
        let on_horizontal = (point.y == self.top || point.y == self.bottom) && within_x;
        on_vertical || on_horizontal
    }

    /// Squared distance from a point to the closed rectangle region.
    ///
    /// Zero when the point lies inside or on the boundary.
    #[inline]
    pub fn region_distance_sq(&self, point: BoundaryPoint) -> i64 {
        let x = i64::from(point.x);
        let y = i64::from(point.y);
        let dx = (i64::from(self.left) - x).max(0).max(x - i64::from(self.right));
        let dy = (i64::from(self.top) - y).max(0).max(y - i64::from(self.bottom));
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

/// A pixel-resolution point on a rectangle's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundaryPoint {
    pub x: i32,
    pub y: i32,
}

impl BoundaryPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, saturating at `i64::MAX`.
    #[inline]
    pub fn distance_sq(self, other: BoundaryPoint) -> i64 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: BoundaryPoint) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }
}
