//! Geometry primitives shared by bounds, hit-detection, and the transform
//! engine.
//!
//! Annotation coordinates are stored normalized to the page's current pixel
//! dimensions (roughly [0,1], unbounded mid-drag), which keeps geometry
//! independent of zoom. Anything here that works in pixels takes an explicit
//! [`CanvasSize`].

use serde::{Deserialize, Serialize};

/// A 2D point in normalized page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PagePoint {
    pub x: f32,
    pub y: f32,
}

impl PagePoint {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Convert to canvas pixels
    pub fn to_pixels(&self, canvas: CanvasSize) -> (f32, f32) {
        (self.x * canvas.width, self.y * canvas.height)
    }

    /// Build from a canvas pixel position
    pub fn from_pixels(x: f32, y: f32, canvas: CanvasSize) -> Self {
        Self {
            x: x / canvas.width,
            y: y / canvas.height,
        }
    }

    /// Euclidean distance to another point, in normalized units
    pub fn distance_to(&self, other: &PagePoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Return this point shifted by a normalized delta
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Current pixel dimensions of a rendered page canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Smallest box containing every pixel position in the iterator.
    /// Returns `None` for an empty iterator.
    pub fn from_pixel_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let mut iter = points.into_iter();
        let (first_x, first_y) = iter.next()?;
        let mut bounds = Self::new(first_x, first_y, first_x, first_y);
        for (x, y) in iter {
            bounds.left = bounds.left.min(x);
            bounds.top = bounds.top.min(y);
            bounds.right = bounds.right.max(x);
            bounds.bottom = bounds.bottom.max(y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Shorter of width and height
    pub fn min_dimension(&self) -> f32 {
        self.width().min(self.height())
    }

    /// Point-in-box test, edges inclusive
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Grow (or shrink, for negative margin) uniformly on all sides
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// True when the boxes overlap at all; partial overlap qualifies
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    /// Closest point on (or inside) the box to the given position,
    /// found by clamping each axis into the box range.
    pub fn closest_point_to(&self, x: f32, y: f32) -> (f32, f32) {
        (
            clamp(x, self.left, self.right),
            clamp(y, self.top, self.bottom),
        )
    }
}

/// Euclidean distance between two pixel positions
pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Shortest distance from a point to a line segment.
///
/// Projects the point onto the segment, clamps the projection parameter to
/// [0,1], and measures to the clamped point, so endpoints behave correctly.
pub fn point_to_segment_distance(
    px: f32,
    py: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
) -> f32 {
    let seg_dx = x2 - x1;
    let seg_dy = y2 - y1;
    let length_sq = seg_dx * seg_dx + seg_dy * seg_dy;

    if length_sq == 0.0 {
        return distance(px, py, x1, y1);
    }

    let t = clamp(
        ((px - x1) * seg_dx + (py - y1) * seg_dy) / length_sq,
        0.0,
        1.0,
    );
    distance(px, py, x1 + t * seg_dx, y1 + t * seg_dy)
}

/// Point-in-polygon via ray casting. Vertices in order, polygon implicitly
/// closed. Fewer than 3 vertices is never a containing polygon.
pub fn point_in_polygon(px: f32, py: f32, vertices: &[(f32, f32)]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Clamp a value into [min, max]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}
