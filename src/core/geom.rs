//! Playfield Geometry
//!
//! Sizes, points and rectangles in playfield points (f32).
//! Tokens are axis-aligned rectangles positioned by their top-left origin,
//! with y growing downward as in screen coordinates.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A width/height pair in playfield points.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in points
    pub w: f32,
    /// Height in points
    pub h: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self { w: 0.0, h: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x{:.1}", self.w, self.h)
    }
}

/// A position in playfield points (top-left origin).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in points
    pub x: f32,
    /// Y coordinate in points
    pub y: f32,
}

impl Point {
    /// Origin point
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// An axis-aligned rectangle: origin (top-left) plus size.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Point,
    /// Extent
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Rightmost x coordinate.
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.w
    }

    /// Bottommost y coordinate.
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.h
    }

    /// Whether this rectangle lies entirely inside a playfield of the
    /// given bounds (origin at (0, 0)).
    #[inline]
    pub fn fits_inside(&self, bounds: Size) -> bool {
        self.origin.x >= 0.0
            && self.origin.y >= 0.0
            && self.max_x() <= bounds.w
            && self.max_y() <= bounds.h
    }

    /// Whether a point lies inside this rectangle (edges inclusive).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x <= self.max_x() && p.y >= self.origin.y && p.y <= self.max_y()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.size)
    }
}
