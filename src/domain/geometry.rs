// SPDX-License-Identifier: MPL-2.0
//! Geometry primitives shared by the gesture interpreter and the crop math.
//!
//! Everything here is pure and total. Functions taking two points are only
//! ever called once the gesture layer has confirmed two touches exist.

use std::f64::consts::PI;

/// A point in screen space (logical pixels, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the displacement from `origin` to `self`.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Vector {
        Vector::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A displacement in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// Width and height in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

#[must_use]
pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}

/// Angle of the line from `p1` to `p2`, in radians (`atan2(dy, dx)`).
#[must_use]
pub fn angle(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

#[must_use]
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

#[must_use]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Bounding box of a `width` x `height` rectangle rotated by `degrees` about its center.
///
/// Multiples of 90° produce the exact (possibly swapped) dimensions.
#[must_use]
pub fn rotated_bounds(width: f64, height: f64, degrees: f64) -> (f64, f64) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 || normalized == 180.0 {
        return (width, height);
    }
    if normalized == 90.0 || normalized == 270.0 {
        return (height, width);
    }
    let radians = to_radians(degrees);
    let cos = radians.cos().abs();
    let sin = radians.sin().abs();
    (width * cos + height * sin, width * sin + height * cos)
}
