//! Planar primitives shared by every stage of the placement pipeline.
//!
//! Coordinates are screen-like: `x` grows to the right and `y` grows downward, so a rectangle's
//! `top` is its smallest `y`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Cartesian point for polar coordinates centered on the origin.
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    /// `(radius, angle)` of this point relative to the origin.
    pub fn to_polar(self) -> (f64, f64) {
        (self.x.hypot(self.y), self.y.atan2(self.x))
    }

    pub fn half(self) -> Self {
        Self {
            x: self.x / 2.0,
            y: self.y / 2.0,
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Direction of the segment from `self` to `end`, in radians.
    pub fn angle_to(self, end: Point) -> f64 {
        (end.y - self.y).atan2(end.x - self.x)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

/// Point at parameter `t` on the line through `a` and `b` (`t = 0` is `a`, `t = 1` is `b`).
///
/// `t` is not clamped; spiral generation relies on sampling past `b`.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width, self.height).half()
    }
}

/// Axis-aligned rectangle. `left <= right` and `top <= bottom` are assumed, not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right, self.top)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// Outline of this rectangle in trace order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Strict interior test: points on an edge are outside.
    pub fn contains_point(&self, p: Point) -> bool {
        self.left < p.x && p.x < self.right && self.top < p.y && p.y < self.bottom
    }

    /// Strict overlap test: rectangles sharing only an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.right > self.left
            && self.right > other.left
            && other.bottom > self.top
            && self.bottom > other.top
    }

    /// Whether `other` lies within this rectangle, edges included.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.left <= other.left
            && other.right <= self.right
            && self.top <= other.top
            && other.bottom <= self.bottom
    }

    pub fn translate(&mut self, v: Point) {
        self.left += v.x;
        self.right += v.x;
        self.top += v.y;
        self.bottom += v.y;
    }

    pub fn translated(mut self, v: Point) -> Self {
        self.translate(v);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p: Point,
    pub q: Point,
}

impl Segment {
    pub const fn new(p: Point, q: Point) -> Self {
        Self { p, q }
    }

    /// Intersection point of two segments, solved parametrically on both.
    ///
    /// Parallel (including collinear) segments report no intersection.
    pub fn intersection(&self, other: &Segment) -> Option<Point> {
        let s1 = self.q - self.p;
        let s2 = other.q - other.p;
        let denom = -s2.x * s1.y + s1.x * s2.y;
        if denom == 0.0 {
            return None;
        }

        let d = self.p - other.p;
        let s = (-s1.y * d.x + s1.x * d.y) / denom;
        let t = (s2.x * d.y - s2.y * d.x) / denom;
        if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
            Some(self.p + s1 * t)
        } else {
            None
        }
    }
}
