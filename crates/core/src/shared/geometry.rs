//! 2-D vector primitives shared by the landmark scorers.

use std::ops::{Add, Div, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Centroid of `points`, or `None` for an empty slice.
pub fn mean(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point::default(), |acc, &p| acc + p);
    Some(sum / points.len() as f64)
}

pub fn distance(p: Point, q: Point) -> f64 {
    (p - q).norm()
}

pub fn midpoint(p: Point, q: Point) -> Point {
    (p + q) / 2.0
}

/// Unsigned angle in radians between two vectors.
///
/// Returns `None` when either vector has zero length. The cosine is clamped
/// into `[-1, 1]` so rounding on (anti)parallel vectors cannot produce NaN.
pub fn angle_between(v1: Point, v2: Point) -> Option<f64> {
    let denom = v1.norm() * v2.norm();
    if denom == 0.0 {
        return None;
    }
    Some((v1.dot(v2) / denom).clamp(-1.0, 1.0).acos())
}
