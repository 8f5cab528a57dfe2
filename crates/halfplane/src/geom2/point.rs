//! Point primitives on `nalgebra::Vector2<f64>`.

use nalgebra::Vector2;
use std::f64::consts::TAU;

/// A point (or free vector) in the plane.
pub type Point = Vector2<f64>;

/// Cross product of `AB × BC`: positive iff `a → b → c` turns counterclockwise.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x)
}

/// Dot product of `PA · PB`.
#[inline]
pub fn dot(p: Point, a: Point, b: Point) -> f64 {
    (a - p).dot(&(b - p))
}

#[inline]
pub fn dist(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

#[inline]
pub fn mid_point(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

/// Point at distance `d` from `a` in direction `alpha`.
#[inline]
pub fn next_point(a: Point, alpha: f64, d: f64) -> Point {
    Point::new(a.x + d * alpha.cos(), a.y + d * alpha.sin())
}

/// Normalize an angle given in `(-2π, 4π)` into `[0, 2π)`.
///
/// Exact (no tolerance): the result is used as an ordering key, so two equal
/// directions must map to bit-identical angles.
#[inline]
pub fn fix_angle(a: f64) -> f64 {
    let mut x = a;
    if x < 0.0 {
        x += TAU;
    }
    if x >= TAU {
        x -= TAU;
    }
    if x == 0.0 {
        // collapse -0.0
        return 0.0;
    }
    x
}

/// Direction angle of `b` seen from `a`, in `[0, 2π)`.
#[inline]
pub fn angle(a: Point, b: Point) -> f64 {
    fix_angle((b.y - a.y).atan2(b.x - a.x))
}

/// Rotate `a` around `center` by `alpha` (counterclockwise).
pub fn rotate(a: Point, center: Point, alpha: f64) -> Point {
    let d = a - center;
    let (s, c) = alpha.sin_cos();
    Point::new(center.x + d.x * c - d.y * s, center.y + d.x * s + d.y * c)
}
