//! Directed lines and closed half-planes.

use super::point::{angle, cross, dist, dot, Point};
use crate::floats::sign;

/// Directed line through `p` then `q`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub p: Point,
    pub q: Point,
}

/// Closed half-plane on the left of a directed line: `{ x : cross(p, q, x) >= 0 }`.
pub type HalfPlane = Line;

impl Line {
    #[inline]
    pub fn new(p: Point, q: Point) -> Self {
        Self { p, q }
    }

    /// Convenience constructor from raw coordinates.
    #[inline]
    pub fn from_coords(px: f64, py: f64, qx: f64, qy: f64) -> Self {
        Self::new(Point::new(px, py), Point::new(qx, qy))
    }

    /// Direction vector `q - p`.
    #[inline]
    pub fn dir(&self) -> Point {
        self.q - self.p
    }

    /// Direction angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&self) -> f64 {
        angle(self.p, self.q)
    }

    /// Closed membership (boundary included, within `EPS`).
    #[inline]
    pub fn contains(&self, x: Point) -> bool {
        sign(cross(self.p, self.q, x)) >= 0
    }

    /// Open membership: strictly left of the line, beyond `EPS`.
    #[inline]
    pub fn contains_strict(&self, x: Point) -> bool {
        sign(cross(self.p, self.q, x)) > 0
    }

    #[inline]
    pub fn on_line(&self, x: Point) -> bool {
        sign(cross(self.p, self.q, x)) == 0
    }

    /// Same half-plane with the opposite orientation (right side).
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.q, self.p)
    }
}

/// Whether `u` and `v` are parallel (either orientation).
#[inline]
pub fn parallel(u: &Line, v: &Line) -> bool {
    let du = u.dir();
    let dv = v.dir();
    sign(du.x * dv.y - dv.x * du.y) == 0
}

/// `1` if `a` and `b` lie strictly on the same side of `m`, `0` if either
/// touches `m`, `-1` otherwise.
#[inline]
pub fn side(m: &Line, a: Point, b: Point) -> i8 {
    sign(cross(m.p, m.q, a)) * sign(cross(m.p, m.q, b))
}

/// Intersection point of the lines through `u` and `v`.
///
/// Assumes the lines are not parallel; for parallel input the division
/// yields non-finite coordinates.
#[inline]
pub fn intersection_point(u: &Line, v: &Line) -> Point {
    let n = (u.p.y - v.p.y) * (v.q.x - v.p.x) - (u.p.x - v.p.x) * (v.q.y - v.p.y);
    let d = (u.q.x - u.p.x) * (v.q.y - v.p.y) - (u.q.y - u.p.y) * (v.q.x - v.p.x);
    let r = n / d;
    u.p + u.dir() * r
}

/// Whether `x` lies on the segment `[s.p, s.q]`, endpoints included.
#[inline]
pub fn on_segment(s: &Line, x: Point) -> bool {
    s.on_line(x) && sign(dot(x, s.p, s.q)) <= 0
}

/// Distance from `x` to the (infinite) line through `l`.
#[inline]
pub fn dist_line_point(l: &Line, x: Point) -> f64 {
    cross(l.p, l.q, x).abs() / dist(l.p, l.q)
}
