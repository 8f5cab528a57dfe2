//! Static half-plane intersection (sort by angle + deque sweep).
//!
//! Used as the from-scratch reference for `DynamicPolygon` and for one-shot
//! queries. O(n log n).
//!
//! Conventions
//! - Input half-planes are closed left sides of directed lines.
//! - Parallel same-direction half-planes are coalesced (most restrictive wins).
//! - `Unbounded` means the input directions leave an angular gap of at least
//!   π and no opposite pair contradicts. Add a bounding box when a bounded
//!   answer is expected; with one, emptiness is always detected.

use std::collections::VecDeque;
use std::f64::consts::{PI, TAU};

use super::line::{intersection_point, Line};
use super::point::{fix_angle, Point};
use crate::floats::sign;

/// Slack when matching opposite directions by angle.
const ANGLE_TOL: f64 = 1e-9;

/// HPI result: empty, unbounded, or vertices (CCW).
#[derive(Clone, Debug)]
pub enum HalfPlaneIntersection {
    Empty,
    Unbounded,
    Bounded(Vec<Point>),
}

impl HalfPlaneIntersection {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, HalfPlaneIntersection::Empty)
    }
    #[inline]
    pub fn is_bounded(&self) -> bool {
        matches!(self, HalfPlaneIntersection::Bounded(_))
    }
    #[inline]
    pub fn vertices(self) -> Option<Vec<Point>> {
        if let HalfPlaneIntersection::Bounded(v) = self {
            Some(v)
        } else {
            None
        }
    }
    /// Enclosed area; 0 for `Empty`, `None` for `Unbounded`.
    pub fn area(&self) -> Option<f64> {
        match self {
            HalfPlaneIntersection::Empty => Some(0.0),
            HalfPlaneIntersection::Unbounded => None,
            HalfPlaneIntersection::Bounded(v) => Some(super::polygon::area(v).max(0.0)),
        }
    }
}

#[inline]
fn dir_cross(a: &Line, b: &Line) -> f64 {
    let (u, v) = (a.dir(), b.dir());
    u.x * v.y - u.y * v.x
}

#[inline]
fn same_point(a: Point, b: Point) -> bool {
    sign(a.x - b.x) == 0 && sign(a.y - b.y) == 0
}

/// Corner of two boundary lines; `None` when they are parallel.
#[inline]
fn corner(a: &Line, b: &Line) -> Option<Point> {
    if sign(dir_cross(a, b)) == 0 {
        None
    } else {
        Some(intersection_point(a, b))
    }
}

/// Intersect a set of closed half-planes.
pub fn half_plane_intersection(hps: &[Line]) -> HalfPlaneIntersection {
    if hps.is_empty() {
        return HalfPlaneIntersection::Unbounded;
    }
    let mut ls: Vec<(f64, Line)> = hps.iter().map(|l| (l.angle(), *l)).collect();
    ls.sort_by(|a, b| a.0.total_cmp(&b.0));
    if has_opposite_contradiction(&ls) {
        return HalfPlaneIntersection::Empty;
    }
    // Directions leaving a gap of at least π admit a recession direction:
    // without an opposite contradiction the region is unbounded.
    if sign(max_angle_gap(&ls) - PI) >= 0 {
        return HalfPlaneIntersection::Unbounded;
    }

    let mut dq: VecDeque<Line> = VecDeque::with_capacity(ls.len());
    for (_, h) in ls {
        while dq.len() >= 2 {
            match corner(&dq[dq.len() - 2], &dq[dq.len() - 1]) {
                Some(p) if !h.contains(p) => dq.pop_back(),
                _ => break,
            };
        }
        while dq.len() >= 2 {
            match corner(&dq[0], &dq[1]) {
                Some(p) if !h.contains(p) => dq.pop_front(),
                _ => break,
            };
        }
        if let Some(back) = dq.back().copied() {
            if sign(dir_cross(&back, &h)) == 0 && back.dir().dot(&h.dir()) > 0.0 {
                // Same direction: keep the tighter one.
                if back.contains(h.p) {
                    dq.pop_back();
                } else {
                    continue;
                }
            }
        }
        dq.push_back(h);
    }
    while dq.len() >= 3 {
        match corner(&dq[dq.len() - 2], &dq[dq.len() - 1]) {
            Some(p) if !dq[0].contains(p) => dq.pop_back(),
            _ => break,
        };
    }
    while dq.len() >= 3 {
        match corner(&dq[0], &dq[1]) {
            Some(p) if !dq[dq.len() - 1].contains(p) => dq.pop_front(),
            _ => break,
        };
    }

    // The input closes up, so anything short of a proper polygon is empty.
    let m = dq.len();
    if m < 3 {
        return HalfPlaneIntersection::Empty;
    }
    for k in 0..m {
        // consecutive directions must turn left by less than π
        if sign(dir_cross(&dq[k], &dq[(k + 1) % m])) <= 0 {
            return HalfPlaneIntersection::Empty;
        }
    }
    let mut verts: Vec<Point> = (0..m)
        .map(|k| intersection_point(&dq[k], &dq[(k + 1) % m]))
        .collect();
    // Lines through a common vertex leave repeated corners.
    verts.dedup_by(|a, b| same_point(*a, *b));
    if verts.len() > 1 && same_point(verts[0], verts[verts.len() - 1]) {
        verts.pop();
    }
    if verts.len() < 3 || sign(super::polygon::area(&verts)) <= 0 {
        return HalfPlaneIntersection::Empty;
    }
    HalfPlaneIntersection::Bounded(verts)
}

/// Largest cyclic gap between consecutive sorted direction angles.
fn max_angle_gap(ls: &[(f64, Line)]) -> f64 {
    let (first, last) = match (ls.first(), ls.last()) {
        (Some(f), Some(l)) => (f.0, l.0),
        _ => return TAU,
    };
    ls.windows(2)
        .map(|w| w[1].0 - w[0].0)
        .fold(first + TAU - last, f64::max)
}

/// Fast contradiction check for opposite parallel pairs: `h` and an
/// antiparallel `g` with no room strictly between them. `ls` is angle-sorted.
fn has_opposite_contradiction(ls: &[(f64, Line)]) -> bool {
    let n = ls.len();
    ls.iter().any(|(a, h)| {
        let target = fix_angle(a + PI);
        let lo = ls.partition_point(|(b, _)| *b < target - ANGLE_TOL);
        (0..n)
            .map(|k| (lo + k) % n)
            .take_while(|&k| (ls[k].0 - target).abs() <= ANGLE_TOL)
            .any(|k| {
                let g = &ls[k].1;
                sign(dir_cross(h, g)) == 0 && !h.contains_strict(g.p)
            })
    })
}
