//! Dynamic half-plane intersection (`DynamicPolygon`).
//!
//! Purpose
//! - Maintain `rect ∩ h_1 ∩ … ∩ h_k` under online insertion of half-planes
//!   and answer its area after each insertion.
//!
//! Model
//! - The boundary is a cyclic sequence of edges ordered by direction angle,
//!   stored in a `Treap<AngleKey, Edge>`. Each edge caches its *end vertex*:
//!   the intersection of its line with the line of the cyclically next edge.
//! - `doubled_area` is the shoelace sum over edges of `start × end`, where an
//!   edge's start is its predecessor's end. Insertions patch only the terms
//!   they touch.
//! - A new half-plane can only cut off a contiguous arc of a convex
//!   boundary, so the arc is found by one lower-bound search and trimmed by
//!   two walks. Every trimmed edge was inserted once, which gives amortized
//!   O(log n) per `add`.
//!
//! States: ACTIVE (at least three edges) and EMPTY (no edges, area 0).
//! EMPTY is terminal.
//!
//! Code cross-refs: `treap::Treap`, `line::intersection_point`, `hpi::half_plane_intersection`

use std::cmp::Ordering;

use thiserror::Error;

use super::line::{intersection_point, HalfPlane, Line};
use super::point::{cross, Point};
use super::polygon;
use crate::floats::sign;
use crate::treap::{NodeId, Treap};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeomError {
    #[error("invalid bounding rectangle ({x1}, {y1})-({x2}, {y2}): need finite x1 < x2 and y1 < y2")]
    InvalidBounds { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// Direction angle in `[0, 2π)`, totally ordered by `f64::total_cmp`.
#[derive(Clone, Copy, Debug)]
pub struct AngleKey(pub f64);

impl AngleKey {
    #[inline]
    pub fn of(line: &Line) -> Self {
        AngleKey(line.angle())
    }
}

impl PartialEq for AngleKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for AngleKey {}
impl PartialOrd for AngleKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for AngleKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A boundary edge and the vertex where it meets the next edge.
#[derive(Clone, Copy, Debug)]
struct Edge {
    line: Line,
    end: Point,
}

#[inline]
fn wedge(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Convex polygon maintained as the intersection of a rectangle and a
/// growing set of half-planes.
#[derive(Clone, Debug)]
pub struct DynamicPolygon {
    edges: Treap<AngleKey, Edge>,
    doubled_area: f64,
}

impl DynamicPolygon {
    /// Start from the axis-aligned rectangle with corners `(x1, y1)` and `(x2, y2)`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, GeomError> {
        let finite = [x1, y1, x2, y2].iter().all(|v| v.is_finite());
        if !finite || x1 >= x2 || y1 >= y2 {
            return Err(GeomError::InvalidBounds { x1, y1, x2, y2 });
        }
        let corners = [
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ];
        let mut edges = Treap::new();
        // bottom, right, top, left; each ends at the next corner.
        for i in 0..4 {
            let line = Line::new(corners[i], corners[(i + 1) % 4]);
            edges.insert(
                AngleKey::of(&line),
                Edge {
                    line,
                    end: corners[(i + 1) % 4],
                },
            );
        }
        Ok(Self {
            edges,
            doubled_area: 2.0 * (x2 - x1) * (y2 - y1),
        })
    }

    /// Current enclosed area; 0 once the region became empty.
    #[inline]
    pub fn area(&self) -> f64 {
        self.doubled_area / 2.0
    }

    /// Number of boundary edges (0 when empty).
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True once a half-plane excluded the whole region.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Intersect the region with `hp` in place.
    pub fn add(&mut self, hp: &HalfPlane) {
        let key = AngleKey::of(hp);
        let Some(it) = self.edges.lower_bound(&key).or_else(|| self.edges.first()) else {
            return;
        };
        let mut a = self.prev_cyclic(it);
        let entry = self.end(a);
        if hp.contains(entry) {
            return;
        }

        // Backward: drop edges whose start vertex is cut off as well.
        while self.edges.len() > 1 {
            let c = self.prev_cyclic(a);
            let cv = self.end(c);
            if hp.contains_strict(cv) {
                break;
            }
            self.doubled_area -= wedge(cv, self.end(a));
            tracing::trace!(angle = self.edges.key(a).0, "trim backward");
            self.edges.remove_node(a);
            a = c;
        }

        // Forward: drop edges whose end vertex is cut off.
        let mut last = entry;
        let mut b = self.next_cyclic(a);
        while self.edges.len() > 1 {
            let bv = self.end(b);
            if hp.contains_strict(bv) {
                break;
            }
            self.doubled_area -= wedge(last, bv);
            last = bv;
            let nb = self.next_cyclic(b);
            tracing::trace!(angle = self.edges.key(b).0, "trim forward");
            self.edges.remove_node(b);
            b = nb;
        }

        if self.edges.len() <= 1 {
            tracing::debug!("half-plane excludes the polygon; now empty");
            self.edges.clear();
            self.doubled_area = 0.0;
            return;
        }

        let a_line = self.edges.value(a).line;
        let b_line = self.edges.value(b).line;
        let a_start = self.end(self.prev_cyclic(a));
        let a_end = self.end(a);
        let b_end = self.end(b);
        let u = intersection_point(&a_line, hp);
        let w = intersection_point(hp, &b_line);
        self.doubled_area += wedge(a_start, u) - wedge(a_start, a_end) + wedge(u, w)
            + wedge(w, b_end)
            - wedge(last, b_end);
        self.edges.value_mut(a).end = u;
        self.edges.insert(key, Edge { line: *hp, end: w });
    }

    /// Boundary vertices in counterclockwise order, starting at the end of
    /// the edge with the smallest angle.
    pub fn vertices(&self) -> Vec<Point> {
        self.edges.iter().map(|(_, e)| e.end).collect()
    }

    /// Boundary lines in increasing angle order.
    pub fn edges(&self) -> impl Iterator<Item = &Line> + '_ {
        self.edges.iter().map(|(_, e)| &e.line)
    }

    /// Closed membership test against every boundary edge. False when empty.
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty() && self.edges().all(|l| sign(cross(l.p, l.q, p)) >= 0)
    }

    /// Area recomputed from scratch with the shoelace formula.
    pub fn recomputed_area(&self) -> f64 {
        polygon::area(&self.vertices())
    }

    /// Area centroid of the region; `None` when empty or degenerate.
    pub fn centroid(&self) -> Option<Point> {
        polygon::centroid(&self.vertices())
    }

    #[inline]
    fn end(&self, id: NodeId) -> Point {
        self.edges.value(id).end
    }

    #[inline]
    fn next_cyclic(&self, id: NodeId) -> NodeId {
        self.edges
            .next(id)
            .or_else(|| self.edges.first())
            .unwrap_or(id)
    }

    #[inline]
    fn prev_cyclic(&self, id: NodeId) -> NodeId {
        self.edges
            .prev(id)
            .or_else(|| self.edges.last())
            .unwrap_or(id)
    }
}
