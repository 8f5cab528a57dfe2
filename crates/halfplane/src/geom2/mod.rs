//! 2D geometry: points, directed lines, polygons, half-plane intersection.
//!
//! Conventions
//! - A `Line` is directed from `p` to `q`; as a `HalfPlane` it denotes the
//!   closed left side `{ x : cross(p, q, x) >= 0 }`.
//! - Angles of directions are normalized into `[0, 2π)`.
//! - Every near-zero decision goes through `floats::sign`.
//!
//! Code cross-refs: `DynamicPolygon`, `half_plane_intersection`, `treap::Treap`

mod dynamic;
mod hpi;
mod line;
mod point;
mod polygon;

pub use dynamic::{AngleKey, DynamicPolygon, GeomError};
pub use hpi::{half_plane_intersection, HalfPlaneIntersection};
pub use line::{dist_line_point, intersection_point, on_segment, parallel, side, HalfPlane, Line};
pub use point::{angle, cross, dist, dot, fix_angle, mid_point, next_point, rotate, Point};
pub use polygon::{area, centroid, convex_hull};

#[cfg(test)]
mod tests;
