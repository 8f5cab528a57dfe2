//! Planar half-plane intersection, static and dynamic.
//!
//! The centerpiece is [`DynamicPolygon`]: a convex region that starts as a
//! bounding rectangle and is cut by half-planes one at a time, reporting the
//! enclosed area after every cut in amortized O(log n).
//!
//! Layout
//! - `floats`: tolerance-based sign and comparison helpers (`EPS = 1e-8`).
//! - `geom2`: points, directed lines, polygons, static and dynamic HPI.
//! - `treap`: arena-backed ordered map with stable handles, the container
//!   behind `DynamicPolygon`.

pub mod floats;
pub mod geom2;
pub mod treap;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{DynamicPolygon, GeomError, HalfPlane, Line, Point};

/// Common geometry exports for quick imports in callers.
pub mod prelude {
    pub use crate::floats::{eq, sign, EPS};
    pub use crate::geom2::{
        area, convex_hull, cross, half_plane_intersection, intersection_point, AngleKey,
        DynamicPolygon, GeomError, HalfPlane, HalfPlaneIntersection, Line, Point,
    };
    pub use crate::treap::{NodeId, Treap};
    pub use nalgebra::Vector2 as Vec2;
}
