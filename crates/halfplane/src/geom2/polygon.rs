use super::point::{cross, Point};
use crate::floats::sign;

/// Signed shoelace area; positive for counterclockwise vertex order.
pub fn area(poly: &[Point]) -> f64 {
    let n = poly.len();
    let mut s = 0.0;
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        s += a.x * b.y - a.y * b.x;
    }
    s / 2.0
}

/// Area centroid of a simple polygon, `None` when the area is (near) zero.
pub fn centroid(poly: &[Point]) -> Option<Point> {
    let n = poly.len();
    let mut a2 = 0.0;
    let mut c = Point::zeros();
    for i in 0..n {
        let p = poly[i];
        let q = poly[(i + 1) % n];
        let w = p.x * q.y - p.y * q.x;
        a2 += w;
        c += (p + q) * w;
    }
    if sign(a2) == 0 {
        return None;
    }
    Some(c / (3.0 * a2))
}

/// Andrew's monotone chain convex hull (returns hull in CCW order).
///
/// Collinear boundary points are dropped. Returns an empty vector for empty
/// input and the deduplicated points when fewer than three remain.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup_by(|a, b| sign(a.x - b.x) == 0 && sign(a.y - b.y) == 0);
    if pts.len() < 3 {
        return pts;
    }
    let mut hull: Vec<Point> = Vec::with_capacity(2 * pts.len());
    for p in pts.iter() {
        while hull.len() >= 2 && sign(cross(hull[hull.len() - 2], hull[hull.len() - 1], *p)) <= 0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower_len = hull.len() + 1;
    for p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && sign(cross(hull[hull.len() - 2], hull[hull.len() - 1], *p)) <= 0
        {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_area_and_centroid() {
        let sq = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        assert!((area(&sq) - 4.0).abs() < 1e-12);
        let mut cw = sq.clone();
        cw.reverse();
        assert!((area(&cw) + 4.0).abs() < 1e-12);
        let c = centroid(&sq).unwrap();
        assert!((c - Point::new(1.0, 1.0)).norm() < 1e-12);
        assert!(centroid(&sq[..2]).is_none());
    }

    #[test]
    fn hull_drops_interior_and_collinear_points() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 2.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!((area(&hull) - 4.0).abs() < 1e-12);
        assert_eq!(hull[0], Point::new(0.0, 0.0));
    }
}
