use super::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::TAU;

/// Half-plane whose boundary touches the circle of radius `r` around
/// `center` at angle `theta`, keeping the center inside.
fn tangent(center: Point, theta: f64, r: f64) -> HalfPlane {
    let n = Point::new(theta.cos(), theta.sin());
    let t = center + n * r;
    let d = Point::new(-n.y, n.x);
    Line::new(t, t + d)
}

fn box_edges(x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<Line> {
    vec![
        Line::from_coords(x1, y1, x2, y1),
        Line::from_coords(x2, y1, x2, y2),
        Line::from_coords(x2, y2, x1, y2),
        Line::from_coords(x1, y2, x1, y1),
    ]
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn rectangle_starts_with_four_edges() {
    let p = DynamicPolygon::new(-1.0, 2.0, 3.0, 7.0).unwrap();
    assert_eq!(p.len(), 4);
    assert!((p.area() - 20.0).abs() < 1e-12);
    let v = p.vertices();
    assert_eq!(v[0], Point::new(3.0, 2.0));
    assert!((area(&v) - 20.0).abs() < 1e-12);
    let angles: Vec<f64> = p.edges().map(|l| l.angle()).collect();
    assert!(angles.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn invalid_bounds_are_rejected() {
    assert_eq!(
        DynamicPolygon::new(1.0, 0.0, 1.0, 5.0).unwrap_err(),
        GeomError::InvalidBounds {
            x1: 1.0,
            y1: 0.0,
            x2: 1.0,
            y2: 5.0
        }
    );
    assert!(DynamicPolygon::new(0.0, 3.0, 1.0, 2.0).is_err());
    assert!(DynamicPolygon::new(0.0, 0.0, f64::INFINITY, 2.0).is_err());
    assert!(DynamicPolygon::new(f64::NAN, 0.0, 1.0, 2.0).is_err());
}

#[test]
fn horizontal_cut_of_big_square() {
    let mut p = DynamicPolygon::new(0.0, 0.0, 2000.0, 2000.0).unwrap();
    assert_eq!(p.area(), 4_000_000.0);
    p.add(&Line::from_coords(0.0, 5.0, 1.0, 5.0));
    assert!((p.area() - 3_990_000.0).abs() < 1e-6);
    assert_eq!(p.len(), 4);
    assert!(p.contains(Point::new(10.0, 5.0)));
    assert!(!p.contains(Point::new(10.0, 4.0)));
}

#[test]
fn polyline_fixture_losses() {
    let polylines: [[f64; 11]; 10] = [
        [7., 5., 5., 5., 9., 10., 9., 8., 7., 5., 10.],
        [4., 2., 8., 2., 9., 1., 2., 8., 10., 7., 10.],
        [9., 7., 7., 2., 5., 1., 5., 4., 7., 9., 7.],
        [7., 3., 2., 10., 6., 9., 10., 2., 4., 2., 4.],
        [1., 4., 8., 6., 9., 2., 1., 3., 6., 2., 8.],
        [2., 4., 10., 7., 1., 1., 7., 9., 8., 9., 8.],
        [8., 3., 10., 9., 4., 9., 9., 1., 9., 6., 3.],
        [8., 10., 7., 2., 6., 2., 1., 3., 9., 7., 5.],
        [1., 8., 3., 1., 7., 2., 8., 8., 3., 3., 9.],
        [4., 1., 10., 2., 7., 4., 1., 9., 8., 1., 7.],
    ];
    let expected = [
        71.5,
        6.5,
        4.133333333333,
        3.419642857143,
        0.636309523809,
        2.267424242424,
        0.646464646464,
        2.375,
        0.0,
        0.0,
    ];
    let mut loss = [0.0; 10];
    for j in 0..10 {
        let mut p = DynamicPolygon::new(0.0, 0.0, 1.0, 2000.0).unwrap();
        for (i, l) in polylines.iter().enumerate() {
            let before = p.area();
            p.add(&Line::from_coords(0.0, l[j], 1.0, l[j + 1]));
            loss[i] += before - p.area();
        }
    }
    for (got, want) in loss.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
    }
}

#[test]
fn containing_half_plane_is_a_no_op() {
    let mut p = DynamicPolygon::new(0.0, 0.0, 4.0, 4.0).unwrap();
    p.add(&Line::from_coords(0.0, -1.0, 1.0, -1.0)); // y >= -1
    p.add(&Line::from_coords(0.0, 0.0, 1.0, 0.0)); // y >= 0, the bottom edge itself
    p.add(&Line::from_coords(1.0, 5.0, 0.0, 4.0)); // y <= x + 4, touching corner (0,4)
    assert_eq!(p.len(), 4);
    assert_eq!(p.area(), 16.0);
}

#[test]
fn excluding_half_plane_empties_for_good() {
    let mut p = DynamicPolygon::new(0.0, 0.0, 4.0, 4.0).unwrap();
    p.add(&Line::from_coords(0.0, 0.0, 4.0, 4.0)); // y >= x
    assert!((p.area() - 8.0).abs() < 1e-12);
    p.add(&Line::from_coords(0.0, 10.0, 1.0, 10.0)); // y >= 10
    assert!(p.is_empty());
    assert_eq!(p.area(), 0.0);
    assert!(!p.contains(Point::new(1.0, 2.0)));
    p.add(&Line::from_coords(1.0, 0.0, 0.0, 0.0));
    p.add(&Line::from_coords(0.0, -5.0, 1.0, -5.0));
    assert_eq!(p.area(), 0.0);
    assert!(p.vertices().is_empty());
}

#[test]
fn boundary_touching_cut_is_empty() {
    // x <= 0 leaves only the left side segment.
    let mut p = DynamicPolygon::new(0.0, 0.0, 2.0, 2.0).unwrap();
    p.add(&Line::from_coords(0.0, 0.0, 0.0, 1.0));
    assert_eq!(p.area(), 0.0);
    assert!(p.is_empty());
}

#[test]
fn opposite_cuts_on_one_line_are_empty() {
    let mut p = DynamicPolygon::new(0.0, 0.0, 6.0, 6.0).unwrap();
    p.add(&Line::from_coords(0.0, 3.0, 1.0, 3.0)); // y >= 3
    assert!((p.area() - 18.0).abs() < 1e-12);
    p.add(&Line::from_coords(1.0, 3.0, 0.0, 3.0)); // y <= 3
    assert!(p.is_empty());
    assert_eq!(p.area(), 0.0);
    assert_eq!(p.len(), 0);
    assert!(p.centroid().is_none());
}

#[test]
fn parallel_cuts_keep_one_edge_per_direction() {
    let mut p = DynamicPolygon::new(0.0, 0.0, 10.0, 10.0).unwrap();
    p.add(&Line::from_coords(0.0, 2.0, 1.0, 2.0)); // y >= 2 replaces the bottom
    assert_eq!(p.len(), 4);
    assert!((p.area() - 80.0).abs() < 1e-9);
    p.add(&Line::from_coords(0.0, 1.0, 1.0, 1.0)); // looser: ignored
    assert_eq!(p.len(), 4);
    p.add(&Line::from_coords(7.0, 3.0, 9.0, 3.0)); // tighter again
    assert_eq!(p.len(), 4);
    assert!((p.area() - 70.0).abs() < 1e-9);
    let bottoms = p.edges().filter(|l| l.angle() == 0.0).count();
    assert_eq!(bottoms, 1);
}

#[test]
fn triangle_corner_cut() {
    let mut p = DynamicPolygon::new(0.0, 0.0, 1.0, 1.0).unwrap();
    p.add(&Line::from_coords(1.0, 0.0, 0.0, 1.0)); // x + y <= 1
    assert_eq!(p.len(), 3);
    assert!((p.area() - 0.5).abs() < 1e-12);
    assert!((p.recomputed_area() - 0.5).abs() < 1e-12);
    let c = p.centroid().unwrap();
    assert!((c - Point::new(1.0 / 3.0, 1.0 / 3.0)).norm() < 1e-12);
    // Cut through the interior on the other diagonal direction.
    p.add(&Line::from_coords(0.0, 0.0, 1.0, 1.0)); // y >= x
    assert!((p.area() - 0.25).abs() < 1e-12);
    assert_eq!(p.len(), 3);
}

#[test]
fn incremental_matches_static_recomputation() {
    let mut rng = StdRng::seed_from_u64(20240517);
    for round in 0..50 {
        let center = Point::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
        let mut hps = box_edges(-10.0, -10.0, 10.0, 10.0);
        let mut p = DynamicPolygon::new(-10.0, -10.0, 10.0, 10.0).unwrap();
        let mut prev = p.area();
        for _ in 0..20 {
            let h = tangent(center, rng.gen_range(0.0..TAU), rng.gen_range(0.5..9.0));
            hps.push(h);
            p.add(&h);
            let want = half_plane_intersection(&hps).area().unwrap();
            assert!(close(p.area(), want), "round {round}: {} vs {want}", p.area());
            assert!(close(p.area(), p.recomputed_area()));
            assert!(p.area() <= prev + 1e-9 && p.area() >= 0.0);
            assert!(p.contains(center));
            prev = p.area();
        }
    }
}

#[test]
fn random_cuts_agree_with_static_including_empty() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut hps = box_edges(0.0, 0.0, 5.0, 5.0);
        let mut p = DynamicPolygon::new(0.0, 0.0, 5.0, 5.0).unwrap();
        for _ in 0..8 {
            // Tangent to a circle around a random point, possibly outside
            // the current region.
            let c = Point::new(rng.gen_range(-2.0..7.0), rng.gen_range(-2.0..7.0));
            let h = tangent(c, rng.gen_range(0.0..TAU), rng.gen_range(0.5..3.0));
            hps.push(h);
            p.add(&h);
            let want = half_plane_intersection(&hps).area().unwrap();
            assert!((p.area() - want).abs() < 1e-6, "{} vs {want}", p.area());
        }
    }
}

proptest! {
    #[test]
    fn order_does_not_matter(
        (cuts, shuffled) in prop::collection::vec((0.0..TAU, 1.0f64..8.0), 1..25)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let o = Point::new(0.0, 0.0);
        let mut p = DynamicPolygon::new(-10.0, -10.0, 10.0, 10.0).unwrap();
        let mut q = p.clone();
        for (t, r) in &cuts {
            p.add(&tangent(o, *t, *r));
        }
        for (t, r) in &shuffled {
            q.add(&tangent(o, *t, *r));
        }
        prop_assert!(close(p.area(), q.area()), "{} vs {}", p.area(), q.area());
    }

    #[test]
    fn adding_twice_equals_adding_once(
        cuts in prop::collection::vec((0.0..TAU, 1.0f64..8.0), 1..25)
    ) {
        let o = Point::new(0.0, 0.0);
        let mut once = DynamicPolygon::new(-10.0, -10.0, 10.0, 10.0).unwrap();
        let mut twice = once.clone();
        for (t, r) in &cuts {
            let h = tangent(o, *t, *r);
            once.add(&h);
            twice.add(&h);
            let before = twice.area();
            twice.add(&h);
            prop_assert_eq!(twice.area(), before);
        }
        prop_assert!(close(once.area(), twice.area()));
        prop_assert_eq!(once.len(), twice.len());
    }
}
