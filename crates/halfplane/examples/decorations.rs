//! Visible area of stacked polylines over unit-width columns.
//!
//! Usage:
//!   cargo run -p halfplane --example decorations
//!
//! Each polyline is a row of heights `y_0..y_k`; over column `j` it is the
//! segment `(0, y_j) → (1, y_{j+1})`. Polylines are drawn in order, each one
//! covering the region above it, and the program prints the area that each
//! polyline newly covers. One `DynamicPolygon` per column tracks what is
//! still uncovered.

use halfplane::{DynamicPolygon, Line};

const POLYLINES: [[f64; 11]; 10] = [
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

fn main() -> Result<(), halfplane::GeomError> {
    let columns = POLYLINES[0].len() - 1;
    let mut covered = [0.0; POLYLINES.len()];
    for j in 0..columns {
        let mut p = DynamicPolygon::new(0.0, 0.0, 1.0, 2000.0)?;
        for (i, l) in POLYLINES.iter().enumerate() {
            let before = p.area();
            p.add(&Line::from_coords(0.0, l[j], 1.0, l[j + 1]));
            covered[i] += before - p.area();
        }
    }
    for a in covered {
        println!("{a:.12}");
    }
    Ok(())
}
