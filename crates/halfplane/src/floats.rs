//! Tolerance-based float helpers shared by every geometric predicate.
//!
//! Policy
//! - One absolute epsilon for the whole crate. Inputs are expected to be
//!   of moderate magnitude (coordinates up to ~1e4); callers working at very
//!   different scales should rescale first rather than tune `EPS`.

/// Absolute tolerance for sign tests.
pub const EPS: f64 = 1e-8;

/// Three-way sign of `x` with a dead zone of width `EPS` around zero.
#[inline]
pub fn sign(x: f64) -> i8 {
    if x < -EPS {
        -1
    } else if x > EPS {
        1
    } else {
        0
    }
}

/// Sign of `x - y`.
#[inline]
pub fn sign2(x: f64, y: f64) -> i8 {
    sign(x - y)
}

/// `x == y` within `EPS`.
#[inline]
pub fn eq(x: f64, y: f64) -> bool {
    sign(x - y) == 0
}

#[inline]
pub fn sqr(x: f64) -> f64 {
    x * x
}
