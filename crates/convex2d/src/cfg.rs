//! Tolerance defaults shared by the hull builder and the query engine.
//!
//! Policy
//! - A single fixed constant. Boundary points must classify the same way in
//!   `update()` and in every query, so no call site carries its own literal.
//! - Distances use a relative/absolute hybrid: `EPS` below unit magnitude,
//!   `EPS * magnitude` above it.

use crate::Point2;

/// Coincidence, collinearity and boundary tolerance.
pub const EPS: f64 = 1e-10;

/// Distance tolerance at the given coordinate magnitude.
#[inline]
pub fn tol(magnitude: f64) -> f64 {
    EPS * magnitude.abs().max(1.0)
}

/// Largest absolute coordinate of `p` (infinity norm).
#[inline]
pub fn magnitude(p: &Point2) -> f64 {
    p.x.abs().max(p.y.abs())
}

/// Two points are the same vertex if they agree within `tol` in each coordinate.
#[inline]
pub fn coincident(a: &Point2, b: &Point2) -> bool {
    let t = tol(magnitude(a).max(magnitude(b)));
    (a.x - b.x).abs() <= t && (a.y - b.y).abs() <= t
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    #[test]
    fn coincidence_is_relative_above_unit_scale() {
        assert!(coincident(&point![0.0, 0.0], &point![5e-11, -5e-11]));
        assert!(!coincident(&point![0.0, 0.0], &point![1e-9, 0.0]));
        // 1e6 scale: tolerance grows to 1e-4.
        assert!(coincident(&point![1e6, 1e6], &point![1e6 + 5e-5, 1e6]));
        assert!(!coincident(&point![1e6, 1e6], &point![1e6 + 1e-3, 1e6]));
    }
}
