//! Low-level predicates shared by the hull builder and the query engine.
//!
//! All tolerance decisions go through `cfg`; nothing here carries its own
//! literal threshold.

use crate::cfg::{self, EPS};
use crate::{Point2, Vector2};

/// z-component of `u × v`.
#[inline]
pub(crate) fn perp_dot(u: &Vector2, v: &Vector2) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Orientation of `c` relative to the directed line `a → b` (positive: left).
#[inline]
pub(crate) fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    perp_dot(&(b - a), &(c - a))
}

/// `a → b → c` turns left by more than the collinearity threshold.
///
/// The threshold bounds the sine of the turn angle, so it does not depend on
/// the lengths of the two legs.
#[inline]
pub(crate) fn is_strict_left_turn(a: &Point2, b: &Point2, c: &Point2) -> bool {
    cross(a, b, c) > EPS * (b - a).norm() * (c - a).norm()
}

/// Distance tolerance for an edge, scaled by its endpoint magnitudes.
#[inline]
pub(crate) fn edge_tol(a: &Point2, b: &Point2) -> f64 {
    cfg::tol(cfg::magnitude(a).max(cfg::magnitude(b)))
}

/// Signed perpendicular offset of `p` from the line through `a → b`.
///
/// Positive on the right-hand side, which is the outside of a CCW edge.
#[inline]
pub(crate) fn outward_offset(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    let e = b - a;
    let len = e.norm();
    if len <= 0.0 {
        return 0.0;
    }
    -perp_dot(&e, &(p - a)) / len
}

/// `p` lies strictly outside the CCW edge `a → b`, beyond tolerance.
#[inline]
pub(crate) fn is_outside_edge(a: &Point2, b: &Point2, p: &Point2) -> bool {
    outward_offset(a, b, p) > edge_tol(a, b)
}

/// Closest point to `p` on the segment `[a, b]`.
#[inline]
pub(crate) fn project_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let e = b - a;
    let len_sq = e.norm_squared();
    if len_sq <= 0.0 {
        return *a;
    }
    let t = ((p - a).dot(&e) / len_sq).clamp(0.0, 1.0);
    a + e * t
}

#[inline]
pub(crate) fn distance_sq_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    (p - project_on_segment(p, a, b)).norm_squared()
}

/// Parameter of the orthogonal projection of `p` onto `origin + t·dir`.
#[inline]
pub(crate) fn line_param(origin: &Point2, dir: &Vector2, p: &Point2) -> f64 {
    (p - origin).dot(dir) / dir.norm_squared()
}

/// Distance from `p` to the infinite line `origin + t·dir` (`dir` non-zero).
#[inline]
pub(crate) fn distance_to_line(origin: &Point2, dir: &Vector2, p: &Point2) -> f64 {
    perp_dot(dir, &(p - origin)).abs() / dir.norm()
}

/// Index following `i` in a cyclic sequence of length `n` (`n > 0`).
#[inline]
pub(crate) fn next_index(i: usize, n: usize) -> usize {
    if i + 1 == n {
        0
    } else {
        i + 1
    }
}

/// Index preceding `i` in a cyclic sequence of length `n` (`n > 0`).
#[inline]
pub(crate) fn previous_index(i: usize, n: usize) -> usize {
    if i == 0 {
        n - 1
    } else {
        i - 1
    }
}
