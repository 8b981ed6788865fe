//! Geometric queries over a finalized hull.
//!
//! Every function takes the hull as a CCW vertex slice satisfying the hull
//! invariants (see `hull`). Degenerate slices (0, 1, 2 vertices) get a
//! defined answer:
//! - 0 vertices: distances are NaN, lookups return `None`;
//! - 1 vertex: the polygon is that point;
//! - 2 vertices: the polygon is the closed segment between them.

use super::types::{Intersections, Line2};
use super::util::{
    distance_sq_to_segment, distance_to_line, edge_tol, is_outside_edge, line_param, next_index,
    perp_dot, previous_index, project_on_segment,
};
use crate::cfg::{self, coincident, EPS};
use crate::{Point2, Vector2};

/// Number of edges: `n` for `n >= 2` (a segment has both directions), else 0.
#[inline]
pub(crate) fn edge_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n
    }
}

fn vertex_average(vertices: &[Point2]) -> Point2 {
    let sum = vertices
        .iter()
        .fold(Vector2::zeros(), |acc, v| acc + v.coords);
    Point2::from(sum / vertices.len() as f64)
}

/// Signed area (positive for CCW) and area centroid.
///
/// Falls back to the vertex average when the polygon has no area; an empty
/// slice yields NaN for both.
pub(crate) fn area_and_centroid(vertices: &[Point2]) -> (f64, Point2) {
    let n = vertices.len();
    if n == 0 {
        return (f64::NAN, Point2::new(f64::NAN, f64::NAN));
    }
    if n < 3 {
        return (0.0, vertex_average(vertices));
    }
    // Shoelace relative to the first vertex to keep far-from-origin polygons accurate.
    let o = vertices[0];
    let mut twice_area = 0.0;
    let mut c = Vector2::zeros();
    for i in 1..n - 1 {
        let p = vertices[i] - o;
        let q = vertices[i + 1] - o;
        let w = perp_dot(&p, &q);
        twice_area += w;
        c += (p + q) * w;
    }
    let area = 0.5 * twice_area;
    if !twice_area.is_normal() {
        return (area, vertex_average(vertices));
    }
    (area, o + c / (3.0 * twice_area))
}

/// Signed distance from `p` to the polygon: positive outside, negative inside.
pub(crate) fn signed_distance(p: &Point2, vertices: &[Point2]) -> f64 {
    match vertices.len() {
        0 => f64::NAN,
        1 => (p - vertices[0]).norm(),
        2 => distance_sq_to_segment(p, &vertices[0], &vertices[1]).sqrt(),
        n => {
            let mut outside = false;
            let mut min_sq = f64::INFINITY;
            for i in 0..n {
                let a = &vertices[i];
                let b = &vertices[next_index(i, n)];
                outside |= is_outside_edge(a, b, p);
                min_sq = min_sq.min(distance_sq_to_segment(p, a, b));
            }
            let d = min_sq.sqrt();
            if outside {
                d
            } else {
                -d
            }
        }
    }
}

/// `signed_distance <= eps`; a positive `eps` grows the polygon, a negative one shrinks it.
#[inline]
pub(crate) fn is_point_inside(p: &Point2, vertices: &[Point2], eps: f64) -> bool {
    signed_distance(p, vertices) <= eps
}

/// Closest boundary point for a point outside the polygon; `None` when the
/// point is inside (boundary included) or the polygon is empty.
pub(crate) fn orthogonal_projection(p: &Point2, vertices: &[Point2]) -> Option<Point2> {
    let n = vertices.len();
    if n == 0 || is_point_inside(p, vertices, 0.0) {
        return None;
    }
    if n == 1 {
        return Some(vertices[0]);
    }
    let mut best = vertices[0];
    let mut best_sq = f64::INFINITY;
    for i in 0..edge_count(n) {
        let q = project_on_segment(p, &vertices[i], &vertices[next_index(i, n)]);
        let d_sq = (p - q).norm_squared();
        if d_sq < best_sq {
            best_sq = d_sq;
            best = q;
        }
    }
    Some(best)
}

/// Index of the vertex nearest to `p` (first one on ties).
pub(crate) fn closest_vertex_index(p: &Point2, vertices: &[Point2]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in vertices.iter().enumerate() {
        let d_sq = (p - v).norm_squared();
        if best.map_or(true, |(_, b)| d_sq < b) {
            best = Some((i, d_sq));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the vertex nearest to an infinite line (first one on ties).
pub(crate) fn closest_vertex_index_to_line(line: &Line2, vertices: &[Point2]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in vertices.iter().enumerate() {
        let d = line.distance(v);
        if best.map_or(true, |(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Index `i` of the closest edge `(v_i, v_{i+1})`.
///
/// When `p` is outside, only edges that `p` is outside of compete, so a point
/// beyond a vertex resolves to an edge facing it.
pub(crate) fn closest_edge_index(p: &Point2, vertices: &[Point2]) -> Option<usize> {
    let n = vertices.len();
    let edges = edge_count(n);
    if edges == 0 {
        return None;
    }
    let outside_any =
        (0..edges).any(|i| is_outside_edge(&vertices[i], &vertices[next_index(i, n)], p));
    let mut best: Option<(usize, f64)> = None;
    for i in 0..edges {
        let a = &vertices[i];
        let b = &vertices[next_index(i, n)];
        if outside_any && !is_outside_edge(a, b, p) {
            continue;
        }
        let d_sq = distance_sq_to_segment(p, a, b);
        if best.map_or(true, |(_, bd)| d_sq < bd) {
            best = Some((i, d_sq));
        }
    }
    best.map(|(i, _)| i)
}

/// `observer` is strictly on the outer side of edge `edge` (the caller
/// guarantees a valid edge index).
#[inline]
pub(crate) fn can_observer_see_edge(edge: usize, observer: &Point2, vertices: &[Point2]) -> bool {
    let n = vertices.len();
    is_outside_edge(&vertices[edge], &vertices[next_index(edge, n)], observer)
}

/// Indices `(first, last)` of the extreme vertices visible from `observer`,
/// in CCW order: the visible chain of edges runs from `first` to `last`.
/// `None` when the observer is inside (or the polygon is empty).
pub(crate) fn line_of_sight_indices(
    observer: &Point2,
    vertices: &[Point2],
) -> Option<(usize, usize)> {
    let n = vertices.len();
    match n {
        0 => None,
        // an observer on the vertex (within tolerance) sees nothing
        1 => {
            if coincident(observer, &vertices[0]) {
                None
            } else {
                Some((0, 0))
            }
        }
        2 => {
            if is_point_inside(observer, vertices, 0.0) {
                None
            } else if is_outside_edge(&vertices[0], &vertices[1], observer) {
                Some((0, 1))
            } else {
                Some((1, 0))
            }
        }
        _ => {
            let visible = |i: usize| can_observer_see_edge(i, observer, vertices);
            let mut first = None;
            let mut last = None;
            for i in 0..n {
                let before = visible(previous_index(i, n));
                let here = visible(i);
                if !before && here {
                    first = Some(i);
                }
                if before && !here {
                    last = Some(i);
                }
            }
            first.zip(last)
        }
    }
}

/// Outward unit normal of edge `edge` (valid index, `n >= 2`).
#[inline]
pub(crate) fn edge_normal(edge: usize, vertices: &[Point2]) -> Vector2 {
    let n = vertices.len();
    let e = vertices[next_index(edge, n)] - vertices[edge];
    // For CCW order the outward normal is the edge rotated 90° clockwise.
    Vector2::new(e.y, -e.x).normalize()
}

/// Running extremes of crossing candidates along the query direction.
///
/// Convexity puts every crossing on the chord between the first and last
/// one, so keeping the two extremes is enough.
#[derive(Default)]
struct Extremes {
    entry: Option<(f64, Point2)>,
    exit: Option<(f64, Point2)>,
}

impl Extremes {
    fn offer(&mut self, t: f64, p: Point2) {
        match (self.entry, self.exit) {
            (Some((t_in, p_in)), Some((t_out, p_out))) => {
                if coincident(&p, &p_in) || coincident(&p, &p_out) {
                    return;
                }
                if t < t_in {
                    self.entry = Some((t, p));
                } else if t > t_out {
                    self.exit = Some((t, p));
                }
            }
            _ => {
                self.entry = Some((t, p));
                self.exit = Some((t, p));
            }
        }
    }

    fn finish(self) -> Intersections {
        match (self.entry, self.exit) {
            (Some((_, p)), Some((_, q))) if !coincident(&p, &q) => Intersections::Two(p, q),
            (Some((_, p)), _) => Intersections::One(p),
            _ => Intersections::Zero,
        }
    }
}

/// Boundary crossings of `origin + t·dir`, `t ∈ [t0, t1]`, with the polygon.
///
/// Lines use `(-∞, ∞)`, rays `[0, ∞)`, segments `[0, 1]` with
/// `dir = end - start`. A collinear edge overlap contributes the ends of
/// the overlap. `dir` must be non-zero.
pub(crate) fn crossings(
    origin: &Point2,
    dir: &Vector2,
    t0: f64,
    t1: f64,
    vertices: &[Point2],
) -> Intersections {
    let n = vertices.len();
    let mut hits = Extremes::default();
    match n {
        0 => {}
        1 => {
            let v = vertices[0];
            let t = line_param(origin, dir, &v);
            let pad = cfg::tol(cfg::magnitude(&v)) / dir.norm();
            if distance_to_line(origin, dir, &v) <= cfg::tol(cfg::magnitude(&v))
                && t >= t0 - pad
                && t <= t1 + pad
            {
                hits.offer(t, v);
            }
        }
        _ => {
            // a segment polygon has one distinct edge
            let edges = if n == 2 { 1 } else { n };
            for i in 0..edges {
                let (a, b) = (&vertices[i], &vertices[next_index(i, n)]);
                edge_crossing(origin, dir, t0, t1, a, b, &mut hits);
            }
        }
    }
    hits.finish()
}

fn edge_crossing(
    origin: &Point2,
    dir: &Vector2,
    t0: f64,
    t1: f64,
    a: &Point2,
    b: &Point2,
    hits: &mut Extremes,
) {
    let e = b - a;
    let tol = edge_tol(a, b);
    let t_pad = tol / dir.norm();
    let denom = perp_dot(dir, &e);
    if denom.abs() <= EPS * dir.norm() * e.norm() {
        if distance_to_line(origin, dir, a) > tol {
            return;
        }
        let (ta, tb) = (line_param(origin, dir, a), line_param(origin, dir, b));
        let lo = ta.min(tb).max(t0);
        let hi = ta.max(tb).min(t1);
        if lo > hi + t_pad {
            return;
        }
        let hi = hi.max(lo);
        hits.offer(lo, origin + dir * lo);
        hits.offer(hi, origin + dir * hi);
        return;
    }
    let w = a - origin;
    let t = perp_dot(&w, &e) / denom;
    let s = perp_dot(&w, dir) / denom;
    let s_pad = tol / e.norm();
    if s < -s_pad || s > 1.0 + s_pad || t < t0 - t_pad || t > t1 + t_pad {
        return;
    }
    let point = a + e * s.clamp(0.0, 1.0);
    hits.offer(t.clamp(t0, t1), point);
}
