//! Andrew's monotone chain, run in place on the polygon's vertex buffer.
//!
//! Invariants of the output
//! - counter-clockwise, no two consecutive vertices coincident (cyclically),
//!   no three consecutive vertices collinear (sine threshold `cfg::EPS`);
//! - starts at the lexicographically smallest vertex (x, then y);
//! - 1 or 2 vertices when the input is degenerate, 0 when it was empty.

use std::cmp::Ordering;

use super::util::{is_strict_left_turn, next_index};
use crate::cfg::{coincident, magnitude, tol};
use crate::Point2;

/// Lexicographic (x, then y) total order. `-0.0` and `0.0` compare equal.
#[inline]
fn lexicographic(a: &Point2, b: &Point2) -> Ordering {
    let (ax, ay, bx, by) = (a.x + 0.0, a.y + 0.0, b.x + 0.0, b.y + 0.0);
    ax.total_cmp(&bx).then_with(|| ay.total_cmp(&by))
}

/// Replaces `points` with its convex hull. `scratch` is working storage whose
/// capacity is kept between calls; its contents on return are unspecified.
pub(crate) fn convex_hull_in_place(points: &mut Vec<Point2>, scratch: &mut Vec<Point2>) {
    if points.len() < 2 {
        return;
    }
    points.sort_unstable_by(lexicographic);
    dedup_coincident(points);
    if points.len() < 3 {
        return;
    }

    scratch.clear();
    scratch.reserve(points.len() + 1);
    // lower chain
    for p in points.iter() {
        push_chain_point(scratch, p, 2);
    }
    // upper chain, walking back; never pops into the finished lower chain
    let floor = scratch.len() + 1;
    for p in points.iter().rev().skip(1) {
        push_chain_point(scratch, p, floor);
    }
    // the walk ends on the first point again
    scratch.pop();

    while scratch.len() >= 2 && coincident(&scratch[scratch.len() - 1], &scratch[0]) {
        scratch.pop();
    }
    if scratch.is_empty() {
        // non-empty input keeps at least its smallest point
        points.truncate(1);
        return;
    }

    points.clear();
    points.extend_from_slice(scratch);
}

/// Drops every point coincident with an earlier kept one, not only sorted
/// neighbours. `points` must be sorted lexicographically, so candidates are a
/// suffix of the kept prefix within the x tolerance.
fn dedup_coincident(points: &mut Vec<Point2>) {
    let mut kept = 0;
    for i in 0..points.len() {
        let p = points[i];
        let reach = 2.0 * tol(magnitude(&p));
        let duplicate = points[..kept]
            .iter()
            .rev()
            .take_while(|q| q.x >= p.x - reach)
            .any(|q| coincident(q, &p));
        if !duplicate {
            points[kept] = p;
            kept += 1;
        }
    }
    points.truncate(kept);
}

/// Pushes `p` after popping non-left turns, never below `floor` entries.
/// Input points are pairwise distinct, so the chain ends keep their points.
#[inline]
fn push_chain_point(chain: &mut Vec<Point2>, p: &Point2, floor: usize) {
    while chain.len() >= floor
        && !is_strict_left_turn(&chain[chain.len() - 2], &chain[chain.len() - 1], p)
    {
        chain.pop();
    }
    chain.push(*p);
}

/// Convex hull of `points` in CCW order starting at the lexicographically
/// smallest vertex.
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let mut hull = points.to_vec();
    let mut scratch = Vec::new();
    convex_hull_in_place(&mut hull, &mut scratch);
    hull
}

/// `vertices` already satisfy the hull invariants (order aside from the start
/// vertex): strictly convex, CCW, no coincident neighbours.
pub(crate) fn is_strictly_convex(vertices: &[Point2]) -> bool {
    let n = vertices.len();
    match n {
        0 | 1 => true,
        2 => !coincident(&vertices[0], &vertices[1]),
        _ => (0..n).all(|i| {
            let a = &vertices[i];
            let b = &vertices[next_index(i, n)];
            let c = &vertices[next_index(next_index(i, n), n)];
            !coincident(a, b) && is_strict_left_turn(a, b, c)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::point;

    #[test]
    fn unit_square_with_interior_and_collinear_points() {
        let pts = vec![
            point![0.0, 0.0],
            point![1.0, 1.0],
            point![1.0, 0.0],
            point![0.5, 0.5],
            point![0.0, 1.0],
            point![0.5, 0.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(
            hull,
            vec![
                point![0.0, 0.0],
                point![1.0, 0.0],
                point![1.0, 1.0],
                point![0.0, 1.0]
            ]
        );
        assert!(is_strictly_convex(&hull));
    }

    #[test]
    fn clockwise_input_comes_out_ccw() {
        let pts = [
            point![0.0, 2.0],
            point![2.0, 2.0],
            point![2.0, 0.0],
            point![0.0, 0.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull[0], point![0.0, 0.0]);
        assert_eq!(hull[1], point![2.0, 0.0]);
        assert!(is_strictly_convex(&hull));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(convex_hull(&[]).is_empty());
        assert_eq!(convex_hull(&[point![3.0, 4.0]]), vec![point![3.0, 4.0]]);
        let same = [point![1.0, 1.0], point![1.0, 1.0], point![1.0 + 1e-12, 1.0]];
        assert_eq!(convex_hull(&same).len(), 1);
        let line = [
            point![2.0, 2.0],
            point![0.0, 0.0],
            point![1.0, 1.0],
            point![3.0, 3.0],
        ];
        assert_eq!(convex_hull(&line), vec![point![0.0, 0.0], point![3.0, 3.0]]);
    }

    #[test]
    fn near_coincident_points_collapse() {
        let pts = [
            point![0.0, 0.0],
            point![1e-12, 0.0],
            point![1.0, 0.0],
            point![0.0, 1.0],
            point![1e-13, 1.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 3);
        assert!(is_strictly_convex(&hull));
    }

    #[test]
    fn coincident_points_apart_in_sort_order_merge() {
        // (1e-12, 0) sorts after (0, 1) but coincides with (0, 0).
        let pts = [point![0.0, 0.0], point![0.0, 1.0], point![1e-12, 0.0]];
        assert_eq!(convex_hull(&pts), vec![point![0.0, 0.0], point![0.0, 1.0]]);

        let mut cluster = vec![point![2.0, 2.0], point![2.0, 5.0], point![2.0 + 1e-12, 2.0]];
        cluster.push(point![2.0 - 1e-12, 5.0 + 1e-12]);
        cluster.push(point![6.0, 2.0]);
        let hull = convex_hull(&cluster);
        assert_eq!(hull.len(), 3);
        assert!(is_strictly_convex(&hull));
    }

    #[test]
    fn negative_zero_sorts_with_zero() {
        let pts = [
            point![1.0, 1.0],
            point![-0.0, 1.0],
            point![0.0, 0.0],
            point![1.0, 0.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull[0], point![0.0, 0.0]);
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn scratch_capacity_is_reused() {
        let mut pts: Vec<Point2> = (0..32)
            .map(|k| {
                let a = k as f64 * std::f64::consts::TAU / 32.0;
                point![a.cos(), a.sin()]
            })
            .collect();
        let mut scratch = Vec::new();
        convex_hull_in_place(&mut pts, &mut scratch);
        assert_eq!(pts.len(), 32);
        let cap = scratch.capacity();
        convex_hull_in_place(&mut pts, &mut scratch);
        assert_eq!(scratch.capacity(), cap);
        assert!(is_strictly_convex(&pts));
    }
}
