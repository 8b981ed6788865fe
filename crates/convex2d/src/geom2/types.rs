//! Query primitives, transforms and vertex suppliers consumed by the polygon engine.
//!
//! - `Line2`, `Ray2`: point + unit direction (a zero direction is rejected).
//! - `Segment2`: two endpoints, possibly coincident.
//! - `AffineMap2`: `x ↦ M x + t`; `Transform2` is the single "map a point"
//!   capability the polygon needs from any transform.
//! - `VertexSupplier2`: indexed read access to a finite point sequence.
//! - `Intersections`: 0, 1 or 2 crossing points, returned by value.

use nalgebra::{Isometry2, Matrix2, Similarity2};

use super::util::{perp_dot, project_on_segment};
use crate::error::{GeometryError, Result};
use crate::{Point2, Vector2};

#[inline]
fn unit_direction(direction: Vector2) -> Result<Vector2> {
    let norm = direction.norm();
    if !(norm.is_finite()) || norm <= 0.0 {
        return Err(GeometryError::ZeroVector);
    }
    Ok(direction / norm)
}

/// Infinite line through `point` along a unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line2 {
    point: Point2,
    direction: Vector2,
}

impl Line2 {
    /// Normalizes `direction`; fails with `ZeroVector` when it has no length.
    pub fn new(point: Point2, direction: Vector2) -> Result<Self> {
        Ok(Self {
            point,
            direction: unit_direction(direction)?,
        })
    }

    /// Line through `a` and `b`, directed from `a` to `b`.
    pub fn through(a: Point2, b: Point2) -> Result<Self> {
        Self::new(a, b - a)
    }

    #[inline]
    pub fn point(&self) -> Point2 {
        self.point
    }

    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.point + self.direction * t
    }

    /// Unsigned distance from `p` to the line.
    #[inline]
    pub fn distance(&self, p: &Point2) -> f64 {
        perp_dot(&self.direction, &(p - self.point)).abs()
    }

    /// Strictly left of the line when looking along its direction.
    #[inline]
    pub fn is_point_on_left(&self, p: &Point2) -> bool {
        perp_dot(&self.direction, &(p - self.point)) > 0.0
    }
}

/// Half-line starting at `origin` along a unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray2 {
    origin: Point2,
    direction: Vector2,
}

impl Ray2 {
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        Ok(Self {
            origin,
            direction: unit_direction(direction)?,
        })
    }

    #[inline]
    pub fn origin(&self) -> Point2 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// The supporting line.
    #[inline]
    pub fn to_line(&self) -> Line2 {
        Line2 {
            point: self.origin,
            direction: self.direction,
        }
    }

    /// Distance from `p` to the closest point of the ray.
    pub fn distance(&self, p: &Point2) -> f64 {
        let w = p - self.origin;
        let t = w.dot(&self.direction);
        if t <= 0.0 {
            w.norm()
        } else {
            perp_dot(&self.direction, &w).abs()
        }
    }
}

/// Line segment between two endpoints. Endpoints may coincide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2 {
    pub start: Point2,
    pub end: Point2,
}

impl Segment2 {
    #[inline]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end` (not normalized).
    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    #[inline]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction() * t
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Closest point of the segment to `p`.
    #[inline]
    pub fn orthogonal_projection(&self, p: &Point2) -> Point2 {
        project_on_segment(p, &self.start, &self.end)
    }

    #[inline]
    pub fn distance(&self, p: &Point2) -> f64 {
        (p - self.orthogonal_projection(p)).norm()
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMap2 {
    pub m: Matrix2<f64>,
    pub t: Vector2,
}

impl AffineMap2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn translation(t: Vector2) -> Self {
        Self {
            m: Matrix2::identity(),
            t,
        }
    }

    /// Counter-clockwise rotation about the origin by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            m: Matrix2::new(c, -s, s, c),
            t: Vector2::zeros(),
        }
    }

    /// Per-axis scaling about the origin.
    #[inline]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: Matrix2::new(sx, 0.0, 0.0, sy),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m.determinant()
    }

    /// Inverse map if `m` is invertible.
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    /// Composition `self ∘ other` (apply `other` first).
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }
}

impl Default for AffineMap2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Anything that maps a 2D point to a 2D point.
pub trait Transform2 {
    fn transform_point(&self, p: &Point2) -> Point2;
}

impl Transform2 for AffineMap2 {
    #[inline]
    fn transform_point(&self, p: &Point2) -> Point2 {
        Point2::from(self.m * p.coords + self.t)
    }
}

impl Transform2 for Isometry2<f64> {
    #[inline]
    fn transform_point(&self, p: &Point2) -> Point2 {
        self * p
    }
}

impl Transform2 for Similarity2<f64> {
    #[inline]
    fn transform_point(&self, p: &Point2) -> Point2 {
        self * p
    }
}

/// Indexed, read-only access to a finite sequence of 2D points.
///
/// `vertex_at` may panic for `index >= vertex_count()`, like slice indexing.
pub trait VertexSupplier2 {
    fn vertex_count(&self) -> usize;

    fn vertex_at(&self, index: usize) -> Point2;

    #[inline]
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }
}

impl VertexSupplier2 for [Point2] {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn vertex_at(&self, index: usize) -> Point2 {
        self[index]
    }
}

impl<const N: usize> VertexSupplier2 for [Point2; N] {
    #[inline]
    fn vertex_count(&self) -> usize {
        N
    }
    #[inline]
    fn vertex_at(&self, index: usize) -> Point2 {
        self[index]
    }
}

impl VertexSupplier2 for Vec<Point2> {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn vertex_at(&self, index: usize) -> Point2 {
        self[index]
    }
}

impl VertexSupplier2 for [[f64; 2]] {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn vertex_at(&self, index: usize) -> Point2 {
        let [x, y] = self[index];
        Point2::new(x, y)
    }
}

impl VertexSupplier2 for [(f64, f64)] {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.len()
    }
    #[inline]
    fn vertex_at(&self, index: usize) -> Point2 {
        let (x, y) = self[index];
        Point2::new(x, y)
    }
}

/// Crossing points between a query primitive and a polygon boundary.
///
/// Convexity bounds the count at two. `Two` is ordered along the query
/// primitive's direction (entry first).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersections {
    Zero,
    One(Point2),
    Two(Point2, Point2),
}

impl Intersections {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Intersections::Zero => 0,
            Intersections::One(_) => 1,
            Intersections::Two(..) => 2,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Intersections::Zero)
    }

    #[inline]
    pub fn first(&self) -> Option<Point2> {
        match *self {
            Intersections::Zero => None,
            Intersections::One(p) | Intersections::Two(p, _) => Some(p),
        }
    }

    #[inline]
    pub fn second(&self) -> Option<Point2> {
        match *self {
            Intersections::Two(_, q) => Some(q),
            _ => None,
        }
    }

    /// Iterates the crossing points in order without allocating.
    pub fn iter(&self) -> impl Iterator<Item = Point2> {
        let (points, n) = match *self {
            Intersections::Zero => ([Point2::origin(); 2], 0),
            Intersections::One(p) => ([p, p], 1),
            Intersections::Two(p, q) => ([p, q], 2),
        };
        points.into_iter().take(n)
    }

    pub fn to_vec(&self) -> Vec<Point2> {
        self.iter().collect()
    }
}
