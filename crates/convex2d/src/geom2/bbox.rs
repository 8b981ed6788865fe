//! Axis-aligned bounding box with NaN bounds as the "no points" state.

use super::types::{Line2, Ray2, Segment2};
use crate::cfg;
use crate::{Point2, Vector2};

/// Axis-aligned box `[min.x, max.x] × [min.y, max.y]`.
///
/// The bounding box of an empty polygon has all-NaN bounds; every
/// containment and intersection test on it answers `false`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl Default for BoundingBox2 {
    fn default() -> Self {
        Self::nan()
    }
}

impl BoundingBox2 {
    /// Box from its corners; `min` is expected to be component-wise `<= max`.
    #[inline]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn nan() -> Self {
        let nan = Point2::new(f64::NAN, f64::NAN);
        Self { min: nan, max: nan }
    }

    /// Tight box around `points`; NaN when `points` is empty.
    pub fn from_points(points: &[Point2]) -> Self {
        let mut bbox = Self::nan();
        for p in points {
            bbox.update_to_include(p);
        }
        bbox
    }

    #[inline]
    pub fn set_to_nan(&mut self) {
        *self = Self::nan();
    }

    #[inline]
    pub fn contains_nan(&self) -> bool {
        self.min.x.is_nan() || self.min.y.is_nan() || self.max.x.is_nan() || self.max.y.is_nan()
    }

    /// Grows the box to contain `p`. A NaN box becomes the point box at `p`.
    pub fn update_to_include(&mut self, p: &Point2) {
        if self.contains_nan() {
            self.min = *p;
            self.max = *p;
            return;
        }
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    #[inline]
    pub fn translate(&mut self, v: &Vector2) {
        self.min += v;
        self.max += v;
    }

    #[inline]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    #[inline]
    pub fn range_x(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn range_y(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_inside_inclusive(&self, p: &Point2) -> bool {
        self.is_inside_epsilon(p, 0.0)
    }

    #[inline]
    pub fn is_inside_exclusive(&self, p: &Point2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Inside the box grown by `eps` on every side (shrunk for negative `eps`).
    #[inline]
    pub fn is_inside_epsilon(&self, p: &Point2, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }

    /// Boxes overlap, touching boundaries included.
    #[inline]
    pub fn intersects_inclusive(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn intersects_line(&self, line: &Line2) -> bool {
        self.clips(&line.point(), &line.direction(), f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn intersects_ray(&self, ray: &Ray2) -> bool {
        self.clips(&ray.origin(), &ray.direction(), 0.0, f64::INFINITY)
    }

    pub fn intersects_segment(&self, segment: &Segment2) -> bool {
        self.clips(&segment.start, &segment.direction(), 0.0, 1.0)
    }

    /// Slab test of `origin + t·dir`, `t ∈ [t0, t1]`, against the box grown
    /// by the coordinate tolerance.
    fn clips(&self, origin: &Point2, dir: &Vector2, mut t0: f64, mut t1: f64) -> bool {
        if self.contains_nan() {
            return false;
        }
        let pad = cfg::tol(cfg::magnitude(&self.min).max(cfg::magnitude(&self.max)));
        for axis in 0..2 {
            let (o, d) = (origin[axis], dir[axis]);
            let (lo, hi) = (self.min[axis] - pad, self.max[axis] + pad);
            if d == 0.0 {
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }
            let (mut ta, mut tb) = ((lo - o) / d, (hi - o) / d);
            if ta > tb {
                std::mem::swap(&mut ta, &mut tb);
            }
            t0 = t0.max(ta);
            t1 = t1.min(tb);
            if t0 > t1 {
                return false;
            }
        }
        true
    }
}
