//! `ConvexPolygon2`: vertex buffer, lazy hull, cached summaries, queries.
//!
//! Lifecycle
//! - Every vertex mutation marks the polygon `Stale`.
//! - `update()` rebuilds the hull in place and refreshes the bounding box,
//!   centroid and area; the polygon is then `Consistent`.
//! - Queries take `&self` and fail with `GeometryError::Outdated` on a stale
//!   polygon. They never rebuild implicitly, so a `Consistent` polygon can be
//!   shared across threads for concurrent reads.
//!
//! Conventions
//! - Hull order is CCW; right after `update()` it starts at the
//!   lexicographically smallest vertex. Cache-only transforms (`scale`,
//!   `translate`) keep the current order.
//! - Edge `i` runs from vertex `i` to vertex `i + 1 (mod n)`.

use tracing::{debug, trace};

use super::bbox::BoundingBox2;
use super::hull::{self, convex_hull_in_place};
use super::queries;
use super::types::{
    AffineMap2, Intersections, Line2, Ray2, Segment2, Transform2, VertexSupplier2,
};
use super::util::{next_index, previous_index};
use crate::cfg::{self, EPS};
use crate::error::{GeometryError, Result};
use crate::{Point2, Vector2};

/// Whether the cached hull matches the stored vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HullState {
    /// Vertices changed since the last `update()`; only mutations are allowed.
    #[default]
    Stale,
    /// Vertices form the hull and the caches match it.
    Consistent,
}

/// Convex polygon with lazily recomputed hull and cached summaries.
#[derive(Clone, Debug)]
pub struct ConvexPolygon2 {
    vertices: Vec<Point2>,
    scratch: Vec<Point2>,
    bounding_box: BoundingBox2,
    centroid: Point2,
    area: f64,
    state: HullState,
}

impl Default for ConvexPolygon2 {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvexPolygon2 {
    /// Empty polygon, already up to date.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut polygon = Self {
            vertices: Vec::with_capacity(capacity),
            scratch: Vec::new(),
            bounding_box: BoundingBox2::nan(),
            centroid: Point2::new(f64::NAN, f64::NAN),
            area: f64::NAN,
            state: HullState::Stale,
        };
        polygon.update();
        polygon
    }

    /// Hull of the supplied points, up to date.
    pub fn from_supplier<S: VertexSupplier2 + ?Sized>(supplier: &S) -> Self {
        let mut polygon = Self::with_capacity(supplier.vertex_count());
        polygon.set_from(supplier);
        polygon
    }

    pub fn from_points(points: &[Point2]) -> Self {
        Self::from_supplier(points)
    }

    /// Hull of the union of two polygons' vertices.
    pub fn from_pair(a: &Self, b: &Self) -> Self {
        let mut polygon = Self::with_capacity(a.vertices.len() + b.vertices.len());
        polygon.set_from_pair(a, b);
        polygon
    }

    // ----- state -----

    #[inline]
    pub fn state(&self) -> HullState {
        self.state
    }

    #[inline]
    pub fn is_up_to_date(&self) -> bool {
        self.state == HullState::Consistent
    }

    #[inline]
    pub fn check_up_to_date(&self) -> Result<()> {
        if self.is_up_to_date() {
            Ok(())
        } else {
            Err(GeometryError::Outdated)
        }
    }

    /// Marks the polygon stale without touching its vertices.
    #[inline]
    pub fn notify_vertices_changed(&mut self) {
        self.state = HullState::Stale;
    }

    // ----- mutation -----

    /// Appends a vertex. The buffer grows as needed.
    pub fn add_vertex(&mut self, p: Point2) {
        self.vertices.push(p);
        self.notify_vertices_changed();
    }

    pub fn add_vertices<S: VertexSupplier2 + ?Sized>(&mut self, supplier: &S) {
        let count = supplier.vertex_count();
        self.vertices.reserve(count);
        self.vertices.extend((0..count).map(|i| supplier.vertex_at(i)));
        self.notify_vertices_changed();
    }

    /// Removes the vertex at `index`; the last vertex takes its slot.
    ///
    /// Allowed on a stale polygon; the index refers to the current buffer.
    pub fn remove_vertex(&mut self, index: usize) -> Result<Point2> {
        self.check_index(index)?;
        let removed = self.vertices.swap_remove(index);
        self.notify_vertices_changed();
        Ok(removed)
    }

    /// Overwrites the vertex at `index`.
    pub fn set_vertex(&mut self, index: usize, p: Point2) -> Result<()> {
        self.check_index(index)?;
        self.vertices[index] = p;
        self.notify_vertices_changed();
        Ok(())
    }

    /// Drops every vertex, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.bounding_box.set_to_nan();
        self.centroid = Point2::new(f64::NAN, f64::NAN);
        self.area = f64::NAN;
        self.notify_vertices_changed();
    }

    pub fn clear_and_update(&mut self) {
        self.clear();
        self.update();
    }

    /// Replaces the vertices with the hull of `supplier`.
    pub fn set_from<S: VertexSupplier2 + ?Sized>(&mut self, supplier: &S) {
        self.clear();
        self.add_vertices(supplier);
        self.update();
    }

    /// Replaces the vertices with the hull of `a ∪ b` (raw vertices of both).
    pub fn set_from_pair(&mut self, a: &Self, b: &Self) {
        self.clear();
        self.add_vertices(a);
        self.add_vertices(b);
        self.update();
    }

    /// Single vertex at the origin, up to date.
    pub fn set_to_zero(&mut self) {
        self.clear();
        self.add_vertex(Point2::origin());
        self.update();
    }

    /// Single NaN vertex, up to date; `contains_nan()` reports it.
    pub fn set_to_nan(&mut self) {
        self.clear();
        self.add_vertex(Point2::new(f64::NAN, f64::NAN));
        self.update();
    }

    pub fn contains_nan(&self) -> bool {
        self.vertices.iter().any(|v| v.x.is_nan() || v.y.is_nan())
    }

    /// Rebuilds the hull and caches if the polygon is stale; no-op otherwise.
    pub fn update(&mut self) {
        if self.is_up_to_date() {
            return;
        }
        let input = self.vertices.len();
        convex_hull_in_place(&mut self.vertices, &mut self.scratch);
        let output = self.vertices.len();
        trace!(input, output, "convex hull rebuilt");
        if input >= 3 && output < 3 {
            debug!(input, output, "hull collapsed to a degenerate polygon");
        }
        self.refresh_caches();
        self.state = HullState::Consistent;
    }

    fn refresh_caches(&mut self) {
        self.bounding_box = BoundingBox2::from_points(&self.vertices);
        let (area, centroid) = queries::area_and_centroid(&self.vertices);
        self.area = area;
        self.centroid = centroid;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.vertices.len();
        if len == 0 {
            return Err(GeometryError::EmptyPolygon);
        }
        if index >= len {
            return Err(GeometryError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    fn check_edge_index(&self, edge: usize) -> Result<()> {
        self.check_up_to_date()?;
        let len = queries::edge_count(self.vertices.len());
        if edge >= len {
            return Err(GeometryError::IndexOutOfBounds { index: edge, len });
        }
        Ok(())
    }

    // ----- transforms -----

    /// Scales about the centroid.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        self.check_up_to_date()?;
        let center = self.centroid;
        self.scale_about(&center, factor)
    }

    /// Scales every vertex about `center`.
    ///
    /// A factor near zero collapses the polygon, so the hull is rebuilt;
    /// otherwise only the caches are refreshed.
    pub fn scale_about(&mut self, center: &Point2, factor: f64) -> Result<()> {
        self.check_up_to_date()?;
        for v in &mut self.vertices {
            *v = center + (*v - center) * factor;
        }
        if factor.abs() <= EPS || !hull::is_strictly_convex(&self.vertices) {
            trace!(factor, "scaling degraded the hull; rebuilding");
            self.notify_vertices_changed();
            self.update();
        } else {
            self.refresh_caches();
        }
        Ok(())
    }

    pub fn translate(&mut self, v: &Vector2) -> Result<()> {
        self.check_up_to_date()?;
        for p in &mut self.vertices {
            *p += v;
        }
        self.bounding_box.translate(v);
        self.centroid += v;
        Ok(())
    }

    /// Translated copy; `self` is unchanged.
    pub fn translate_copy(&self, v: &Vector2) -> Result<Self> {
        let mut copy = self.clone();
        copy.translate(v)?;
        Ok(copy)
    }

    /// Maps every vertex and rebuilds. Valid on a stale polygon too: the hull
    /// of the mapped points is the mapped hull for any affine map.
    pub fn apply_transform<T: Transform2 + ?Sized>(&mut self, transform: &T) {
        for v in &mut self.vertices {
            *v = transform.transform_point(v);
        }
        trace!(vertices = self.vertices.len(), "transform applied");
        self.notify_vertices_changed();
        self.update();
    }

    pub fn apply_inverse_transform(&mut self, transform: &AffineMap2) -> Result<()> {
        let inverse = transform.inverse().ok_or(GeometryError::SingularTransform)?;
        self.apply_transform(&inverse);
        Ok(())
    }

    // ----- read views -----

    /// Stored vertex count, valid in either state.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    /// Hull vertices in CCW order.
    pub fn vertices(&self) -> Result<&[Point2]> {
        self.check_up_to_date()?;
        Ok(&self.vertices)
    }

    /// Stored vertices regardless of state (insertion order while stale).
    #[inline]
    pub fn raw_vertices(&self) -> &[Point2] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Result<Point2> {
        self.check_up_to_date()?;
        self.check_index(index)?;
        Ok(self.vertices[index])
    }

    pub fn next_vertex_index(&self, index: usize) -> Result<usize> {
        self.check_up_to_date()?;
        self.check_index(index)?;
        Ok(next_index(index, self.vertices.len()))
    }

    pub fn previous_vertex_index(&self, index: usize) -> Result<usize> {
        self.check_up_to_date()?;
        self.check_index(index)?;
        Ok(previous_index(index, self.vertices.len()))
    }

    pub fn next_vertex(&self, index: usize) -> Result<Point2> {
        Ok(self.vertices[self.next_vertex_index(index)?])
    }

    pub fn previous_vertex(&self, index: usize) -> Result<Point2> {
        Ok(self.vertices[self.previous_vertex_index(index)?])
    }

    /// Number of edges: 0 below two vertices, otherwise the vertex count.
    pub fn edge_count(&self) -> Result<usize> {
        self.check_up_to_date()?;
        Ok(queries::edge_count(self.vertices.len()))
    }

    pub fn edge(&self, edge: usize) -> Result<Segment2> {
        self.check_edge_index(edge)?;
        let n = self.vertices.len();
        Ok(Segment2::new(
            self.vertices[edge],
            self.vertices[next_index(edge, n)],
        ))
    }

    /// Outward unit normal of edge `edge`.
    pub fn edge_normal(&self, edge: usize) -> Result<Vector2> {
        self.check_edge_index(edge)?;
        Ok(queries::edge_normal(edge, &self.vertices))
    }

    pub fn bounding_box(&self) -> Result<&BoundingBox2> {
        self.check_up_to_date()?;
        Ok(&self.bounding_box)
    }

    /// Area centroid (vertex average when there is no area, NaN when empty).
    pub fn centroid(&self) -> Result<Point2> {
        self.check_up_to_date()?;
        Ok(self.centroid)
    }

    /// Area, positive for a proper polygon, 0 below three vertices, NaN when empty.
    pub fn area(&self) -> Result<f64> {
        self.check_up_to_date()?;
        Ok(self.area)
    }

    pub fn min_x(&self) -> Result<f64> {
        Ok(self.bounding_box()?.min.x)
    }

    pub fn min_y(&self) -> Result<f64> {
        Ok(self.bounding_box()?.min.y)
    }

    pub fn max_x(&self) -> Result<f64> {
        Ok(self.bounding_box()?.max.x)
    }

    pub fn max_y(&self) -> Result<f64> {
        Ok(self.bounding_box()?.max.y)
    }

    pub fn bounding_box_range_x(&self) -> Result<f64> {
        Ok(self.bounding_box()?.range_x())
    }

    pub fn bounding_box_range_y(&self) -> Result<f64> {
        Ok(self.bounding_box()?.range_y())
    }

    // ----- containment and distance -----

    /// Inside the polygon grown by `eps` (shrunk for negative `eps`).
    pub fn is_point_inside(&self, p: &Point2, eps: f64) -> Result<bool> {
        Ok(queries::is_point_inside(p, self.vertices()?, eps))
    }

    /// Inside or on the boundary.
    pub fn is_point_inside_eps0(&self, p: &Point2) -> Result<bool> {
        self.is_point_inside(p, 0.0)
    }

    /// Positive outside, negative inside, NaN for an empty polygon.
    pub fn signed_distance(&self, p: &Point2) -> Result<f64> {
        Ok(queries::signed_distance(p, self.vertices()?))
    }

    /// Distance to the polygon; 0 for points inside.
    pub fn distance(&self, p: &Point2) -> Result<f64> {
        Ok(self.signed_distance(p)?.max(0.0))
    }

    /// On the boundary within the shared tolerance.
    pub fn is_point_on_perimeter(&self, p: &Point2) -> Result<bool> {
        let vertices = self.vertices()?;
        let bbox = &self.bounding_box;
        let scale = cfg::magnitude(p)
            .max(cfg::magnitude(&bbox.min))
            .max(cfg::magnitude(&bbox.max));
        Ok(queries::signed_distance(p, vertices).abs() <= cfg::tol(scale))
    }

    // ----- projection and closest features -----

    /// Nearest boundary point for an outside point; `None` when inside or empty.
    pub fn orthogonal_projection(&self, p: &Point2) -> Result<Option<Point2>> {
        Ok(queries::orthogonal_projection(p, self.vertices()?))
    }

    pub fn closest_vertex_index(&self, p: &Point2) -> Result<Option<usize>> {
        Ok(queries::closest_vertex_index(p, self.vertices()?))
    }

    pub fn closest_vertex(&self, p: &Point2) -> Result<Option<Point2>> {
        Ok(self.closest_vertex_index(p)?.map(|i| self.vertices[i]))
    }

    pub fn closest_vertex_to_line(&self, line: &Line2) -> Result<Option<Point2>> {
        let vertices = self.vertices()?;
        Ok(queries::closest_vertex_index_to_line(line, vertices).map(|i| vertices[i]))
    }

    /// Index of the closest edge; `None` below two vertices.
    pub fn closest_edge_index(&self, p: &Point2) -> Result<Option<usize>> {
        Ok(queries::closest_edge_index(p, self.vertices()?))
    }

    pub fn closest_edge(&self, p: &Point2) -> Result<Option<Segment2>> {
        match self.closest_edge_index(p)? {
            Some(i) => self.edge(i).map(Some),
            None => Ok(None),
        }
    }

    // ----- intersection -----

    pub fn intersection_with_line(&self, line: &Line2) -> Result<Intersections> {
        let vertices = self.vertices()?;
        if !self.bounding_box.intersects_line(line) {
            return Ok(Intersections::Zero);
        }
        Ok(queries::crossings(
            &line.point(),
            &line.direction(),
            f64::NEG_INFINITY,
            f64::INFINITY,
            vertices,
        ))
    }

    /// Crossings in front of the ray origin, nearest first.
    pub fn intersection_with_ray(&self, ray: &Ray2) -> Result<Intersections> {
        let vertices = self.vertices()?;
        if !self.bounding_box.intersects_ray(ray) {
            return Ok(Intersections::Zero);
        }
        Ok(queries::crossings(
            &ray.origin(),
            &ray.direction(),
            0.0,
            f64::INFINITY,
            vertices,
        ))
    }

    /// Boundary points on the segment, ordered from `start` to `end`.
    ///
    /// A segment strictly inside the polygon has none.
    pub fn intersection_with_segment(&self, segment: &Segment2) -> Result<Intersections> {
        let vertices = self.vertices()?;
        if !self.bounding_box.intersects_segment(segment) {
            return Ok(Intersections::Zero);
        }
        let dir = segment.direction();
        if dir.norm_squared() <= 0.0 {
            // A point segment hits only if it lies on the boundary.
            let p = segment.start;
            let on = self.is_point_on_perimeter(&p)?;
            return Ok(if on {
                Intersections::One(p)
            } else {
                Intersections::Zero
            });
        }
        Ok(queries::crossings(&segment.start, &dir, 0.0, 1.0, vertices))
    }

    // ----- visibility -----

    /// `observer` is strictly outside edge `edge`.
    pub fn can_observer_see_edge(&self, edge: usize, observer: &Point2) -> Result<bool> {
        self.check_edge_index(edge)?;
        Ok(queries::can_observer_see_edge(edge, observer, &self.vertices))
    }

    /// `(first, last)` indices bounding the visible boundary chain, CCW.
    pub fn line_of_sight_indices(&self, observer: &Point2) -> Result<Option<(usize, usize)>> {
        Ok(queries::line_of_sight_indices(observer, self.vertices()?))
    }

    pub fn line_of_sight_vertices(&self, observer: &Point2) -> Result<Option<(Point2, Point2)>> {
        Ok(self
            .line_of_sight_indices(observer)?
            .map(|(a, b)| (self.vertices[a], self.vertices[b])))
    }

    // ----- comparison -----

    /// Same vertex count and vertex-by-vertex within `eps` in storage order.
    pub fn epsilon_equals(&self, other: &Self, eps: f64) -> Result<bool> {
        let (a, b) = (self.vertices()?, other.vertices()?);
        Ok(a.len() == b.len() && a.iter().zip(b).all(|(p, q)| (p - q).norm() <= eps))
    }

    /// Same shape within `eps`, whatever vertex each hull starts at.
    pub fn geometrically_equals(&self, other: &Self, eps: f64) -> Result<bool> {
        let (a, b) = (self.vertices()?, other.vertices()?);
        if a.len() != b.len() {
            return Ok(false);
        }
        let n = a.len();
        if n == 0 {
            return Ok(true);
        }
        let Some(offset) = queries::closest_vertex_index(&a[0], b) else {
            return Ok(false);
        };
        Ok((0..n).all(|i| (a[i] - b[(i + offset) % n]).norm() <= eps))
    }
}

impl VertexSupplier2 for ConvexPolygon2 {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn vertex_at(&self, index: usize) -> Point2 {
        self.vertices[index]
    }
}
