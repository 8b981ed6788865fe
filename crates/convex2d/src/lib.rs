//! Convex polygon engine and 2D geometry primitives.
//!
//! The core is [`geom2::ConvexPolygon2`]: a vertex buffer with lazy convex-hull
//! recomputation, cached bounding box/centroid/area, and the geometric queries
//! run on the finalized hull (containment, signed distance, projection,
//! closest vertex/edge, line/ray/segment intersection, visibility).
//!
//! Conventions
//! - Hull vertices are stored counter-clockwise, starting at the
//!   lexicographically smallest vertex.
//! - Degenerate polygons (0, 1 or 2 vertices) are valid states, not errors.
//! - One tolerance, [`cfg::EPS`], governs coincidence and collinearity for the
//!   hull builder and every query.

pub mod cfg;
pub mod error;
pub mod geom2;

pub use error::{GeometryError, Result};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Common geometry exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{
        convex_hull, AffineMap2, BoundingBox2, ConvexPolygon2, Intersections, Line2, Ray2,
        Segment2, Transform2, VertexSupplier2,
    };
    pub use crate::{GeometryError, Point2, Vector2};
    pub use nalgebra::{point, vector};
}
