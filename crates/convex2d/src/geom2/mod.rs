//! 2D convex polygon engine.
//!
//! Purpose
//! - Keep a vertex buffer whose convex hull is rebuilt lazily (`update()`),
//!   with cached bounding box, centroid and area.
//! - Answer containment, distance, projection, closest-feature,
//!   intersection and visibility queries on the finalized hull.
//!
//! Layout
//! - `types`: query primitives (`Line2`, `Ray2`, `Segment2`), `AffineMap2`,
//!   the `Transform2` and `VertexSupplier2` traits, `Intersections`.
//! - `hull`: in-place monotone chain.
//! - `bbox`: `BoundingBox2`.
//! - `queries`: the algorithms, as free functions over a CCW vertex slice.
//! - `polygon`: `ConvexPolygon2`, the state machine wrapping all of the above.
//!
//! Code cross-refs: `ConvexPolygon2`, `HullState`, `cfg::EPS`

mod bbox;
mod hull;
mod polygon;
mod queries;
mod types;
mod util;

pub use bbox::BoundingBox2;
pub use hull::convex_hull;
pub use polygon::{ConvexPolygon2, HullState};
pub use types::{
    AffineMap2, Intersections, Line2, Ray2, Segment2, Transform2, VertexSupplier2,
};
