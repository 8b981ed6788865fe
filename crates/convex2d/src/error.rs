use thiserror::Error;

/// Failures raised by the polygon engine and its query primitives.
///
/// Degenerate geometry (polygons with fewer than three vertices) is not an
/// error; every query has a defined answer for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A query ran after a mutation without an intervening `update()`.
    #[error("polygon is not up to date: call update() after mutating vertices")]
    Outdated,

    #[error("polygon has no vertex")]
    EmptyPolygon,

    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("zero-length direction vector")]
    ZeroVector,

    #[error("transform is not invertible")]
    SingularTransform,
}

/// Convenience type alias for results using [`GeometryError`].
pub type Result<T> = std::result::Result<T, GeometryError>;
