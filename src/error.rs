use thiserror::Error;

/// Errors produced while reconstructing bounded Voronoi cells.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The ray never leaves the box with a non-negative parameter. This is a
    /// contract breach by the caller (origin outside the box, zero direction,
    /// or a ridge without a finite anchor vertex) and aborts the whole pass.
    #[error("ray from ({x}, {y}) with direction ({dx}, {dy}) does not cross the enclosing box")]
    RayClipFailure { x: f64, y: f64, dx: f64, dy: f64 },

    /// A region ended up with fewer than 3 distinct vertices, or its vertex
    /// set is collinear. Reported per seed; the rest of the diagram is still
    /// reconstructed.
    #[error("region of seed {seed} is degenerate ({distinct} distinct vertices)")]
    DegenerateRegion { seed: usize, distinct: usize },

    /// The boundary polygon is not a usable ring. Aborts the clip against
    /// this boundary only.
    #[error("malformed boundary polygon: {0}")]
    MalformedBoundary(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
