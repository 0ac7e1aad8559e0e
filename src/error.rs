use thiserror::Error;

/// Top-level error type for the contourkit geometry kernel.
#[derive(Debug, Error)]
pub enum ContourError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while constructing geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("bezier seed needs one or two control points, got {0}")]
    InvalidControlPoints(usize),

    #[error("non-finite coordinate in {0}")]
    NonFinite(&'static str),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the model tree and route addressing.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{kind} id `{id}` already exists")]
    DuplicateId { kind: &'static str, id: String },

    #[error("route `{0}` does not resolve")]
    RouteNotFound(String),

    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("{kind} id `{id}` contains the route separator `/`")]
    InvalidId { kind: &'static str, id: String },
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience type alias for results using [`ContourError`].
pub type Result<T> = std::result::Result<T, ContourError>;
