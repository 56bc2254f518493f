use thiserror::Error;

/// Top-level error type for the relief crate.
#[derive(Debug, Error)]
pub enum ReliefError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the solid store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to solid operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised by the texture and relief generators.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("no faces selected; select faces before applying a texture")]
    NoFacesSelected,

    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Internal invariant: every unit normal has a non-parallel reference axis.
    #[error("no reference axis found for normal ({x}, {y}, {z})")]
    NoReferenceAxis { x: f64, y: f64, z: f64 },
}

/// Convenience type alias for results using [`ReliefError`].
pub type Result<T> = std::result::Result<T, ReliefError>;
