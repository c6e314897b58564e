use thiserror::Error;

use crate::scene::io::yaml::SceneError;

/// Errors raised while building or rendering a scene.
#[derive(Error, Debug)]
pub enum Error {
    /// Arithmetic that makes no sense for the operands, e.g. adding two points.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Inverse requested for a matrix with a zero determinant.
    #[error("matrix is not invertible")]
    SingularMatrix,

    #[error("index {index} is out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Operands of incompatible shapes or kinds.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

pub type Result<T> = std::result::Result<T, Error>;
