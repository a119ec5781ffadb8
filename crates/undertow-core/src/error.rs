use thiserror::Error;

use crate::types::Eye;

/// Errors raised by the underwater effect.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnderwaterError {
    /// The camera's view-projection product has no inverse (for example a
    /// projection with coincident near and far planes).
    #[error("view-projection matrix for {eye:?} eye is not invertible")]
    NonInvertibleViewProjection { eye: Eye },

    #[error("Failed to parse underwater config RON: {0}")]
    ConfigParse(String),
}
