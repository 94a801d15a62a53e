//! Model-layer error types

use thiserror::Error;

use crate::params::ParamError;
use sp_core::prep::PrepError;

/// Model-layer errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// Parameter validation error
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    /// Series preparation error that bubbles up from the data layer
    #[error("Preparation error: {0}")]
    Prep(#[from] PrepError),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
