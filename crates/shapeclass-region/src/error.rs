//! Error types for shapeclass-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] shapeclass_core::Error),

    /// Invalid seed position
    #[error("invalid seed position: ({x}, {y})")]
    InvalidSeed { x: u32, y: u32 },

    /// A per-label quantity was missing for a label seen in another pass.
    ///
    /// This means labeling and filtering disagree about which regions exist.
    #[error("no {stage} recorded for label {label}")]
    LookupFailure { label: u32, stage: &'static str },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
