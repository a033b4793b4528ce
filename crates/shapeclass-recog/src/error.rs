//! Error types for shapeclass-recog

use thiserror::Error;

/// Errors that can occur during clustering and recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] shapeclass_core::Error),

    /// Color library error
    #[error("color error: {0}")]
    Color(#[from] shapeclass_color::ColorError),

    /// Region library error
    #[error("region error: {0}")]
    Region(#[from] shapeclass_region::RegionError),

    /// Every clustering attempt left at least one group empty
    #[error("clustering failed: all {attempts} attempts produced an empty group")]
    ClusteringFailed { attempts: usize },

    /// Fewer descriptors than groups to form
    #[error("insufficient samples: {samples} descriptors for {clusters} clusters")]
    InsufficientSamples { samples: usize, clusters: usize },

    /// Class index outside the model
    #[error("class {class} out of range for a model with {classes} classes")]
    ClassOutOfRange { class: u32, classes: usize },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
