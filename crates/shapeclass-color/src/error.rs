//! Error types for shapeclass-color

use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] shapeclass_core::Error),

    /// A reconstruction was requested with no colors to draw from
    #[error("empty palette: at least one color is required")]
    EmptyPalette,
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
