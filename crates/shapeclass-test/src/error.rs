//! Error types for the test helpers

use thiserror::Error;

/// Errors raised while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// An ASCII fixture could not be turned into a grid
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),

    /// Grid construction failed
    #[error("core error: {0}")]
    Core(#[from] shapeclass_core::Error),
}

/// Result type for test helper operations
pub type TestResult<T> = Result<T, TestError>;
