//! Error types for the hand mouse control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A collaborator handed over a value that breaks the frame contract
    /// (confidence outside [0, 1], zero screen size, bad landmark index)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pose name or classifier class index outside the known pose set
    #[error("Unknown pose: {0}")]
    UnknownPose(String),

    /// Filter construction or filter spec parsing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Cursor control operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
