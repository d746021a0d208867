//! Theme error types

use thiserror::Error;

/// Errors raised while resolving, persisting or applying a theme
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A mode literal other than `light`, `dark` or `auto`
    #[error("Invalid theme mode: {0:?} (expected \"light\", \"dark\" or \"auto\")")]
    InvalidMode(String),

    /// Mode storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Writing to the style root failed
    #[error("Style root update failed: {0}")]
    Style(String),

    /// Configuration could not be parsed
    #[error("Invalid theme configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("Failed to read theme configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a mode storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage is disabled or does not exist in this environment
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backing file could not be read or written
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not in the expected format
    #[error("Storage data malformed: {0}")]
    Format(String),

    /// Backend-specific failure (quota exceeded, security errors)
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
