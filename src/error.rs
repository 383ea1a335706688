//! # Error Types
//!
//! Custom error types for Solar Sense using `thiserror`.
//!
//! Errors only exist at the configuration and startup boundary. The
//! acquisition pipeline itself is total: a transient device fault or a
//! malformed line collapses to "no sample this tick", never an error.

use thiserror::Error;

/// Main error type for Solar Sense
#[derive(Debug, Error)]
pub enum SolarSenseError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Solar Sense
pub type Result<T> = std::result::Result<T, SolarSenseError>;
