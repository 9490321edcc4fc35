//! Error types for the portfolio page controller

use thiserror::Error;

/// Result type alias for page operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while binding, driving, or rendering the page
///
/// Form validation failures and simulated delivery failures are page state,
/// not errors: they surface as field messages and notifications.
#[derive(Error, Debug)]
pub enum Error {
    /// A required element of the DOM contract is missing or malformed
    #[error("Page binding failed: {0}")]
    Binding(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A colour string that is not `#rrggbb`
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// Failed to rasterize or encode an image
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The async runtime worker has stopped
    #[error("Page runtime is no longer running")]
    RuntimeClosed,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

#[cfg(feature = "render")]
impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::RenderError(err.to_string())
    }
}
