//! Error types for mounting and configuring the particle field.

use thiserror::Error;

/// Errors raised while configuring or mounting the field
///
/// None of these escape to the page: the entry points log them and leave the
/// background undrawn.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Settings JSON could not be parsed
    #[error("Invalid settings JSON: {0}")]
    SettingsJson(#[from] serde_json::Error),

    /// A settings value is out of range
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: String,
    },

    /// No browser window (e.g. running in a worker)
    #[error("No window available")]
    NoWindow,

    /// Window has no document
    #[error("No document available")]
    NoDocument,

    /// Canvas element missing or not a canvas
    #[error("Canvas element not found: #{0}")]
    CanvasNotFound(String),

    /// 2D drawing context unavailable
    #[error("2D context unavailable")]
    NoContext,
}

/// Result alias for field operations
pub type Result<T> = std::result::Result<T, FieldError>;
