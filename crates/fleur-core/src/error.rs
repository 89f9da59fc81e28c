//! Error types for Fleur Core

use thiserror::Error;

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Player error types
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Intent errors
    #[error("Invalid {intent} value: {value:?}")]
    InvalidIntent { intent: &'static str, value: String },

    #[error("Unsupported playback rate: {0}")]
    UnsupportedPlaybackRate(f64),

    // Native surface errors
    #[error("Media surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid-intent error
    pub fn intent(intent: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidIntent {
            intent,
            value: value.into(),
        }
    }

    /// Returns true if the player keeps working after this error.
    ///
    /// Native failures are corrected by the next media event, and a bad
    /// intent only drops that one input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidIntent { .. } | Error::UnsupportedPlaybackRate(_) | Error::Surface(_)
        )
    }

    /// Returns the error code used in log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::InvalidIntent { .. } => "INVALID_INTENT",
            Error::UnsupportedPlaybackRate(_) => "UNSUPPORTED_RATE",
            Error::Surface(e) => e.error_code(),
            Error::Serialization(_) => "SERIALIZATION",
        }
    }
}

/// Failures reported by a native media surface or viewport
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("Fullscreen request rejected: {0}")]
    FullscreenRejected(String),

    #[error("Cannot set {property}: {reason}")]
    PropertyRejected { property: &'static str, reason: String },
}

impl SurfaceError {
    /// Create a property error
    pub fn property(property: &'static str, reason: impl Into<String>) -> Self {
        SurfaceError::PropertyRejected {
            property,
            reason: reason.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SurfaceError::PlaybackRejected(_) => "PLAYBACK_REJECTED",
            SurfaceError::FullscreenRejected(_) => "FULLSCREEN_REJECTED",
            SurfaceError::PropertyRejected { .. } => "PROPERTY_REJECTED",
        }
    }
}
