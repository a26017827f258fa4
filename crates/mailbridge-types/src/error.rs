//! Error types for the mailbridge plugin.
//!
//! Provides [`BridgeError`] as the top-level error type. Registry-level
//! failures (handler query, launch) are normalized to the boolean /
//! empty-list channel contract by the dispatcher; only argument errors
//! cross the channel boundary as explicit error responses.

use thiserror::Error;

/// Top-level error type for the mailbridge plugin.
///
/// Variants are grouped into caller errors (bad arguments, which surface
/// on the channel) and internal failures (config, I/O, JSON), which are
/// either caught and normalized or reported at startup.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    // ── Caller errors ────────────────────────────────────────────────

    /// A required argument is missing or has the wrong type.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    // ── Internal failures ────────────────────────────────────────────

    /// The configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Convenience constructor for [`BridgeError::InvalidArgument`].
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BridgeError>;
