use thiserror::Error;

/// Error types for building and configuring a particle technique
///
/// Every variant is a configuration problem detected while a technique is
/// being built. A running technique never produces errors: numerical edge
/// cases are handled locally by the affected emitter or affector.
#[derive(Error, Debug)]
pub enum FxError {
    /// Two emitters in the same technique share a name
    #[error("Duplicate emitter name: '{0}'")]
    DuplicateEmitter(String),

    /// An affector excludes an emitter that does not exist
    #[error("Affector '{affector}' excludes unknown emitter '{emitter}'")]
    UnknownEmitter { affector: String, emitter: String },

    /// A parameter or scalar field holds an unusable value
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    /// A path follower point list cannot form a spline
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Any other malformed configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure while decoding a technique description
    #[cfg(feature = "serde-support")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FxError {
    /// Shorthand for [`FxError::InvalidParameter`]
    pub(crate) fn parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using FxError
pub type Result<T> = std::result::Result<T, FxError>;
