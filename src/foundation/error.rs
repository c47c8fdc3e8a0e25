/// Convenience result type used across glowstrip.
pub type GlowResult<T> = Result<T, GlowError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlowError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A path had too few points to build geometry from.
    #[error("degenerate input: need at least 2 points, got {points}")]
    DegenerateInput {
        /// Number of points that were supplied.
        points: usize,
    },

    /// A preferred rendering resource (shader, texture) is not available.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A session id that is not (or no longer) registered.
    #[error("unknown session: {0}")]
    UnknownSession(u64),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlowError {
    /// Build a [`GlowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlowError::DegenerateInput`] value.
    pub fn degenerate(points: usize) -> Self {
        Self::DegenerateInput { points }
    }

    /// Build a [`GlowError::ResourceUnavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// Build a [`GlowError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for conditions that callers skip silently instead of reporting.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateInput { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
