/// Convenience result type used across the animation compiler.
pub type WavyteResult<T> = Result<T, WavyteError>;

/// Top-level error taxonomy used by compiler APIs.
#[derive(thiserror::Error, Debug)]
pub enum WavyteError {
    /// Easing curve name that has no closed-form mapping.
    #[error("unsupported ease: '{0}'")]
    UnsupportedEase(String),

    /// Descriptor is missing required fields or carries malformed values.
    #[error("invalid animation config: {0}")]
    InvalidAnimationConfig(String),

    /// Two same-type windows overlap, so they cannot be chained sequentially.
    #[error("overlapping animation windows: {0}")]
    OverlappingWindows(String),

    /// A merge slot survived into evaluation or rendering.
    #[error("unresolved {0} slot in filter expression")]
    UnresolvedSlot(&'static str),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavyteError {
    /// Build a [`WavyteError::UnsupportedEase`] value.
    pub fn unsupported_ease(name: impl Into<String>) -> Self {
        Self::UnsupportedEase(name.into())
    }

    /// Build a [`WavyteError::InvalidAnimationConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidAnimationConfig(msg.into())
    }

    /// Build a [`WavyteError::OverlappingWindows`] value.
    pub fn overlapping(msg: impl Into<String>) -> Self {
        Self::OverlappingWindows(msg.into())
    }
}

impl From<serde_json::Error> for WavyteError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
