/// Convenience result type used across the crate.
pub type CountdownResult<T> = Result<T, CountdownError>;

/// Top-level error taxonomy used by rendering and streaming APIs.
///
/// Out-of-range numeric configuration is never an error (it is clamped), and an already-expired
/// target time is a normal input that renders the fallback message.
#[derive(thiserror::Error, Debug)]
pub enum CountdownError {
    /// The target-time literal could not be parsed into an absolute instant.
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Invalid user-provided data that cannot be clamped into range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font loading or font data errors.
    #[error("font error: {0}")]
    Font(String),

    /// The container encoder rejected the configuration or a frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// The output sink refused bytes or failed mid-stream (e.g. client disconnect).
    #[error("sink error: {0}")]
    Sink(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CountdownError {
    /// Build a [`CountdownError::InvalidTime`] value.
    pub fn invalid_time(msg: impl Into<String>) -> Self {
        Self::InvalidTime(msg.into())
    }

    /// Build a [`CountdownError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CountdownError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CountdownError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CountdownError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Return `true` when the error came from the output sink rather than from rendering.
    pub fn is_sink_failure(&self) -> bool {
        matches!(self, Self::Sink(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
