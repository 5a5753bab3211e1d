/// Convenience alias used across the crate.
pub type DitherResult<T> = Result<T, DitherError>;

/// Errors surfaced to the code that configures and wires an engine.
///
/// The running animation never reports errors to its host; these only come out of
/// construction, option loading, and offline rendering.
#[derive(thiserror::Error, Debug)]
pub enum DitherError {
    /// Options or inputs that can never produce a valid engine.
    #[error("validation error: {0}")]
    Validation(String),

    /// Offline rendering failed (no frame produced, sink rejected a frame).
    #[error("render error: {0}")]
    Render(String),

    /// Option (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DitherError {
    /// Build a [`DitherError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DitherError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DitherError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
