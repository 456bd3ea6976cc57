/// Convenience result type used across the crate.
pub type PlotshotResult<T> = Result<T, PlotshotError>;

/// Top-level error taxonomy used by export APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlotshotError {
    /// Transport or wire-contract failures from the frame backend.
    #[error("backend error: {0}")]
    Backend(String),

    /// Failures reported by the graphing widget (state, expressions, snapshot).
    #[error("widget error: {0}")]
    Widget(String),

    /// Invalid user-provided or session data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlotshotError {
    /// Build a [`PlotshotError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`PlotshotError::Widget`] value.
    pub fn widget(msg: impl Into<String>) -> Self {
        Self::Widget(msg.into())
    }

    /// Build a [`PlotshotError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlotshotError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
