/// Convenience result type used across Canopy.
pub type CanopyResult<T> = Result<T, CanopyError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Capacity outcomes (no eligible slot, pledge cap reached) are not errors;
/// they are returned as values by the session API. Errors here signal broken
/// caller contracts or invalid input data.
#[derive(thiserror::Error, Debug)]
pub enum CanopyError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A placement request that violates the slot/reservation contract.
    #[error("placement error: {0}")]
    Placement(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanopyError {
    /// Build a [`CanopyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanopyError::Placement`] value.
    pub fn placement(msg: impl Into<String>) -> Self {
        Self::Placement(msg.into())
    }

    /// Build a [`CanopyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
