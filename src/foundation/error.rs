/// Convenience result type used across maskface.
pub type WatchResult<T> = Result<T, WatchError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A packaged resource could not be resolved or opened.
    #[error("resource error: {0}")]
    Resource(String),

    /// A frame of the bitmap sequence could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Two buffers disagree on size or row stride.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WatchError {
    /// Build a [`WatchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WatchError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`WatchError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`WatchError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
