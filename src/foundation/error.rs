/// Convenience result type used across svgscene.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by parser APIs.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Malformed attribute or resource data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A construct the parser does not support, raised only in strict mode.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The event stream never established a root `svg` container.
    #[error("invalid svg data: no root element")]
    MissingRoot,

    /// The markup tokenizer rejected the input.
    #[error("xml error: {0}")]
    Xml(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`SceneError::Xml`] value.
    pub fn xml(msg: impl Into<String>) -> Self {
        Self::Xml(msg.into())
    }

    /// True for the fatal "no root element" condition.
    pub fn is_missing_root(&self) -> bool {
        matches!(self, Self::MissingRoot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
