use std::fmt;

/// Fatal conversion error, returned to the caller of a convertor operation.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{record} has no default constructor")]
    NotConstructible { record: String },

    #[error("{record} could not be instantiated: {reason}")]
    Instantiate { record: String, reason: String },

    #[error("{record} declares more than one getter or setter for property '{property}'")]
    AmbiguousProperty { record: String, property: String },

    #[error("{record} convertor is read-only")]
    ReadOnly { record: String },

    #[error("object is not an instance of {expected}")]
    TypeMismatch { expected: String },

    #[error("expected JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single accessor or mutator invocation.
///
/// Never fatal: the convertor logs it, records it in the
/// [`ConversionReport`](crate::convertor::ConversionReport) and moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvokeError {
    #[error("expected {expected}, got {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Failed(String),
}

impl InvokeError {
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::Type { expected, found }
    }

    /// Wraps an error returned by a fallible accessor or mutator.
    pub fn failed(e: impl fmt::Display) -> Self {
        Self::Failed(e.to_string())
    }

    /// Add context to the error.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self::Failed(format!("{ctx}: {self}"))
    }
}
