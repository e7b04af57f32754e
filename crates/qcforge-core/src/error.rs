//! Error types shared by the schema engine, the backends, and the envelope codec.

use thiserror::Error;

/// A single option failing its declared type, range, or enumeration constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending option.
    pub field: String,
    /// What was wrong with the supplied value.
    pub reason: String,
}

impl ValidationError {
    /// Creates a new validation error for `field`.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value for option '{}': {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for option resolution and input generation.
///
/// Every variant is fatal to the job it occurs in: no partial input file is
/// ever produced, and nothing is retried (generation is pure, so retrying
/// the same request cannot change the outcome). Advisory conditions travel
/// as warnings in [`GenerationResult`](crate::GenerationResult) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A supplied option value failed its descriptor's constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A well-typed but unsupported value reached a compiler — an unknown
    /// calculation type, report format, or lookup-table key.
    #[error("unhandled value '{value}' for option '{option}'")]
    UnhandledOption {
        /// Name of the option carrying the value.
        option: String,
        /// The value no composition rule accepts.
        value: String,
    },

    /// A compiler asked for an option the resolved set does not hold, or
    /// holds with a different kind.
    #[error("option '{option}' is not resolved as {expected}")]
    OptionLookup {
        /// Name of the option looked up.
        option: String,
        /// The kind the compiler expected.
        expected: &'static str,
    },

    /// The job request envelope was not valid JSON of the expected shape.
    #[error("malformed job request: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a [`Error::Validation`] error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation(ValidationError::new(field, reason))
    }

    /// Creates an [`Error::UnhandledOption`] error.
    pub fn unhandled(option: impl Into<String>, value: impl ToString) -> Self {
        Error::UnhandledOption {
            option: option.into(),
            value: value.to_string(),
        }
    }
}

/// Result type for qcforge operations.
pub type Result<T> = std::result::Result<T, Error>;
