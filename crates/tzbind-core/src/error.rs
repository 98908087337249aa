//! Error types for the binding library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all binding operations.
#[derive(Error, Debug)]
pub enum BindError {
    /// The IANA identifier is not present in the timezone database
    #[error("Unknown timezone '{name}': {source}")]
    UnknownTimezone {
        name: String,
        #[source]
        source: jiff::Error,
    },
    /// A local or absolute date/time string could not be parsed
    #[error("Could not parse '{value}' as {expected}: {source}")]
    Parse {
        value: String,
        expected: &'static str,
        #[source]
        source: jiff::Error,
    },
    /// A civil value could not be placed on the timeline of a timezone
    #[error("Could not resolve '{value}' in timezone '{timezone}': {source}")]
    Resolve {
        value: String,
        timezone: String,
        #[source]
        source: jiff::Error,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BindError {
        BindError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BindError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a jiff parse failure together with the offending text.
    pub fn parse(value: impl Into<String>, expected: &'static str, source: jiff::Error) -> Self {
        Self::Parse {
            value: value.into(),
            expected,
            source,
        }
    }

    /// Returns true for errors caused by the environment rather than by the
    /// value being bound.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownTimezone { .. }
                | Self::Configuration { .. }
                | Self::FileSystem { .. }
        )
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to BindError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add lazy context to any error type, converting to BindError.
    fn with_context_lazy<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| BindError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }

    fn with_context_lazy<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| BindError::Configuration {
            message: format!("{}: {}", f(), e),
        })
    }
}

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, BindError>;
