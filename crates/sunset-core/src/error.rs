//! Error types for sunset discovery
//!
//! Malformed annotation metadata is a schema bug, not a runtime condition:
//! these errors are never swallowed and surface as request errors the
//! first time a request touches the broken element.

/// Errors raised while parsing one directive's raw arguments
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    /// Required argument absent
    #[error("missing argument '{0}'")]
    Missing(&'static str),

    /// Argument present but not a string
    #[error("argument '{name}' must be a string, found {found}")]
    NotAString { name: &'static str, found: &'static str },

    /// `url` is not an absolute URI
    #[error("invalid url '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// `when` is not an ISO-8601 timestamp with timezone
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Failure reported by a custom parser
    #[error("{0}")]
    Custom(String),
}

/// Errors during sunset discovery
#[derive(Debug, thiserror::Error)]
pub enum SunsetError {
    /// Annotation present but its arguments are invalid
    #[error("invalid @{directive} on {location}: {source}")]
    InvalidDirective {
        directive: String,
        location: String,
        #[source]
        source: ArgsError,
    },

    /// Settings document could not be decoded
    #[error("invalid settings: {0}")]
    Settings(String),
}

/// Result type alias for sunset operations
pub type SunsetResult<T> = Result<T, SunsetError>;
