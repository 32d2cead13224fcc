//! Error types for request execution
//!
//! Provides error handling for:
//! - Argument coercion against declared types
//! - Fragment expansion
//! - Plugin hooks and resolvers

use std::error::Error as StdError;

/// Error raised by a plugin hook
///
/// Wraps the plugin's own error type so it can be reported as a request
/// error without the pipeline knowing about it.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct PluginError {
    #[source]
    source: Box<dyn StdError + Send + Sync + 'static>,
}

impl PluginError {
    /// Wrap a plugin error
    pub fn new(source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Underlying error, for downcasting
    #[must_use]
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// Error raised by a field resolver
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ResolverError(pub String);

impl ResolverError {
    /// Create resolver error
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors during request execution
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// Selected field not declared on the parent type
    #[error("cannot query field '{field}' on type '{parent}'")]
    UnknownField { parent: String, field: String },

    /// Supplied argument not declared on the field
    #[error("unknown argument '{argument}' on field '{field}'")]
    UnknownArgument { field: String, argument: String },

    /// Required argument or input field not supplied and without default
    #[error("missing required value for '{location}'")]
    MissingValue { location: String },

    /// Supplied key not declared on the structured record
    #[error("unknown field '{field}' on input type '{parent}'")]
    UnknownInputField { parent: String, field: String },

    /// Supplied value does not fit the declared type
    #[error("invalid value for '{location}': expected {expected}, found {found}")]
    InvalidValue {
        location: String,
        expected: String,
        found: String,
    },

    /// Spread of an undefined fragment
    #[error("unknown fragment '{0}'")]
    UnknownFragment(String),

    /// Fragment spreading itself, directly or indirectly
    #[error("fragment '{0}' spreads itself")]
    FragmentCycle(String),

    /// Plugin hook failed
    #[error("plugin error: {0}")]
    Plugin(#[from] PluginError),

    /// Resolver failed
    #[error("resolver error: {0}")]
    Resolver(#[from] ResolverError),
}

impl ExecutionError {
    /// Create invalid value error
    pub fn invalid_value(
        location: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            location: location.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}
