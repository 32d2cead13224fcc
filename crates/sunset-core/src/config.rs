//! Plugin configuration
//!
//! [`SunsetConfig`] is built once per plugin and shared read-only by every
//! request the plugin serves. [`SunsetSettings`] is its serializable part,
//! loaded from JSON or YAML by tools.

use crate::error::{ArgsError, SunsetError};
use crate::sunset::{parse_sunset_args, Sunset};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use sunset_schema::DirectiveArgs;

/// Default directive name
pub const DEFAULT_DIRECTIVE_NAME: &str = "sunset";

/// Turns one directive's raw arguments into a [`Sunset`]
pub type ParseDirectiveArgs = dyn Fn(&DirectiveArgs) -> Result<Sunset, ArgsError> + Send + Sync;

/// Directive name plus argument parser
#[derive(Clone)]
pub struct SunsetConfig {
    directive_name: String,
    parser: Arc<ParseDirectiveArgs>,
}

impl SunsetConfig {
    /// Configuration with the default directive name and parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded settings, keeping the default parser
    #[must_use]
    pub fn from_settings(settings: &SunsetSettings) -> Self {
        Self::new().with_directive_name(settings.directive_name.clone())
    }

    /// Read a different directive name
    #[must_use]
    pub fn with_directive_name(mut self, name: impl Into<String>) -> Self {
        self.directive_name = name.into();
        self
    }

    /// Replace the argument parser
    #[must_use]
    pub fn with_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&DirectiveArgs) -> Result<Sunset, ArgsError> + Send + Sync + 'static,
    {
        self.parser = Arc::new(parser);
        self
    }

    /// Directive name looked up on schema elements
    #[inline]
    #[must_use]
    pub fn directive_name(&self) -> &str {
        &self.directive_name
    }

    /// Run the configured parser
    ///
    /// # Errors
    /// Whatever the parser reports
    pub fn parse(&self, args: &DirectiveArgs) -> Result<Sunset, ArgsError> {
        (self.parser)(args)
    }
}

impl Default for SunsetConfig {
    fn default() -> Self {
        Self {
            directive_name: DEFAULT_DIRECTIVE_NAME.to_string(),
            parser: Arc::new(parse_sunset_args),
        }
    }
}

impl Debug for SunsetConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SunsetConfig")
            .field("directive_name", &self.directive_name)
            .finish_non_exhaustive()
    }
}

/// Serializable configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SunsetSettings {
    /// Directive name, `sunset` unless overridden
    pub directive_name: String,
}

impl SunsetSettings {
    /// Parse settings from JSON
    ///
    /// # Errors
    /// `SunsetError::Settings` on malformed input
    pub fn from_json(source: &str) -> Result<Self, SunsetError> {
        serde_json::from_str(source).map_err(|e| SunsetError::Settings(e.to_string()))
    }

    /// Parse settings from YAML
    ///
    /// # Errors
    /// `SunsetError::Settings` on malformed input
    pub fn from_yaml(source: &str) -> Result<Self, SunsetError> {
        serde_yaml::from_str(source).map_err(|e| SunsetError::Settings(e.to_string()))
    }
}

impl Default for SunsetSettings {
    fn default() -> Self {
        Self {
            directive_name: DEFAULT_DIRECTIVE_NAME.to_string(),
        }
    }
}
