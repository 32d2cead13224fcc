//! Annotation metadata attached to schema elements

use crate::value::InputValue;
use indexmap::IndexMap;

/// Raw argument bag of one directive instance
pub type DirectiveArgs = IndexMap<String, InputValue>;

/// One directive instance, e.g. `@sunset(url: "...", when: "...")`
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    name: String,
    args: DirectiveArgs,
}

impl Directive {
    /// Create directive instance
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, args: DirectiveArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Add an argument, returning the updated directive
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Directive name without the `@`
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw arguments
    #[inline]
    #[must_use]
    pub fn args(&self) -> &DirectiveArgs {
        &self.args
    }
}
