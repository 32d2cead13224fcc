//! Request documents
//!
//! A request is a list of selections against the query root plus named
//! fragments that selections may spread. JSON form:
//!
//! ```json
//! {
//!   "selections": [
//!     { "field": "sunsetArgs", "arguments": { "input": "qux" } },
//!     { "spread": "f" }
//!   ],
//!   "fragments": { "f": [{ "field": "withSunset" }] }
//! }
//! ```

use crate::error::ExecutionError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use sunset_schema::InputValue;

/// One operation against the query root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Request {
    /// Optional operation name, for logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Root selections
    #[serde(default)]
    pub selections: Vec<Selection>,
    /// Named fragments
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fragments: IndexMap<String, Vec<Selection>>,
}

/// Field selection or fragment spread
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// Select a field
    Field(FieldSelection),
    /// Inline the selections of a named fragment
    FragmentSpread {
        /// Fragment name
        spread: String,
    },
}

/// Selected field with arguments and sub-selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSelection {
    /// Field name
    #[serde(rename = "field")]
    pub name: String,
    /// Response key override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Supplied arguments, before coercion
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub arguments: IndexMap<String, InputValue>,
    /// Sub-selections for object-typed fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selections: Vec<Selection>,
}

impl Request {
    /// Create empty request
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode from JSON text
    ///
    /// # Errors
    /// Returns the decoder error on malformed input
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Add a root field selection
    #[must_use]
    pub fn field(mut self, field: FieldSelection) -> Self {
        self.selections.push(Selection::Field(field));
        self
    }

    /// Add a root fragment spread
    #[must_use]
    pub fn spread(mut self, fragment: impl Into<String>) -> Self {
        self.selections.push(Selection::FragmentSpread {
            spread: fragment.into(),
        });
        self
    }

    /// Define a named fragment
    #[must_use]
    pub fn fragment(mut self, name: impl Into<String>, selections: Vec<Selection>) -> Self {
        self.fragments.insert(name.into(), selections);
        self
    }

    /// Flatten selections, inlining fragment spreads in document order
    ///
    /// # Errors
    /// - `ExecutionError::UnknownFragment` for undefined spreads
    /// - `ExecutionError::FragmentCycle` for self-spreading fragments
    pub fn collect_fields<'a>(
        &'a self,
        selections: &'a [Selection],
    ) -> Result<Vec<&'a FieldSelection>, ExecutionError> {
        let mut fields = Vec::new();
        let mut active = HashSet::new();
        self.collect_into(selections, &mut active, &mut fields)?;
        Ok(fields)
    }

    fn collect_into<'a>(
        &'a self,
        selections: &'a [Selection],
        active: &mut HashSet<&'a str>,
        out: &mut Vec<&'a FieldSelection>,
    ) -> Result<(), ExecutionError> {
        for selection in selections {
            match selection {
                Selection::Field(field) => out.push(field),
                Selection::FragmentSpread { spread } => {
                    let fragment = self
                        .fragments
                        .get(spread)
                        .ok_or_else(|| ExecutionError::UnknownFragment(spread.clone()))?;
                    if !active.insert(spread.as_str()) {
                        return Err(ExecutionError::FragmentCycle(spread.clone()));
                    }
                    self.collect_into(fragment, active, out)?;
                    active.remove(spread.as_str());
                }
            }
        }
        Ok(())
    }
}

impl FieldSelection {
    /// Select a field by name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: IndexMap::new(),
            selections: Vec::new(),
        }
    }

    /// Set the response key
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Supply an argument
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Add a sub-selection
    #[must_use]
    pub fn select(mut self, field: FieldSelection) -> Self {
        self.selections.push(Selection::Field(field));
        self
    }

    /// Key under which the result appears in the response
    #[inline]
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}
