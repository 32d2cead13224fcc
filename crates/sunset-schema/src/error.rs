//! Error types for schema construction
//!
//! Provides error handling for:
//! - Type reference parsing (`"[[PostInput!]!]!"` → [`TypeRef`](crate::TypeRef))
//! - Schema document loading (JSON/YAML)
//! - Schema validation (unknown or misplaced type references)

/// Errors while parsing a type reference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefError {
    /// Empty type reference or empty list item
    #[error("empty type reference")]
    Empty,

    /// Unbalanced list brackets
    #[error("unbalanced brackets in type reference: '{0}'")]
    UnbalancedBrackets(String),

    /// Required marker applied twice in a row
    #[error("duplicate required marker in type reference: '{0}'")]
    DoubleRequired(String),

    /// Type name contains characters outside `[_A-Za-z0-9]`
    #[error("invalid type name: '{0}'")]
    InvalidName(String),

    /// Trailing characters after a complete type reference
    #[error("unexpected trailing input in type reference: '{0}'")]
    TrailingInput(String),
}

/// Errors while building a schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Type defined twice (or redefines a built-in scalar)
    #[error("duplicate type definition: '{0}'")]
    DuplicateType(String),

    /// Field, argument or input field declared twice on the same owner
    #[error("duplicate member '{member}' on '{owner}'")]
    DuplicateMember { owner: String, member: String },

    /// Reference to a type that is not defined
    #[error("unknown type '{name}' referenced from {location}")]
    UnknownType { name: String, location: String },

    /// Object type used where an input type is required
    #[error("type '{name}' is not an input type (referenced from {location})")]
    NotInputType { name: String, location: String },

    /// Input object type used as a field's output type
    #[error("type '{name}' is not an output type (referenced from {location})")]
    NotOutputType { name: String, location: String },

    /// Query root type is missing or not an object type
    #[error("query root type '{0}' is not defined as an object type")]
    MissingQueryRoot(String),

    /// Invalid type reference syntax
    #[error("invalid type reference at {location}: {source}")]
    TypeRef {
        location: String,
        #[source]
        source: TypeRefError,
    },

    /// Document could not be decoded
    #[error("schema document error: {0}")]
    Document(String),
}

impl SchemaError {
    /// Create unknown type error
    pub fn unknown_type(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self::UnknownType {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Create duplicate member error
    pub fn duplicate_member(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self::DuplicateMember {
            owner: owner.into(),
            member: member.into(),
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Document(err.to_string())
    }
}

impl From<serde_yaml::Error> for SchemaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Document(err.to_string())
    }
}
