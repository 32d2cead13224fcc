//! Sunset Schema
//!
//! Read-only schema model consumed by the sunset engine.
//!
//! # Core Concepts
//!
//! - [`Schema`]: Immutable set of named type definitions, shared across requests
//! - [`TypeRef`]: Reference to a named type through required/list wrappers
//! - [`TypeDef`]: Closed set of definition kinds, resolved once at load time
//! - [`Directive`]: Raw annotation metadata attached to a schema element
//! - [`InputValue`]: Argument value supplied by a request
//! - [`Path`]: Diagnostic location of a field, argument or input field
//!
//! # Example
//!
//! ```rust,ignore
//! use sunset_schema::{Schema, SchemaDocument};
//!
//! let document = SchemaDocument::from_yaml(source)?;
//! let schema = Schema::from_document(document)?;
//!
//! let query = schema.query_type();
//! for field in query.fields() {
//!     println!("{}: {}", field.name(), field.ty());
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod definition;
mod directive;
mod document;
mod error;
mod path;
mod schema;
mod type_ref;
mod value;

// Re-exports
pub use definition::{
    ArgumentDef, FieldDef, HasDirectives, InputFieldDef, InputObjectType, ObjectType, TypeDef,
};
pub use directive::{Directive, DirectiveArgs};
pub use document::{
    ArgumentDocument, DirectiveDocument, FieldDocument, InputFieldDocument, SchemaDocument,
    TypeDocument,
};
pub use error::{SchemaError, TypeRefError};
pub use path::Path;
pub use schema::{Schema, SchemaBuilder, BUILTIN_SCALARS};
pub use type_ref::TypeRef;
pub use value::InputValue;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
