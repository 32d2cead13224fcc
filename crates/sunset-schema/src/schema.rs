//! Schema construction and lookup

use crate::definition::{HasDirectives, InputObjectType, ObjectType, TypeDef};
use crate::directive::DirectiveArgs;
use crate::error::SchemaError;
use crate::type_ref::TypeRef;
use indexmap::IndexMap;

/// Scalars available in every schema
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Validated, immutable schema
///
/// Every type reference inside a `Schema` resolves to a definition of the
/// right kind, so lookups made by consumers only fail for names that came
/// from outside the schema (e.g. a request naming an unknown field).
#[derive(Debug, Clone)]
pub struct Schema {
    types: IndexMap<String, TypeDef>,
    query: String,
}

impl Schema {
    /// Start building a schema
    #[inline]
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Look up a named type
    #[inline]
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Resolve the innermost named type of a reference
    #[inline]
    #[must_use]
    pub fn resolve(&self, ty: &TypeRef) -> Option<&TypeDef> {
        self.types.get(ty.base_name())
    }

    /// Look up an object type
    #[must_use]
    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        match self.types.get(name) {
            Some(TypeDef::Object(ty)) => Some(ty),
            _ => None,
        }
    }

    /// Look up a structured record type
    #[must_use]
    pub fn input_object(&self, name: &str) -> Option<&InputObjectType> {
        match self.types.get(name) {
            Some(TypeDef::InputObject(ty)) => Some(ty),
            _ => None,
        }
    }

    /// Query root type
    ///
    /// # Panics
    /// Never: presence is checked when the schema is built.
    #[must_use]
    pub fn query_type(&self) -> &ObjectType {
        match self.types.get(&self.query) {
            Some(TypeDef::Object(ty)) => ty,
            _ => unreachable!("query root validated at build time"),
        }
    }

    /// All type definitions in declaration order (built-in scalars first)
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    /// Raw arguments of every directive named `name` attached to `element`
    ///
    /// Returns an empty list when the element carries no such directive.
    pub fn directives<'e, E>(&self, element: &'e E, name: &str) -> Vec<&'e DirectiveArgs>
    where
        E: HasDirectives + ?Sized,
    {
        element
            .directives()
            .iter()
            .filter(|d| d.name() == name)
            .map(|d| d.args())
            .collect()
    }
}

/// Builder for [`Schema`]
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    types: Vec<TypeDef>,
    query: String,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    /// Create builder with `Query` as root
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            query: "Query".to_string(),
        }
    }

    /// Override the query root type name
    #[must_use]
    pub fn query_root(mut self, name: impl Into<String>) -> Self {
        self.query = name.into();
        self
    }

    /// Add any type definition
    #[must_use]
    pub fn add_type(mut self, ty: TypeDef) -> Self {
        self.types.push(ty);
        self
    }

    /// Add an object type
    #[must_use]
    pub fn object(self, ty: ObjectType) -> Self {
        self.add_type(TypeDef::Object(ty))
    }

    /// Add a structured record type
    #[must_use]
    pub fn input_object(self, ty: InputObjectType) -> Self {
        self.add_type(TypeDef::InputObject(ty))
    }

    /// Add a custom scalar
    #[must_use]
    pub fn scalar(self, name: impl Into<String>) -> Self {
        self.add_type(TypeDef::Scalar(name.into()))
    }

    /// Validate and build
    ///
    /// # Errors
    /// - `SchemaError::DuplicateType` if a name is defined twice
    /// - `SchemaError::UnknownType` if a reference names no definition
    /// - `SchemaError::NotInputType` / `NotOutputType` for misplaced types
    /// - `SchemaError::MissingQueryRoot` if the root is absent
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut types: IndexMap<String, TypeDef> = BUILTIN_SCALARS
            .iter()
            .map(|name| ((*name).to_string(), TypeDef::Scalar((*name).to_string())))
            .collect();

        for mut ty in self.types {
            let name = ty.name().to_string();
            match &mut ty {
                TypeDef::Object(object) => {
                    for field in object.fields_mut() {
                        field.set_owner(&name);
                    }
                }
                TypeDef::InputObject(record) => {
                    for field in record.fields_mut() {
                        field.set_owner(&name);
                    }
                }
                TypeDef::Scalar(_) | TypeDef::Enum { .. } => {}
            }
            if types.insert(name.clone(), ty).is_some() {
                return Err(SchemaError::DuplicateType(name));
            }
        }

        let schema = Schema {
            types,
            query: self.query,
        };
        validate_references(&schema)?;

        if schema.object_type(&schema.query).is_none() {
            return Err(SchemaError::MissingQueryRoot(schema.query));
        }
        Ok(schema)
    }
}

fn validate_references(schema: &Schema) -> Result<(), SchemaError> {
    for ty in schema.types.values() {
        match ty {
            TypeDef::Object(object) => {
                for field in object.fields() {
                    check_output(schema, field.ty(), &field.describe())?;
                    for arg in field.args() {
                        check_input(schema, arg.ty(), &arg.describe())?;
                    }
                }
            }
            TypeDef::InputObject(record) => {
                for field in record.fields() {
                    check_input(schema, field.ty(), &field.describe())?;
                }
            }
            TypeDef::Scalar(_) | TypeDef::Enum { .. } => {}
        }
    }
    Ok(())
}

fn check_input(schema: &Schema, ty: &TypeRef, location: &str) -> Result<(), SchemaError> {
    let def = schema
        .resolve(ty)
        .ok_or_else(|| SchemaError::unknown_type(ty.base_name(), location))?;
    if def.is_input() {
        Ok(())
    } else {
        Err(SchemaError::NotInputType {
            name: def.name().to_string(),
            location: location.to_string(),
        })
    }
}

fn check_output(schema: &Schema, ty: &TypeRef, location: &str) -> Result<(), SchemaError> {
    let def = schema
        .resolve(ty)
        .ok_or_else(|| SchemaError::unknown_type(ty.base_name(), location))?;
    if def.is_output() {
        Ok(())
    } else {
        Err(SchemaError::NotOutputType {
            name: def.name().to_string(),
            location: location.to_string(),
        })
    }
}
