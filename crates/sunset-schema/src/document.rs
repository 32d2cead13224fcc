//! Schema documents
//!
//! Serializable description of a schema, loadable from JSON or YAML:
//!
//! ```yaml
//! query: Query
//! types:
//!   - kind: input_object
//!     name: PostInput
//!     fields:
//!       - name: title
//!         type: String
//!         directives:
//!           - name: sunset
//!             args: { url: "https://example.com", when: "2099-01-01T12:00:00Z" }
//!   - kind: object
//!     name: Query
//!     fields:
//!       - name: post
//!         type: String
//!         args:
//!           - { name: input, type: "PostInput!" }
//! ```

use crate::definition::{ArgumentDef, FieldDef, InputFieldDef, InputObjectType, ObjectType, TypeDef};
use crate::directive::{Directive, DirectiveArgs};
use crate::error::SchemaError;
use crate::schema::Schema;
use crate::type_ref::TypeRef;
use crate::value::InputValue;
use serde::{Deserialize, Serialize};

fn default_query() -> String {
    "Query".to_string()
}

/// Whole schema document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Query root type name
    #[serde(default = "default_query")]
    pub query: String,
    /// Type definitions in declaration order
    #[serde(default)]
    pub types: Vec<TypeDocument>,
}

/// One named type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDocument {
    Scalar {
        name: String,
    },
    Enum {
        name: String,
        #[serde(default)]
        values: Vec<String>,
    },
    InputObject {
        name: String,
        #[serde(default)]
        fields: Vec<InputFieldDocument>,
    },
    Object {
        name: String,
        #[serde(default)]
        fields: Vec<FieldDocument>,
    },
}

/// Output field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub args: Vec<ArgumentDocument>,
    #[serde(default)]
    pub directives: Vec<DirectiveDocument>,
}

/// Field argument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<InputValue>,
    #[serde(default)]
    pub directives: Vec<DirectiveDocument>,
}

/// Structured record field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputFieldDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<InputValue>,
    #[serde(default)]
    pub directives: Vec<DirectiveDocument>,
}

/// Directive instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveDocument {
    pub name: String,
    #[serde(default)]
    pub args: DirectiveArgs,
}

impl SchemaDocument {
    /// Decode from JSON text
    ///
    /// # Errors
    /// `SchemaError::Document` on malformed input
    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Decode from YAML text
    ///
    /// # Errors
    /// `SchemaError::Document` on malformed input
    pub fn from_yaml(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

impl Schema {
    /// Build a validated schema from a document
    ///
    /// # Errors
    /// - `SchemaError::TypeRef` for unparsable type references
    /// - `SchemaError::DuplicateMember` for repeated fields or arguments
    /// - Any error from [`SchemaBuilder::build`](crate::SchemaBuilder::build)
    pub fn from_document(document: SchemaDocument) -> Result<Self, SchemaError> {
        let mut builder = Schema::builder().query_root(document.query);

        for ty in document.types {
            let def = match ty {
                TypeDocument::Scalar { name } => TypeDef::Scalar(name),
                TypeDocument::Enum { name, values } => TypeDef::Enum { name, values },
                TypeDocument::InputObject { name, fields } => {
                    let mut record = InputObjectType::new(&name);
                    for field in fields {
                        let location = format!("{name}.{}", field.name);
                        let mut def = InputFieldDef::new(field.name, parse_type(&field.ty, &location)?);
                        if let Some(default) = field.default {
                            def = def.with_default(default);
                        }
                        for directive in field.directives {
                            def = def.with_directive(directive.into());
                        }
                        if !record.insert_field(def) {
                            return Err(SchemaError::duplicate_member(&name, location));
                        }
                    }
                    TypeDef::InputObject(record)
                }
                TypeDocument::Object { name, fields } => {
                    let mut object = ObjectType::new(&name);
                    for field in fields {
                        let location = format!("{name}.{}", field.name);
                        let mut def = FieldDef::new(&field.name, parse_type(&field.ty, &location)?);
                        for arg in field.args {
                            let arg_location = format!("{location}({})", arg.name);
                            if def.arg(&arg.name).is_some() {
                                return Err(SchemaError::duplicate_member(&location, arg.name));
                            }
                            let mut arg_def = ArgumentDef::new(arg.name, parse_type(&arg.ty, &arg_location)?);
                            if let Some(default) = arg.default {
                                arg_def = arg_def.with_default(default);
                            }
                            for directive in arg.directives {
                                arg_def = arg_def.with_directive(directive.into());
                            }
                            def = def.with_arg(arg_def);
                        }
                        for directive in field.directives {
                            def = def.with_directive(directive.into());
                        }
                        if !object.insert_field(def) {
                            return Err(SchemaError::duplicate_member(&name, field.name));
                        }
                    }
                    TypeDef::Object(object)
                }
            };
            builder = builder.add_type(def);
        }

        builder.build()
    }
}

impl From<DirectiveDocument> for Directive {
    fn from(doc: DirectiveDocument) -> Self {
        Directive::new(doc.name, doc.args)
    }
}

fn parse_type(raw: &str, location: &str) -> Result<TypeRef, SchemaError> {
    raw.parse().map_err(|source| SchemaError::TypeRef {
        location: location.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::HasDirectives;
    use pretty_assertions::assert_eq;

    const JSON: &str = r#"{
        "types": [
            { "kind": "enum", "name": "Color", "values": ["RED", "BLUE"] },
            { "kind": "object", "name": "Query", "fields": [
                { "name": "paint", "type": "String", "args": [
                    { "name": "color", "type": "Color", "default": "RED",
                      "directives": [{ "name": "sunset", "args": { "url": "https://c.example", "when": "2099-01-01T00:00:00Z" } }] }
                ] }
            ] }
        ]
    }"#;

    #[test]
    fn loads_json_document() {
        let schema = Schema::from_document(SchemaDocument::from_json(JSON).unwrap()).unwrap();
        let arg = schema.query_type().field("paint").unwrap().arg("color").unwrap();

        assert_eq!(arg.default_value(), Some(&InputValue::string("RED")));
        assert_eq!(arg.directives().len(), 1);
        assert_eq!(
            schema.directives(arg, "sunset")[0]["url"],
            InputValue::string("https://c.example")
        );
        assert!(matches!(schema.get_type("Color"), Some(TypeDef::Enum { .. })));
    }

    #[test]
    fn reports_type_ref_location() {
        let doc = SchemaDocument::from_yaml(
            r#"
types:
  - kind: object
    name: Query
    fields:
      - name: broken
        type: "[String"
"#,
        )
        .unwrap();
        let err = Schema::from_document(doc).unwrap_err();
        match err {
            SchemaError::TypeRef { location, .. } => assert_eq!(location, "Query.broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_duplicate_arguments() {
        let doc = SchemaDocument::from_yaml(
            r#"
types:
  - kind: object
    name: Query
    fields:
      - name: f
        type: String
        args:
          - { name: a, type: Int }
          - { name: a, type: Int }
"#,
        )
        .unwrap();
        assert!(matches!(
            Schema::from_document(doc),
            Err(SchemaError::DuplicateMember { .. })
        ));
    }

    #[test]
    fn malformed_document() {
        assert!(matches!(
            SchemaDocument::from_json("{ \"types\": 3 }"),
            Err(SchemaError::Document(_))
        ));
    }
}
