//! Argument coercion
//!
//! Turns the arguments supplied by a request into the values resolvers
//! and hooks observe:
//! - Omitted arguments and record fields with a declared default receive it
//! - A single value supplied for a list type becomes a one-element list
//! - Record fields are reordered to their declaration order
//! - Values that do not fit the declared type are rejected

use crate::error::ExecutionError;
use indexmap::IndexMap;
use sunset_schema::{FieldDef, HasDirectives, InputObjectType, InputValue, Schema, TypeDef, TypeRef};

/// Coerce supplied arguments for one field
///
/// # Errors
/// - `ExecutionError::UnknownArgument` for undeclared arguments
/// - `ExecutionError::MissingValue` for required arguments without default
/// - Any error from [`coerce_value`]
pub fn coerce_arguments(
    schema: &Schema,
    field: &FieldDef,
    supplied: &IndexMap<String, InputValue>,
) -> Result<IndexMap<String, InputValue>, ExecutionError> {
    if let Some(unknown) = supplied.keys().find(|name| field.arg(name).is_none()) {
        return Err(ExecutionError::UnknownArgument {
            field: field.describe(),
            argument: unknown.clone(),
        });
    }

    let mut coerced = IndexMap::with_capacity(field.args().len());
    for arg in field.args() {
        let location = arg.describe();
        match (supplied.get(arg.name()), arg.default_value()) {
            (Some(value), _) => {
                coerced.insert(arg.name().to_string(), coerce_value(schema, value, arg.ty(), &location)?);
            }
            (None, Some(default)) => {
                coerced.insert(arg.name().to_string(), default.clone());
            }
            (None, None) if arg.ty().is_non_null() => {
                return Err(ExecutionError::MissingValue { location });
            }
            (None, None) => {}
        }
    }
    Ok(coerced)
}

/// Coerce one value against its declared type
///
/// # Errors
/// - `ExecutionError::InvalidValue` when the value does not fit
/// - `ExecutionError::UnknownInputField` for undeclared record keys
/// - `ExecutionError::MissingValue` for required record fields without default
pub fn coerce_value(
    schema: &Schema,
    value: &InputValue,
    ty: &TypeRef,
    location: &str,
) -> Result<InputValue, ExecutionError> {
    match ty {
        TypeRef::NonNull(inner) => {
            if value.is_null() {
                return Err(ExecutionError::invalid_value(location, ty.to_string(), "null"));
            }
            coerce_value(schema, value, inner, location)
        }
        _ if value.is_null() => Ok(InputValue::Null),
        TypeRef::List(item) => match value {
            InputValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| coerce_value(schema, v, item, &format!("{location}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(InputValue::List),
            single => Ok(InputValue::List(vec![coerce_value(schema, single, item, location)?])),
        },
        TypeRef::Named(name) => match schema.get_type(name) {
            Some(TypeDef::InputObject(record)) => coerce_record(schema, value, record, location),
            Some(TypeDef::Scalar(scalar)) => coerce_scalar(value, scalar, location),
            Some(TypeDef::Enum { values, .. }) => match value {
                InputValue::String(s) if values.contains(s) => Ok(value.clone()),
                other => Err(ExecutionError::invalid_value(location, name.as_str(), other.to_string())),
            },
            Some(TypeDef::Object(_)) | None => {
                Err(ExecutionError::invalid_value(location, "input type", name.as_str()))
            }
        },
    }
}

fn coerce_record(
    schema: &Schema,
    value: &InputValue,
    record: &InputObjectType,
    location: &str,
) -> Result<InputValue, ExecutionError> {
    let Some(supplied) = value.as_object() else {
        return Err(ExecutionError::invalid_value(location, record.name(), value.kind()));
    };
    if let Some(unknown) = supplied.keys().find(|key| record.field(key).is_none()) {
        return Err(ExecutionError::UnknownInputField {
            parent: record.name().to_string(),
            field: unknown.clone(),
        });
    }

    let mut coerced = IndexMap::new();
    for field in record.fields() {
        let field_location = format!("{location}.{}", field.name());
        match (supplied.get(field.name()), field.default_value()) {
            (Some(v), _) => {
                coerced.insert(field.name().to_string(), coerce_value(schema, v, field.ty(), &field_location)?);
            }
            (None, Some(default)) => {
                coerced.insert(field.name().to_string(), default.clone());
            }
            (None, None) if field.ty().is_non_null() => {
                return Err(ExecutionError::MissingValue {
                    location: field_location,
                });
            }
            (None, None) => {}
        }
    }
    Ok(InputValue::Object(coerced))
}

#[allow(clippy::cast_precision_loss)]
fn coerce_scalar(value: &InputValue, scalar: &str, location: &str) -> Result<InputValue, ExecutionError> {
    let accepted = match (scalar, value) {
        ("String", InputValue::String(_))
        | ("ID", InputValue::String(_) | InputValue::Int(_))
        | ("Int", InputValue::Int(_))
        | ("Float", InputValue::Float(_))
        | ("Boolean", InputValue::Boolean(_)) => true,
        ("Float", InputValue::Int(i)) => return Ok(InputValue::Float(*i as f64)),
        ("String" | "ID" | "Int" | "Float" | "Boolean", _) => false,
        // custom scalars accept any literal
        _ => true,
    };
    if accepted {
        Ok(value.clone())
    } else {
        Err(ExecutionError::invalid_value(location, scalar, value.kind()))
    }
}
