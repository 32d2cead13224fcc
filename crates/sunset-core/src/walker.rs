//! Argument tree walker
//!
//! Visits a supplied argument value in lock-step with its declared type and
//! reports every sunset annotation found on structured-record fields below
//! the argument. The argument's own annotation is the caller's concern.
//!
//! Traversal is depth-first in field-declaration order and runs on an
//! explicit work stack, so deeply nested inputs never grow the call stack.

use crate::config::SunsetConfig;
use crate::error::SunsetResult;
use crate::reader::read_sunset;
use crate::shape::{self, TypeKind};
use crate::sunset::Sunset;
use std::sync::Arc;
use sunset_schema::{InputFieldDef, InputObjectType, InputValue, Path, Schema, TypeRef};

enum Frame<'a> {
    /// Value to descend into
    Value {
        value: &'a InputValue,
        ty: &'a TypeRef,
        prev: Arc<Path>,
    },
    /// Record field to check; `value` is `None` when the field was omitted
    Field {
        record: &'a InputObjectType,
        field: &'a InputFieldDef,
        value: Option<&'a InputValue>,
        prev: Arc<Path>,
    },
    /// Record fully visited
    Leave,
}

/// Walk `value` against `declared`, calling `emit` for each annotation found
///
/// Record fields that were omitted, or whose value equals their declared
/// default, are skipped together with their subtree. Self-referencing record
/// types are followed as deep as the supplied value goes; only a value node
/// already being visited on the current path is not entered again.
///
/// # Errors
/// Propagates malformed-annotation errors from [`read_sunset`]; nothing is
/// emitted after the first error.
pub fn walk(
    schema: &Schema,
    origin: &Arc<Path>,
    value: &InputValue,
    declared: &TypeRef,
    config: &SunsetConfig,
    emit: &mut dyn FnMut(Arc<Path>, Sunset),
) -> SunsetResult<()> {
    let mut stack = vec![Frame::Value {
        value,
        ty: declared,
        prev: Arc::clone(origin),
    }];
    // Record values entered on the current path
    let mut active: Vec<&InputValue> = Vec::new();

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Leave => {
                active.pop();
            }
            Frame::Field {
                record,
                field,
                value,
                prev,
            } => {
                let Some(value) = value else {
                    continue;
                };
                if Some(value) == field.default_value() {
                    continue;
                }
                let path = Arc::new(Path::with_prev(field.name(), record.name(), prev));
                if let Some(sunset) = read_sunset(schema, field, config)? {
                    emit(Arc::clone(&path), sunset);
                }
                stack.push(Frame::Value {
                    value,
                    ty: field.ty(),
                    prev: path,
                });
            }
            Frame::Value { value, ty, prev } => {
                if value.is_null() {
                    continue;
                }
                let ty = shape::unwrap_required(ty);
                match shape::classify(schema, ty) {
                    TypeKind::List => {
                        let Some(item_ty) = shape::list_item(ty) else {
                            continue;
                        };
                        match value.as_list() {
                            Some(items) => {
                                for item in items.iter().rev() {
                                    stack.push(Frame::Value {
                                        value: item,
                                        ty: item_ty,
                                        prev: Arc::clone(&prev),
                                    });
                                }
                            }
                            // Single value supplied where a list is declared
                            None => stack.push(Frame::Value {
                                value,
                                ty: item_ty,
                                prev,
                            }),
                        }
                    }
                    TypeKind::StructuredRecord => {
                        let (Some(record), Some(supplied)) =
                            (shape::structured_record(schema, ty), value.as_object())
                        else {
                            continue;
                        };
                        if active.iter().any(|entered| std::ptr::eq(*entered, value)) {
                            tracing::debug!(
                                "Skipping re-entry of {} value below {}",
                                record.name(),
                                prev
                            );
                            continue;
                        }
                        active.push(value);
                        stack.push(Frame::Leave);
                        let fields: Vec<_> = record.fields().collect();
                        for field in fields.into_iter().rev() {
                            stack.push(Frame::Field {
                                record,
                                field,
                                value: supplied.get(field.name()),
                                prev: Arc::clone(&prev),
                            });
                        }
                    }
                    TypeKind::Leaf => {}
                    // Stripped by `unwrap_required` above
                    TypeKind::Required => {
                        debug_assert!(
                            !matches!(ty, TypeRef::NonNull(_)),
                            "required wrapper survived unwrap_required"
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SunsetError;
    use pretty_assertions::assert_eq;
    use sunset_schema::{Directive, ObjectType};

    fn sunset(url: &str) -> Directive {
        Directive::new("sunset", Default::default())
            .with_arg("url", url)
            .with_arg("when", "2099-01-01T12:00:00Z")
    }

    fn schema() -> Schema {
        Schema::builder()
            .object(ObjectType::new("Query"))
            .input_object(
                InputObjectType::new("PostInput")
                    .with_field(
                        InputFieldDef::new("title", TypeRef::named("String"))
                            .with_directive(sunset("https://title.com")),
                    )
                    .with_field(
                        InputFieldDef::new("draft", TypeRef::named("Boolean"))
                            .with_default(false)
                            .with_directive(sunset("https://draft.com")),
                    )
                    .with_field(InputFieldDef::new("author", TypeRef::named("AuthorInput"))),
            )
            .input_object(InputObjectType::new("AuthorInput").with_field(
                InputFieldDef::new("handle", TypeRef::named("String"))
                    .with_directive(sunset("https://handle.com")),
            ))
            .input_object(
                InputObjectType::new("TreeInput")
                    .with_field(
                        InputFieldDef::new("label", TypeRef::named("String"))
                            .with_directive(sunset("https://label.com")),
                    )
                    .with_field(InputFieldDef::new(
                        "children",
                        TypeRef::named("TreeInput").non_null().list(),
                    )),
            )
            .build()
            .unwrap()
    }

    fn collect(schema: &Schema, value: InputValue, ty: &str) -> Vec<(String, String)> {
        let origin = Arc::new(Path::new("input", "posts"));
        let ty: TypeRef = ty.parse().unwrap();
        let mut found = Vec::new();
        walk(
            schema,
            &origin,
            &value,
            &ty,
            &SunsetConfig::default(),
            &mut |path, sunset| found.push((path.to_string(), sunset.url().to_string())),
        )
        .unwrap();
        found
    }

    fn post(entries: Vec<(&str, InputValue)>) -> InputValue {
        InputValue::object(entries)
    }

    #[test]
    fn finds_annotated_record_field() {
        let found = collect(&schema(), post(vec![("title", "hello".into())]), "PostInput");
        assert_eq!(found, vec![("PostInput.title".to_string(), "https://title.com".to_string())]);
    }

    #[test]
    fn skips_fields_left_at_default() {
        let value = post(vec![("draft", false.into())]);
        assert!(collect(&schema(), value, "PostInput").is_empty());

        let value = post(vec![("draft", true.into())]);
        assert_eq!(collect(&schema(), value, "PostInput").len(), 1);
    }

    #[test]
    fn descends_nested_lists_and_records_in_order() {
        let value = InputValue::List(vec![
            InputValue::List(vec![post(vec![
                ("title", "a".into()),
                ("author", post(vec![("handle", "me".into())])),
            ])]),
            InputValue::List(vec![post(vec![("draft", true.into())])]),
        ]);
        let found = collect(&schema(), value, "[[PostInput!]!]!");
        let urls: Vec<_> = found.iter().map(|(_, url)| url.as_str()).collect();
        assert_eq!(urls, vec!["https://title.com", "https://handle.com", "https://draft.com"]);
        assert_eq!(found[1].0, "AuthorInput.handle");
    }

    #[test]
    fn nested_path_links_to_origin() {
        let schema = schema();
        let origin = Arc::new(Path::new("input", "posts"));
        let value = post(vec![("author", post(vec![("handle", "me".into())]))]);
        let mut paths = Vec::new();
        walk(
            &schema,
            &origin,
            &value,
            &TypeRef::named("PostInput"),
            &SunsetConfig::default(),
            &mut |path, _| paths.push(path.trail()),
        )
        .unwrap();
        assert_eq!(paths, vec!["input.author.handle".to_string()]);
    }

    #[test]
    fn required_wrappers_are_stripped_before_descending() {
        let value = InputValue::List(vec![post(vec![("title", "a".into())])]);
        let found = collect(&schema(), value, "[PostInput!]!");
        assert_eq!(found, vec![("PostInput.title".to_string(), "https://title.com".to_string())]);

        let found = collect(&schema(), "plain".into(), "String!");
        assert!(found.is_empty());
    }

    #[test]
    fn null_and_leaf_values_emit_nothing() {
        let schema = schema();
        assert!(collect(&schema, InputValue::Null, "PostInput").is_empty());
        assert!(collect(&schema, "plain".into(), "String").is_empty());
    }

    #[test]
    fn self_referencing_record_reports_nested_fields() {
        let label = ("TreeInput.label".to_string(), "https://label.com".to_string());

        let value = post(vec![(
            "children",
            InputValue::List(vec![post(vec![("label", "leaf".into())])]),
        )]);
        assert_eq!(collect(&schema(), value, "TreeInput"), vec![label.clone()]);

        let value = post(vec![
            ("label", "root".into()),
            (
                "children",
                InputValue::List(vec![post(vec![("label", "leaf".into())])]),
            ),
        ]);
        assert_eq!(collect(&schema(), value, "TreeInput"), vec![label.clone(), label]);
    }

    #[test]
    fn self_referencing_record_paths_follow_the_value() {
        let schema = schema();
        let value = post(vec![(
            "children",
            InputValue::List(vec![post(vec![(
                "children",
                InputValue::List(vec![post(vec![("label", "deep".into())])]),
            )])]),
        )]);
        let mut trails = Vec::new();
        walk(
            &schema,
            &Arc::new(Path::new("input", "tree")),
            &value,
            &TypeRef::named("TreeInput"),
            &SunsetConfig::default(),
            &mut |path, _| trails.push(path.trail()),
        )
        .unwrap();
        assert_eq!(trails, vec!["input.children.children.label".to_string()]);
    }

    #[test]
    fn malformed_nested_annotation_is_an_error() {
        let schema = Schema::builder()
            .object(ObjectType::new("Query"))
            .input_object(InputObjectType::new("Bad").with_field(
                InputFieldDef::new("x", TypeRef::named("String")).with_directive(
                    Directive::new("sunset", Default::default()).with_arg("url", "https://x.com"),
                ),
            ))
            .build()
            .unwrap();
        let err = walk(
            &schema,
            &Arc::new(Path::new("input", "bad")),
            &post(vec![("x", "1".into())]),
            &TypeRef::named("Bad"),
            &SunsetConfig::default(),
            &mut |_, _| {},
        )
        .unwrap_err();
        assert!(matches!(err, SunsetError::InvalidDirective { ref location, .. } if location == "Bad.x"));
    }
}
