//! Testing utilities for the sunset workspace
//!
//! Shared fixture schema, resolvers, request builders and instants.

#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use sunset_pipeline::{FieldSelection, Request, ResolverRegistry};
use sunset_schema::{InputValue, Schema, SchemaDocument};

/// Fixture schema covering every annotation placement
pub const FIXTURE_SCHEMA_YAML: &str = r#"
query: Query
types:
  - kind: input_object
    name: PostInput
    fields:
      - name: title
        type: String
        directives:
          - name: sunset
            args: { url: "https://example.com", when: "2099-01-01T12:00:00.000Z" }
      - name: body
        type: String
      - name: draft
        type: Boolean
        default: false
        directives:
          - name: sunset
            args: { url: "https://drafts.example.com", when: "2099-02-01T12:00:00.000Z" }
      - name: author
        type: AuthorInput
  - kind: input_object
    name: AuthorInput
    fields:
      - name: handle
        type: String
        directives:
          - name: sunset
            args: { url: "https://handles.example.com", when: "2099-03-01T12:00:00.000Z" }
  - kind: object
    name: Post
    fields:
      - name: id
        type: ID
      - name: title
        type: String
        directives:
          - name: sunset
            args: { url: "https://posts.example.com", when: "2099-04-01T12:00:00.000Z" }
  - kind: object
    name: Query
    fields:
      - name: withSunset
        type: String
        directives:
          - name: sunset
            args: { url: "https://foo.com", when: "2099-10-01T12:00:00.000Z" }
      - name: sunsetArgs
        type: String
        args:
          - name: input
            type: String
            directives:
              - name: sunset
                args: { url: "https://bar.com", when: "2099-11-15T12:00:00.000Z" }
      - name: sunsetArgsDefault
        type: String
        args:
          - name: input
            type: String
            default: default
            directives:
              - name: sunset
                args: { url: "https://bar.com", when: "2099-12-25T12:00:00.000Z" }
      - name: sunsetInputObject
        type: String
        args:
          - name: input
            type: PostInput
      - name: sunsetInputObjectComplex
        type: String
        args:
          - name: input
            type: "[[PostInput!]!]!"
      - name: sameLink
        type: String
        args:
          - name: input
            type: PostInput
        directives:
          - name: sunset
            args: { url: "https://example.com", when: "2099-06-01T12:00:00.000Z" }
      - name: posts
        type: "[Post!]!"
      - name: expired
        type: String
        directives:
          - name: sunset
            args: { url: "https://past.example.com", when: "2001-01-01T00:00:00.000Z" }
      - name: brokenSunset
        type: String
        directives:
          - name: sunset
            args: { url: "not a url", when: "2099-01-01T00:00:00.000Z" }
      - name: noSunset
        type: String
"#;

/// Parse the fixture schema
pub fn fixture_schema() -> Arc<Schema> {
    let document = SchemaDocument::from_yaml(FIXTURE_SCHEMA_YAML).expect("fixture document parses");
    Arc::new(Schema::from_document(document).expect("fixture schema is valid"))
}

/// Resolvers for the fixture schema
///
/// Scalar fields on `Query` echo their name; `posts` returns two posts.
pub fn fixture_resolvers() -> ResolverRegistry {
    let mut registry = ResolverRegistry::new();
    for field in [
        "withSunset",
        "sunsetArgs",
        "sunsetArgsDefault",
        "sunsetInputObject",
        "sunsetInputObjectComplex",
        "sameLink",
        "expired",
        "brokenSunset",
        "noSunset",
    ] {
        registry.register_fn("Query", field, |_, info| Ok(json!(info.field_name)));
    }
    registry.register_fn("Query", "posts", |_, _| {
        Ok(json!([
            { "id": "1", "title": "first" },
            { "id": "2", "title": "second" },
        ]))
    });
    registry
}

/// Instant the fixture requests start at
pub fn request_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap()
}

/// Parse an RFC 3339 instant
pub fn instant(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid RFC 3339 instant")
        .with_timezone(&Utc)
}

/// Request selecting the given top-level fields
pub fn query(fields: impl IntoIterator<Item = FieldSelection>) -> Request {
    fields.into_iter().fold(Request::new(), Request::field)
}

/// `PostInput` value from key/value pairs
pub fn post_input(entries: Vec<(&str, InputValue)>) -> InputValue {
    InputValue::object(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_schema_loads() {
        let schema = fixture_schema();
        let query = schema.query_type();
        assert!(query.field("sunsetInputObjectComplex").is_some());
        assert!(schema.input_object("PostInput").is_some());
        assert_eq!(
            query.field("sunsetArgsDefault").unwrap().args()[0].default_value(),
            Some(&InputValue::string("default"))
        );
    }

    #[test]
    fn query_keeps_field_order() {
        let request = query([FieldSelection::new("a"), FieldSelection::new("b")]);
        let fields = request.collect_fields(&request.selections).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
