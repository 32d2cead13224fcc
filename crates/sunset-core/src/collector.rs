//! Per-request sunset collection
//!
//! One [`RequestSunsets`] exists per in-flight request. Fields report into
//! it as they are about to resolve; the finalizer drains it once at the end.

use crate::config::SunsetConfig;
use crate::error::SunsetResult;
use crate::reader::read_sunset;
use crate::shape;
use crate::sunset::Sunset;
use crate::walker::walk;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use sunset_schema::{InputValue, ObjectType, Path, Schema};

/// Annotation that applies to the current request, with where it was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    sunset: Sunset,
    #[serde(serialize_with = "serialize_path")]
    path: Arc<Path>,
}

impl Occurrence {
    /// Create occurrence
    #[inline]
    #[must_use]
    pub fn new(sunset: Sunset, path: Arc<Path>) -> Self {
        Self { sunset, path }
    }

    /// Annotation
    #[inline]
    #[must_use]
    pub fn sunset(&self) -> &Sunset {
        &self.sunset
    }

    /// Location the annotation was found at
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }
}

fn serialize_path<S: serde::Serializer>(path: &Arc<Path>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

/// Request-scoped buffer of applicable sunsets
///
/// Occurrences are kept in discovery order. Everything found for one field
/// is appended under a single lock, so fields resolving concurrently never
/// interleave their entries.
#[derive(Debug)]
pub struct RequestSunsets {
    schema: Arc<Schema>,
    config: Arc<SunsetConfig>,
    started_at: DateTime<Utc>,
    occurrences: Mutex<Vec<Occurrence>>,
}

impl RequestSunsets {
    /// Empty buffer for a request that began at `started_at`
    #[must_use]
    pub fn new(schema: Arc<Schema>, config: Arc<SunsetConfig>, started_at: DateTime<Utc>) -> Self {
        Self {
            schema,
            config,
            started_at,
            occurrences: Mutex::new(Vec::new()),
        }
    }

    /// Instant annotations are compared against
    #[inline]
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Check a field about to resolve
    ///
    /// Reads the field's own annotation, then each supplied argument's
    /// annotation and the annotations nested inside its value. Arguments
    /// left at their declared default are skipped entirely. A field the
    /// parent type does not declare is ignored.
    ///
    /// # Errors
    /// `SunsetError::InvalidDirective` for a malformed annotation; nothing
    /// found for this field is kept in that case.
    pub fn will_resolve_field(
        &self,
        parent: &ObjectType,
        field_name: &str,
        args: &IndexMap<String, InputValue>,
        path: &Arc<Path>,
    ) -> SunsetResult<()> {
        let Some(field) = parent.field(field_name) else {
            return Ok(());
        };

        let mut found = Vec::new();

        if let Some(sunset) = read_sunset(&self.schema, field, &self.config)? {
            self.handle(&mut found, Arc::clone(path), sunset);
        }

        for arg in field.args() {
            let Some(value) = args.get(arg.name()) else {
                continue;
            };
            if Some(value) == arg.default_value() {
                continue;
            }

            let arg_path = Arc::new(Path::with_prev(arg.name(), field.name(), Arc::clone(path)));
            if let Some(sunset) = read_sunset(&self.schema, arg, &self.config)? {
                self.handle(&mut found, Arc::clone(&arg_path), sunset);
            }

            let mut nested = Vec::new();
            walk(
                &self.schema,
                &arg_path,
                value,
                shape::unwrap_required(arg.ty()),
                &self.config,
                &mut |path, sunset| nested.push((path, sunset)),
            )?;
            for (path, sunset) in nested {
                self.handle(&mut found, path, sunset);
            }
        }

        if !found.is_empty() {
            tracing::debug!("Field {} triggered {} sunset(s)", path, found.len());
            self.occurrences.lock().extend(found);
        }
        Ok(())
    }

    fn handle(&self, found: &mut Vec<Occurrence>, path: Arc<Path>, sunset: Sunset) {
        if sunset.when() > self.started_at {
            found.push(Occurrence::new(sunset, path));
        } else {
            tracing::warn!("Sunset date is in the past for field `{}`", path);
        }
    }

    /// Copy of the buffered occurrences
    #[must_use]
    pub fn occurrences(&self) -> Vec<Occurrence> {
        self.occurrences.lock().clone()
    }

    /// Number of buffered occurrences
    #[must_use]
    pub fn len(&self) -> usize {
        self.occurrences.lock().len()
    }

    /// Check whether nothing has been buffered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.lock().is_empty()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<Occurrence> {
        std::mem::take(&mut *self.occurrences.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use sunset_schema::{
        ArgumentDef, Directive, FieldDef, InputFieldDef, InputObjectType, TypeRef,
    };

    fn sunset(url: &str, when: &str) -> Directive {
        Directive::new("sunset", Default::default())
            .with_arg("url", url)
            .with_arg("when", when)
    }

    fn schema() -> Arc<Schema> {
        let query = ObjectType::new("Query")
            .with_field(
                FieldDef::new("withSunset", TypeRef::named("String"))
                    .with_directive(sunset("https://foo.com", "2099-10-01T12:00:00Z")),
            )
            .with_field(
                FieldDef::new("expired", TypeRef::named("String"))
                    .with_directive(sunset("https://old.com", "2020-01-01T00:00:00Z")),
            )
            .with_field(
                FieldDef::new("search", TypeRef::named("String"))
                    .with_arg(
                        ArgumentDef::new("limit", TypeRef::named("Int"))
                            .with_default(10_i64)
                            .with_directive(sunset("https://limit.com", "2099-11-15T12:00:00Z")),
                    )
                    .with_arg(ArgumentDef::new("filter", TypeRef::named("FilterInput").non_null())),
            );
        Arc::new(
            Schema::builder()
                .object(query)
                .input_object(InputObjectType::new("FilterInput").with_field(
                    InputFieldDef::new("legacy", TypeRef::named("Boolean"))
                        .with_directive(sunset("https://legacy.com", "2099-12-25T12:00:00Z")),
                ))
                .build()
                .unwrap(),
        )
    }

    fn state(schema: &Arc<Schema>) -> RequestSunsets {
        let started = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        RequestSunsets::new(Arc::clone(schema), Arc::new(SunsetConfig::default()), started)
    }

    fn resolve(state: &RequestSunsets, schema: &Schema, field: &str, args: IndexMap<String, InputValue>) {
        let path = Arc::new(Path::new(field, "Query"));
        state
            .will_resolve_field(schema.query_type(), field, &args, &path)
            .unwrap();
    }

    fn urls(state: &RequestSunsets) -> Vec<String> {
        state
            .occurrences()
            .iter()
            .map(|o| o.sunset().url().to_string())
            .collect()
    }

    #[test]
    fn field_level_annotation_is_buffered() {
        let schema = schema();
        let state = state(&schema);
        resolve(&state, &schema, "withSunset", IndexMap::new());

        let occurrences = state.occurrences();
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].path().to_string(), "Query.withSunset");
    }

    #[test]
    fn past_dated_annotation_is_dropped() {
        let schema = schema();
        let state = state(&schema);
        resolve(&state, &schema, "expired", IndexMap::new());
        assert!(state.is_empty());
    }

    #[test]
    fn default_valued_argument_is_skipped() {
        let schema = schema();
        let state = state(&schema);

        let args: IndexMap<String, InputValue> = [
            ("limit".to_string(), InputValue::Int(10)),
            ("filter".to_string(), InputValue::object([("legacy", InputValue::Boolean(true))])),
        ]
        .into_iter()
        .collect();
        resolve(&state, &schema, "search", args);
        assert_eq!(urls(&state), vec!["https://legacy.com"]);
    }

    #[test]
    fn supplied_argument_and_nested_field_in_order() {
        let schema = schema();
        let state = state(&schema);

        let args: IndexMap<String, InputValue> = [
            ("limit".to_string(), InputValue::Int(5)),
            ("filter".to_string(), InputValue::object([("legacy", InputValue::Boolean(true))])),
        ]
        .into_iter()
        .collect();
        resolve(&state, &schema, "search", args);

        assert_eq!(urls(&state), vec!["https://limit.com", "https://legacy.com"]);
        let paths: Vec<_> = state.occurrences().iter().map(|o| o.path().trail()).collect();
        assert_eq!(paths, vec!["search.limit", "search.filter.legacy"]);
        assert_eq!(state.occurrences()[0].path().to_string(), "search.limit");
    }

    #[test]
    fn unknown_field_is_ignored() {
        let schema = schema();
        let state = state(&schema);
        resolve(&state, &schema, "nope", IndexMap::new());
        assert!(state.is_empty());
    }

    #[test]
    fn take_drains_buffer() {
        let schema = schema();
        let state = state(&schema);
        resolve(&state, &schema, "withSunset", IndexMap::new());

        assert_eq!(state.take().len(), 1);
        assert!(state.is_empty());
        assert!(state.take().is_empty());
    }
}
