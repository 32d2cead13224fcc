//! Request executor
//!
//! Walks a request's selections against the schema, fires plugin hooks
//! around every field and assembles the response.
//!
//! Fields of one selection set resolve in document order, so hook order
//! always matches the order fields appear in the request (fragment spreads
//! inlined where they occur).

use crate::coerce::coerce_arguments;
use crate::error::ExecutionError;
use crate::plugin::{RequestContext, RequestListener, RequestPlugin, ResolveInfo};
use crate::request::{FieldSelection, Request};
use crate::resolver::ResolverRegistry;
use crate::response::{GraphError, HttpResponse, Response};
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::sync::Arc;
use sunset_schema::{ObjectType, Path, Schema};
use tracing::Instrument;
use uuid::Uuid;

/// Executes requests against one schema
#[derive(Clone)]
pub struct Executor {
    schema: Arc<Schema>,
    resolvers: ResolverRegistry,
    plugins: Vec<Arc<dyn RequestPlugin>>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("resolvers", &self.resolvers)
            .field("plugins", &self.plugins.len())
            .finish_non_exhaustive()
    }
}

/// Borrowed state shared by every field of one request
struct Execution<'a> {
    request: &'a Request,
    listeners: &'a [Box<dyn RequestListener>],
}

impl Executor {
    /// Create executor without resolvers or plugins
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            resolvers: ResolverRegistry::new(),
            plugins: Vec::new(),
        }
    }

    /// Use the given resolvers
    #[must_use]
    pub fn with_resolvers(mut self, resolvers: ResolverRegistry) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Install a plugin
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl RequestPlugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Schema requests execute against
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Execute a request starting now
    pub async fn execute(&self, request: &Request) -> Response {
        self.execute_at(request, Utc::now()).await
    }

    /// Execute a request treating `started_at` as its start instant
    pub async fn execute_at(&self, request: &Request, started_at: DateTime<Utc>) -> Response {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "request",
            %request_id,
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
        );
        self.run(request, started_at, request_id).instrument(span).await
    }

    async fn run(&self, request: &Request, started_at: DateTime<Utc>, request_id: Uuid) -> Response {
        let ctx = RequestContext {
            request_id,
            schema: Arc::clone(&self.schema),
            started_at,
        };
        let listeners: Vec<Box<dyn RequestListener>> = self
            .plugins
            .iter()
            .map(|plugin| plugin.request_did_start(&ctx))
            .collect();
        let execution = Execution {
            request,
            listeners: &listeners,
        };

        let mut errors = Vec::new();
        let data = match request.collect_fields(&request.selections) {
            Ok(fields) => {
                let root = Value::Null;
                self.execute_fields(&execution, self.schema.query_type(), &root, fields, None, &mut errors)
                    .await
            }
            Err(err) => {
                errors.push(GraphError::new(err.to_string()));
                Value::Null
            }
        };

        let mut response = Response {
            data,
            errors,
            http: HttpResponse::default(),
        };
        for listener in &listeners {
            listener.will_send_response(&mut response);
        }
        tracing::debug!(errors = response.errors.len(), "request finished");
        response
    }

    fn execute_fields<'a>(
        &'a self,
        execution: &'a Execution<'a>,
        parent: &'a ObjectType,
        source: &'a Value,
        fields: Vec<&'a FieldSelection>,
        prev: Option<Arc<Path>>,
        errors: &'a mut Vec<GraphError>,
    ) -> BoxFuture<'a, Value> {
        async move {
            let mut data = serde_json::Map::with_capacity(fields.len());
            for selection in fields {
                let key = selection.response_key();
                let path = Arc::new(match &prev {
                    Some(p) => Path::with_prev(key, parent.name(), Arc::clone(p)),
                    None => Path::new(key, parent.name()),
                });

                let value = if selection.name == "__typename" {
                    Value::String(parent.name().to_string())
                } else {
                    match self
                        .execute_field(execution, parent, source, selection, Arc::clone(&path), errors)
                        .await
                    {
                        Ok(value) => value,
                        Err(err) => {
                            tracing::debug!(field = %path, error = %err, "field failed");
                            let trail = path.keys().into_iter().map(str::to_string).collect();
                            errors.push(GraphError::new(err.to_string()).with_path(trail));
                            Value::Null
                        }
                    }
                };
                data.insert(key.to_string(), value);
            }
            Value::Object(data)
        }
        .boxed()
    }

    async fn execute_field<'a>(
        &'a self,
        execution: &'a Execution<'a>,
        parent: &'a ObjectType,
        source: &'a Value,
        selection: &'a FieldSelection,
        path: Arc<Path>,
        errors: &'a mut Vec<GraphError>,
    ) -> Result<Value, ExecutionError> {
        let field = parent
            .field(&selection.name)
            .ok_or_else(|| ExecutionError::UnknownField {
                parent: parent.name().to_string(),
                field: selection.name.clone(),
            })?;
        let args = coerce_arguments(&self.schema, field, &selection.arguments)?;

        let info = ResolveInfo {
            schema: &self.schema,
            parent_type: parent,
            field_name: &selection.name,
            args: &args,
            path: Arc::clone(&path),
        };
        for listener in execution.listeners {
            listener.will_resolve_field(&info)?;
        }

        let value = self.resolvers.resolve(source, &info).await?;
        tracing::trace!(field = %path, "resolved field");

        let Some(object) = self.schema.object_type(field.ty().base_name()) else {
            return Ok(value);
        };
        if selection.selections.is_empty() {
            return Ok(value);
        }
        let sub_fields = execution.request.collect_fields(&selection.selections)?;
        Ok(self
            .complete_object(execution, object, &value, sub_fields, path, errors)
            .await)
    }

    async fn complete_object<'a>(
        &'a self,
        execution: &'a Execution<'a>,
        object: &'a ObjectType,
        value: &'a Value,
        fields: Vec<&'a FieldSelection>,
        path: Arc<Path>,
        errors: &'a mut Vec<GraphError>,
    ) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::Array(items) => {
                let mut completed = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = Some(Arc::new(Path::with_prev(
                        index.to_string(),
                        object.name(),
                        Arc::clone(&path),
                    )));
                    completed.push(
                        self.execute_fields(execution, object, item, fields.clone(), item_path, errors)
                            .await,
                    );
                }
                Value::Array(completed)
            }
            other => {
                self.execute_fields(execution, object, other, fields, Some(path), errors)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PluginError;
    use crate::request::Selection;
    use recorder::Recorder;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sunset_schema::{ArgumentDef, FieldDef, InputValue, TypeRef};

    mod recorder {
        use super::*;
        use parking_lot::Mutex;

        /// Records hook invocations; fails fields named `explode`
        #[derive(Default, Clone)]
        pub(super) struct Recorder {
            pub(super) log: Arc<Mutex<Vec<String>>>,
        }

        struct Listener {
            log: Arc<Mutex<Vec<String>>>,
        }

        #[derive(Debug, thiserror::Error)]
        #[error("refused {0}")]
        struct Refused(String);

        impl RequestPlugin for Recorder {
            fn request_did_start(&self, _ctx: &RequestContext) -> Box<dyn RequestListener> {
                self.log.lock().push("start".into());
                Box::new(Listener {
                    log: Arc::clone(&self.log),
                })
            }
        }

        impl RequestListener for Listener {
            fn will_resolve_field(&self, info: &ResolveInfo<'_>) -> Result<(), PluginError> {
                self.log.lock().push(format!("{} {:?}", info.path.trail(), info.args.keys().collect::<Vec<_>>()));
                if info.field_name == "explode" {
                    return Err(PluginError::new(Refused(info.path.to_string())));
                }
                Ok(())
            }

            fn will_send_response(&self, response: &mut Response) {
                self.log.lock().push("send".into());
                response.http.headers.set("X-Seen", "yes");
            }
        }
    }

    fn schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder()
                .object(
                    ObjectType::new("Post")
                        .with_field(FieldDef::new("title", TypeRef::named("String")))
                        .with_field(FieldDef::new("explode", TypeRef::named("String"))),
                )
                .object(
                    ObjectType::new("Query")
                        .with_field(
                            FieldDef::new("greet", TypeRef::named("String"))
                                .with_arg(ArgumentDef::new("name", TypeRef::named("String")).with_default("you")),
                        )
                        .with_field(FieldDef::new("posts", TypeRef::named("Post").list())),
                )
                .build()
                .unwrap(),
        )
    }

    fn executor(recorder: &Recorder) -> Executor {
        let mut resolvers = ResolverRegistry::new();
        resolvers.register_fn("Query", "greet", |_, info| {
            let name = info.args.get("name").and_then(InputValue::as_str).unwrap_or_default();
            Ok(json!(format!("hello {name}")))
        });
        resolvers.register_fn("Query", "posts", |_, _| Ok(json!([{ "title": "a" }, { "title": "b" }])));
        Executor::new(schema())
            .with_resolvers(resolvers)
            .with_plugin(recorder.clone())
    }

    #[tokio::test]
    async fn hooks_fire_in_document_order() {
        let recorder = Recorder::default();
        let request = Request::new()
            .field(FieldSelection::new("greet"))
            .spread("f")
            .fragment(
                "f",
                vec![Selection::Field(
                    FieldSelection::new("posts").select(FieldSelection::new("title")),
                )],
            );

        let response = executor(&recorder).execute(&request).await;

        assert_eq!(
            response.data,
            json!({ "greet": "hello you", "posts": [{ "title": "a" }, { "title": "b" }] })
        );
        assert_eq!(
            *recorder.log.lock(),
            vec![
                "start".to_string(),
                "greet [\"name\"]".to_string(),
                "posts []".to_string(),
                "posts.0.title []".to_string(),
                "posts.1.title []".to_string(),
                "send".to_string(),
            ]
        );
        assert_eq!(response.http.headers.get("x-seen"), Some("yes"));
    }

    #[tokio::test]
    async fn hook_errors_null_the_field_and_continue() {
        let recorder = Recorder::default();
        let request = Request::new()
            .field(FieldSelection::new("posts").select(FieldSelection::new("explode")))
            .field(FieldSelection::new("greet").arg("name", "bob").alias("g"));

        let response = executor(&recorder).execute(&request).await;

        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[0].path, vec!["posts", "0", "explode"]);
        assert!(response.errors[0].message.contains("refused Post.explode"));
        assert_eq!(response.data["g"], json!("hello bob"));
        assert!(recorder.log.lock().contains(&"send".to_string()));
    }

    #[tokio::test]
    async fn unknown_fields_and_typename() {
        let recorder = Recorder::default();
        let request = Request::new()
            .field(FieldSelection::new("__typename"))
            .field(FieldSelection::new("nope"));

        let response = executor(&recorder).execute(&request).await;

        assert_eq!(response.data["__typename"], json!("Query"));
        assert_eq!(response.data["nope"], Value::Null);
        assert_eq!(response.errors[0].message, "cannot query field 'nope' on type 'Query'");
        assert_eq!(*recorder.log.lock(), vec!["start".to_string(), "send".to_string()]);
    }

    #[tokio::test]
    async fn bad_fragment_fails_whole_request() {
        let recorder = Recorder::default();
        let response = executor(&recorder).execute(&Request::new().spread("missing")).await;

        assert_eq!(response.data, Value::Null);
        assert_eq!(response.errors, vec![GraphError::new("unknown fragment 'missing'")]);
    }
}
