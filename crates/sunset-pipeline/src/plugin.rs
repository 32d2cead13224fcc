//! Lifecycle hooks
//!
//! A [`RequestPlugin`] is installed once on the executor and asked for a
//! fresh [`RequestListener`] at the start of every request. The listener
//! owns whatever state the plugin keeps for that request; it is dropped
//! with the request, so per-request state never outlives it.
//!
//! Hook order for one request:
//! 1. `request_did_start` (plugin)
//! 2. `will_resolve_field` (listener), once per field, in document order
//! 3. `will_send_response` (listener), exactly once

use crate::error::PluginError;
use crate::response::Response;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::Arc;
use sunset_schema::{InputValue, ObjectType, Path, Schema};
use uuid::Uuid;

/// Request-wide context handed to plugins
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request id, also recorded on the request's tracing span
    pub request_id: Uuid,
    /// Schema the request executes against
    pub schema: Arc<Schema>,
    /// Instant treated as the start of the request
    pub started_at: DateTime<Utc>,
}

/// Field about to be resolved
#[derive(Debug)]
pub struct ResolveInfo<'a> {
    /// Schema the request executes against
    pub schema: &'a Schema,
    /// Type declaring the field
    pub parent_type: &'a ObjectType,
    /// Field name (not the alias)
    pub field_name: &'a str,
    /// Coerced argument values
    pub args: &'a IndexMap<String, InputValue>,
    /// Response path of the field
    pub path: Arc<Path>,
}

/// Plugin installed on an executor
pub trait RequestPlugin: Send + Sync {
    /// Called once per request before any field resolves
    fn request_did_start(&self, ctx: &RequestContext) -> Box<dyn RequestListener>;
}

/// Per-request hook receiver
///
/// Hooks take `&self` so a listener can be driven from concurrently
/// resolving fields; implementations synchronize their own state.
pub trait RequestListener: Send + Sync {
    /// Called before a field's resolver runs
    ///
    /// # Errors
    /// A returned error is reported on the response and the field resolves
    /// to `null`.
    fn will_resolve_field(&self, _info: &ResolveInfo<'_>) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called once after execution, before the response is returned
    fn will_send_response(&self, _response: &mut Response) {}
}
