//! Field resolvers

use crate::error::ResolverError;
use crate::plugin::ResolveInfo;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolver for one field
///
/// Receives the parent value (`source`) and the field's resolve info.
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    /// Produce the field's value
    async fn resolve(&self, source: &Value, info: &ResolveInfo<'_>) -> Result<Value, ResolverError>;
}

#[async_trait::async_trait]
impl<F> Resolver for F
where
    F: Fn(&Value, &ResolveInfo<'_>) -> Result<Value, ResolverError> + Send + Sync,
{
    async fn resolve(&self, source: &Value, info: &ResolveInfo<'_>) -> Result<Value, ResolverError> {
        self(source, info)
    }
}

/// Resolvers keyed by `Type.field`
///
/// Fields without a registered resolver read the same-named property of
/// their parent value, or `null`.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<(String, String), Arc<dyn Resolver>>,
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

impl ResolverRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for `type_name.field_name`
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        resolver: impl Resolver + 'static,
    ) {
        self.resolvers
            .insert((type_name.into(), field_name.into()), Arc::new(resolver));
    }

    /// Register a synchronous closure for `type_name.field_name`
    pub fn register_fn<F>(&mut self, type_name: impl Into<String>, field_name: impl Into<String>, resolver: F)
    where
        F: Fn(&Value, &ResolveInfo<'_>) -> Result<Value, ResolverError> + Send + Sync + 'static,
    {
        self.register(type_name, field_name, resolver);
    }

    /// Resolve a field, falling back to property lookup
    ///
    /// # Errors
    /// Propagates the registered resolver's error
    pub async fn resolve(&self, source: &Value, info: &ResolveInfo<'_>) -> Result<Value, ResolverError> {
        let key = (info.parent_type.name().to_string(), info.field_name.to_string());
        match self.resolvers.get(&key) {
            Some(resolver) => resolver.resolve(source, info).await,
            None => Ok(source.get(info.field_name).cloned().unwrap_or(Value::Null)),
        }
    }
}
