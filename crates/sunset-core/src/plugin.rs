//! Pipeline integration
//!
//! [`SunsetPlugin`] hands every request its own [`SunsetListener`], which
//! owns that request's [`RequestSunsets`] and writes the headers when the
//! response is sent.

use crate::collector::RequestSunsets;
use crate::config::SunsetConfig;
use crate::finalizer::finalize;
use std::sync::Arc;
use sunset_pipeline::{
    PluginError, RequestContext, RequestListener, RequestPlugin, ResolveInfo, Response,
};

/// Sunset header plugin
#[derive(Debug, Clone, Default)]
pub struct SunsetPlugin {
    config: Arc<SunsetConfig>,
}

impl SunsetPlugin {
    /// Plugin with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugin with custom configuration
    #[must_use]
    pub fn with_config(config: SunsetConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SunsetConfig {
        &self.config
    }
}

impl RequestPlugin for SunsetPlugin {
    fn request_did_start(&self, ctx: &RequestContext) -> Box<dyn RequestListener> {
        Box::new(SunsetListener {
            state: RequestSunsets::new(
                Arc::clone(&ctx.schema),
                Arc::clone(&self.config),
                ctx.started_at,
            ),
        })
    }
}

/// Listener for one request
#[derive(Debug)]
pub struct SunsetListener {
    state: RequestSunsets,
}

impl SunsetListener {
    /// Collected state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &RequestSunsets {
        &self.state
    }
}

impl RequestListener for SunsetListener {
    fn will_resolve_field(&self, info: &ResolveInfo<'_>) -> Result<(), PluginError> {
        self.state
            .will_resolve_field(info.parent_type, info.field_name, info.args, &info.path)
            .map_err(PluginError::new)
    }

    fn will_send_response(&self, response: &mut Response) {
        let occurrences = self.state.take();
        if let Some(summary) = finalize(&occurrences, &mut response.http.headers) {
            tracing::debug!(
                "Sunset {} with {} link(s)",
                summary.sunset_header(),
                summary.urls().len()
            );
        }
    }
}
