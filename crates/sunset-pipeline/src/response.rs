//! Execution results

use crate::headers::HeaderMap;
use serde::{Deserialize, Serialize};

/// Result of one request
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Resolved data, keyed by response key
    pub data: serde_json::Value,
    /// Request-level errors in the order they occurred
    pub errors: Vec<GraphError>,
    /// Transport metadata
    pub http: HttpResponse,
}

/// Transport-level part of a response
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    /// Outbound headers
    pub headers: HeaderMap,
}

/// Error reported on a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphError {
    /// Human-readable message
    pub message: String,
    /// Response path of the failing field, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl GraphError {
    /// Create error without path
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Attach a response path
    #[must_use]
    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }
}

impl Response {
    /// Check if any error was reported
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
