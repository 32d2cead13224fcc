//! Sunset Pipeline
//!
//! Minimal request-processing pipeline hosting field-resolution plugins.
//!
//! # Architecture
//!
//! ```text
//! Request → collect_fields → coerce_arguments → will_resolve_field → Resolver
//!                                                                      ↓
//! Response ← will_send_response ←─────────────── data / errors ←───────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use sunset_pipeline::{Executor, FieldSelection, Request};
//!
//! # async fn example(schema: std::sync::Arc<sunset_schema::Schema>) {
//! let executor = Executor::new(schema).with_plugin(my_plugin);
//!
//! let request = Request::new().field(FieldSelection::new("withSunset"));
//! let response = executor.execute(&request).await;
//!
//! println!("{}", response.http.headers);
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod coerce;
pub mod error;
pub mod executor;
pub mod headers;
pub mod plugin;
pub mod request;
pub mod resolver;
pub mod response;

// Re-exports for convenience
pub use coerce::{coerce_arguments, coerce_value};
pub use error::{ExecutionError, PluginError, ResolverError};
pub use executor::Executor;
pub use headers::HeaderMap;
pub use plugin::{RequestContext, RequestListener, RequestPlugin, ResolveInfo};
pub use request::{FieldSelection, Request, Selection};
pub use resolver::{Resolver, ResolverRegistry};
pub use response::{GraphError, HttpResponse, Response};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
