//! Sunset Core
//!
//! Discovers `@sunset` annotations touched by a request and turns them into
//! `Sunset` and `Link` response headers.
//!
//! - Reads annotations on fields, arguments, and input-object fields
//! - Walks nested argument values through lists and input objects
//! - Skips values left at their schema default
//! - Drops annotations already past when the request started
//! - Reports the earliest removal date and every distinct advisory link
//!
//! # Example
//!
//! ```rust,ignore
//! use sunset_core::SunsetPlugin;
//! use sunset_pipeline::{Executor, FieldSelection, Request};
//!
//! # async fn example(schema: std::sync::Arc<sunset_schema::Schema>) {
//! let executor = Executor::new(schema).with_plugin(SunsetPlugin::new());
//!
//! let request = Request::new().field(FieldSelection::new("withSunset"));
//! let response = executor.execute(&request).await;
//!
//! assert_eq!(response.http.headers.get("Sunset"), Some("Thu, 01 Oct 2099 12:00:00 GMT"));
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod collector;
pub mod config;
pub mod error;
pub mod finalizer;
pub mod format;
pub mod plugin;
pub mod reader;
pub mod shape;
pub mod sunset;
pub mod walker;

// Re-exports for convenience
pub use collector::{Occurrence, RequestSunsets};
pub use config::{ParseDirectiveArgs, SunsetConfig, SunsetSettings, DEFAULT_DIRECTIVE_NAME};
pub use error::{ArgsError, SunsetError, SunsetResult};
pub use finalizer::{finalize, summarize, SunsetSummary, LINK_HEADER, SUNSET_HEADER};
pub use format::{format_http_date, HTTP_DATE_FORMAT};
pub use plugin::{SunsetListener, SunsetPlugin};
pub use reader::read_sunset;
pub use shape::TypeKind;
pub use sunset::{link_entry, parse_sunset_args, Sunset};
pub use walker::walk;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for installing the plugin
    pub use crate::{Sunset, SunsetConfig, SunsetPlugin, SunsetSummary};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
