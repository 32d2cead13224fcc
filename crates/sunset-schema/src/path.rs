//! Diagnostic paths
//!
//! Provides [`Path`] for naming where a field, argument or input field was
//! encountered while a request is processed.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Location of an element within one request
///
/// Linked towards the root through `prev`; cheap to extend because
/// predecessors are shared.
///
/// # Examples
/// - `{ key: "withSunset", typename: "Query" }` → `Query.withSunset`
/// - `{ key: "title", typename: "PostInput", prev: Query.post }` → `PostInput.title`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    key: String,
    typename: String,
    prev: Option<Arc<Path>>,
}

impl Path {
    /// Create path without predecessor
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, typename: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            typename: typename.into(),
            prev: None,
        }
    }

    /// Create path below an existing one
    #[inline]
    #[must_use]
    pub fn with_prev(key: impl Into<String>, typename: impl Into<String>, prev: Arc<Path>) -> Self {
        Self {
            key: key.into(),
            typename: typename.into(),
            prev: Some(prev),
        }
    }

    /// Field, argument, input field or list index
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name of the type (or field, for arguments) that owns `key`
    #[inline]
    #[must_use]
    pub fn typename(&self) -> &str {
        &self.typename
    }

    /// Predecessor, if any
    #[inline]
    #[must_use]
    pub fn prev(&self) -> Option<&Arc<Path>> {
        self.prev.as_ref()
    }

    /// Number of segments from the root
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.prev.as_ref().map_or(0, |p| p.depth())
    }

    /// Keys from root to leaf
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.depth());
        let mut current = Some(self);
        while let Some(path) = current {
            keys.push(path.key.as_str());
            current = path.prev.as_deref();
        }
        keys.reverse();
        keys
    }

    /// Keys from root to leaf joined with `.`
    #[must_use]
    pub fn trail(&self) -> String {
        self.keys().join(".")
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.typename, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_owner_and_key() {
        let path = Path::new("withSunset", "Query");
        assert_eq!(path.to_string(), "Query.withSunset");
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn trail_walks_predecessors() {
        let field = Arc::new(Path::new("post", "Query"));
        let arg = Arc::new(Path::with_prev("input", "post", field));
        let title = Path::with_prev("title", "PostInput", arg);

        assert_eq!(title.keys(), vec!["post", "input", "title"]);
        assert_eq!(title.trail(), "post.input.title");
        assert_eq!(title.depth(), 3);
        assert_eq!(title.prev().map(|p| p.key()), Some("input"));
    }
}
