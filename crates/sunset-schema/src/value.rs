//! Input values supplied by requests and declared as defaults

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Argument or input-field value
///
/// Equality is structural: two objects are equal when they hold the same
/// keys with equal values, regardless of key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// Explicit null
    Null,
    /// Boolean literal
    Boolean(bool),
    /// Integer literal
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// String or enum literal
    String(String),
    /// Ordered list
    List(Vec<InputValue>),
    /// Structured record, keys in supplied order
    Object(IndexMap<String, InputValue>),
}

impl InputValue {
    /// Build a string value
    #[inline]
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Build an object value from key/value pairs
    #[must_use]
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, InputValue)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check for explicit null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow as string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as list
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[InputValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as object
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, InputValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Short kind name for diagnostics
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl Display for InputValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_preserves_structure() {
        let value = InputValue::from(json!({ "title": "Foo", "tags": ["a", 1, null] }));
        let expected = InputValue::object([
            ("title", InputValue::string("Foo")),
            (
                "tags",
                InputValue::List(vec![InputValue::string("a"), InputValue::Int(1), InputValue::Null]),
            ),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn object_equality_ignores_key_order() {
        let a = InputValue::object([("a", InputValue::Int(1)), ("b", InputValue::Int(2))]);
        let b = InputValue::object([("b", InputValue::Int(2)), ("a", InputValue::Int(1))]);
        assert_eq!(a, b);
    }

    #[test]
    fn display_is_readable() {
        let value = InputValue::object([("title", InputValue::string("Foo"))]);
        assert_eq!(value.to_string(), "{title: \"Foo\"}");
    }

    #[test]
    fn deserialize_untagged() {
        let value: InputValue = serde_json::from_str("[[{\"title\": \"Foo\"}]]").unwrap();
        assert_eq!(value.kind(), "list");
        let inner = &value.as_list().unwrap()[0].as_list().unwrap()[0];
        assert_eq!(inner.as_object().unwrap()["title"].as_str(), Some("Foo"));
    }
}
