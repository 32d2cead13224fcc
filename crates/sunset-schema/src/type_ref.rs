//! Type references
//!
//! Provides [`TypeRef`] for addressing a named type through zero or more
//! required (`!`) and list (`[...]`) wrappers.

use crate::error::TypeRefError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Reference to a named type, possibly wrapped
///
/// # Examples
/// - `String` → `Named("String")`
/// - `[PostInput!]` → `List(NonNull(Named("PostInput")))`
/// - `[[PostInput!]!]!` → `NonNull(List(NonNull(List(NonNull(Named("PostInput"))))))`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Reference to a named type definition
    Named(String),
    /// List of the wrapped type
    List(Box<TypeRef>),
    /// Required ("non-null") wrapper
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Reference a named type
    #[inline]
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wrap in a list
    #[inline]
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Wrap in a required marker
    #[inline]
    #[must_use]
    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    /// Name of the innermost named type
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }

    /// Check if outermost wrapper is required
    #[inline]
    #[must_use]
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim();
        let mut parser = Parser {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        };
        let parsed = parser.parse_type()?;

        if parser.pos < parser.bytes.len() {
            let rest = &source[parser.pos..];
            return Err(if rest.contains(']') {
                TypeRefError::UnbalancedBrackets(source.to_string())
            } else {
                TypeRefError::TrailingInput(rest.to_string())
            });
        }
        Ok(parsed)
    }
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn parse_type(&mut self) -> Result<TypeRef, TypeRefError> {
        self.skip_whitespace();
        let base = if self.peek() == Some(b'[') {
            self.pos += 1;
            let inner = self.parse_type()?;
            self.skip_whitespace();
            if self.peek() != Some(b']') {
                return Err(TypeRefError::UnbalancedBrackets(self.source.to_string()));
            }
            self.pos += 1;
            inner.list()
        } else {
            TypeRef::Named(self.parse_name()?)
        };

        self.skip_whitespace();
        if self.peek() != Some(b'!') {
            return Ok(base);
        }
        self.pos += 1;
        self.skip_whitespace();
        if self.peek() == Some(b'!') {
            return Err(TypeRefError::DoubleRequired(self.source.to_string()));
        }
        Ok(base.non_null())
    }

    fn parse_name(&mut self) -> Result<String, TypeRefError> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let name = &self.source[start..self.pos];

        if name.is_empty() {
            return match self.peek() {
                None | Some(b']') => Err(TypeRefError::Empty),
                Some(_) => Err(TypeRefError::InvalidName(self.source[start..].to_string())),
            };
        }
        if name.as_bytes()[0].is_ascii_digit() {
            return Err(TypeRefError::InvalidName(name.to_string()));
        }
        Ok(name.to_string())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_named() {
        assert_eq!("String".parse::<TypeRef>(), Ok(TypeRef::named("String")));
    }

    #[test]
    fn parse_nested_lists() {
        let parsed: TypeRef = "[[PostInput!]!]!".parse().unwrap();
        let expected = TypeRef::named("PostInput")
            .non_null()
            .list()
            .non_null()
            .list()
            .non_null();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.base_name(), "PostInput");
        assert!(parsed.is_non_null());
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let parsed: TypeRef = " [ Int ! ] ".parse().unwrap();
        assert_eq!(parsed, TypeRef::named("Int").non_null().list());
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<TypeRef>(), Err(TypeRefError::Empty));
        assert_eq!("[]".parse::<TypeRef>(), Err(TypeRefError::Empty));
        assert!(matches!(
            "[Int".parse::<TypeRef>(),
            Err(TypeRefError::UnbalancedBrackets(_))
        ));
        assert!(matches!(
            "Int]".parse::<TypeRef>(),
            Err(TypeRefError::UnbalancedBrackets(_))
        ));
        assert!(matches!(
            "Int!!".parse::<TypeRef>(),
            Err(TypeRefError::DoubleRequired(_))
        ));
        assert!(matches!(
            "1Int".parse::<TypeRef>(),
            Err(TypeRefError::InvalidName(_))
        ));
        assert!(matches!(
            "Post-Input".parse::<TypeRef>(),
            Err(TypeRefError::TrailingInput(_))
        ));
    }

    #[test]
    fn serde_uses_notation() {
        let ty: TypeRef = serde_json::from_str("\"[String!]\"").unwrap();
        assert_eq!(ty, TypeRef::named("String").non_null().list());
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"[String!]\"");
    }

    fn arb_type_ref() -> impl Strategy<Value = TypeRef> {
        let leaf = "[A-Z][A-Za-z0-9_]{0,8}".prop_map(TypeRef::Named);
        leaf.prop_recursive(6, 12, 1, |inner| {
            prop_oneof![
                inner.clone().prop_map(TypeRef::list),
                inner
                    .prop_filter("no double required", |t| !t.is_non_null())
                    .prop_map(TypeRef::non_null),
            ]
        })
    }

    proptest! {
        #[test]
        fn display_parses_back(ty in arb_type_ref()) {
            let rendered = ty.to_string();
            prop_assert_eq!(rendered.parse::<TypeRef>(), Ok(ty));
        }
    }
}
