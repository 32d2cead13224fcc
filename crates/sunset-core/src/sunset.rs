//! Sunset annotations
//!
//! A [`Sunset`] pairs the advisory URL with the instant an element stops
//! being served. Both parts are validated on construction.

use crate::error::ArgsError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use sunset_schema::{DirectiveArgs, InputValue};
use url::Url;

/// Validated sunset annotation
///
/// The URL is kept as written in the schema: advisory links and
/// deduplication use that exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Sunset {
    url: String,
    when: DateTime<Utc>,
}

impl Sunset {
    /// Create sunset, validating the URL
    ///
    /// # Errors
    /// `ArgsError::InvalidUrl` if `url` is not an absolute URI
    pub fn new(url: impl Into<String>, when: DateTime<Utc>) -> Result<Self, ArgsError> {
        let url = url.into();
        if let Err(source) = Url::parse(&url) {
            return Err(ArgsError::InvalidUrl { value: url, source });
        }
        Ok(Self { url, when })
    }

    /// Parse from the string forms used in schema metadata
    ///
    /// # Errors
    /// - `ArgsError::InvalidUrl` if `url` is not an absolute URI
    /// - `ArgsError::InvalidTimestamp` if `when` lacks a timezone or is malformed
    pub fn parse(url: &str, when: &str) -> Result<Self, ArgsError> {
        let instant = DateTime::parse_from_rfc3339(when)
            .map_err(|source| ArgsError::InvalidTimestamp {
                value: when.to_string(),
                source,
            })?
            .with_timezone(&Utc);
        Self::new(url, instant)
    }

    /// Advisory URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Removal instant
    #[inline]
    #[must_use]
    pub fn when(&self) -> DateTime<Utc> {
        self.when
    }

    /// Advisory-link header entry: `<url>; rel="sunset"`
    #[must_use]
    pub fn link_entry(&self) -> String {
        link_entry(&self.url)
    }
}

impl Display for Sunset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.url, self.when.to_rfc3339())
    }
}

/// Advisory-link header entry for one URL
#[must_use]
pub fn link_entry(url: &str) -> String {
    format!("<{url}>; rel=\"sunset\"")
}

/// Default argument parser: `url` and `when` strings
///
/// # Errors
/// - `ArgsError::Missing` when an argument is absent
/// - `ArgsError::NotAString` when an argument is not a string literal
/// - Any error from [`Sunset::parse`]
pub fn parse_sunset_args(args: &DirectiveArgs) -> Result<Sunset, ArgsError> {
    let url = string_arg(args, "url")?;
    let when = string_arg(args, "when")?;
    Sunset::parse(url, when)
}

fn string_arg<'a>(args: &'a DirectiveArgs, name: &'static str) -> Result<&'a str, ArgsError> {
    match args.get(name) {
        None | Some(InputValue::Null) => Err(ArgsError::Missing(name)),
        Some(InputValue::String(s)) => Ok(s),
        Some(other) => Err(ArgsError::NotAString {
            name,
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(url: impl Into<InputValue>, when: impl Into<InputValue>) -> DirectiveArgs {
        [("url".to_string(), url.into()), ("when".to_string(), when.into())]
            .into_iter()
            .collect()
    }

    #[test]
    fn parses_valid_args() {
        let sunset = parse_sunset_args(&args("https://foo.com", "2099-10-01T12:00:00.000Z")).unwrap();
        assert_eq!(sunset.url(), "https://foo.com");
        assert_eq!(sunset.when(), Utc.with_ymd_and_hms(2099, 10, 1, 12, 0, 0).unwrap());
        assert_eq!(sunset.link_entry(), "<https://foo.com>; rel=\"sunset\"");
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let sunset = Sunset::parse("https://foo.com", "2099-10-01T14:30:00+02:30").unwrap();
        assert_eq!(sunset.when(), Utc.with_ymd_and_hms(2099, 10, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn rejects_relative_url() {
        let err = parse_sunset_args(&args("foo.com/docs", "2099-10-01T12:00:00Z")).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_timestamp_without_timezone() {
        let err = parse_sunset_args(&args("https://foo.com", "2099-10-01T12:00:00")).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidTimestamp { .. }));

        let err = parse_sunset_args(&args("https://foo.com", "next tuesday")).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidTimestamp { .. }));
    }

    #[test]
    fn rejects_missing_and_mistyped_args() {
        let only_url: DirectiveArgs = [("url".to_string(), InputValue::string("https://foo.com"))]
            .into_iter()
            .collect();
        assert!(matches!(parse_sunset_args(&only_url), Err(ArgsError::Missing("when"))));

        let err = parse_sunset_args(&args(InputValue::Int(3), "2099-10-01T12:00:00Z")).unwrap_err();
        assert!(matches!(err, ArgsError::NotAString { name: "url", found: "int" }));
    }
}
