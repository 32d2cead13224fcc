//! Response finalization
//!
//! Reduces a request's occurrences to the `Sunset` and `Link` headers.

use crate::collector::Occurrence;
use crate::format::format_http_date;
use crate::sunset::link_entry;
use indexmap::IndexSet;
use serde::Serialize;
use sunset_pipeline::HeaderMap;

/// Canonical expiration header
pub const SUNSET_HEADER: &str = "Sunset";

/// Advisory-link header
pub const LINK_HEADER: &str = "Link";

/// Reduced view of one request's occurrences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SunsetSummary {
    earliest: Occurrence,
    urls: Vec<String>,
}

impl SunsetSummary {
    /// Occurrence with the earliest `when`; the first discovered on ties
    #[inline]
    #[must_use]
    pub fn earliest(&self) -> &Occurrence {
        &self.earliest
    }

    /// Distinct URLs in first-discovery order
    #[inline]
    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Value for the `Sunset` header
    #[must_use]
    pub fn sunset_header(&self) -> String {
        format_http_date(self.earliest.sunset().when())
    }

    /// Value for the `Link` header
    #[must_use]
    pub fn link_header(&self) -> String {
        self.urls
            .iter()
            .map(|url| link_entry(url))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Write both headers
    ///
    /// `Sunset` is replaced; link entries are appended to any `Link` value
    /// already present.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.set(SUNSET_HEADER, self.sunset_header());
        headers.append(LINK_HEADER, self.link_header());
    }
}

/// Reduce occurrences, `None` when there are none
#[must_use]
pub fn summarize(occurrences: &[Occurrence]) -> Option<SunsetSummary> {
    // min_by_key keeps the first of equal minima
    let earliest = occurrences.iter().min_by_key(|o| o.sunset().when())?;
    let urls: IndexSet<&str> = occurrences.iter().map(|o| o.sunset().url()).collect();

    Some(SunsetSummary {
        earliest: earliest.clone(),
        urls: urls.into_iter().map(str::to_string).collect(),
    })
}

/// Summarize and write headers; leaves `headers` untouched when empty
pub fn finalize(occurrences: &[Occurrence], headers: &mut HeaderMap) -> Option<SunsetSummary> {
    let summary = summarize(occurrences)?;
    summary.apply(headers);
    Some(summary)
}
