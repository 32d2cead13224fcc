//! HTTP-date rendering for the `Sunset` header

use chrono::{DateTime, Utc};

/// Wire format of the `Sunset` header (IMF-fixdate)
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Render an instant as an HTTP date, e.g. `Thu, 01 Oct 2099 12:00:00 GMT`
///
/// Always rendered in UTC with a 24-hour clock; sub-second precision is
/// dropped.
#[must_use]
pub fn format_http_date(when: impl Into<DateTime<Utc>>) -> String {
    when.into().format(HTTP_DATE_FORMAT).to_string()
}
