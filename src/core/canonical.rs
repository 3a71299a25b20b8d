//! Canonical signing strings.
//!
//! Output is compared byte-for-byte by the remote verifier: no trimming,
//! escaping or normalization is applied beyond literal substitution.

use chrono::{DateTime, Utc};

use super::protocol::Method;

/// RFC 1123 date with a literal `GMT` zone token.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Render an instant as an RFC 1123 HTTP date, e.g.
/// `Tue, 14 Nov 2023 22:13:20 GMT`.
///
/// Always UTC with English day and month names, independent of host locale
/// and timezone.
pub fn http_date(now: &DateTime<Utc>) -> String {
    now.format(HTTP_DATE_FORMAT).to_string()
}

/// Header-style signing base:
/// `host: {host}\ndate: {date}\n{METHOD} {path} HTTP/1.1`
pub fn header_style(host: &str, date: &str, method: Method, path: &str) -> String {
    format!("host: {host}\ndate: {date}\n{} {path} HTTP/1.1", method.as_str())
}

/// Timestamp-style signing base: `{appId}{epochSeconds}`
pub fn timestamp_style(app_id: &str, epoch_seconds: i64) -> String {
    format!("{app_id}{epoch_seconds}")
}
