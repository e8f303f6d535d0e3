//! Header names and fallback values used across the crate.

/// Character set assumed when a response does not specify one.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Product name used in a user agent when none is available.
pub const UNKNOWN_PRODUCT: &str = "*Unknown Product*";

/// Names of the headers that describe a response's content rather than the
/// response itself.
///
/// Transports that keep a single header collection (such as `reqwest`) are
/// split into content and response headers using this list.
pub const CONTENT_HEADER_NAMES: [&str; 11] = [
    "Allow",
    "Content-Disposition",
    "Content-Encoding",
    "Content-Language",
    "Content-Length",
    "Content-Location",
    "Content-MD5",
    "Content-Range",
    "Content-Type",
    "Expires",
    "Last-Modified",
];

/// Returns `true` if `name` is one of [`CONTENT_HEADER_NAMES`] (ignoring case).
#[must_use]
pub fn is_content_header(name: &str) -> bool {
    CONTENT_HEADER_NAMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}
