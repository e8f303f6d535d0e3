//! Symbolic names for status codes and protocol versions.

use std::borrow::Cow;

use http::{StatusCode, Version};

/// Returns the symbolic name of a status code.
///
/// The name is derived from the canonical reason phrase in the IANA registry
/// (as provided by [`StatusCode::canonical_reason`]): apostrophes are removed,
/// the phrase is split into words at every other non-alphanumeric character,
/// and the words are joined with their first letters capitalised.
///
/// | code | reason phrase           | name                  |
/// |------|-------------------------|-----------------------|
/// | 200  | `OK`                    | `OK`                  |
/// | 404  | `Not Found`             | `NotFound`            |
/// | 418  | `I'm a teapot`          | `ImATeapot`           |
/// | 500  | `Internal Server Error` | `InternalServerError` |
///
/// Codes without a registered reason phrase are named by their number.
#[must_use]
pub fn status_name(status: StatusCode) -> Cow<'static, str> {
    let Some(reason) = status.canonical_reason() else {
        return Cow::Owned(status.as_u16().to_string());
    };
    let mut name = String::with_capacity(reason.len());
    for word in reason
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '\'')
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars().filter(|c| *c != '\'');
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars);
        }
    }
    Cow::Owned(name)
}

/// Returns the version number of an HTTP protocol version (`"1.1"`, `"2"`, ...).
#[must_use]
pub fn version_number(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

/// Returns `true` if `status` is in the successful (2xx) range.
#[must_use]
pub fn is_success(status: StatusCode) -> bool {
    status.is_success()
}
