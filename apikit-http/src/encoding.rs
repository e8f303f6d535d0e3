//! Character set resolution and decoding for response bodies.
//!
//! The character set is taken from the first of:
//!
//! 1. the `Content-Encoding` header (first token), if present and not blank;
//! 2. the `charset` parameter of the `Content-Type` header, if present and not blank;
//! 3. the fallback, `utf-8` unless configured otherwise.
//!
//! The name is lower-cased and then looked up as a WHATWG encoding label,
//! except for the ISO-8859-1 and US-ASCII families (see [`Charset`]): WHATWG
//! treats those as `windows-1252`, here they keep their own meaning.

use encoding_rs::Encoding;
use http::header::{CONTENT_ENCODING, CONTENT_TYPE};

use crate::constants::DEFAULT_CHARSET;
use crate::error::DecodeError;
use crate::headers::HeaderList;

/// Determines the character set of a body from its content headers, falling
/// back to `utf-8`.
///
/// # Example
///
/// ```rust
/// use apikit_http::{HeaderList, content_encoding};
///
/// let headers: HeaderList = [("Content-Type", "text/plain; charset=UTF-16")].into_iter().collect();
/// assert_eq!(content_encoding(&headers), "utf-16");
/// assert_eq!(content_encoding(&HeaderList::new()), "utf-8");
/// ```
#[must_use]
pub fn content_encoding(headers: &HeaderList) -> String {
    content_encoding_or(headers, Some(DEFAULT_CHARSET)).unwrap_or_else(|| DEFAULT_CHARSET.to_owned())
}

/// Determines the character set of a body from its content headers.
///
/// A name found in the headers is returned in lower case; otherwise `default`
/// is returned as given.
#[must_use]
pub fn content_encoding_or(headers: &HeaderList, default: Option<&str>) -> Option<String> {
    let explicit = headers
        .get_str(CONTENT_ENCODING.as_str())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let charset = explicit.or_else(|| {
        headers
            .get_str(CONTENT_TYPE.as_str())
            .and_then(charset_parameter)
    });
    charset
        .map(str::to_ascii_lowercase)
        .or_else(|| default.map(str::to_owned))
}

/// Extracts the (unquoted) `charset` parameter from a `Content-Type` value.
fn charset_parameter(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|parameter| parameter.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').trim())
        .filter(|value| !value.is_empty())
}

/// Labels decoded as true ISO-8859-1 rather than through the WHATWG
/// `windows-1252` mapping.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859-1:1987",
    "latin1",
    "l1",
    "iso-ir-100",
    "ibm819",
    "cp819",
    "csisolatin1",
];

/// Labels decoded as 7-bit US-ASCII.
const ASCII_LABELS: &[&str] = &[
    "us-ascii",
    "ascii",
    "us",
    "ansi_x3.4-1968",
    "iso646-us",
    "iso-ir-6",
    "iso_646.irv:1991",
    "ibm367",
    "cp367",
    "csascii",
];

/// A resolved character set.
///
/// Most names resolve through the WHATWG encoding standard. The ISO-8859-1
/// and US-ASCII families are the exception: WHATWG maps both to
/// `windows-1252`, which would silently turn `0x80..=0x9F` into typographic
/// characters and accept non-ASCII bytes. They are decoded as what they say
/// they are instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// An encoding from the WHATWG encoding standard.
    Whatwg(&'static Encoding),
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
    /// US-ASCII: bytes above `0x7F` are malformed.
    Ascii,
}

impl Charset {
    /// The canonical name of the character set.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Whatwg(encoding) => encoding.name(),
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "US-ASCII",
        }
    }
}

/// Looks up the character set for a name.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownEncoding`] if `name` is not a known label.
pub fn lookup(name: &str) -> Result<Charset, DecodeError> {
    let label = name.trim().to_ascii_lowercase();
    if LATIN1_LABELS.contains(&label.as_str()) {
        return Ok(Charset::Latin1);
    }
    if ASCII_LABELS.contains(&label.as_str()) {
        return Ok(Charset::Ascii);
    }
    Encoding::for_label(label.as_bytes())
        .map(Charset::Whatwg)
        .ok_or_else(|| DecodeError::UnknownEncoding(name.to_owned()))
}

/// Decodes a complete body using the named character set.
///
/// Decoding is strict: a byte sequence that is malformed for the encoding
/// fails instead of being replaced. A leading byte-order mark is dropped when
/// it belongs to the resolved encoding (`EF BB BF` for UTF-8, `FF FE` for
/// UTF-16LE, `FE FF` for UTF-16BE); a byte-order mark of any other encoding
/// is not interpreted and is decoded like any other bytes.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownEncoding`] if `name` is not a known label, or
/// [`DecodeError::Malformed`] if `bytes` is not valid in that encoding.
pub fn decode(bytes: &[u8], name: &str) -> Result<String, DecodeError> {
    decode_with(lookup(name)?, bytes)
}

/// Decodes a complete body using an already resolved character set.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if `bytes` is not valid in `charset`.
pub fn decode_with(charset: Charset, bytes: &[u8]) -> Result<String, DecodeError> {
    let malformed = || DecodeError::Malformed {
        encoding: charset.name(),
    };
    match charset {
        Charset::Whatwg(encoding) => {
            let bytes = match Encoding::for_bom(bytes) {
                Some((bom, length)) if bom == encoding => &bytes[length..],
                _ => bytes,
            };
            encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(std::borrow::Cow::into_owned)
                .ok_or_else(malformed)
        }
        Charset::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        Charset::Ascii if bytes.is_ascii() => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        Charset::Ascii => Err(malformed()),
    }
}
