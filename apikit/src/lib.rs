#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Transport-independent plumbing shared by HTTP API client libraries.
//!
//! The HTTP-specific pieces (response classification, error snapshots, body
//! decoding) live in the `apikit-http` crate; this crate holds the helpers
//! they lean on that have nothing to do with HTTP as such.
//!
//! # Modules
//!
//! - [`blocking`] - Drives a future to completion from synchronous code
//! - [`text`] - Formatting of (possibly multi-line) diagnostic text
//! - [`timestamp`] - Unix time values and their conversion to [`std::time::SystemTime`]

pub mod blocking;
pub mod text;
pub mod timestamp;

pub use blocking::block_on;
pub use text::{MultiLineFormat, format_multi_line, format_multi_line_with};
pub use timestamp::{OutOfRange, UnixTimestamp};
