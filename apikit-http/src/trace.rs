//! Diagnostic hooks around body reads.
//!
//! A [`BodyTrace`] is handed to an [`Inspector`](crate::Inspector) and is told
//! about every body read: once before (content type and declared length) and
//! once after (the decoded text). Tracing is purely observational; it cannot
//! change a result or cause a failure.
//!
//! - [`NoTrace`] ignores everything (the default).
//! - [`TracingTrace`] forwards to `tracing` (feature: `telemetry`).

use std::fmt::Debug;
use std::sync::Arc;

/// Receives events about response body reads.
///
/// All methods have no-op default implementations; override only what you
/// need.
pub trait BodyTrace: Send + Sync + Debug {
    /// Called before a body is read.
    fn before_read(&self, _content_type: Option<&str>, _content_length: Option<u64>) {}

    /// Called after a body has been read and decoded.
    fn after_read(&self, _text: &str) {}
}

/// A [`BodyTrace`] that ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl BodyTrace for NoTrace {}

impl<T: BodyTrace + ?Sized> BodyTrace for Arc<T> {
    fn before_read(&self, content_type: Option<&str>, content_length: Option<u64>) {
        (**self).before_read(content_type, content_length);
    }

    fn after_read(&self, text: &str) {
        (**self).after_read(text);
    }
}

/// A [`BodyTrace`] that emits `tracing` events at `DEBUG` level.
///
/// The decoded text is rendered with [`apikit::format_multi_line`] and is
/// only formatted when the event is actually enabled.
#[cfg(feature = "telemetry")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

#[cfg(feature = "telemetry")]
impl BodyTrace for TracingTrace {
    fn before_read(&self, content_type: Option<&str>, content_length: Option<u64>) {
        tracing::debug!(
            target: "apikit_http::body",
            content_type = content_type.unwrap_or_default(),
            content_length,
            "RESPONSE ({}): {} bytes",
            content_type.unwrap_or_default(),
            content_length.map_or_else(|| "?".to_owned(), |length| length.to_string()),
        );
    }

    fn after_read(&self, text: &str) {
        if tracing::enabled!(target: "apikit_http::body", tracing::Level::DEBUG) {
            tracing::debug!(
                target: "apikit_http::body",
                "RESPONSE TEXT: {}",
                apikit::format_multi_line(text)
            );
        }
    }
}
