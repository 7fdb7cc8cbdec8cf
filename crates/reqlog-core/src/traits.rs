//! Seams between the logger and its host.
//!
//! - `RequestView` / `ResponseView`: read-only adapters over the host
//!   framework's request and response types
//! - `LogSink`: where finished records go
//! - `Clock`: source of wall-clock timestamps
//!
//! Each host framework implements the two views once; the pipeline consumes
//! them uniformly and never inspects framework objects any other way.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use reqlog_contracts::{
    config::LogLevel,
    error::ReqlogResult,
    http::{CapturedRequest, CapturedResponse},
    record::LogRecord,
};

/// Read access to an incoming request.
pub trait RequestView {
    fn method(&self) -> &str;

    /// Path without the query string. Used for the exclusion check.
    fn path(&self) -> &str;

    /// Path including the query string. Written to `request.url`.
    fn full_path(&self) -> String;

    /// Headers with names as the transport supplied them.
    fn headers(&self) -> Vec<(String, String)>;

    /// Raw body bytes; empty when there is no body.
    fn body(&self) -> &[u8];

    /// Identity of the caller, if the host tracks one.
    fn user(&self) -> Option<Value> {
        None
    }

    /// Route or view identifier. Read after the handler returns, so hosts
    /// that resolve routes during dispatch can report it.
    fn route_name(&self) -> Option<String> {
        None
    }
}

/// Read access to an outgoing response.
pub trait ResponseView {
    fn status_code(&self) -> u16;

    /// Raw `Content-Type` header value, parameters included.
    fn content_type(&self) -> Option<&str>;

    /// Structured data the handler rendered before serialization, when the
    /// framework keeps it around.
    fn rendered_data(&self) -> Option<Value> {
        None
    }

    fn body(&self) -> &[u8];
}

/// Destination for finished log records.
///
/// Sinks are shared across concurrent requests and must not block for long;
/// buffering is the sink's own concern.
pub trait LogSink: Send + Sync {
    /// Write one record at `level` with a short human-readable `message`.
    fn write(&self, level: LogLevel, message: &str, record: &LogRecord) -> ReqlogResult<()>;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, level: LogLevel, message: &str, record: &LogRecord) -> ReqlogResult<()> {
        (**self).write(level, message, record)
    }
}

/// Source of UTC wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ── Adapters for the captured types ──────────────────────────────────────────

impl RequestView for CapturedRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn full_path(&self) -> String {
        CapturedRequest::full_path(self)
    }

    fn headers(&self) -> Vec<(String, String)> {
        self.headers.clone()
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    fn user(&self) -> Option<Value> {
        self.user.clone()
    }

    fn route_name(&self) -> Option<String> {
        self.route_name.clone()
    }
}

impl ResponseView for CapturedResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn content_type(&self) -> Option<&str> {
        CapturedResponse::content_type(self)
    }

    fn rendered_data(&self) -> Option<Value> {
        self.rendered.clone()
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}
