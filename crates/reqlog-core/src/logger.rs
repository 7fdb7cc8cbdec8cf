//! The request logger: wraps one handler call and emits one record.
//!
//! Per request, in order:
//!
//!   Gate → Describe request → Start → [handler] → Finish → Describe response
//!        → Assemble → Hash filter → Merge annotations → Emit
//!
//! The gate is the only branch: when the logger is disabled or the path is
//! excluded, the handler runs and its result is returned untouched, and
//! nothing else happens. A handler error propagates unchanged and no record
//! is emitted. Every other failure degrades the one field it affects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use reqlog_contracts::{
    config::LoggerConfig,
    record::{ExecutionSummary, LogRecord, RequestDescription, ResponseDescription, Timing},
};
use reqlog_redact::apply_hash_filter;

use crate::{
    annotations::{ExecutionLog, ExecutionSnapshot},
    describe::{describe_request, describe_response},
    traits::{Clock, LogSink, RequestView, ResponseView, SystemClock},
};

/// Message attached to every emitted record.
pub const EXECUTION_LOG_MESSAGE: &str = "Execution Log";

/// Logs requests passing through a wrapped handler.
///
/// Construct one per application and share it across requests; it holds no
/// per-request state. Each call to `handle()` gets its own `ExecutionLog`.
pub struct RequestLogger {
    config: LoggerConfig,
    sink: Box<dyn LogSink>,
    clock: Arc<dyn Clock>,
    sensitive_fragments: Vec<String>,
    hash_key_paths: Vec<Vec<String>>,
}

impl RequestLogger {
    /// Create a logger that reads time from the system clock.
    pub fn new(config: LoggerConfig, sink: Box<dyn LogSink>) -> Self {
        let sensitive_fragments = config.sensitive_fragments();
        let hash_key_paths = config.hash_key_paths();
        Self {
            config,
            sink,
            clock: Arc::new(SystemClock),
            sensitive_fragments,
            hash_key_paths,
        }
    }

    /// Replace the clock used for request timing and timing steps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// True if a request on `path` will be logged.
    pub fn should_log(&self, path: &str) -> bool {
        self.config.should_log(path)
    }

    /// A fresh annotation store sharing this logger's clock.
    pub fn new_execution_log(&self) -> ExecutionLog {
        ExecutionLog::with_clock(Arc::clone(&self.clock))
    }

    /// Run `handler` for `request` and log the exchange.
    ///
    /// The handler receives the request and a request-scoped `ExecutionLog`
    /// to annotate. Its `Err` is returned as-is without logging.
    pub fn handle<Req, Resp, E, F>(&self, request: &Req, handler: F) -> Result<Resp, E>
    where
        Req: RequestView + ?Sized,
        Resp: ResponseView,
        F: FnOnce(&Req, &mut ExecutionLog) -> Result<Resp, E>,
    {
        // ── Gate ─────────────────────────────────────────────────────────────
        if !self.should_log(request.path()) {
            debug!(path = %request.path(), "request not logged");
            let mut unused = self.new_execution_log();
            return handler(request, &mut unused);
        }

        // ── Describe request ─────────────────────────────────────────────────
        let mut request_description = describe_request(request, &self.sensitive_fragments);
        let mut execution_log = self.new_execution_log();

        // ── Wrapped call ─────────────────────────────────────────────────────
        let start = self.clock.now();
        let response = handler(request, &mut execution_log)?;
        let finish = self.clock.now();

        // ── Describe response and assemble ───────────────────────────────────
        let response_description = describe_response(&response, &self.config);
        // Identity and route may be resolved during dispatch.
        request_description.user = request.user();
        let name = request.route_name().unwrap_or_default();

        let record = self.assemble_record(
            request_description,
            response_description,
            name,
            start,
            finish,
            execution_log.drain(),
        );

        self.emit(&record);
        Ok(response)
    }

    /// Build the final record: descriptions, execution and info blocks, hash
    /// filter, then the drained annotations on top.
    pub fn assemble_record(
        &self,
        request: RequestDescription,
        response: ResponseDescription,
        name: String,
        start: DateTime<Utc>,
        finish: DateTime<Utc>,
        annotations: ExecutionSnapshot,
    ) -> LogRecord {
        let execution = ExecutionSummary {
            app: self.config.app_name.clone(),
            name,
            timing: Timing::between(start, finish),
        };

        let mut record = LogRecord::new();
        record.insert("request", to_value_or_empty(&request));
        record.insert("response", to_value_or_empty(&response));
        record.insert("execution", to_value_or_empty(&execution));
        record.insert("info", Value::Object(self.info_fields()));

        apply_hash_filter(&mut record, &self.hash_key_paths);

        // Annotations are merged after hashing and are never hashed.
        record.merge(annotations.into_map());
        record
    }

    /// Build identifiers that are set and non-empty.
    fn info_fields(&self) -> Map<String, Value> {
        let mut info = Map::new();
        for (key, value) in [
            ("git_sha", self.config.git_sha.as_deref()),
            ("git_tag", self.config.git_tag.as_deref()),
        ] {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                info.insert(key.to_string(), Value::String(v.to_string()));
            }
        }
        info
    }

    fn emit(&self, record: &LogRecord) {
        if let Err(e) = self.sink.write(self.config.level, EXECUTION_LOG_MESSAGE, record) {
            warn!(error = %e, "failed to emit request log record");
            return;
        }
        debug!(
            method = ?record.pointer("/request/method"),
            url = ?record.pointer("/request/url"),
            status_code = ?record.pointer("/response/status_code"),
            "request log record emitted"
        );
    }
}

/// Serialize a record section, degrading to `{}` if that is impossible.
fn to_value_or_empty<T: Serialize>(section: &T) -> Value {
    serde_json::to_value(section).unwrap_or_else(|e| {
        warn!(error = %e, "record section could not be serialized");
        Value::Object(Map::new())
    })
}

// ── Tests ────────────────────────────────────────────────────────────────────
