//! # reqlog-sink
//!
//! Log sinks for the reqlog request logger.
//!
//! - [`InMemoryLogSink`] buffers records in memory for inspection.
//! - [`TracingLogSink`] emits each record as a `tracing` event, leaving
//!   formatting and shipping to the host's subscriber.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reqlog_core::RequestLogger;
//! use reqlog_sink::TracingLogSink;
//!
//! let logger = RequestLogger::new(config, Box::new(TracingLogSink::new()));
//! ```

pub mod memory;
pub mod tracing_sink;

pub use memory::{EmittedRecord, InMemoryLogSink};
pub use tracing_sink::{TracingLogSink, RECORD_TARGET};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use reqlog_contracts::{
        config::{LogLevel, LoggerConfig},
        http::{CapturedRequest, CapturedResponse},
        record::LogRecord,
    };
    use reqlog_core::{traits::LogSink, RequestLogger};

    use super::{InMemoryLogSink, TracingLogSink};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn make_record(url: &str) -> LogRecord {
        let mut record = LogRecord::new();
        record.insert("request", json!({ "url": url, "method": "GET" }));
        record
    }

    /// A writer that appends formatted output to a shared buffer.
    #[derive(Clone)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // ── InMemoryLogSink ───────────────────────────────────────────────────────

    #[test]
    fn in_memory_sink_keeps_records_in_order() {
        let sink = InMemoryLogSink::new();
        sink.write(LogLevel::Info, "Execution Log", &make_record("/a")).unwrap();
        sink.write(LogLevel::Warn, "Execution Log", &make_record("/b")).unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record.pointer("/request/url"), Some(&json!("/a")));
        assert_eq!(records[1].level, LogLevel::Warn);
        assert_eq!(sink.last().unwrap().record.pointer("/request/url"), Some(&json!("/b")));
    }

    #[test]
    fn clones_share_the_buffer() {
        let sink = InMemoryLogSink::new();
        let handle = sink.clone();
        sink.write(LogLevel::Info, "Execution Log", &make_record("/a")).unwrap();

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.take().len(), 1);
        assert!(sink.is_empty());
    }

    /// GET /foo with no body, end to end through the logger.
    #[test]
    fn logger_emits_one_record_per_request() {
        let sink = InMemoryLogSink::new();
        let config = LoggerConfig {
            app_name: "billing-api".to_string(),
            excluded_paths: vec!["/health".to_string()],
            ..LoggerConfig::default()
        };
        let logger = RequestLogger::new(config, Box::new(sink.clone()));

        logger
            .handle(&CapturedRequest::new("GET", "/foo"), |_, _| {
                Ok::<_, String>(CapturedResponse::json(200, json!({ "items": [] })))
            })
            .unwrap();
        logger
            .handle(&CapturedRequest::new("GET", "/health/live"), |_, _| {
                Ok::<_, String>(CapturedResponse::new(200))
            })
            .unwrap();

        assert_eq!(sink.len(), 1);
        let emitted = sink.last().unwrap();
        assert_eq!(emitted.level, LogLevel::Info);
        assert_eq!(emitted.message, "Execution Log");

        let record = emitted.record.into_value();
        assert_eq!(record["request"]["method"], json!("GET"));
        assert_eq!(record["request"]["body"], json!({}));
        assert_eq!(record["response"]["status_code"], json!(200));
        assert_eq!(record["response"]["data"], json!({ "items": [] }));
        assert_eq!(record["execution"]["app"], json!("billing-api"));
    }

    // ── TracingLogSink ────────────────────────────────────────────────────────

    #[test]
    fn tracing_sink_emits_record_json_on_reqlog_target() {
        let buffer = SharedBuffer(Arc::new(Mutex::new(Vec::new())));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingLogSink::new()
                .write(LogLevel::Info, "Execution Log", &make_record("/foo"))
                .unwrap();
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"), "unexpected output: {output}");
        assert!(output.contains("reqlog"), "unexpected output: {output}");
        assert!(output.contains("Execution Log"), "unexpected output: {output}");
        assert!(output.contains(r#""url":"/foo""#), "unexpected output: {output}");
    }

    #[test]
    fn tracing_sink_respects_level() {
        let buffer = SharedBuffer(Arc::new(Mutex::new(Vec::new())));
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingLogSink::new()
                .write(LogLevel::Error, "Execution Log", &make_record("/boom"))
                .unwrap();
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ERROR"), "unexpected output: {output}");
    }
}
