//! In-memory implementation of `LogSink`.
//!
//! `InMemoryLogSink` keeps every emitted record in a `Vec` behind a `Mutex`,
//! so clones handed to several loggers (or threads) observe the same buffer.
//! Hosts use it in tests and for in-process inspection of what would have
//! been shipped.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use reqlog_contracts::{
    config::LogLevel,
    error::{ReqlogError, ReqlogResult},
    record::LogRecord,
};
use reqlog_core::traits::LogSink;

/// One record as the sink received it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmittedRecord {
    pub level: LogLevel,
    pub message: String,
    pub record: LogRecord,
    /// Wall-clock time (UTC) the sink accepted the record.
    pub received_at: DateTime<Utc>,
}

/// An in-memory, append-only log sink.
///
/// Cloning shares the underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogSink {
    pub(crate) records: Arc<Mutex<Vec<EmittedRecord>>>,
}

impl InMemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every record received so far, in order.
    pub fn records(&self) -> Vec<EmittedRecord> {
        self.lock().clone()
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<EmittedRecord> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return everything received so far.
    pub fn take(&self) -> Vec<EmittedRecord> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<EmittedRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl LogSink for InMemoryLogSink {
    /// Append one record.
    ///
    /// Returns `Err(SinkWriteFailed)` only if the buffer's mutex is poisoned.
    fn write(&self, level: LogLevel, message: &str, record: &LogRecord) -> ReqlogResult<()> {
        let mut records = self.records.lock().map_err(|e| ReqlogError::SinkWriteFailed {
            reason: format!("in-memory sink lock poisoned: {}", e),
        })?;

        records.push(EmittedRecord {
            level,
            message: message.to_string(),
            record: record.clone(),
            received_at: Utc::now(),
        });

        Ok(())
    }
}
