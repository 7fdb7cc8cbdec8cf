//! `LogSink` that emits through `tracing`.
//!
//! Each record becomes one event on the `reqlog` target, at the configured
//! level, with the record's compact JSON in the `record` field. Whatever
//! subscriber the host installs decides where it goes.

use tracing::{debug, error, info, trace, warn};

use reqlog_contracts::{
    config::LogLevel,
    error::{ReqlogError, ReqlogResult},
    record::LogRecord,
};
use reqlog_core::traits::LogSink;

/// Target every record event is emitted on.
pub const RECORD_TARGET: &str = "reqlog";

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn write(&self, level: LogLevel, message: &str, record: &LogRecord) -> ReqlogResult<()> {
        let json = serde_json::to_string(record).map_err(|e| ReqlogError::Serialization {
            reason: format!("log record is not serializable: {}", e),
        })?;

        match level {
            LogLevel::Trace => trace!(target: RECORD_TARGET, record = %json, "{}", message),
            LogLevel::Debug => debug!(target: RECORD_TARGET, record = %json, "{}", message),
            LogLevel::Info => info!(target: RECORD_TARGET, record = %json, "{}", message),
            LogLevel::Warn => warn!(target: RECORD_TARGET, record = %json, "{}", message),
            LogLevel::Error => error!(target: RECORD_TARGET, record = %json, "{}", message),
        }

        Ok(())
    }
}
