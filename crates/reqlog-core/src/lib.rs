//! # reqlog-core
//!
//! The request/response logging pipeline.
//!
//! This crate provides:
//! - The host seams (`RequestView`, `ResponseView`, `LogSink`, `Clock`)
//! - `ExecutionLog`, the per-request annotation store handlers write into
//! - The request and response describers
//! - `RequestLogger`, which wraps a handler call and emits one record
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reqlog_core::RequestLogger;
//!
//! let logger = RequestLogger::new(config, Box::new(sink));
//! let response = logger.handle(&request, |req, log| {
//!     log.add_task_info(task);
//!     log.start_timing_step("db");
//!     let rows = load(req)?;
//!     log.stop_timing_step("db");
//!     Ok(render(rows))
//! })?;
//! ```

pub mod annotations;
pub mod clock;
pub mod describe;
pub mod logger;
pub mod traits;

pub use annotations::{ExecutionLog, ExecutionSnapshot, TimingStep};
pub use logger::{RequestLogger, EXECUTION_LOG_MESSAGE};
pub use traits::{Clock, LogSink, RequestView, ResponseView, SystemClock};
