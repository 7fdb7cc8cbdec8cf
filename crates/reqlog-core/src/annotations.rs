//! Per-request execution annotations.
//!
//! `ExecutionLog` is the scratch area handler code writes into while it
//! serves one request: task metadata, narrated steps and named timings. The
//! pipeline creates a fresh one for every request, lends it to the handler,
//! then drains it into the record. Instances are never shared between
//! requests, so no locking is needed.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use reqlog_contracts::record::{seconds_between, LogStep};

use crate::traits::{Clock, SystemClock};

/// One named interval measured by handler code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingStep {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl TimingStep {
    pub fn started_at(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn stop_at(&mut self, end: DateTime<Utc>) {
        self.end = Some(end);
    }

    pub fn is_stopped(&self) -> bool {
        self.end.is_some()
    }

    /// Seconds between start and stop; 0.0 for a step that was never stopped.
    pub fn elapsed(&self) -> f64 {
        self.end.map_or(0.0, |end| seconds_between(self.start, end))
    }
}

/// The rendered form of an `ExecutionLog`, merged into the record as
/// top-level keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExecutionSnapshot {
    pub task_info: Map<String, Value>,
    pub log_steps: Vec<LogStep>,
    pub timing_steps: BTreeMap<String, f64>,
}

impl ExecutionSnapshot {
    /// `{task_info, log_steps, timing_steps}` as a JSON mapping.
    pub fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("task_info".to_string(), Value::Object(self.task_info));
        map.insert(
            "log_steps".to_string(),
            Value::Array(
                self.log_steps
                    .into_iter()
                    .map(|step| {
                        let mut rendered = Map::new();
                        rendered.insert("message".to_string(), Value::String(step.message));
                        rendered.insert("detail".to_string(), Value::Object(step.detail));
                        Value::Object(rendered)
                    })
                    .collect(),
            ),
        );
        map.insert(
            "timing_steps".to_string(),
            Value::Object(
                self.timing_steps
                    .into_iter()
                    .map(|(name, seconds)| (name, seconds_to_value(seconds)))
                    .collect(),
            ),
        );
        map
    }
}

/// Request-scoped accumulator of task info, log steps and timing steps.
pub struct ExecutionLog {
    clock: Arc<dyn Clock>,
    task_info: Map<String, Value>,
    log_steps: Vec<LogStep>,
    timing_steps: BTreeMap<String, TimingStep>,
    recorded_timings: BTreeMap<String, f64>,
}

impl ExecutionLog {
    /// An empty log reading time from the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            task_info: Map::new(),
            log_steps: Vec::new(),
            timing_steps: BTreeMap::new(),
            recorded_timings: BTreeMap::new(),
        }
    }

    /// Merge `info` into the task info. Later writes win per key.
    pub fn add_task_info(&mut self, info: Map<String, Value>) {
        for (key, value) in info {
            self.task_info.insert(key, value);
        }
    }

    /// Append a narrated step.
    pub fn add_log_step(&mut self, message: impl Into<String>, detail: Map<String, Value>) {
        self.log_steps.push(LogStep::new(message, detail));
    }

    /// Append a narrated step with no detail.
    pub fn add_log_message(&mut self, message: impl Into<String>) {
        self.add_log_step(message, Map::new());
    }

    /// Start (or restart) the timing step called `name`.
    pub fn start_timing_step(&mut self, name: impl Into<String>) {
        let step = TimingStep::started_at(self.clock.now());
        self.timing_steps.insert(name.into(), step);
    }

    /// Stop the timing step called `name`. Unknown names are ignored.
    pub fn stop_timing_step(&mut self, name: &str) {
        if let Some(step) = self.timing_steps.get_mut(name) {
            step.stop_at(self.clock.now());
        }
    }

    /// Merge timings the handler measured itself, in seconds.
    ///
    /// A measured step with the same name takes precedence when rendered.
    pub fn add_timing_steps(&mut self, timings: impl IntoIterator<Item = (String, f64)>) {
        self.recorded_timings.extend(timings);
    }

    pub fn task_info(&self) -> &Map<String, Value> {
        &self.task_info
    }

    pub fn log_steps(&self) -> &[LogStep] {
        &self.log_steps
    }

    pub fn timing_step(&self, name: &str) -> Option<&TimingStep> {
        self.timing_steps.get(name)
    }

    /// Render the current contents. Elapsed times are computed now.
    pub fn snapshot(&self) -> ExecutionSnapshot {
        let mut timing_steps = self.recorded_timings.clone();
        for (name, step) in &self.timing_steps {
            timing_steps.insert(name.clone(), step.elapsed());
        }
        ExecutionSnapshot {
            task_info: self.task_info.clone(),
            log_steps: self.log_steps.clone(),
            timing_steps,
        }
    }

    /// Consume the log and render it. Called once, after the handler returns.
    pub fn drain(self) -> ExecutionSnapshot {
        let mut timing_steps = self.recorded_timings;
        for (name, step) in self.timing_steps {
            timing_steps.insert(name, step.elapsed());
        }
        ExecutionSnapshot {
            task_info: self.task_info,
            log_steps: self.log_steps,
            timing_steps,
        }
    }
}

impl Default for ExecutionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExecutionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionLog")
            .field("task_info", &self.task_info)
            .field("log_steps", &self.log_steps)
            .field("timing_steps", &self.timing_steps)
            .field("recorded_timings", &self.recorded_timings)
            .finish_non_exhaustive()
    }
}

fn seconds_to_value(seconds: f64) -> Value {
    serde_json::Number::from_f64(seconds).map_or(Value::Null, Value::Number)
}
