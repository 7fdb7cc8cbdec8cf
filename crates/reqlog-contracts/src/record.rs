//! Log record types.
//!
//! The pipeline builds one `LogRecord` per logged request. Its top-level keys
//! are `request`, `response`, `execution`, `info` and, once the handler's
//! annotations are drained, `task_info`, `log_steps` and `timing_steps`.
//! These names are the wire contract downstream tooling reads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `request.body` when the body is non-empty but not JSON.
pub const NOT_A_JSON_BODY: &str = "Not a JSON body";

/// `response.data` when nothing usable could be read from the response.
pub const NOT_A_SERIALIZABLE_RESPONSE: &str = "Not a serializable response";

/// Content placed in `response.data.content` for binary responses.
pub const BINARY_RESPONSE_CONTENT: &str = "PDF bytes response";

/// Replacement for values under sensitive keys.
pub const FILTERED_TOKEN: &str = "***FILTERED***";

/// Prefix of every digest produced by the hash filter.
pub const HASH_PREFIX: &str = "Hash ";

/// Normalized description of an incoming request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescription {
    /// Path including the query string.
    pub url: String,
    pub method: String,
    /// Headers as received; key case is whatever the transport supplied.
    pub headers: Map<String, Value>,
    /// Decoded and masked JSON body, `"Not a JSON body"`, or `{}` when empty.
    pub body: Value,
    /// Opaque identity exposed by the host, if any.
    pub user: Option<Value>,
    /// Unverified token claims; `None` when no `Authorization` header was sent.
    pub jwt_payload: Option<Map<String, Value>>,
}

/// Normalized description of an outgoing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDescription {
    pub data: Value,
    pub status_code: u16,
}

/// Wall-clock boundaries of the wrapped handler call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_seconds: f64,
}

impl Timing {
    /// Build timing fields from two instants. Never negative.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_seconds: seconds_between(start, end),
        }
    }
}

/// The `execution` block of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub app: String,
    /// Route or view identifier; empty when the host could not resolve one.
    pub name: String,
    pub timing: Timing,
}

/// One narrated step added by handler code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogStep {
    pub message: String,
    pub detail: Map<String, Value>,
}

impl LogStep {
    pub fn new(message: impl Into<String>, detail: Map<String, Value>) -> Self {
        Self {
            message: message.into(),
            detail,
        }
    }
}

impl fmt::Display for LogStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The structured payload emitted once per logged request.
///
/// Kept as an untyped JSON mapping because the redaction passes address it by
/// arbitrary key-paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogRecord(Map<String, Value>);

impl LogRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert a top-level key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Merge every entry of `other` in as top-level keys (last write wins).
    pub fn merge(&mut self, other: Map<String, Value>) {
        for (key, value) in other {
            self.0.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look a nested value up with a JSON pointer, e.g. `"/request/method"`.
    ///
    /// The first reference token picks the top-level key; `serde_json` resolves
    /// the rest, so `~0` and `~1` escapes work at every level.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let path = pointer.strip_prefix('/')?;
        let (head, rest) = match path.find('/') {
            Some(i) => path.split_at(i),
            None => (path, ""),
        };
        let key = head.replace("~1", "/").replace("~0", "~");
        self.0.get(&key)?.pointer(rest)
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for LogRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Seconds from `start` to `end`, clamped at zero, with microsecond resolution.
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end.signed_duration_since(start);
    match delta.num_microseconds() {
        Some(us) if us > 0 => us as f64 / 1_000_000.0,
        Some(_) => 0.0,
        None => delta.num_milliseconds().max(0) as f64 / 1_000.0,
    }
}
