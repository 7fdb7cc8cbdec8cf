//! Resolved logger configuration.
//!
//! `LoggerConfig` is the only configuration surface the pipeline reads. Hosts
//! build it directly or load it from TOML through `reqlog-config`. Every field
//! has a default so a partial document is always accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key fragment that is always treated as sensitive, whatever the configuration says.
pub const BUILTIN_SENSITIVE_KEY: &str = "password";

/// Severity used for emitted records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// The resolved configuration of a `RequestLogger`.
///
/// Example in TOML:
/// ```toml
/// app_name = "billing-api"
/// excluded_paths = ["/health", "/metrics"]
/// key_paths_to_hash = [["request", "headers", "Authorization"]]
/// sensitive_keys = ["token", "secret"]
/// hash_response_data = true
/// git_sha = "3f2a9c1"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Master switch. When false no request is ever logged.
    pub enabled: bool,

    /// Requests whose path starts with any of these prefixes are never logged.
    pub excluded_paths: Vec<String>,

    /// Key-paths into the assembled record whose values are replaced by a digest.
    pub key_paths_to_hash: Vec<Vec<String>>,

    /// Substring fragments that mark a body key as sensitive.
    ///
    /// `"password"` is always added on top of these; see `sensitive_fragments()`.
    pub sensitive_keys: Vec<String>,

    /// Also hash `response.data`.
    pub hash_response_data: bool,

    /// Severity of emitted records.
    pub level: LogLevel,

    /// Value written to `execution.app`.
    pub app_name: String,

    /// Build revision, written to `info.git_sha` when non-empty.
    pub git_sha: Option<String>,

    /// Build tag, written to `info.git_tag` when non-empty.
    pub git_tag: Option<String>,

    /// Response media types whose bodies are never decoded.
    pub binary_content_types: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            excluded_paths: Vec::new(),
            key_paths_to_hash: Vec::new(),
            sensitive_keys: Vec::new(),
            hash_response_data: false,
            level: LogLevel::Info,
            app_name: String::new(),
            git_sha: None,
            git_tag: None,
            binary_content_types: vec!["application/pdf".to_string()],
        }
    }
}

impl LoggerConfig {
    /// Configured sensitive fragments plus the built-in `"password"`, without duplicates.
    pub fn sensitive_fragments(&self) -> Vec<String> {
        let mut fragments: Vec<String> = Vec::with_capacity(self.sensitive_keys.len() + 1);
        for key in self
            .sensitive_keys
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(BUILTIN_SENSITIVE_KEY))
        {
            if !fragments.iter().any(|f| f == key) {
                fragments.push(key.to_string());
            }
        }
        fragments
    }

    /// Configured key-paths, plus `["response", "data"]` when `hash_response_data` is set.
    pub fn hash_key_paths(&self) -> Vec<Vec<String>> {
        let mut paths = self.key_paths_to_hash.clone();
        if self.hash_response_data {
            let response_data = vec!["response".to_string(), "data".to_string()];
            if !paths.contains(&response_data) {
                paths.push(response_data);
            }
        }
        paths
    }

    /// True if `path` starts with any excluded prefix.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// True if a request on `path` must produce a record.
    pub fn should_log(&self, path: &str) -> bool {
        self.enabled && !self.is_excluded(path)
    }

    /// True if `media_type` is configured as a binary response type.
    pub fn is_binary_content_type(&self, media_type: &str) -> bool {
        self.binary_content_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(media_type))
    }
}
