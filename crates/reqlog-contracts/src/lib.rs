//! # reqlog-contracts
//!
//! Shared record types, configuration and errors for the reqlog request logger.
//!
//! All crates in the workspace import from here. No pipeline logic lives in
//! this crate, only data definitions, constants and error types.

pub mod config;
pub mod error;
pub mod http;
pub mod record;

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    use crate::config::{LogLevel, LoggerConfig};
    use crate::error::ReqlogError;
    use crate::http::{CapturedRequest, CapturedResponse};
    use crate::record::{LogRecord, LogStep, Timing};

    // ── LoggerConfig ─────────────────────────────────────────────────────────

    #[test]
    fn default_config_logs_everything_at_info() {
        let config = LoggerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, LogLevel::Info);
        assert!(config.should_log("/anything"));
        assert_eq!(config.binary_content_types, vec!["application/pdf".to_string()]);
    }

    #[test]
    fn password_is_always_a_sensitive_fragment() {
        let config = LoggerConfig::default();
        assert_eq!(config.sensitive_fragments(), vec!["password".to_string()]);

        let config = LoggerConfig {
            sensitive_keys: vec!["token".to_string(), "password".to_string()],
            ..LoggerConfig::default()
        };
        // No duplicate when "password" is configured explicitly.
        assert_eq!(
            config.sensitive_fragments(),
            vec!["token".to_string(), "password".to_string()]
        );
    }

    #[test]
    fn hash_response_data_adds_the_response_data_path_once() {
        let mut config = LoggerConfig {
            key_paths_to_hash: vec![vec!["path".into(), "to".into(), "hash".into()]],
            ..LoggerConfig::default()
        };
        assert_eq!(config.hash_key_paths().len(), 1);

        config.hash_response_data = true;
        let paths = config.hash_key_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1], vec!["response".to_string(), "data".to_string()]);

        config.key_paths_to_hash.push(vec!["response".into(), "data".into()]);
        assert_eq!(config.hash_key_paths().len(), 2);
    }

    #[test]
    fn excluded_paths_match_by_prefix() {
        let config = LoggerConfig {
            excluded_paths: vec!["/path1/".to_string()],
            ..LoggerConfig::default()
        };
        assert!(config.is_excluded("/path1/"));
        assert!(config.is_excluded("/path1/nested?x=1"));
        assert!(!config.is_excluded("/path2/"));
        assert!(!config.should_log("/path1/a"));
    }

    #[test]
    fn disabled_config_never_logs() {
        let config = LoggerConfig {
            enabled: false,
            ..LoggerConfig::default()
        };
        assert!(!config.should_log("/foo"));
    }

    // ── Record types ─────────────────────────────────────────────────────────

    #[test]
    fn timing_serializes_duration_in_seconds() {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::milliseconds(1500);
        let timing = Timing::between(start, end);

        let value = serde_json::to_value(&timing).unwrap();
        assert_eq!(value["duration"], json!(1.5));
        assert!(value.get("duration_seconds").is_none());
    }

    #[test]
    fn timing_is_never_negative() {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 1).unwrap();
        let end = start - Duration::seconds(1);
        assert_eq!(Timing::between(start, end).duration_seconds, 0.0);
    }

    #[test]
    fn log_step_displays_its_message() {
        let step = LogStep::new("loaded invoice", serde_json::Map::new());
        assert_eq!(step.to_string(), "loaded invoice");
    }

    #[test]
    fn log_record_pointer_and_merge() {
        let mut record = LogRecord::new();
        record.insert("request", json!({ "method": "GET" }));
        record.merge(
            json!({ "task_info": { "k": "v" }, "request": { "method": "POST" } })
                .as_object()
                .cloned()
                .unwrap(),
        );

        assert_eq!(record.pointer("/request/method"), Some(&json!("POST")));
        assert_eq!(record.pointer("/task_info"), Some(&json!({ "k": "v" })));
        assert_eq!(record.pointer("/missing/key"), None);
        assert_eq!(record.pointer("no-leading-slash"), None);
    }

    #[test]
    fn log_record_pointer_unescapes_every_token() {
        let mut record = LogRecord::new();
        record.insert("a/b", json!({ "c~d": { "e/f": 1 } }));

        assert_eq!(record.pointer("/a~1b/c~0d/e~1f"), Some(&json!(1)));
        assert_eq!(record.pointer("/a~1b"), Some(&json!({ "c~d": { "e/f": 1 } })));
        assert_eq!(record.pointer("/a/b"), None);
    }

    // ── Captured request / response ──────────────────────────────────────────

    #[test]
    fn captured_request_full_path_includes_query() {
        let request = CapturedRequest::new("GET", "/foo");
        assert_eq!(request.full_path(), "/foo");

        let request = request.with_query("page=2");
        assert_eq!(request.full_path(), "/foo?page=2");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = CapturedRequest::new("GET", "/").with_header("authorization", "Bearer x");
        assert_eq!(request.header("Authorization"), Some("Bearer x"));

        let response = CapturedResponse::bytes(200, "application/pdf", b"%PDF".to_vec());
        assert_eq!(response.content_type(), Some("application/pdf"));
    }

    #[test]
    fn json_response_keeps_rendered_data() {
        let response = CapturedResponse::json(201, json!({ "id": 7 }));
        assert_eq!(response.rendered, Some(json!({ "id": 7 })));
        assert_eq!(response.body, br#"{"id":7}"#.to_vec());
    }

    // ── ReqlogError display messages ─────────────────────────────────────────

    #[test]
    fn error_config_display() {
        let err = ReqlogError::ConfigError {
            reason: "missing file".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("missing file"));
    }

    #[test]
    fn error_sink_write_failed_display() {
        let err = ReqlogError::SinkWriteFailed {
            reason: "disk full".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("log sink write failed"));
        assert!(msg.contains("disk full"));
    }
}
