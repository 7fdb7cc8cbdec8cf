//! # reqlog-config
//!
//! Loads [`LoggerConfig`](reqlog_contracts::config::LoggerConfig) from TOML.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let config = reqlog_config::from_file(Path::new("config/reqlog.toml"))?;
//! // Pass `config` to `reqlog_core::RequestLogger::new(...)`.
//! ```
//!
//! ## Keys
//!
//! `enabled`, `excluded_paths`, `key_paths_to_hash`, `sensitive_keys`,
//! `hash_response_data`, `level`, `app_name`, `git_sha`, `git_tag`,
//! `binary_content_types`. All optional.

pub mod loader;

pub use loader::{from_file, from_toml_str, SECTION};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::Path;

    use reqlog_contracts::{
        config::{LogLevel, LoggerConfig},
        error::ReqlogError,
    };

    use crate::{from_file, from_toml_str};

    /// An empty document yields the defaults.
    #[test]
    fn test_empty_document_is_default() {
        let config = from_toml_str("").unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    /// Every key, top level.
    #[test]
    fn test_full_document() {
        let toml = r#"
            enabled = true
            app_name = "billing-api"
            excluded_paths = ["/health", "/metrics"]
            key_paths_to_hash = [["request", "headers", "Authorization"], ["path", "to", "hash"]]
            sensitive_keys = ["token", "secret"]
            hash_response_data = true
            level = "warn"
            git_sha = "3f2a9c1"
            git_tag = "v1.4.0"
            binary_content_types = ["application/pdf", "application/zip"]
        "#;

        let config = from_toml_str(toml).unwrap();

        assert!(config.enabled);
        assert_eq!(config.app_name, "billing-api");
        assert_eq!(config.excluded_paths, vec!["/health", "/metrics"]);
        assert_eq!(
            config.key_paths_to_hash[0],
            vec!["request", "headers", "Authorization"]
        );
        assert_eq!(config.sensitive_keys, vec!["token", "secret"]);
        assert!(config.hash_response_data);
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.git_sha.as_deref(), Some("3f2a9c1"));
        assert_eq!(config.git_tag.as_deref(), Some("v1.4.0"));
        assert_eq!(config.binary_content_types.len(), 2);
        assert_eq!(config.hash_key_paths().len(), 3);
    }

    /// Settings nested under `[reqlog]` inside a larger file.
    #[test]
    fn test_sectioned_document() {
        let toml = r#"
            [server]
            port = 8080

            [reqlog]
            enabled = false
            excluded_paths = ["/path1/"]
        "#;

        let config = from_toml_str(toml).unwrap();
        assert!(!config.enabled);
        assert!(config.is_excluded("/path1/x"));
        // Untouched keys keep their defaults.
        assert_eq!(config.level, LogLevel::Info);
    }

    /// Malformed TOML must produce a `ReqlogError::ConfigError`.
    #[test]
    fn test_toml_parse_error() {
        let result = from_toml_str("this is not valid toml ][[[");

        match result {
            Err(ReqlogError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse logger TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// A known key with the wrong type is rejected too.
    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(matches!(
            from_toml_str(r#"enabled = "yes""#),
            Err(ReqlogError::ConfigError { .. })
        ));
        assert!(matches!(
            from_toml_str(r#"level = "loud""#),
            Err(ReqlogError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        match from_file(Path::new("/nonexistent/reqlog.toml")) {
            Err(ReqlogError::ConfigError { reason }) => {
                assert!(reason.contains("failed to read logger config file"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
