//! # reqlog-redact
//!
//! The two redaction passes applied to request logs:
//!
//! - **Masking** ([`mask_sensitive_data`]) replaces values under sensitive keys
//!   with a fixed token. The logger runs it on decoded request bodies.
//! - **Hashing** ([`apply_hash_filter`]) replaces values at configured
//!   key-paths with an MD5 digest, keeping them correlatable without exposing
//!   them. The logger runs it on the assembled record just before emission.
//!
//! Both are pure tree transforms over `serde_json` values and never fail.
//!
//! ```rust,ignore
//! use reqlog_redact::{apply_hash_filter, mask_sensitive_data};
//!
//! mask_sensitive_data(&mut body, &config.sensitive_fragments());
//! apply_hash_filter(&mut record, &config.hash_key_paths());
//! ```

pub mod hash;
pub mod mask;

pub use hash::{apply_hash_filter, find_and_hash_key, hash_value, is_empty_value};
pub use mask::{is_sensitive_key, mask_sensitive_data};

#[cfg(test)]
mod tests {
    use serde_json::json;

    use reqlog_contracts::{config::LoggerConfig, record::LogRecord};

    use super::*;

    /// Masking first and hashing second, driven by a resolved config, the
    /// way the logger applies them.
    #[test]
    fn config_driven_mask_then_hash() {
        let config = LoggerConfig {
            sensitive_keys: vec!["secret".to_string()],
            key_paths_to_hash: vec![vec!["request".into(), "body".into(), "email".into()]],
            hash_response_data: true,
            ..LoggerConfig::default()
        };

        let mut body = json!({ "email": "ok", "password": "p", "client_secret": "s" });
        mask_sensitive_data(&mut body, &config.sensitive_fragments());

        let mut record = LogRecord::new();
        record.insert("request", json!({ "body": body }));
        record.insert("response", json!({ "data": "X", "status_code": 200 }));
        apply_hash_filter(&mut record, &config.hash_key_paths());

        assert_eq!(
            record.into_value(),
            json!({
                "request": { "body": {
                    "email": "Hash 444bcb3a3fcf8389296c49467f27e1d6",
                    "password": "***FILTERED***",
                    "client_secret": "***FILTERED***"
                } },
                "response": { "data": "Hash 02129bb861061d1a052c592e2dc6b383", "status_code": 200 }
            })
        );
    }

    #[test]
    fn no_paths_configured_is_a_no_op() {
        let mut record = LogRecord::new();
        record.insert("response", json!({ "data": "X" }));
        let before = record.clone();

        let returned = apply_hash_filter(&mut record, &[]);
        assert_eq!(*returned, before);
    }
}
