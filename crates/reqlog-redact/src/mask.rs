//! Sensitive-key masking.
//!
//! Any mapping key containing a configured fragment has its value replaced by
//! `"***FILTERED***"`; a sequence value is replaced element by element so its
//! length survives. Masking works at key granularity: scalar elements of a
//! sequence are only touched when the key holding the sequence matched.

use serde_json::{Map, Value};

use reqlog_contracts::record::FILTERED_TOKEN;

/// Mask sensitive keys anywhere inside `value`. Mutates in place and returns it.
pub fn mask_sensitive_data<'v, S: AsRef<str>>(value: &'v mut Value, fragments: &[S]) -> &'v mut Value {
    match &mut *value {
        Value::Object(map) => {
            mask_mapping(map, fragments);
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                mask_sensitive_data(item, fragments);
            }
        }
        _ => {}
    }
    value
}

fn mask_mapping<S: AsRef<str>>(map: &mut Map<String, Value>, fragments: &[S]) {
    for (key, value) in map.iter_mut() {
        if is_sensitive_key(key, fragments) {
            match &mut *value {
                Value::Array(items) => {
                    for item in items.iter_mut() {
                        *item = Value::String(FILTERED_TOKEN.to_string());
                    }
                }
                other => *other = Value::String(FILTERED_TOKEN.to_string()),
            }
        }
        // Sensitive keys may sit under innocuous parents.
        if value.is_object() || value.is_array() {
            mask_sensitive_data(value, fragments);
        }
    }
}

/// True if `key` contains any of `fragments` as a substring.
pub fn is_sensitive_key<S: AsRef<str>>(key: &str, fragments: &[S]) -> bool {
    fragments.iter().any(|f| key.contains(f.as_ref()))
}
