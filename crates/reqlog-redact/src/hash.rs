//! Key-path hashing.
//!
//! Each configured key-path addresses one value in the assembled record. When
//! the path resolves to a non-empty value it is replaced by
//! `"Hash " + hex(md5(text))`. Paths that do not resolve are skipped without
//! any error: a misconfigured path simply has no effect.
//!
//! The digest input is the string itself for JSON strings and the compact
//! JSON text for everything else, so `"42"` and `42` hash identically.

use md5::{Digest, Md5};
use serde_json::{Map, Value};
use tracing::debug;

use reqlog_contracts::record::{LogRecord, HASH_PREFIX};

/// Python-style truthiness: null, false, zero, `""`, `[]` and `{}` are empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Digest a value as `"Hash <32 hex chars>"`.
///
/// Strings are hashed over their text. Any other value is hashed over its
/// compact JSON, so digests of mappings and sequences differ from those of
/// loggers that hash a language-specific repr (`{'a': 1}` vs `{"a":1}`).
pub fn hash_value(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let digest = Md5::digest(text.as_bytes());
    format!("{}{}", HASH_PREFIX, hex::encode(digest))
}

/// Walk `key_path` through `data` and hash the terminal value if it is non-empty.
///
/// Returns true when a value was replaced. A missing key, a non-mapping
/// intermediate value, or an empty path all return false.
pub fn find_and_hash_key(data: &mut Map<String, Value>, key_path: &[String]) -> bool {
    let Some((last, parents)) = key_path.split_last() else {
        return false;
    };

    let mut current = data;
    for key in parents {
        match current.get_mut(key.as_str()) {
            Some(Value::Object(next)) => current = next,
            _ => return false,
        }
    }

    let Some(value) = current.get_mut(last.as_str()) else {
        return false;
    };
    if is_empty_value(value) {
        return false;
    }
    *value = Value::String(hash_value(value));
    true
}

/// Apply every key-path to `record` in order. Mutates in place and returns it.
pub fn apply_hash_filter<'r>(record: &'r mut LogRecord, key_paths: &[Vec<String>]) -> &'r mut LogRecord {
    for key_path in key_paths {
        if !find_and_hash_key(record.as_map_mut(), key_path) {
            debug!(key_path = ?key_path, "hash key-path did not resolve to a value");
        }
    }
    record
}
