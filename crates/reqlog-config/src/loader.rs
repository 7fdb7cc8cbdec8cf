//! TOML loading of `LoggerConfig`.
//!
//! The document may sit at the top level or under a `[reqlog]` table, so the
//! logger's settings can live inside a larger application config file.
//! Unknown keys are ignored and every missing key takes its default.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use reqlog_contracts::{
    config::LoggerConfig,
    error::{ReqlogError, ReqlogResult},
};

/// Name of the table the logger's settings may be nested under.
pub const SECTION: &str = "reqlog";

#[derive(Deserialize)]
struct Sectioned {
    reqlog: LoggerConfig,
}

/// Parse `s` as TOML into a `LoggerConfig`.
///
/// Returns `ReqlogError::ConfigError` if the TOML is malformed or a known key
/// has the wrong type.
pub fn from_toml_str(s: &str) -> ReqlogResult<LoggerConfig> {
    let table: toml::Table = toml::from_str(s).map_err(|e| ReqlogError::ConfigError {
        reason: format!("failed to parse logger TOML: {}", e),
    })?;

    let config = if table.contains_key(SECTION) {
        toml::Value::Table(table)
            .try_into::<Sectioned>()
            .map(|sectioned| sectioned.reqlog)
    } else {
        toml::Value::Table(table).try_into::<LoggerConfig>()
    }
    .map_err(|e| ReqlogError::ConfigError {
        reason: format!("failed to parse logger TOML: {}", e),
    })?;

    debug!(
        enabled = config.enabled,
        excluded_paths = config.excluded_paths.len(),
        key_paths_to_hash = config.key_paths_to_hash.len(),
        "logger configuration loaded"
    );
    Ok(config)
}

/// Read the file at `path` and parse it as logger configuration.
pub fn from_file(path: &Path) -> ReqlogResult<LoggerConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReqlogError::ConfigError {
        reason: format!("failed to read logger config file '{}': {}", path.display(), e),
    })?;
    from_toml_str(&contents)
}
