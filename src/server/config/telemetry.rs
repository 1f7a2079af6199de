use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::lib::errors::ConfigError;

use super::{ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Telemetry settings.
#[derive(Debug, Clone)]
pub struct TelemetrySection {
    pub log_filter: String,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTelemetrySection {
    pub log_filter: Option<String>,
}

pub fn parse_telemetry_section(
    raw: Option<RawTelemetrySection>,
    path: &Path,
) -> Result<TelemetrySection, ConfigError> {
    let telemetry_raw = raw.unwrap_or_default();
    let log_filter = telemetry_raw
        .log_filter
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    if log_filter.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "telemetry.log_filter",
            message: "Log filter must not be empty".into(),
        });
    }
    Ok(TelemetrySection { log_filter })
}

pub fn log_env_source(path: &Path, from_env: bool) {
    if from_env {
        info!(
            target: "soroban::config",
            path = %path.display(),
            "Loading configuration using MCP_CONFIG_PATH environment variable"
        );
    } else {
        debug!(
            target: "soroban::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "MCP_CONFIG_PATH not set; using default config.toml"
        );
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "soroban::config",
        path = %config.source_path.display(),
        host = %config.server.host,
        port = config.server.port,
        log_filter = %config.telemetry.log_filter,
        "Configuration file loaded successfully"
    );
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_section_uses_info_filter() {
        let section =
            parse_telemetry_section(None, &PathBuf::from("config.toml")).expect("defaults apply");
        assert_eq!(section.log_filter, "info");
    }

    #[test]
    fn empty_filter_is_rejected() {
        let raw = RawTelemetrySection {
            log_filter: Some(String::new()),
        };
        let error = parse_telemetry_section(Some(raw), &PathBuf::from("config.toml"))
            .expect_err("empty filter should fail");
        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "telemetry.log_filter"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
