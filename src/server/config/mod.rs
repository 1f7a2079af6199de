//! Load and validate server configuration.
use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod server;
pub mod telemetry;

pub use server::{parse_server_section, RawServerSection, ServerSection, DEFAULT_HOST, DEFAULT_PORT};
pub use telemetry::{
    parse_telemetry_section, RawTelemetrySection, TelemetrySection, DEFAULT_LOG_FILTER,
};

const CONFIG_ENV_KEY: &str = "MCP_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub telemetry: TelemetrySection,
    pub source_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    telemetry: Option<RawTelemetrySection>,
}

impl ServerConfig {
    /// Prefer `MCP_CONFIG_PATH` if set; otherwise read `config.toml`. A
    /// missing default file falls back to compiled defaults, while a missing
    /// explicitly-named file is an error.
    pub fn load_from_env_or_default() -> Result<Self, ConfigError> {
        let (path, from_env) = match env::var(CONFIG_ENV_KEY) {
            Ok(value) if !value.trim().is_empty() => (PathBuf::from(value), true),
            _ => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        telemetry::log_env_source(&path, from_env);
        if from_env {
            Self::load_from_path(path)
        } else {
            Self::load_or_defaults(path)
        }
    }

    /// Load from `path`, or fall back to compiled defaults when the file does
    /// not exist. Used for the non-explicit default path only; an explicitly
    /// named file must exist.
    pub fn load_or_defaults(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(
                target: "soroban::config",
                path = %path.display(),
                "Default configuration file not found; using compiled defaults"
            );
            return Ok(Self::compiled_defaults(path));
        }
        Self::load_from_path(path)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "soroban::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "soroban::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "soroban::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "soroban::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn compiled_defaults(path: PathBuf) -> Self {
        Self {
            server: ServerSection::default(),
            telemetry: TelemetrySection::default(),
            source_path: path,
        }
    }

    fn from_raw(raw: RawServerConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, &path)?;
        let telemetry = parse_telemetry_section(raw.telemetry, &path)?;

        Ok(Self {
            server,
            telemetry,
            source_path: path,
        })
    }
}
