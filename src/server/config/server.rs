use std::path::Path;

use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Server socket settings.
#[derive(Debug, Clone)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub fn parse_server_section(
    raw: Option<RawServerSection>,
    path: &Path,
) -> Result<ServerSection, ConfigError> {
    let server_raw = raw.unwrap_or_default();
    let host = server_raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    if host.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "server.host",
            message: "Host must not be empty".into(),
        });
    }
    let port = server_raw.port.unwrap_or(DEFAULT_PORT);
    validate_port(port, path)?;
    Ok(ServerSection { host, port })
}

fn validate_port(port: u16, path: &Path) -> Result<(), ConfigError> {
    if port >= 1 {
        return Ok(());
    }

    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "server.port",
        message: "Use a port in the range 1-65535".into(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_section_falls_back_to_defaults() {
        let section =
            parse_server_section(None, &PathBuf::from("config.toml")).expect("defaults apply");
        assert_eq!(section.host, "0.0.0.0");
        assert_eq!(section.port, 8080);
    }

    #[test]
    fn zero_port_is_rejected() {
        let raw = RawServerSection {
            host: None,
            port: Some(0),
        };
        let error = parse_server_section(Some(raw), &PathBuf::from("config.toml"))
            .expect_err("port 0 should fail");
        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "server.port"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_host_is_rejected() {
        let raw = RawServerSection {
            host: Some("  ".into()),
            port: None,
        };
        let error = parse_server_section(Some(raw), &PathBuf::from("config.toml"))
            .expect_err("blank host should fail");
        match error {
            ConfigError::InvalidField { field, .. } => assert_eq!(field, "server.host"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }
}
