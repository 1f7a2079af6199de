//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{build_launch_args, resolve_config_path, LaunchProfile, TransportMode};

/// Command-line arguments for the catalog server.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Soroban MCP arithmetic catalog server",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select sse (default) or stdio.
    #[arg(long, value_enum, default_value_t = TransportMode::Sse)]
    pub transport: TransportMode,
    /// Path to config.toml (overrides MCP_CONFIG_PATH).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Bind host override (takes precedence over the config file).
    #[arg(long)]
    pub host: Option<String>,
    /// Bind port override (takes precedence over the config file).
    #[arg(long)]
    pub port: Option<u16>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_explicit =
            self.config_override.is_some() || std::env::var_os("MCP_CONFIG_PATH").is_some();
        let config_path = resolve_config_path(self.config_override)?;
        let launch_args = build_launch_args(self.transport, &config_path);

        Ok(LaunchProfile {
            config_path,
            config_explicit,
            transport: self.transport,
            host_override: self.host,
            port_override: self.port,
            launch_args,
        })
    }
}
