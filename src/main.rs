//! Entry point for the Soroban MCP catalog server.
use std::process::ExitCode;

use anyhow::Error;
use clap::Parser;
use soroban_mcp::{
    cli::LaunchProfileArgs,
    lib::telemetry,
    server::{
        config::ServerConfig,
        runtime::{self, RuntimeExit},
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    let args = LaunchProfileArgs::parse();
    let profile = args.build().map_err(RuntimeExit::from_error)?;

    let config = if profile.config_explicit {
        ServerConfig::load_from_path(profile.config_path.clone())
    } else {
        ServerConfig::load_or_defaults(profile.config_path.clone())
    }
    .map_err(|err| RuntimeExit::from_error(Error::new(err)))?;

    // Tracing initializes after the config load so the configured filter
    // can take effect; RUST_LOG still wins when set.
    telemetry::init_tracing(&config.telemetry.log_filter).map_err(RuntimeExit::from_error)?;
    runtime::run_server(profile, config).await
}
