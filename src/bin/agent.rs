//! Entry point for the Soroban chat agent.
use std::process::ExitCode;

use clap::Parser;
use soroban_mcp::{
    agent::{self, AgentArgs, AgentConfig},
    lib::telemetry,
    server::{config::DEFAULT_LOG_FILTER, runtime::RuntimeExit},
};

#[tokio::main]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<(), RuntimeExit> {
    telemetry::init_tracing(DEFAULT_LOG_FILTER).map_err(RuntimeExit::from_error)?;
    let args = AgentArgs::parse();
    let config = AgentConfig::resolve(args).map_err(RuntimeExit::from_error)?;
    agent::run(config).await.map_err(RuntimeExit::from_error)
}
