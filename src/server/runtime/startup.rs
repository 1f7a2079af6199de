use std::{net::SocketAddr, process::ExitCode, sync::Arc};

use anyhow::{Context, Error};
use rmcp::{transport::sse_server::SseServer, ServiceExt};

use crate::{
    catalog::registry::Catalog,
    cli::{LaunchProfile, TransportMode},
    server::{config::ServerConfig, runtime::CatalogServer},
    tools::standard_catalog,
};

use super::build_instructions;

/// Bundles a runtime error message with an exit code and optional structured error data.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
    error_data: Option<rmcp::model::ErrorData>,
}

impl RuntimeExit {
    pub fn structured(error: rmcp::model::ErrorData, exit_code: ExitCode) -> Self {
        Self {
            message: error.message.to_string(),
            exit_code,
            error_data: Some(error),
        }
    }

    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
            error_data: None,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(data) = self.error_data {
            if let Ok(serialized) = serde_json::to_string(&data) {
                eprintln!("{serialized}");
            } else {
                eprintln!("{}", data.message);
            }
        } else {
            eprintln!("{}", self.message);
        }
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn error_data(&self) -> Option<&rmcp::model::ErrorData> {
        self.error_data.as_ref()
    }
}

/// Start the MCP server and select SSE/stdio based on the launch profile.
pub async fn run_server(profile: LaunchProfile, mut config: ServerConfig) -> Result<(), RuntimeExit> {
    if let Some(host) = profile.host_override.clone() {
        config.server.host = host;
    }
    if let Some(port) = profile.port_override {
        config.server.port = port;
    }

    let catalog = Arc::new(standard_catalog().map_err(RuntimeExit::from_error)?);
    let instructions = build_instructions(&profile, &config, &catalog);
    let server = CatalogServer::new(Arc::clone(&catalog), instructions.clone());

    crate::lib::telemetry::emit_transport_mode(&crate::lib::telemetry::TransportTelemetry {
        transport: profile.transport.as_str(),
        host: Some(config.server.host.as_str()),
        port: Some(config.server.port),
        config_path: config.source_path.to_string_lossy().as_ref(),
        tool_count: catalog.tools().len(),
        instructions: &instructions,
        launch_args: &profile.launch_args,
    });

    match profile.transport {
        TransportMode::Stdio => run_stdio(server).await,
        TransportMode::Sse => run_sse(catalog, instructions, &config).await,
    }
}

async fn run_stdio(server: CatalogServer) -> Result<(), RuntimeExit> {
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(RuntimeExit::from_error)?;
    running.waiting().await.map_err(RuntimeExit::from_error)?;
    Ok(())
}

async fn run_sse(
    catalog: Arc<Catalog>,
    instructions: String,
    config: &ServerConfig,
) -> Result<(), RuntimeExit> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let bind: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid bind address {addr}"))
        .map_err(RuntimeExit::from_error)?;

    let sse = SseServer::serve(bind)
        .await
        .with_context(|| format!("failed to bind SSE endpoint {addr}"))
        .map_err(RuntimeExit::from_error)?;
    let cancellation = sse.with_service(move || {
        CatalogServer::new(Arc::clone(&catalog), instructions.clone())
    });

    tracing::info!(
        target: "soroban::runtime",
        transport = "sse",
        bind_addr = %addr,
        "Started listening in SSE mode"
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")
        .map_err(RuntimeExit::from_error)?;
    tracing::info!(
        target: "soroban::runtime",
        "Shutdown signal received; cancelling SSE sessions"
    );
    cancellation.cancel();
    Ok(())
}
