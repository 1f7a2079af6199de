//! Telemetry initialization and conversation turn span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs.
///
/// `RUST_LOG` takes precedence; `default_filter` (the configured
/// `telemetry.log_filter`) applies when the environment is silent.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = resolve_filter(std::env::var("RUST_LOG").ok().as_deref(), default_filter);
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

fn resolve_filter(env_value: Option<&str>, default_filter: &str) -> EnvFilter {
    env_value
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Span helper to record start and finish of one agent conversation turn.
pub struct TurnSpan {
    span: Span,
    started_at: Instant,
    turn_id: Uuid,
}

impl TurnSpan {
    /// Start a turn span.
    pub fn start(turn_id: Uuid, turn_index: u64) -> Self {
        let span = info_span!(
            target: "soroban::agent",
            "conversation_turn",
            %turn_id,
            turn_index
        );
        Self {
            span,
            started_at: Instant::now(),
            turn_id,
        }
    }

    /// Close the span while recording status and reasoning round count.
    pub fn finish(self, status: &'static str, rounds: usize) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "soroban::agent",
            turn_id = %self.turn_id,
            status = status,
            rounds = rounds,
            elapsed_ms = elapsed_ms,
            "Completed conversation turn"
        );
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct TransportTelemetry<'a> {
    pub transport: &'a str,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub config_path: &'a str,
    pub tool_count: usize,
    pub instructions: &'a str,
    pub launch_args: &'a [String],
}

/// Emit runtime mode to `tracing`.
pub fn emit_transport_mode(telemetry: &TransportTelemetry<'_>) {
    info!(
        target: "soroban::runtime",
        transport = telemetry.transport,
        host = telemetry.host.unwrap_or(""),
        port = telemetry.port.unwrap_or_default(),
        config_path = telemetry.config_path,
        tool_count = telemetry.tool_count,
        instructions = telemetry.instructions,
        launch_args = ?telemetry.launch_args,
        "Started MCP server"
    );
}
