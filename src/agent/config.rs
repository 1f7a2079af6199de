//! Agent CLI arguments and environment resolution.

use std::env;

use clap::Parser;

use crate::lib::errors::AgentError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080/sse";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_ROUNDS: usize = 8;

/// Command-line arguments for the chat agent.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Soroban chat agent bridging an MCP tool catalog to a chat model",
    long_about = None
)]
pub struct AgentArgs {
    /// SSE endpoint of the catalog server.
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    pub url: String,
    /// Model name (overrides OPENAI_MODEL).
    #[arg(long)]
    pub model: Option<String>,
    /// Sampling temperature.
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
    /// Maximum model/tool rounds per user turn.
    #[arg(long = "max-rounds", default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,
    /// Skip the startup catalog report.
    #[arg(long = "no-banner", default_value_t = false)]
    pub no_banner: bool,
}

/// Resolved agent configuration. The API key is an opaque secret: it is
/// excluded from the `Debug` output and never logged.
#[derive(Clone)]
pub struct AgentConfig {
    pub url: String,
    pub model: String,
    pub temperature: f32,
    pub max_rounds: usize,
    pub banner: bool,
    pub api_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_rounds", &self.max_rounds)
            .field("banner", &self.banner)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AgentConfig {
    /// Resolve the configuration from CLI arguments, `.env`, and the process
    /// environment. Reads `OPENAI_API_KEY` (required), `OPENAI_MODEL`, and
    /// `OPENAI_BASE_URL`.
    pub fn resolve(args: AgentArgs) -> Result<Self, AgentError> {
        dotenv::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| AgentError::MissingApiKey)?;
        let model = args
            .model
            .or_else(|| env::var("OPENAI_MODEL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            url: args.url,
            model,
            temperature: args.temperature,
            max_rounds: args.max_rounds.max(1),
            banner: !args.no_banner,
            api_key,
            base_url,
        })
    }
}
