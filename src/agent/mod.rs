//! Chat agent: configuration, model provider, MCP session, and the REPL.

pub mod config;
pub mod llm;
pub mod repl;
pub mod session;

pub use config::{AgentArgs, AgentConfig};
pub use repl::run;
