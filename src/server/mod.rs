//! Server-side modules: configuration loading and the MCP runtime.

pub mod config;
pub mod runtime;
