//! MCP server runtime: request handler, startup, and server metadata.
mod handler;
mod server_info;
mod startup;

pub use handler::CatalogServer;
pub use server_info::build_instructions;
pub use startup::{run_server, RuntimeExit};
