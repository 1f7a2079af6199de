use crate::{catalog::registry::Catalog, cli::LaunchProfile, server::config::ServerConfig};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(
    profile: &LaunchProfile,
    config: &ServerConfig,
    catalog: &Catalog,
) -> String {
    format!(
        "Arithmetic catalog server: {tools} tools, {resources} resources, {prompts} prompts. Loaded config {path}; serving in {transport} mode (host={host}, port={port}).",
        tools = catalog.tools().len(),
        resources = catalog.resources().len() + catalog.templates().len(),
        prompts = catalog.prompts().len(),
        path = config.source_path.display(),
        transport = profile.transport.as_str(),
        host = config.server.host,
        port = config.server.port
    )
}
