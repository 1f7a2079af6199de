//! Client-side MCP session: SSE connection, catalog fetch, and tool bridging.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rmcp::{
    model::{
        CallToolRequestParam, ClientInfo, Prompt, ReadResourceRequestParam, Resource,
        ResourceContents, ResourceTemplate, Tool,
    },
    serve_client,
    service::{RoleClient, RunningService, ServiceError},
    transport::sse_client::SseClientTransport,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::agent::llm::ToolSchema;

/// Resource read at startup to prove template expansion end to end.
const STARTUP_GREETING_URI: &str = "greeting://Shane";

/// The server's advertised catalog, fetched once at startup.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    pub tools: Vec<Tool>,
    pub resources: Vec<Resource>,
    pub templates: Vec<ResourceTemplate>,
    pub prompts: Vec<Prompt>,
    /// Expanded text of `greeting://Shane`.
    pub greeting: String,
}

/// Result of bridging one model-requested tool call through MCP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool ran; its text content goes back to the model.
    Reply(String),
    /// The server rejected the call. The message still goes back to the
    /// model so it can correct itself instead of killing the session.
    Rejected(String),
}

impl ToolOutcome {
    pub fn into_text(self) -> String {
        match self {
            Self::Reply(text) | Self::Rejected(text) => text,
        }
    }
}

/// The reasoning loop's view of the tool transport.
#[async_trait]
pub trait ToolBridge: Send + Sync {
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolOutcome>;
}

/// A live client session against the catalog server.
pub struct McpToolSession {
    client: RunningService<RoleClient, ClientInfo>,
}

impl McpToolSession {
    /// Open the SSE transport and run the MCP initialize handshake.
    pub async fn connect(url: &str) -> Result<Self> {
        let transport = SseClientTransport::start(url.to_string())
            .await
            .with_context(|| format!("failed to open SSE transport to {url}"))?;
        let client = serve_client(ClientInfo::default(), transport)
            .await
            .with_context(|| format!("MCP handshake with {url} failed"))?;
        debug!(target: "soroban::agent", url, "Connected to catalog server");
        Ok(Self { client })
    }

    /// Fetch the full catalog. Resources and prompts are listed concurrently;
    /// any single failure aborts the fetch.
    pub async fn fetch_catalog(&self) -> Result<RemoteCatalog> {
        let tools = self
            .client
            .list_tools(None)
            .await
            .context("failed to list tools")?
            .tools;
        let (resources, prompts) = tokio::try_join!(
            self.client.list_resources(None),
            self.client.list_prompts(None),
        )
        .context("failed to list resources and prompts")?;
        let templates = self
            .client
            .list_resource_templates(None)
            .await
            .context("failed to list resource templates")?
            .resource_templates;
        let greeting = self.read_text_resource(STARTUP_GREETING_URI).await?;

        Ok(RemoteCatalog {
            tools,
            resources: resources.resources,
            templates,
            prompts: prompts.prompts,
            greeting,
        })
    }

    /// Read a resource and return its concatenated text contents.
    pub async fn read_text_resource(&self, uri: &str) -> Result<String> {
        let result = self
            .client
            .read_resource(ReadResourceRequestParam {
                uri: uri.to_string(),
            })
            .await
            .with_context(|| format!("failed to read resource {uri}"))?;

        let mut text = String::new();
        for contents in result.contents {
            if let ResourceContents::TextResourceContents { text: chunk, .. } = contents {
                text.push_str(&chunk);
            }
        }
        Ok(text)
    }

    /// Project the advertised tools into chat-completions function schemas.
    pub fn tool_schemas(catalog: &RemoteCatalog) -> Vec<ToolSchema> {
        catalog
            .tools
            .iter()
            .map(|tool| ToolSchema {
                name: tool.name.to_string(),
                description: tool
                    .description
                    .as_deref()
                    .unwrap_or_default()
                    .to_string(),
                parameters: Value::Object((*tool.input_schema).clone()),
            })
            .collect()
    }

    /// Tear down the session, cancelling the SSE connection.
    pub async fn close(self) -> Result<()> {
        self.client
            .cancel()
            .await
            .context("failed to close MCP session")?;
        Ok(())
    }
}

#[async_trait]
impl ToolBridge for McpToolSession {
    /// Invoke a tool with already-decoded JSON arguments.
    ///
    /// Protocol-level rejections (unknown tool, bad arguments, compute
    /// failures) come back as `ToolOutcome::Rejected`; transport failures
    /// propagate as errors.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolOutcome> {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Ok(ToolOutcome::Rejected(format!(
                    "tool arguments must be a JSON object, got: {other}"
                )))
            }
        };

        let result = self
            .client
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments,
            })
            .await;

        match result {
            Ok(response) => {
                let text = response
                    .content
                    .iter()
                    .filter_map(|item| item.as_text().map(|t| t.text.clone()))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(ToolOutcome::Reply(text))
            }
            Err(ServiceError::McpError(error)) => {
                warn!(
                    target: "soroban::agent",
                    tool = name,
                    code = error.code.0,
                    "Tool call rejected by server"
                );
                Ok(ToolOutcome::Rejected(format!("Tool error: {}", error.message)))
            }
            Err(other) => Err(other).with_context(|| format!("tool call `{name}` failed")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn tool_outcome_text_is_uniform() {
        assert_eq!(ToolOutcome::Reply("5".into()).into_text(), "5");
        assert_eq!(
            ToolOutcome::Rejected("Tool error: division by zero".into()).into_text(),
            "Tool error: division by zero"
        );
    }

    #[test]
    fn tool_schemas_mirror_the_advertised_catalog() {
        let catalog = RemoteCatalog {
            tools: crate::tools::standard_catalog()
                .expect("standard catalog should build")
                .tools()
                .iter()
                .map(|spec| {
                    Tool::new(
                        spec.name.to_string(),
                        spec.description.to_string(),
                        std::sync::Arc::new(spec.input_schema()),
                    )
                })
                .collect(),
            resources: vec![],
            templates: vec![],
            prompts: vec![],
            greeting: String::new(),
        };

        let schemas = McpToolSession::tool_schemas(&catalog);
        assert_eq!(schemas.len(), 13);
        assert_eq!(schemas[0].name, "add");
        assert_eq!(schemas[0].description, "Add two numbers");
        assert_eq!(schemas[0].parameters["type"], json!("object"));
        assert_eq!(
            schemas[0].parameters["required"],
            json!(["a", "b"])
        );
    }
}
