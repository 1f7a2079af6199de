//! Manual `ServerHandler` implementation answering catalog requests.
//!
//! Every handler method delegates to the immutable [`Catalog`]; this module
//! only translates between catalog types and rmcp wire types and maps
//! catalog failures onto the JSON-RPC error codes.

use std::sync::Arc;

use rmcp::{
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, Content, ErrorData,
        GetPromptRequestParam,
        GetPromptResult, ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult,
        ListToolsResult, PaginatedRequestParam, Prompt, PromptArgument, PromptMessage,
        PromptMessageRole,
        RawResource, ReadResourceRequestParam, ReadResourceResult, Resource, ResourceContents,
        ResourceTemplate, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    catalog::registry::{CallError, Catalog, PromptError, ReadError},
    lib::errors::{
        prompt_arguments_error, prompt_not_found_error, resource_not_found_error,
        tool_arguments_error, tool_compute_error, tool_not_found_error,
    },
};

/// Read-only MCP server over a frozen catalog.
#[derive(Clone)]
pub struct CatalogServer {
    catalog: Arc<Catalog>,
    instructions: Arc<String>,
}

impl CatalogServer {
    pub fn new(catalog: Arc<Catalog>, instructions: String) -> Self {
        Self {
            catalog,
            instructions: Arc::new(instructions),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

fn wire_tools(catalog: &Catalog) -> Vec<Tool> {
    catalog
        .tools()
        .iter()
        .map(|spec| Tool::new(spec.name, spec.description, spec.input_schema()))
        .collect()
}

fn wire_resources(catalog: &Catalog) -> Vec<Resource> {
    catalog
        .resources()
        .iter()
        .map(|spec| {
            let mut raw = RawResource::new(spec.uri, spec.name);
            raw.description = Some(spec.description.to_string());
            raw.mime_type = Some(spec.mime_type.to_string());
            raw.no_annotation()
        })
        .collect()
}

fn wire_templates(catalog: &Catalog) -> Result<Vec<ResourceTemplate>, ErrorData> {
    catalog
        .templates()
        .iter()
        .map(|entry| {
            serde_json::from_value(json!({
                "uriTemplate": entry.spec.uri,
                "name": entry.spec.name,
                "description": entry.spec.description,
                "mimeType": entry.spec.mime_type,
            }))
            .map_err(|err| {
                ErrorData::internal_error(
                    format!("failed to encode resource template `{}`: {err}", entry.spec.uri),
                    None,
                )
            })
        })
        .collect()
}

fn wire_prompts(catalog: &Catalog) -> Vec<Prompt> {
    catalog
        .prompts()
        .iter()
        .map(|spec| {
            // The argument JSON is fixed-shape; decoding it cannot fail.
            let arguments: Vec<PromptArgument> = spec
                .params
                .iter()
                .filter_map(|param| {
                    serde_json::from_value(json!({
                        "name": param.name,
                        "description": param.description,
                        "required": true,
                    }))
                    .ok()
                })
                .collect();
            let arguments = (!arguments.is_empty()).then_some(arguments);
            Prompt::new(spec.name, Some(spec.description), arguments)
        })
        .collect()
}

impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: wire_tools(&self.catalog),
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = request.name.as_ref();
        let output = self
            .catalog
            .call_tool(name, request.arguments.as_ref())
            .map_err(|err| {
                warn!(
                    target: "soroban::server",
                    tool = name,
                    reason = %err,
                    "Tool call failed"
                );
                match &err {
                    CallError::UnknownTool { name } => tool_not_found_error(name),
                    CallError::Arguments(source) => tool_arguments_error(name, source),
                    CallError::Compute(source) => tool_compute_error(name, source),
                    CallError::Dispatch { name } => ErrorData::internal_error(
                        format!("Tool `{name}` dispatch table is inconsistent"),
                        None,
                    ),
                }
            })?;

        debug!(
            target: "soroban::server",
            tool = name,
            result = %output.text,
            "Tool call succeeded"
        );
        let mut result = CallToolResult::success(vec![Content::text(output.text.clone())]);
        result.structured_content = Some(output.structured);
        Ok(result)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            next_cursor: None,
            resources: wire_resources(&self.catalog),
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, ErrorData> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: wire_templates(&self.catalog)?,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let payload = self.catalog.read_resource(&request.uri).map_err(|err| {
            warn!(
                target: "soroban::server",
                uri = %request.uri,
                reason = %err,
                "Resource read failed"
            );
            match err {
                ReadError::NotFound { uri } => resource_not_found_error(&uri),
            }
        })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(payload.text, payload.uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: wire_prompts(&self.catalog),
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        let rendered = self
            .catalog
            .render_prompt(&request.name, request.arguments.as_ref())
            .map_err(|err| {
                warn!(
                    target: "soroban::server",
                    prompt = %request.name,
                    reason = %err,
                    "Prompt render failed"
                );
                match &err {
                    PromptError::UnknownPrompt { name } => prompt_not_found_error(name),
                    PromptError::Arguments(source) => prompt_arguments_error(&request.name, source),
                }
            })?;

        Ok(GetPromptResult {
            description: Some(rendered.description),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                rendered.text,
            )],
        })
    }
}
