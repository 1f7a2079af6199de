//! Registration table assembly and build-time validation.

use std::collections::HashSet;

use thiserror::Error;

use super::{
    registry::{Catalog, TemplateEntry},
    template::{TemplateError, UriTemplate},
    types::{PromptSpec, ResourceSpec, TemplateSpec, ToolSpec, ValueKind},
};

/// Violations detected while freezing a registration table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate tool name `{name}`")]
    DuplicateTool { name: String },
    #[error("duplicate resource uri `{uri}`")]
    DuplicateResource { uri: String },
    #[error("duplicate prompt name `{name}`")]
    DuplicatePrompt { name: String },
    #[error("tool `{name}` declares {declared} parameters but its handler takes {arity}")]
    ToolArityMismatch {
        name: String,
        declared: usize,
        arity: usize,
    },
    #[error("tool `{tool}` parameter `{param}` is not an integer; this table dispatches integer arguments only")]
    NonIntegerToolParam { tool: String, param: String },
    #[error("static resource uri `{uri}` contains placeholders")]
    StaticUriWithPlaceholders { uri: String },
    #[error("resource template `{uri}` has no placeholders")]
    TemplateWithoutPlaceholders { uri: String },
    #[error(
        "resource template `{uri}` declares parameters {declared:?} but its placeholders are {placeholders:?}"
    )]
    TemplateParamMismatch {
        uri: String,
        declared: Vec<String>,
        placeholders: Vec<String>,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Accumulates registrations, then validates and freezes them into a
/// [`Catalog`]. Enumeration order on the wire is registration order.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    tools: Vec<ToolSpec>,
    resources: Vec<ResourceSpec>,
    templates: Vec<TemplateSpec>,
    prompts: Vec<PromptSpec>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(mut self, spec: ToolSpec) -> Self {
        self.tools.push(spec);
        self
    }

    pub fn static_resource(mut self, spec: ResourceSpec) -> Self {
        self.resources.push(spec);
        self
    }

    pub fn template_resource(mut self, spec: TemplateSpec) -> Self {
        self.templates.push(spec);
        self
    }

    pub fn prompt(mut self, spec: PromptSpec) -> Self {
        self.prompts.push(spec);
        self
    }

    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut tool_names = HashSet::new();
        for tool in &self.tools {
            if !tool_names.insert(tool.name) {
                return Err(CatalogError::DuplicateTool {
                    name: tool.name.to_string(),
                });
            }
            if tool.params.len() != tool.handler.arity() {
                return Err(CatalogError::ToolArityMismatch {
                    name: tool.name.to_string(),
                    declared: tool.params.len(),
                    arity: tool.handler.arity(),
                });
            }
            if let Some(param) = tool
                .params
                .iter()
                .find(|param| param.kind != ValueKind::Integer)
            {
                return Err(CatalogError::NonIntegerToolParam {
                    tool: tool.name.to_string(),
                    param: param.name.to_string(),
                });
            }
        }

        let mut uris = HashSet::new();
        for resource in &self.resources {
            if resource.uri.contains('{') || resource.uri.contains('}') {
                return Err(CatalogError::StaticUriWithPlaceholders {
                    uri: resource.uri.to_string(),
                });
            }
            if !uris.insert(resource.uri) {
                return Err(CatalogError::DuplicateResource {
                    uri: resource.uri.to_string(),
                });
            }
        }

        let mut templates = Vec::with_capacity(self.templates.len());
        for spec in self.templates {
            let template = UriTemplate::parse(spec.uri)?;
            if !template.has_placeholders() {
                return Err(CatalogError::TemplateWithoutPlaceholders {
                    uri: spec.uri.to_string(),
                });
            }
            if !uris.insert(spec.uri) {
                return Err(CatalogError::DuplicateResource {
                    uri: spec.uri.to_string(),
                });
            }

            let mut placeholders: Vec<String> = template
                .placeholder_names()
                .iter()
                .map(|name| name.to_string())
                .collect();
            let mut declared: Vec<String> = spec
                .params
                .iter()
                .map(|param| param.name.to_string())
                .collect();
            placeholders.sort();
            declared.sort();
            if placeholders != declared {
                return Err(CatalogError::TemplateParamMismatch {
                    uri: spec.uri.to_string(),
                    declared,
                    placeholders,
                });
            }

            templates.push(TemplateEntry { spec, template });
        }

        let mut prompt_names = HashSet::new();
        for prompt in &self.prompts {
            if !prompt_names.insert(prompt.name) {
                return Err(CatalogError::DuplicatePrompt {
                    name: prompt.name.to_string(),
                });
            }
        }

        Ok(Catalog::assemble(
            self.tools,
            self.resources,
            templates,
            self.prompts,
        ))
    }
}
