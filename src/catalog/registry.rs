//! The frozen catalog and its query/invocation operations.
//!
//! A [`Catalog`] is constructed once at startup and shared read-only by every
//! request handler; nothing here mutates after [`CatalogBuilder::build`].
//!
//! [`CatalogBuilder::build`]: super::builder::CatalogBuilder::build

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::lib::errors::{ArgumentError, ComputeError};

use super::{
    template::UriTemplate,
    types::{Num, ParamSpec, PromptSpec, ResourceSpec, TemplateSpec, TemplateValues, ToolFn, ToolSpec},
};

/// A template registration paired with its parsed matcher.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    pub spec: TemplateSpec,
    pub template: UriTemplate,
}

/// Immutable catalog of tools, resources, and prompts.
#[derive(Debug)]
pub struct Catalog {
    tools: Vec<ToolSpec>,
    resources: Vec<ResourceSpec>,
    templates: Vec<TemplateEntry>,
    prompts: Vec<PromptSpec>,
}

/// Failure modes of [`Catalog::call_tool`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CallError {
    #[error("unknown tool `{name}`")]
    UnknownTool { name: String },
    #[error(transparent)]
    Arguments(#[from] ArgumentError),
    #[error(transparent)]
    Compute(#[from] ComputeError),
    #[error("tool `{name}` handler arity does not match its parameter list")]
    Dispatch { name: String },
}

/// Failure modes of [`Catalog::read_resource`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("no resource matches uri `{uri}`")]
    NotFound { uri: String },
}

/// Failure modes of [`Catalog::render_prompt`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromptError {
    #[error("unknown prompt `{name}`")]
    UnknownPrompt { name: String },
    #[error(transparent)]
    Arguments(#[from] ArgumentError),
}

/// Result of one tool invocation, coerced to the declared return kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub value: Num,
    pub structured: Value,
    pub text: String,
}

/// Resolved payload of one resource read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePayload {
    pub uri: String,
    pub mime_type: Option<String>,
    pub text: String,
}

/// Rendered prompt text plus its catalog description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub description: String,
    pub text: String,
}

impl Catalog {
    pub(super) fn assemble(
        tools: Vec<ToolSpec>,
        resources: Vec<ResourceSpec>,
        templates: Vec<TemplateEntry>,
        prompts: Vec<PromptSpec>,
    ) -> Self {
        Self {
            tools,
            resources,
            templates,
            prompts,
        }
    }

    /// All tools, in registration order.
    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    /// Static resources, in registration order.
    pub fn resources(&self) -> &[ResourceSpec] {
        &self.resources
    }

    /// Templated resources, in registration order.
    pub fn templates(&self) -> &[TemplateEntry] {
        &self.templates
    }

    /// Prompts, in registration order.
    pub fn prompts(&self) -> &[PromptSpec] {
        &self.prompts
    }

    pub fn find_tool(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn find_prompt(&self, name: &str) -> Option<&PromptSpec> {
        self.prompts.iter().find(|prompt| prompt.name == name)
    }

    /// Look up a tool, validate arguments against its parameter list, run the
    /// computation, and coerce the result to the declared return kind.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<ToolOutput, CallError> {
        let tool = self
            .find_tool(name)
            .ok_or_else(|| CallError::UnknownTool { name: name.to_string() })?;

        let decoded = decode_integer_args(&tool.params, arguments)?;
        let raw = match (tool.handler, decoded.as_slice()) {
            (ToolFn::Unary(compute), [a]) => compute(*a)?,
            (ToolFn::Binary(compute), [a, b]) => compute(*a, *b)?,
            // Unreachable once the builder has checked arity.
            _ => return Err(CallError::Dispatch { name: name.to_string() }),
        };

        let value = raw.into_return(tool.returns);
        let structured = json!({ "result": value.to_json() });
        let text = serde_json::to_string(&value.to_json()).unwrap_or_default();
        Ok(ToolOutput {
            value,
            structured,
            text,
        })
    }

    /// Resolve a concrete URI: exact static match first, then templates in
    /// registration order.
    pub fn read_resource(&self, uri: &str) -> Result<ResourcePayload, ReadError> {
        if let Some(resource) = self.resources.iter().find(|entry| entry.uri == uri) {
            return Ok(ResourcePayload {
                uri: uri.to_string(),
                mime_type: Some(resource.mime_type.to_string()),
                text: resource.text.to_string(),
            });
        }

        for entry in &self.templates {
            if let Some(values) = entry.template.extract(uri) {
                let text = (entry.spec.render)(&values);
                return Ok(ResourcePayload {
                    uri: uri.to_string(),
                    mime_type: Some(entry.spec.mime_type.to_string()),
                    text,
                });
            }
        }

        Err(ReadError::NotFound {
            uri: uri.to_string(),
        })
    }

    /// Render a prompt template verbatim with the supplied arguments.
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<RenderedPrompt, PromptError> {
        let prompt = self
            .find_prompt(name)
            .ok_or_else(|| PromptError::UnknownPrompt { name: name.to_string() })?;

        let values = decode_text_args(&prompt.params, arguments)?;
        Ok(RenderedPrompt {
            description: prompt.description.to_string(),
            text: (prompt.render)(&values),
        })
    }
}

/// Decode named arguments into positional integers, in parameter order.
///
/// JSON floats with a zero fractional part truncate to integers; everything
/// else that is not an integer is rejected.
fn decode_integer_args(
    params: &[ParamSpec],
    arguments: Option<&Map<String, Value>>,
) -> Result<Vec<i64>, ArgumentError> {
    let empty = Map::new();
    let arguments = arguments.unwrap_or(&empty);

    for key in arguments.keys() {
        if !params.iter().any(|param| param.name == key) {
            return Err(ArgumentError::Unexpected { name: key.clone() });
        }
    }

    let mut decoded = Vec::with_capacity(params.len());
    for param in params {
        let value = arguments
            .get(param.name)
            .ok_or_else(|| ArgumentError::Missing {
                name: param.name.to_string(),
            })?;
        decoded.push(integer_value(param.name, value)?);
    }
    Ok(decoded)
}

fn integer_value(name: &str, value: &Value) -> Result<i64, ArgumentError> {
    if let Some(int) = value.as_i64() {
        return Ok(int);
    }
    if value.is_u64() {
        return Err(ArgumentError::OutOfRange {
            name: name.to_string(),
        });
    }
    if let Some(float) = value.as_f64() {
        if float.fract() != 0.0 {
            return Err(ArgumentError::NotInteger {
                name: name.to_string(),
            });
        }
        if float < i64::MIN as f64 || float > i64::MAX as f64 {
            return Err(ArgumentError::OutOfRange {
                name: name.to_string(),
            });
        }
        return Ok(float as i64);
    }
    Err(ArgumentError::WrongType {
        name: name.to_string(),
        expected: "integer",
    })
}

/// Decode named arguments into a string map, in parameter order.
fn decode_text_args(
    params: &[ParamSpec],
    arguments: Option<&Map<String, Value>>,
) -> Result<TemplateValues, ArgumentError> {
    let empty = Map::new();
    let arguments = arguments.unwrap_or(&empty);

    for key in arguments.keys() {
        if !params.iter().any(|param| param.name == key) {
            return Err(ArgumentError::Unexpected { name: key.clone() });
        }
    }

    let mut values = TemplateValues::new();
    for param in params {
        let value = arguments
            .get(param.name)
            .ok_or_else(|| ArgumentError::Missing {
                name: param.name.to_string(),
            })?;
        let text = value.as_str().ok_or_else(|| ArgumentError::WrongType {
            name: param.name.to_string(),
            expected: "string",
        })?;
        values.insert(param.name.to_string(), text.to_string());
    }
    Ok(values)
}
