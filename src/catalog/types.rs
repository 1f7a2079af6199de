//! Descriptor types for the catalog registration table.
//!
//! Every entity the server exposes is declared as a plain struct bundling its
//! wire metadata with the function that implements it. The table is populated
//! by ordinary function calls at startup and frozen by [`CatalogBuilder`].
//!
//! [`CatalogBuilder`]: super::builder::CatalogBuilder

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::lib::errors::ComputeError;

/// Primitive kinds a declared parameter can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
}

impl ValueKind {
    /// JSON Schema type keyword for this kind.
    pub const fn json_type(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "number",
            ValueKind::Text => "string",
        }
    }
}

/// One named, typed parameter of a tool, resource template, or prompt.
///
/// Every parameter in this catalog is required; optionality is not part of
/// the contract.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub kind: ValueKind,
}

impl ParamSpec {
    pub const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            description: None,
            kind,
        }
    }

    pub const fn described(name: &'static str, kind: ValueKind, description: &'static str) -> Self {
        Self {
            name,
            description: Some(description),
            kind,
        }
    }
}

/// Declared return kind of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Integer,
    Float,
}

/// A numeric tool result before coercion to the declared return kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    /// Coerce to the declared return kind. Floats convert to integers by
    /// truncation toward zero; out-of-range values saturate.
    pub fn into_return(self, kind: ReturnKind) -> Num {
        match (kind, self) {
            (ReturnKind::Integer, Num::Float(value)) => Num::Int(value.trunc() as i64),
            (ReturnKind::Float, Num::Int(value)) => Num::Float(value as f64),
            (_, value) => value,
        }
    }

    pub fn to_json(self) -> Value {
        match self {
            Num::Int(value) => json!(value),
            Num::Float(value) => json!(value),
        }
    }
}

/// The computation behind a tool, keyed by arity.
///
/// All tool parameters in this catalog are integers; the dispatcher decodes
/// arguments positionally in declaration order.
#[derive(Debug, Clone, Copy)]
pub enum ToolFn {
    Unary(fn(i64) -> Result<Num, ComputeError>),
    Binary(fn(i64, i64) -> Result<Num, ComputeError>),
}

impl ToolFn {
    pub const fn arity(&self) -> usize {
        match self {
            ToolFn::Unary(_) => 1,
            ToolFn::Binary(_) => 2,
        }
    }
}

/// Registration record for one tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub returns: ReturnKind,
    pub handler: ToolFn,
}

impl ToolSpec {
    /// Build the JSON Schema object advertised for this tool's input.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for param in &self.params {
            let mut property = Map::new();
            property.insert("type".into(), param.kind.json_type().into());
            if let Some(description) = param.description {
                property.insert("description".into(), description.into());
            }
            properties.insert(param.name.to_string(), Value::Object(property));
        }

        let required: Vec<Value> = self
            .params
            .iter()
            .map(|param| Value::String(param.name.to_string()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), "object".into());
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), Value::Array(required));
        schema
    }
}

/// Registration record for one static resource with a fixed payload.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub text: &'static str,
}

/// Placeholder values extracted from a concrete URI, keyed by placeholder name.
pub type TemplateValues = BTreeMap<String, String>;

/// Registration record for one templated resource.
///
/// `uri` is a URI template; the declared `params` must name its placeholders
/// exactly. The render function receives the values bound at read time.
#[derive(Debug, Clone)]
pub struct TemplateSpec {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub params: Vec<ParamSpec>,
    pub render: fn(&TemplateValues) -> String,
}

/// Registration record for one prompt template.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub render: fn(&TemplateValues) -> String,
}
