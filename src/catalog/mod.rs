//! Immutable tool/resource/prompt catalog built from an explicit registration table.
pub mod builder;
pub mod registry;
pub mod template;
pub mod types;

pub use builder::{CatalogBuilder, CatalogError};
pub use registry::{
    CallError, Catalog, PromptError, ReadError, RenderedPrompt, ResourcePayload, TemplateEntry,
    ToolOutput,
};
pub use template::{TemplateError, UriTemplate};
pub use types::{
    Num, ParamSpec, PromptSpec, ResourceSpec, ReturnKind, TemplateSpec, TemplateValues, ToolFn,
    ToolSpec, ValueKind,
};
