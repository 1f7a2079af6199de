use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use rmcp::model::{ErrorCode, ErrorData};
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Required field is missing.
    #[error("Configuration file {path} is missing `{field}`")]
    MissingField { path: PathBuf, field: &'static str },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised by the arithmetic computations behind the tool catalog.
///
/// These reproduce the unguarded reference behavior: division by zero and
/// domain violations are not prevented up front, they surface as internal
/// errors on the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("math domain error in `{operation}`")]
    Domain { operation: &'static str },
    #[error("integer overflow in `{operation}`")]
    Overflow { operation: &'static str },
}

/// Failures raised while decoding caller-supplied arguments against a
/// declared parameter list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("missing required argument `{name}`")]
    Missing { name: String },
    #[error("unexpected argument `{name}`")]
    Unexpected { name: String },
    #[error("argument `{name}` must be of type {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
    },
    #[error("argument `{name}` must be a whole number")]
    NotInteger { name: String },
    #[error("argument `{name}` is out of range for a 64-bit integer")]
    OutOfRange { name: String },
}

/// Failures raised by the agent's model provider and reasoning loop.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("failed to send request to the model API: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("model API error ({status}): {message}")]
    Api { status: String, message: String },
    #[error("failed to parse model response: {source}")]
    Parse {
        #[source]
        source: reqwest::Error,
    },
    #[error("model returned no choices")]
    EmptyReply,
    #[error("reasoning did not settle on a final reply within {rounds} rounds")]
    RoundBudgetExhausted { rounds: usize },
}

/// Wire error for a tool name absent from the catalog (JSON-RPC -32601).
pub fn tool_not_found_error(name: &str) -> ErrorData {
    ErrorData::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool `{name}` is not registered"),
        Some(json!({ "tool": name })),
    )
}

/// Wire error for arguments rejected by a tool's parameter list (-32602).
pub fn tool_arguments_error(name: &str, source: &ArgumentError) -> ErrorData {
    ErrorData::invalid_params(
        format!("Invalid arguments for tool `{name}`: {source}"),
        Some(json!({ "tool": name })),
    )
}

/// Wire error for a computation that failed after dispatch (-32603).
pub fn tool_compute_error(name: &str, source: &ComputeError) -> ErrorData {
    ErrorData::internal_error(
        format!("Tool `{name}` failed: {source}"),
        Some(json!({ "tool": name })),
    )
}

/// Wire error for a URI matching no static resource and no template (-32002).
pub fn resource_not_found_error(uri: &str) -> ErrorData {
    ErrorData::resource_not_found(
        format!("Resource `{uri}` is not registered"),
        Some(json!({ "uri": uri })),
    )
}

/// Wire error for a prompt name absent from the catalog (-32602).
pub fn prompt_not_found_error(name: &str) -> ErrorData {
    ErrorData::invalid_params(
        format!("Prompt `{name}` is not registered"),
        Some(json!({ "prompt": name })),
    )
}

/// Wire error for arguments rejected by a prompt's parameter list (-32602).
pub fn prompt_arguments_error(name: &str, source: &ArgumentError) -> ErrorData {
    ErrorData::invalid_params(
        format!("Invalid arguments for prompt `{name}`: {source}"),
        Some(json!({ "prompt": name })),
    )
}
