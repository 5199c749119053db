//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in the commands and main.rs.

use thiserror::Error;

/// Errors raised while loading or validating the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Missing config field `{0}`")]
    MissingField(&'static str),
}

/// Errors raised by a record source (billing API)
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Cost request failed for account {account}: {message}")]
    RequestFailed { account: String, message: String },

    #[error("Invalid cost request: {0}")]
    InvalidRequest(String),

    #[error("Invalid cost response: {0}")]
    InvalidResponse(String),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Errors raised while parsing amounts or replay lines
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Invalid line format at line {line_number}: {line}")]
    InvalidLine { line_number: usize, line: String },

    #[error("Failed to parse amount `{value}`: {reason}")]
    InvalidAmount { value: String, reason: String },
}

/// Errors raised while rendering or writing output files
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize chart data: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors raised by the LLM summarizer
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("LLM API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}
