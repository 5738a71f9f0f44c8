//! Error types for ytx.

use thiserror::Error;

/// Library-level error type for ytx operations.
#[derive(Error, Debug)]
pub enum YtxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Project already initialized at {0}")]
    ProjectExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video {0} has no available captions")]
    NoCaptions(String),

    #[error("403 Forbidden: YouTube access was denied")]
    Forbidden,

    #[error("Media source error: {0}")]
    VideoSource(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for ytx operations.
pub type Result<T> = std::result::Result<T, YtxError>;
