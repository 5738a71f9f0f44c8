//! LLM access for ytx.
//!
//! Overview and summary generation talk to the model through the
//! [`TextGenerator`] trait so the workflows can run against a scripted
//! generator in tests.

mod openai;

pub use openai::OpenAiGenerator;

use crate::error::{Result, YtxError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// A single-turn chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub system: Option<String>,
    pub prompt: String,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            prompt: prompt.into(),
            temperature: 0.3,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        let system = system.into();
        self.system = if system.trim().is_empty() {
            None
        } else {
            Some(system)
        };
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for text generation services.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send the request and return the model's raw text reply.
    async fn generate(&self, request: &ChatRequest) -> Result<String>;
}

/// Extract and deserialize the outermost JSON object in an LLM reply.
///
/// Models often wrap JSON in prose or code fences; everything outside the
/// first `{` and the last `}` is ignored.
pub fn parse_json_object<T: DeserializeOwned>(response: &str) -> Result<T> {
    let json_start = response.find('{');
    let json_end = response.rfind('}');

    let json_str = match (json_start, json_end) {
        (Some(start), Some(end)) if end > start => &response[start..=end],
        _ => response,
    };

    serde_json::from_str(json_str).map_err(|_| {
        let preview: String = response.chars().take(200).collect();
        YtxError::Llm(format!("Invalid JSON output: {}...", preview))
    })
}
