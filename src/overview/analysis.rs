//! LLM summary and difficulty analysis.

use super::{DifficultyUpdate, Overview};
use crate::config::{LlmSettings, Prompts};
use crate::error::Result;
use crate::llm::{parse_json_object, ChatRequest, TextGenerator};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Shape of the model's JSON reply.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisReply {
    pub summary: Option<String>,
    pub difficulty: Option<DifficultyUpdate>,
}

/// Asks the model for a summary and a difficulty profile.
pub struct OverviewAnalyzer<'a> {
    generator: &'a dyn TextGenerator,
    prompts: &'a Prompts,
    settings: &'a LlmSettings,
}

impl<'a> OverviewAnalyzer<'a> {
    pub fn new(
        generator: &'a dyn TextGenerator,
        prompts: &'a Prompts,
        settings: &'a LlmSettings,
    ) -> Self {
        Self {
            generator,
            prompts,
            settings,
        }
    }

    fn build_request(&self, overview: &Overview, transcript: &str) -> ChatRequest {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), overview.title.clone());
        vars.insert("author".to_string(), overview.author.clone());
        vars.insert("duration".to_string(), overview.duration.clone());
        vars.insert("language".to_string(), overview.language.name.clone());
        vars.insert(
            "transcript".to_string(),
            truncate_transcript(transcript, self.settings.max_transcript_chars),
        );

        let system = self
            .prompts
            .render_with_custom(&self.prompts.overview.system, &vars);
        let user = self
            .prompts
            .render_with_custom(&self.prompts.overview.user, &vars);

        ChatRequest::new(&self.settings.model, user)
            .with_system(system)
            .with_temperature(self.settings.overview_temperature)
    }

    /// Analyze `transcript` and return `overview` with the results applied.
    pub async fn analyze(&self, overview: &Overview, transcript: &str) -> Result<Overview> {
        let request = self.build_request(overview, transcript);
        let response = self.generator.generate(&request).await?;
        let reply: AnalysisReply = parse_json_object(&response)?;

        debug!("Analysis reply: {:?}", reply);
        info!("LLM analysis complete");

        Ok(overview.with_analysis(reply.summary.as_deref(), reply.difficulty.as_ref()))
    }
}

/// Keep the first `max_chars` characters, marking a cut with `...`.
pub fn truncate_transcript(transcript: &str, max_chars: usize) -> String {
    if transcript.chars().count() <= max_chars {
        return transcript.to_string();
    }
    let mut cut: String = transcript.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
