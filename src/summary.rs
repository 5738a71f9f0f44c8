//! Chapter summary of a video's captions.

use crate::config::{LlmSettings, Prompts};
use crate::error::Result;
use crate::llm::{ChatRequest, TextGenerator};
use crate::project::load_with_metadata;
use crate::sentences::{read_sentences, sentences_from_srt, transcript_text};
use crate::youtube::{fetch_captions, CaptionFormat, YtDlp};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Reply used when the captions contain no usable text.
pub const NO_CONTENT: &str = "No valid content found.";

/// Writes chapter summaries with an LLM.
pub struct Summarizer<'a> {
    generator: &'a dyn TextGenerator,
    prompts: &'a Prompts,
    settings: &'a LlmSettings,
}

impl<'a> Summarizer<'a> {
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

    /// Summarize plain transcript text; returns the model's raw reply.
    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        if transcript.trim().is_empty() {
            warn!("No caption text found");
            return Ok(NO_CONTENT.to_string());
        }

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.summary.user, &vars);
        let system = self
            .prompts
            .render_with_custom(&self.prompts.summary.system, &vars);

        let request = ChatRequest::new(&self.settings.model, prompt)
            .with_system(system)
            .with_temperature(self.settings.summary_temperature);

        info!("Generating chapter summary");
        let reply = self.generator.generate(&request).await?;
        Ok(reply.trim().to_string())
    }
}

/// Fetch captions for a project and summarize them.
#[instrument(skip(ytdlp, summarizer))]
pub async fn run(
    ytdlp: &YtDlp,
    summarizer: &Summarizer<'_>,
    project_dir: &Path,
    caption_lang: &str,
    force: bool,
) -> Result<String> {
    let (_, metadata) = load_with_metadata(project_dir)?;
    let captions = fetch_captions(
        ytdlp,
        project_dir,
        &metadata,
        caption_lang,
        CaptionFormat::Srt,
        force,
    )
    .await?;

    let sentence_file = sentences_from_srt(&captions)?;
    let transcript = transcript_text(&read_sentences(&sentence_file)?);
    summarizer.summarize(&transcript).await
}
