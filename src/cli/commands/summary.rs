//! Summary command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::llm::OpenAiGenerator;
use crate::summary::{self, Summarizer};
use crate::youtube::YtDlp;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Run the summary command.
pub async fn run_summary(project_dir: &Path, force: bool, settings: &Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Analyze, &settings.youtube.ytdlp_path) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytx doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let generator = OpenAiGenerator::new(Duration::from_secs(settings.llm.timeout_secs))?;
    let summarizer = Summarizer::new(&generator, &prompts, &settings.llm);
    let ytdlp = YtDlp::new(&settings.youtube);

    let spinner = Output::spinner("Summarizing captions...");
    let result = summary::run(
        &ytdlp,
        &summarizer,
        project_dir,
        &settings.youtube.caption_lang,
        force,
    )
    .await;
    spinner.finish_and_clear();

    Output::header("Chapters");
    println!("{}", result?);
    Ok(())
}
