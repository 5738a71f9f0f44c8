//! Overview command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::llm::OpenAiGenerator;
use crate::overview::{self, OverviewAnalyzer};
use crate::youtube::YtDlp;
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Run the overview command.
pub async fn run_overview(
    project_dir: &Path,
    force: bool,
    table: bool,
    settings: &Settings,
) -> Result<()> {
    let cached = !force && overview::overview_path(project_dir).exists();
    if !cached {
        if let Err(e) = preflight::check(Operation::Analyze, &settings.youtube.ytdlp_path) {
            Output::error(&format!("{}", e));
            Output::info("Run 'ytx doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    }

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let generator = OpenAiGenerator::new(Duration::from_secs(settings.llm.timeout_secs))?;
    let analyzer = OverviewAnalyzer::new(&generator, &prompts, &settings.llm);
    let ytdlp = YtDlp::new(&settings.youtube);

    let spinner = Output::spinner("Analyzing video...");
    let result = overview::run(
        &ytdlp,
        &analyzer,
        project_dir,
        &settings.youtube.caption_lang,
        force,
    )
    .await;
    spinner.finish_and_clear();
    let overview = result?;

    if table {
        Output::header("Video Overview");
        Output::table(&overview.table_rows());
    } else {
        println!("{}", overview.to_pretty_text());
    }

    Ok(())
}
