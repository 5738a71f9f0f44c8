//! Preview command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::preview;
use crate::youtube::YtDlp;
use anyhow::Result;
use std::path::Path;

/// Run the preview command.
pub async fn run_preview(project_dir: &Path, force: bool, settings: &Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Preview, &settings.youtube.ytdlp_path) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytx doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let ytdlp = YtDlp::new(&settings.youtube);
    let template = settings.preview_template();

    let spinner = Output::spinner("Rendering preview...");
    let result = preview::run(
        &ytdlp,
        &settings.alignment,
        project_dir,
        &settings.youtube.caption_lang,
        template.as_deref(),
        force,
    )
    .await;
    spinner.finish_and_clear();

    let path = result?;
    Output::success(&format!("Preview page written to {}", path.display()));
    Ok(())
}
