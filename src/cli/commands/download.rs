//! Download command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::download::{self, StepOutcome};
use crate::youtube::YtDlp;
use anyhow::Result;
use std::path::Path;

/// Run the download command.
pub async fn run_download(project_dir: &Path, force: bool, settings: &Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Download, &settings.youtube.ytdlp_path) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytx doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let ytdlp = YtDlp::new(&settings.youtube);

    let spinner = Output::spinner("Downloading video and captions...");
    let report = download::run(&ytdlp, &settings.youtube, project_dir, force).await;
    spinner.finish_and_clear();
    let report = report?;

    Output::header("Download");
    for (name, outcome) in report.steps() {
        match outcome {
            StepOutcome::Downloaded(path) => {
                Output::success(&format!("{}: saved {}", name, path.display()))
            }
            StepOutcome::Cached(path) => {
                Output::info(&format!("{}: already present {}", name, path.display()))
            }
            StepOutcome::Failed(reason) => Output::warning(&format!("{}: {}", name, reason)),
        }
    }

    if report.failures() > 0 {
        Output::warning(&format!(
            "{} step(s) failed. Re-run with -v for details.",
            report.failures()
        ));
    }

    Ok(())
}
