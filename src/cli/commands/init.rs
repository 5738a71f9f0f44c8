//! Init command - create a project directory for a video.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::YtxError;
use crate::project;
use crate::youtube::YtDlp;
use anyhow::Result;
use console::style;

/// Run the init command.
pub async fn run_init(
    url: &str,
    prefix: Option<&str>,
    force: bool,
    settings: &Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Init, &settings.youtube.ytdlp_path) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ytx doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let videos_dir = match prefix {
        Some(p) => Settings::expand_path(p),
        None => settings.videos_dir(),
    };
    let ytdlp = YtDlp::new(&settings.youtube);

    let spinner = Output::spinner("Fetching video metadata...");
    let result = project::init(&ytdlp, url, &videos_dir, force).await;
    spinner.finish_and_clear();

    match result {
        Ok((project_dir, project)) => {
            Output::success(&format!("Project initialized at {}", project_dir.display()));
            Output::kv("Title", &project.title);
            Output::kv("Detected language", &project.lang);
            println!();
            println!(
                "Next: run {} to analyze and display video info.",
                style(format!("ytx -C {} overview", project_dir.display())).green()
            );
            Ok(())
        }
        Err(YtxError::ProjectExists(path)) => {
            Output::warning(&format!("Project already initialized at {}", path));
            Output::info("Use --force to replace it.");
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e.into())
        }
    }
}
