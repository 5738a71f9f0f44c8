//! Video overview: metadata card plus LLM summary and difficulty profile.

mod analysis;
mod model;

pub use analysis::{truncate_transcript, AnalysisReply, OverviewAnalyzer};
pub use model::{
    format_date, format_number, group_thousands, normalize_upload_date, Difficulty,
    DifficultyUpdate, Language, Overview, NOT_AVAILABLE,
};

use crate::error::Result;
use crate::project::load_with_metadata;
use crate::sentences::{read_sentences, sentences_from_srt, transcript_text};
use crate::youtube::{fetch_captions, CaptionFormat, YtDlp};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// File name of the saved overview.
pub const OVERVIEW_FILE: &str = "overview.json";

pub fn overview_path(project_dir: &Path) -> PathBuf {
    project_dir.join(OVERVIEW_FILE)
}

/// Load a previously saved overview, if any.
pub fn load_saved(project_dir: &Path) -> Result<Option<Overview>> {
    let path = overview_path(project_dir);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn save(project_dir: &Path, overview: &Overview) -> Result<()> {
    let content = serde_json::to_string_pretty(overview)?;
    std::fs::write(overview_path(project_dir), content)?;
    info!("Saved overview to {}", overview_path(project_dir).display());
    Ok(())
}

/// Build (or reuse) the overview of a project.
///
/// A saved `overview.json` is returned as-is unless `force` is set.
/// Otherwise the metadata card is built, captions are fetched and turned
/// into sentences, and the model fills in summary and difficulty. A failed
/// analysis keeps the metadata-only card.
#[instrument(skip(ytdlp, analyzer))]
pub async fn run(
    ytdlp: &YtDlp,
    analyzer: &OverviewAnalyzer<'_>,
    project_dir: &Path,
    caption_lang: &str,
    force: bool,
) -> Result<Overview> {
    if !force {
        if let Some(saved) = load_saved(project_dir)? {
            info!("Using saved overview");
            return Ok(saved);
        }
    }

    let (project, metadata) = load_with_metadata(project_dir)?;
    let mut overview = Overview::from_metadata(&project, &metadata);

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

    if transcript.is_empty() {
        warn!("No caption text found, skipping analysis");
    } else {
        match analyzer.analyze(&overview, &transcript).await {
            Ok(analyzed) => overview = analyzed,
            Err(e) => warn!("LLM analysis failed: {}", e),
        }
    }

    save(project_dir, &overview)?;
    Ok(overview)
}
