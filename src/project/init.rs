//! Project initialization.

use super::{metadata_file_name, Project};
use crate::error::{Result, YtxError};
use crate::youtube::{canonical_url, extract_video_id, VideoMetadata, YtDlp};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Create `<videos_dir>/<video_id>/` for a YouTube URL or video ID.
///
/// Fetches the metadata, checks that the video has an original-language
/// auto caption track, and writes `<id>.meta.json` plus `project.json`.
/// Nothing is left on disk when a step fails.
#[instrument(skip(ytdlp))]
pub async fn init(
    ytdlp: &YtDlp,
    input: &str,
    videos_dir: &Path,
    force: bool,
) -> Result<(PathBuf, Project)> {
    let video_id = extract_video_id(input).ok_or_else(|| {
        YtxError::InvalidInput(format!("Could not extract video ID from: {}", input))
    })?;
    let project_dir = prepare_project_dir(videos_dir, &video_id, force)?;

    let input = input.trim();
    let url = if input.starts_with("http") {
        input.to_string()
    } else {
        canonical_url(&video_id)
    };

    let raw = match ytdlp.fetch_metadata(&url).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Metadata fetch failed for {}: {}", video_id, e);
            remove_dir_if_exists(&project_dir)?;
            return Err(e);
        }
    };

    let project = write_project(&project_dir, &video_id, &url, &raw)?;
    Ok((project_dir, project))
}

/// Resolve the project directory, clearing an existing one when `force` is set.
pub fn prepare_project_dir(videos_dir: &Path, video_id: &str, force: bool) -> Result<PathBuf> {
    let project_dir = videos_dir.join(video_id);
    if project_dir.exists() {
        if !force {
            return Err(YtxError::ProjectExists(project_dir.display().to_string()));
        }
        std::fs::remove_dir_all(&project_dir)?;
        info!("Removed existing project at {}", project_dir.display());
    }
    Ok(project_dir)
}

/// Write the metadata file and `project.json` from fetched metadata.
pub fn write_project(
    project_dir: &Path,
    video_id: &str,
    url: &str,
    raw_metadata: &serde_json::Value,
) -> Result<Project> {
    let metadata = VideoMetadata::from_json(raw_metadata)?;

    let Some(lang) = metadata.original_asr_language() else {
        warn!("No *-orig caption language detected for {}", video_id);
        remove_dir_if_exists(project_dir)?;
        return Err(YtxError::NoCaptions(video_id.to_string()));
    };

    std::fs::create_dir_all(project_dir)?;
    std::fs::write(
        project_dir.join(metadata_file_name(video_id)),
        serde_json::to_string_pretty(raw_metadata)?,
    )?;

    let project = Project::new(video_id, &metadata.title, url, &lang);
    project.save(project_dir)?;

    info!("Project initialized at {} (lang {})", project_dir.display(), lang);
    Ok(project)
}

fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    Ok(())
}
