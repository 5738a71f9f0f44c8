//! Video and caption downloads for an initialized project.

use crate::captions::merge_srt_files;
use crate::config::YoutubeSettings;
use crate::error::{Result, YtxError};
use crate::project::Project;
use crate::youtube::{caption_path, CaptionFormat, YtDlp};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// What happened to one download step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Downloaded(PathBuf),
    Cached(PathBuf),
    Failed(String),
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        !matches!(self, StepOutcome::Failed(_))
    }
}

/// Result of every step of a download run.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub video: StepOutcome,
    pub original_captions: StepOutcome,
    pub translated_captions: StepOutcome,
    pub merged_captions: StepOutcome,
}

impl DownloadReport {
    pub fn steps(&self) -> [(&'static str, &StepOutcome); 4] {
        [
            ("video", &self.video),
            ("original captions", &self.original_captions),
            ("translated captions", &self.translated_captions),
            ("bilingual captions", &self.merged_captions),
        ]
    }

    pub fn failures(&self) -> usize {
        self.steps().iter().filter(|(_, s)| !s.is_ok()).count()
    }
}

/// Download the video, both caption tracks, and merge them.
///
/// Each step runs even if an earlier one failed; failures are logged and
/// reported rather than returned. Only a missing `project.json` is an error.
#[instrument(skip(ytdlp, settings))]
pub async fn run(
    ytdlp: &YtDlp,
    settings: &YoutubeSettings,
    project_dir: &Path,
    force: bool,
) -> Result<DownloadReport> {
    let project = Project::load(project_dir)?;

    let video = outcome(download_video(ytdlp, &project, project_dir, force).await, "video");
    let original_captions = outcome(
        download_track(
            ytdlp,
            &project,
            project_dir,
            &settings.orig_langs,
            &project.original_captions_path(project_dir),
            force,
        )
        .await,
        "original captions",
    );
    let translated_captions = outcome(
        download_track(
            ytdlp,
            &project,
            project_dir,
            &settings.translation_langs,
            &project.translated_captions_path(project_dir),
            force,
        )
        .await,
        "translated captions",
    );
    let merged_captions = outcome(merge_tracks(&project, project_dir, force), "bilingual captions");

    Ok(DownloadReport {
        video,
        original_captions,
        translated_captions,
        merged_captions,
    })
}

fn outcome(result: Result<StepOutcome>, step: &str) -> StepOutcome {
    result.unwrap_or_else(|e| {
        warn!("Downloading {} failed: {}", step, e);
        StepOutcome::Failed(e.to_string())
    })
}

async fn download_video(
    ytdlp: &YtDlp,
    project: &Project,
    project_dir: &Path,
    force: bool,
) -> Result<StepOutcome> {
    let target = project.video_path(project_dir);
    if target.exists() && !force {
        info!("Video already exists, skipping: {}", target.display());
        return Ok(StepOutcome::Cached(target));
    }

    ytdlp.download_video(&project.url, &target).await?;
    info!("Video saved as {}", target.display());
    Ok(StepOutcome::Downloaded(target))
}

/// Download the first available language of `langs` and rename it to `target`.
async fn download_track(
    ytdlp: &YtDlp,
    project: &Project,
    project_dir: &Path,
    langs: &[String],
    target: &Path,
    force: bool,
) -> Result<StepOutcome> {
    if target.exists() && !force {
        info!("Captions already exist, skipping: {}", target.display());
        return Ok(StepOutcome::Cached(target.to_path_buf()));
    }

    // yt-dlp leaves partial and pre-conversion files behind; keep them out
    // of the project directory.
    let scratch = tempfile::Builder::new()
        .prefix(".ytx-captions-")
        .tempdir_in(project_dir)?;
    ytdlp
        .download_captions(
            &project.url,
            langs,
            CaptionFormat::Srt,
            &scratch.path().join(&project.video_id),
        )
        .await?;

    let found = langs
        .iter()
        .map(|lang| caption_path(scratch.path(), &project.video_id, lang, CaptionFormat::Srt))
        .find(|path| path.exists())
        .ok_or_else(|| {
            YtxError::NotFound(format!("No captions found for languages {}", langs.join(", ")))
        })?;

    std::fs::rename(&found, target)?;
    info!("Captions saved as {}", target.display());
    Ok(StepOutcome::Downloaded(target.to_path_buf()))
}

fn merge_tracks(project: &Project, project_dir: &Path, force: bool) -> Result<StepOutcome> {
    let merged = project.merged_captions_path(project_dir);
    if merged.exists() && !force {
        info!("Merged captions already exist, skipping: {}", merged.display());
        return Ok(StepOutcome::Cached(merged));
    }

    merge_srt_files(
        &project.original_captions_path(project_dir),
        &project.translated_captions_path(project_dir),
        &merged,
    )?;
    Ok(StepOutcome::Downloaded(merged))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_ytdlp() -> YtDlp {
        YtDlp::new(&YoutubeSettings {
            ytdlp_path: "ytx-test-no-such-binary".to_string(),
            ..Default::default()
        })
    }

    fn project_in(dir: &Path) -> Project {
        let project = Project::new(
            "abc123def45",
            "T",
            "https://www.youtube.com/watch?v=abc123def45",
            "en",
        );
        project.save(dir).unwrap();
        project
    }

    #[tokio::test]
    async fn test_cached_steps_and_merge() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_in(dir.path());
        std::fs::write(project.video_path(dir.path()), b"mp4").unwrap();
        std::fs::write(
            project.original_captions_path(dir.path()),
            "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n",
        )
        .unwrap();
        std::fs::write(
            project.translated_captions_path(dir.path()),
            "1\n00:00:01,000 --> 00:00:02,000\n你好\n",
        )
        .unwrap();

        let report = run(&offline_ytdlp(), &YoutubeSettings::default(), dir.path(), false)
            .await
            .unwrap();

        assert!(matches!(report.video, StepOutcome::Cached(_)));
        assert!(matches!(report.original_captions, StepOutcome::Cached(_)));
        assert!(matches!(report.merged_captions, StepOutcome::Downloaded(_)));
        assert_eq!(report.failures(), 0);

        let merged = std::fs::read_to_string(project.merged_captions_path(dir.path())).unwrap();
        assert!(merged.contains("Hello\n你好"));
        assert!(merged.contains("World\n"));
    }

    #[tokio::test]
    async fn test_failed_steps_do_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        project_in(dir.path());

        let report = run(&offline_ytdlp(), &YoutubeSettings::default(), dir.path(), false)
            .await
            .unwrap();

        assert_eq!(report.failures(), 4);
        assert!(matches!(report.video, StepOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_missing_project() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&offline_ytdlp(), &YoutubeSettings::default(), dir.path(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, YtxError::NotFound(_)));
    }
}
