//! Caption fetching for a project directory.

use super::{CaptionFormat, VideoMetadata, YtDlp};
use crate::error::{Result, YtxError};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Path of the single-language caption file `<id>.<lang>.<ext>`.
pub fn caption_path(project_dir: &Path, video_id: &str, lang: &str, format: CaptionFormat) -> PathBuf {
    project_dir.join(format!("{}.{}.{}", video_id, lang, format.extension()))
}

/// Make sure the `<id>.<lang>.<ext>` caption file exists, downloading it if needed.
///
/// An existing file is reused unless `force` is set.
#[instrument(skip(ytdlp, metadata), fields(video_id = %metadata.id))]
pub async fn fetch_captions(
    ytdlp: &YtDlp,
    project_dir: &Path,
    metadata: &VideoMetadata,
    lang: &str,
    format: CaptionFormat,
    force: bool,
) -> Result<PathBuf> {
    let video_id = video_id_or_dir_name(metadata, project_dir);
    let target = caption_path(project_dir, &video_id, lang, format);

    if target.exists() && !force {
        info!("Captions already cached: {}", target.display());
        return Ok(target);
    }

    let url = metadata
        .webpage_url
        .as_deref()
        .ok_or_else(|| YtxError::InvalidInput("Missing 'webpage_url' in metadata".to_string()))?;

    info!("Downloading {} captions for {} ({})", format, video_id, lang);
    let scratch = tempfile::Builder::new()
        .prefix(".ytx-captions-")
        .tempdir_in(project_dir)?;
    ytdlp
        .download_captions(url, &[lang.to_string()], format, &scratch.path().join(&video_id))
        .await?;

    let downloaded = caption_path(scratch.path(), &video_id, lang, format);
    if !downloaded.exists() {
        return Err(YtxError::NotFound(format!(
            "Expected caption file not found: {}",
            target.display()
        )));
    }
    std::fs::rename(&downloaded, &target)?;

    info!("Captions saved as {}", target.display());
    Ok(target)
}

fn video_id_or_dir_name(metadata: &VideoMetadata, project_dir: &Path) -> String {
    if !metadata.id.is_empty() {
        return metadata.id.clone();
    }
    project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YoutubeSettings;

    fn offline_ytdlp() -> YtDlp {
        YtDlp::new(&YoutubeSettings {
            ytdlp_path: "ytx-test-no-such-binary".to_string(),
            ..Default::default()
        })
    }

    fn metadata(url: Option<&str>) -> VideoMetadata {
        VideoMetadata {
            id: "abc123def45".to_string(),
            webpage_url: url.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_cached_captions_are_reused() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("abc123def45.en.srt");
        std::fs::write(&cached, "1\n00:00:01,000 --> 00:00:02,000\nHi.\n").unwrap();

        let path = fetch_captions(
            &offline_ytdlp(),
            dir.path(),
            &metadata(None),
            "en",
            CaptionFormat::Srt,
            false,
        )
        .await
        .unwrap();
        assert_eq!(path, cached);
    }

    #[tokio::test]
    async fn test_missing_webpage_url() {
        let dir = tempfile::tempdir().unwrap();
        let err = fetch_captions(
            &offline_ytdlp(),
            dir.path(),
            &metadata(None),
            "en",
            CaptionFormat::Json3,
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, YtxError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_force_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("abc123def45.en.json3"), "{}").unwrap();

        let err = fetch_captions(
            &offline_ytdlp(),
            dir.path(),
            &metadata(Some("https://www.youtube.com/watch?v=abc123def45")),
            "en",
            CaptionFormat::Json3,
            true,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, YtxError::ToolNotFound(_)));
    }

    #[test]
    fn test_caption_path_uses_dir_name_without_id() {
        let meta = VideoMetadata::default();
        let id = video_id_or_dir_name(&meta, Path::new("/videos/xyz"));
        assert_eq!(
            caption_path(Path::new("/videos/xyz"), &id, "en", CaptionFormat::Srt),
            PathBuf::from("/videos/xyz/xyz.en.srt")
        );
    }
}
