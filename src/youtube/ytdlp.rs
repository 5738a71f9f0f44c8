//! yt-dlp subprocess runner.

use crate::config::YoutubeSettings;
use crate::error::{Result, YtxError};
use std::path::Path;
use std::process::Output;
use tracing::debug;

/// Caption file formats yt-dlp can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    Srt,
    Json3,
}

impl CaptionFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CaptionFormat::Srt => "srt",
            CaptionFormat::Json3 => "json3",
        }
    }
}

impl std::fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Thin wrapper over the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
    video_format: String,
    socket_timeout_secs: u32,
    retries: u32,
}

impl YtDlp {
    pub fn new(settings: &YoutubeSettings) -> Self {
        Self {
            program: settings.ytdlp_path.clone(),
            video_format: settings.video_format.clone(),
            socket_timeout_secs: settings.socket_timeout_secs,
            retries: settings.retries,
        }
    }

    async fn run(&self, args: &[String]) -> Result<Output> {
        debug!("Running {} {}", self.program, args.join(" "));

        tokio::process::Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    YtxError::ToolNotFound(self.program.clone())
                } else {
                    YtxError::VideoSource(format!("Failed to run {}: {}", self.program, e))
                }
            })
    }

    fn network_args(&self) -> Vec<String> {
        vec![
            "--socket-timeout".to_string(),
            self.socket_timeout_secs.to_string(),
            "--retries".to_string(),
            self.retries.to_string(),
        ]
    }

    /// Fetch the raw `--dump-json` metadata for a video.
    pub async fn fetch_metadata(&self, url: &str) -> Result<serde_json::Value> {
        let mut args = vec![
            "--dump-json".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
        ];
        args.extend(self.network_args());
        args.push(url.to_string());

        let output = self.run(&args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr, "Failed to fetch metadata"));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(stdout.trim()).map_err(|e| {
            YtxError::VideoSource(format!("Failed to parse yt-dlp output: {}", e))
        })
    }

    /// Download the video as mp4 to `output`.
    pub async fn download_video(&self, url: &str, output: &Path) -> Result<()> {
        let mut args = vec![
            "-f".to_string(),
            self.video_format.clone(),
            "--merge-output-format".to_string(),
            "mp4".to_string(),
            "--no-playlist".to_string(),
            "-o".to_string(),
            output.to_string_lossy().to_string(),
        ];
        args.extend(self.network_args());
        args.push(url.to_string());

        let output = self.run(&args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr, "Video download failed"));
        }
        Ok(())
    }

    /// Download caption tracks without the video.
    ///
    /// Files land as `<output_stem>.<lang>.<ext>`; the first available
    /// language in `langs` wins on YouTube's side, and callers look for the
    /// result themselves.
    pub async fn download_captions(
        &self,
        url: &str,
        langs: &[String],
        format: CaptionFormat,
        output_stem: &Path,
    ) -> Result<()> {
        let mut args = vec![
            "--skip-download".to_string(),
            "--write-subs".to_string(),
            "--write-auto-subs".to_string(),
            "--sub-langs".to_string(),
            langs.join(","),
            "--sub-format".to_string(),
            format.extension().to_string(),
        ];
        if format == CaptionFormat::Srt {
            args.push("--convert-subs".to_string());
            args.push("srt".to_string());
        }
        args.extend([
            "--no-playlist".to_string(),
            "-o".to_string(),
            format!("{}.%(ext)s", output_stem.to_string_lossy()),
        ]);
        args.extend(self.network_args());
        args.push(url.to_string());

        let output = self.run(&args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(&stderr, "Caption download failed"));
        }
        Ok(())
    }
}

/// Map yt-dlp stderr to an error; HTTP 403 gets its own variant.
fn classify_failure(stderr: &str, context: &str) -> YtxError {
    if stderr.contains("403") {
        YtxError::Forbidden
    } else {
        YtxError::ToolFailed(format!("{}: {}", context, stderr.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_tool() -> YtDlp {
        YtDlp::new(&YoutubeSettings {
            ytdlp_path: "ytx-test-no-such-binary".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_classify_failure() {
        assert!(matches!(
            classify_failure("ERROR: HTTP Error 403: Forbidden", "x"),
            YtxError::Forbidden
        ));
        match classify_failure("ERROR: Video unavailable\n", "Failed") {
            YtxError::ToolFailed(msg) => assert_eq!(msg, "Failed: ERROR: Video unavailable"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_caption_format_extension() {
        assert_eq!(CaptionFormat::Srt.extension(), "srt");
        assert_eq!(CaptionFormat::Json3.to_string(), "json3");
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_not_found() {
        let err = missing_tool()
            .fetch_metadata("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, YtxError::ToolNotFound(name) if name == "ytx-test-no-such-binary"));
    }
}
