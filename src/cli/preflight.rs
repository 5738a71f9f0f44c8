//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::error::{Result, YtxError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Project init only needs yt-dlp for metadata.
    Init,
    /// Downloads need yt-dlp plus ffmpeg for merging and caption conversion.
    Download,
    /// Overview and summary need captions and the API key.
    Analyze,
    /// The preview page only needs captions.
    Preview,
}

/// Run pre-flight checks for the given operation.
///
/// `ytdlp` is the configured yt-dlp executable.
pub fn check(operation: Operation, ytdlp: &str) -> Result<()> {
    match operation {
        Operation::Init | Operation::Preview => {
            check_tool(ytdlp)?;
        }
        Operation::Download => {
            check_tool(ytdlp)?;
            check_tool("ffmpeg")?;
        }
        Operation::Analyze => {
            check_api_key()?;
            check_tool(ytdlp)?;
        }
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(YtxError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(YtxError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    // ffmpeg uses -version (single dash), yt-dlp uses --version
    let version_arg = if name.ends_with("ffmpeg") {
        "-version"
    } else {
        "--version"
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(YtxError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(YtxError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(YtxError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
