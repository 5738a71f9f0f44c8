//! Configuration settings for ytx.

use crate::sentences::AlignConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub alignment: AlignConfig,
    pub llm: LlmSettings,
    pub preview: PreviewSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory under which `ytx init` creates project directories.
    pub videos_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            videos_dir: "videos".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// yt-dlp and caption download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// yt-dlp executable (name on PATH or absolute path).
    pub ytdlp_path: String,
    /// Caption language used for sentence files, overview and summary.
    pub caption_lang: String,
    /// Candidate language codes for the original (ASR) caption track.
    pub orig_langs: Vec<String>,
    /// Candidate language codes for the translated caption track.
    pub translation_langs: Vec<String>,
    /// yt-dlp format selector for the video download.
    pub video_format: String,
    /// Network timeout passed to yt-dlp, in seconds.
    pub socket_timeout_secs: u32,
    /// Retry count passed to yt-dlp.
    pub retries: u32,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            caption_lang: "en".to_string(),
            orig_langs: vec!["en-orig".into(), "us-orig".into(), "orig".into()],
            translation_langs: vec!["zh".into(), "zh-Hans".into(), "zh-CN".into()],
            video_format: "bestvideo[height<=1080][height>=720][ext=mp4][vcodec^=avc1]\
                           +bestaudio[ext=m4a][language^=en]\
                           /best[ext=mp4][vcodec^=avc1]"
                .to_string(),
            socket_timeout_secs: 10,
            retries: 1,
        }
    }
}

/// LLM settings for overview and summary generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat model used for all LLM calls.
    pub model: String,
    /// Sampling temperature for the overview analysis.
    pub overview_temperature: f32,
    /// Sampling temperature for the chapter summary.
    pub summary_temperature: f32,
    /// Maximum transcript characters sent with the overview prompt.
    pub max_transcript_chars: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            overview_temperature: 0.3,
            summary_temperature: 0.2,
            max_transcript_chars: 3000,
            timeout_secs: 300,
        }
    }
}

/// Preview page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PreviewSettings {
    /// Custom HTML template (uses the built-in template when unset).
    pub template: Option<String>,
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YtxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytx")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded videos directory path.
    pub fn videos_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.videos_dir)
    }

    /// Get the expanded custom preview template path, if configured.
    pub fn preview_template(&self) -> Option<PathBuf> {
        self.preview.template.as_deref().map(Self::expand_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.alignment.lead_in_ms, 50);
        assert_eq!(settings.alignment.trail_pad_ms, 200);
        assert_eq!(settings.youtube.caption_lang, "en");
        assert_eq!(settings.llm.max_transcript_chars, 3000);
        assert!(settings.preview_template().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [alignment]
            trail_pad_ms = 400

            [llm]
            model = "gpt-4o"
            "#,
        )
        .unwrap();

        assert_eq!(settings.alignment.trail_pad_ms, 400);
        assert_eq!(settings.alignment.lead_in_ms, 50);
        assert_eq!(settings.llm.model, "gpt-4o");
        assert_eq!(settings.llm.timeout_secs, 300);
        assert_eq!(settings.youtube.ytdlp_path, "yt-dlp");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.general.videos_dir = "/data/videos".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.videos_dir, "/data/videos");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.general.videos_dir, "videos");
    }
}
