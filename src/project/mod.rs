//! Per-video project directories.
//!
//! A project lives in `<videos_dir>/<video_id>/` and is described by
//! `project.json`. Every workflow takes the project directory explicitly.

mod init;

pub use init::{init, prepare_project_dir, write_project};

use crate::error::{Result, YtxError};
use crate::youtube::VideoMetadata;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project descriptor.
pub const PROJECT_FILE: &str = "project.json";

/// Files produced alongside the descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectAssets {
    /// Metadata file name, relative to the project directory.
    pub metadata: String,
}

/// The `project.json` descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
    /// Original speech language detected at init time.
    #[serde(default)]
    pub lang: String,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub assets: ProjectAssets,
}

impl Project {
    pub fn new(video_id: &str, title: &str, url: &str, lang: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            lang: lang.to_string(),
            created_at: Local::now(),
            assets: ProjectAssets {
                metadata: metadata_file_name(video_id),
            },
        }
    }

    /// Load `project.json` from a project directory.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(PROJECT_FILE);
        if !path.exists() {
            return Err(YtxError::NotFound(format!(
                "Project file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write `project.json` into a project directory.
    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(project_dir.join(PROJECT_FILE), content)?;
        Ok(())
    }

    /// Path of the metadata file this project references.
    pub fn metadata_path(&self, project_dir: &Path) -> PathBuf {
        if self.assets.metadata.is_empty() {
            project_dir.join(metadata_file_name(&self.video_id))
        } else {
            project_dir.join(&self.assets.metadata)
        }
    }

    /// Load the yt-dlp metadata this project references.
    pub fn load_metadata(&self, project_dir: &Path) -> Result<VideoMetadata> {
        let path = self.metadata_path(project_dir);
        if !path.exists() {
            return Err(YtxError::NotFound(format!(
                "Metadata not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(&path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        VideoMetadata::from_json(&value)
    }

    /// `<id>.mp4`
    pub fn video_file(&self) -> String {
        format!("{}.mp4", self.video_id)
    }

    pub fn video_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(self.video_file())
    }

    /// `<id>.orig.srt`
    pub fn original_captions_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(format!("{}.orig.srt", self.video_id))
    }

    /// `<id>.zh.srt`
    pub fn translated_captions_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(format!("{}.zh.srt", self.video_id))
    }

    /// `<id>.merged.srt`
    pub fn merged_captions_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(format!("{}.merged.srt", self.video_id))
    }
}

/// Load the project descriptor together with its metadata.
pub fn load_with_metadata(project_dir: &Path) -> Result<(Project, VideoMetadata)> {
    let project = Project::load(project_dir)?;
    let metadata = project.load_metadata(project_dir)?;
    Ok((project, metadata))
}

/// `<id>.meta.json`
pub fn metadata_file_name(video_id: &str) -> String {
    format!("{}.meta.json", video_id)
}
