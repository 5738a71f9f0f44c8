//! Typed view of the yt-dlp `--dump-json` metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The subset of yt-dlp's video metadata that ytx reads.
///
/// The full JSON is kept on disk as `<id>.meta.json`; unknown fields are
/// ignored here and every field is optional so partial dumps still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub webpage_url: Option<String>,
    pub uploader: Option<String>,
    pub channel: Option<String>,
    /// Human readable duration, e.g. `12:34`.
    pub duration_string: Option<String>,
    /// Upload date as `YYYYMMDD`.
    pub upload_date: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub channel_follower_count: Option<u64>,
    /// Auto-generated caption tracks keyed by language code.
    pub automatic_captions: BTreeMap<String, serde_json::Value>,
}

impl VideoMetadata {
    /// Parse from the raw yt-dlp JSON.
    pub fn from_json(value: &serde_json::Value) -> crate::error::Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Uploader name, falling back to the channel name.
    pub fn author(&self) -> Option<&str> {
        self.uploader.as_deref().or(self.channel.as_deref())
    }

    /// Language of the original speech-recognition track.
    ///
    /// YouTube publishes the untranslated ASR track as `<lang>-orig`; the
    /// returned code has the suffix stripped.
    pub fn original_asr_language(&self) -> Option<String> {
        self.automatic_captions
            .keys()
            .find_map(|lang| lang.strip_suffix("-orig"))
            .map(str::to_string)
    }
}
