//! Data models for caption input.

use serde::{Deserialize, Serialize};

/// One atomic piece of transcribed text with an absolute start time.
///
/// Produced from JSON3 segments. Tokens arrive in time order and the
/// aligner relies on that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionToken {
    /// Trimmed, non-empty text.
    pub text: String,
    /// Milliseconds from media start.
    pub start_ms: i64,
}

impl CaptionToken {
    pub fn new(text: impl Into<String>, start_ms: i64) -> Self {
        Self {
            text: text.into(),
            start_ms,
        }
    }
}

/// A whole caption line with a single start time.
///
/// The coarse counterpart of [`CaptionToken`], built from SRT cues when
/// per-word timing is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionLine {
    pub text: String,
    pub start_ms: i64,
}

impl CaptionLine {
    pub fn new(text: impl Into<String>, start_ms: i64) -> Self {
        Self {
            text: text.into(),
            start_ms,
        }
    }
}

/// A single SubRip cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtCue {
    /// Sequence number (1-indexed).
    pub index: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    /// Cue text; may span several lines.
    pub text: String,
}

impl SrtCue {
    pub fn new(index: usize, start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self {
            index,
            start_ms,
            end_ms,
            text: text.into(),
        }
    }
}

/// Whether a caption fragment is a bracketed annotation such as `[Music]`.
pub fn is_annotation(text: &str) -> bool {
    let text = text.trim();
    text.len() >= 2 && text.starts_with('[') && text.ends_with(']')
}
