//! Sentence segmentation for ytx.
//!
//! Converts timed captions into sentence-level records and writes them as
//! sentence files that the preview page and the LLM prompts consume.
//!
//! # Variants
//!
//! - **Fine** ([`align_tokens`]): JSON3 word tokens with precise offsets;
//!   each sentence gets a start and an end time.
//! - **Coarse** ([`align_lines`]): SRT lines with one start time each; each
//!   sentence gets the start time of the line it begins in.

mod align;
mod format;

pub use align::{align_lines, align_tokens, AlignConfig, DEFAULT_LEAD_IN_MS, DEFAULT_TRAIL_PAD_MS};
pub use format::{
    format_clock, format_coarse, format_precise, format_record, pad_time, parse_line,
    parse_sentences, parse_time_ms, read_sentences, transcript_text, write_coarse, write_records,
    SentenceLine, UNKNOWN_TIME,
};

use crate::captions::{cues_to_lines, read_json3, read_srt};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// One sentence with an estimated start and end time.
///
/// `start_ms` can be negative when the lead-in is applied to a token at the
/// very start of the media; formatting clamps it to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// 1-based position in the output.
    pub index: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    pub text: String,
}

impl SentenceRecord {
    pub fn new(index: usize, start_ms: i64, end_ms: i64, text: impl Into<String>) -> Self {
        Self {
            index,
            start_ms,
            end_ms,
            text: text.into(),
        }
    }
}

/// One sentence with only a start time, from line-level captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoarseSentence {
    pub index: usize,
    /// `None` when no caption line begins at or before the sentence.
    pub start_ms: Option<i64>,
    pub text: String,
}

impl CoarseSentence {
    pub fn new(index: usize, start_ms: Option<i64>, text: impl Into<String>) -> Self {
        Self {
            index,
            start_ms,
            text: text.into(),
        }
    }
}

/// Sibling path `<stem><suffix>` next to a caption file.
fn sibling_path(captions_path: &Path, suffix: &str) -> PathBuf {
    let stem = captions_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    captions_path.with_file_name(format!("{}{}", stem, suffix))
}

/// Coarse sentence file path for an SRT file (`abc.en.srt` -> `abc.en.sentences.md`).
pub fn coarse_output_path(srt_path: &Path) -> PathBuf {
    sibling_path(srt_path, ".sentences.md")
}

/// Fine sentence file path for a JSON3 file (`abc.en.json3` -> `abc.en.precise.sentences.md`).
pub fn precise_output_path(json3_path: &Path) -> PathBuf {
    sibling_path(json3_path, ".precise.sentences.md")
}

/// Build a coarse sentence file from an SRT caption file.
#[instrument]
pub fn sentences_from_srt(srt_path: &Path) -> Result<PathBuf> {
    let cues = read_srt(srt_path)?;
    let sentences = align_lines(&cues_to_lines(&cues));

    let out_path = coarse_output_path(srt_path);
    write_coarse(&out_path, &sentences)?;

    info!("Wrote {} sentences to {}", sentences.len(), out_path.display());
    Ok(out_path)
}

/// Build a fine sentence file from a JSON3 caption file.
#[instrument(skip(config))]
pub fn sentences_from_json3(json3_path: &Path, config: &AlignConfig) -> Result<PathBuf> {
    let tokens = read_json3(json3_path)?;
    let records = align_tokens(&tokens, config);

    let out_path = precise_output_path(json3_path);
    write_records(&out_path, &records)?;

    info!("Wrote {} sentences to {}", records.len(), out_path.display());
    Ok(out_path)
}
