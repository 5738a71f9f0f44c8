//! Bilingual subtitle merging.

use super::{format_srt, read_srt, SrtCue};
use crate::error::Result;
use std::path::Path;
use tracing::{debug, info};

/// Merge an original-language track with a translated track.
///
/// The original track drives timing: cue `i` of the result keeps the
/// original cue's start and end, with the translated cue `i` appended on a
/// second line (blank when the translation is shorter).
pub fn merge_bilingual(original: &[SrtCue], translated: &[SrtCue]) -> Vec<SrtCue> {
    original
        .iter()
        .enumerate()
        .map(|(i, cue)| {
            let translation = translated.get(i).map(|t| t.text.as_str()).unwrap_or("");
            SrtCue::new(
                i + 1,
                cue.start_ms,
                cue.end_ms,
                format!("{}\n{}", cue.text, translation),
            )
        })
        .collect()
}

/// Merge two SRT files into a bilingual SRT file at `output`.
pub fn merge_srt_files(original: &Path, translated: &Path, output: &Path) -> Result<usize> {
    let original_cues = read_srt(original)?;
    let translated_cues = read_srt(translated)?;

    if original_cues.len() != translated_cues.len() {
        debug!(
            "Track lengths differ: {} original vs {} translated cues",
            original_cues.len(),
            translated_cues.len()
        );
    }

    let merged = merge_bilingual(&original_cues, &translated_cues);
    std::fs::write(output, format_srt(&merged))?;

    info!("Merged {} cues into {}", merged.len(), output.display());
    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::parse_srt;

    #[test]
    fn test_merge_bilingual_pads_missing_translation() {
        let original = vec![
            SrtCue::new(1, 0, 1000, "Hello"),
            SrtCue::new(2, 1000, 2000, "World"),
        ];
        let translated = vec![SrtCue::new(1, 50, 900, "你好")];

        let merged = merge_bilingual(&original, &translated);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], SrtCue::new(1, 0, 1000, "Hello\n你好"));
        assert_eq!(merged[1], SrtCue::new(2, 1000, 2000, "World\n"));
    }

    #[test]
    fn test_merge_srt_files() {
        let dir = tempfile::tempdir().unwrap();
        let orig = dir.path().join("v.orig.srt");
        let zh = dir.path().join("v.zh.srt");
        let out = dir.path().join("v.merged.srt");

        std::fs::write(&orig, "1\n00:00:01,000 --> 00:00:02,000\nGood morning\n").unwrap();
        std::fs::write(&zh, "1\n00:00:01,000 --> 00:00:02,000\n早上好\n").unwrap();

        let count = merge_srt_files(&orig, &zh, &out).unwrap();
        assert_eq!(count, 1);

        let merged = parse_srt(&std::fs::read_to_string(&out).unwrap());
        assert_eq!(merged[0].text, "Good morning\n早上好");
        assert_eq!(merged[0].start_ms, 1000);
    }
}
