//! SubRip (SRT) parsing and formatting.

use super::{CaptionLine, SrtCue};
use crate::error::{Result, YtxError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+):(\d{1,2}):(\d{1,2})(?:[,.](\d{1,3}))?").expect("valid timestamp regex")
    })
}

fn block_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n").expect("valid separator regex"))
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into milliseconds.
fn parse_srt_timestamp(ts: &str) -> Option<i64> {
    let caps = timestamp_regex().captures(ts.trim())?;
    let hours: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: i64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: i64 = caps.get(3)?.as_str().parse().ok()?;
    let millis = match caps.get(4) {
        // "5" after the comma means 500ms, not 5ms
        Some(m) => format!("{:0<3}", m.as_str()).parse::<i64>().ok()?,
        None => 0,
    };
    Some(((hours * 60 + minutes) * 60 + seconds) * 1000 + millis)
}

/// Parse SRT text into cues.
///
/// Blocks without a `-->` time line are skipped. The numeric index line is
/// optional; when missing, the cue is numbered by position.
pub fn parse_srt(content: &str) -> Vec<SrtCue> {
    let normalized = content
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut cues = Vec::new();

    for block in block_separator().split(&normalized) {
        let lines: Vec<&str> = block
            .lines()
            .map(|l| l.trim_end())
            .skip_while(|l| l.trim().is_empty())
            .collect();

        let Some(time_idx) = lines.iter().position(|l| l.contains("-->")) else {
            continue;
        };

        let mut parts = lines[time_idx].split("-->");
        let start = parts.next().and_then(parse_srt_timestamp);
        let end = parts.next().and_then(parse_srt_timestamp);
        let (Some(start_ms), Some(end_ms)) = (start, end) else {
            continue;
        };

        let index = time_idx
            .checked_sub(1)
            .and_then(|i| lines[i].trim().parse::<usize>().ok())
            .unwrap_or(cues.len() + 1);

        let text = lines[time_idx + 1..].join("\n").trim().to_string();

        cues.push(SrtCue::new(index, start_ms, end_ms, text));
    }

    cues
}

/// Read and parse an SRT file.
pub fn read_srt(path: &Path) -> Result<Vec<SrtCue>> {
    if !path.exists() {
        return Err(YtxError::NotFound(format!(
            "Caption file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_srt(&content))
}

/// Flatten cues into coarse caption lines, dropping cues with no text.
pub fn cues_to_lines(cues: &[SrtCue]) -> Vec<CaptionLine> {
    cues.iter()
        .filter_map(|cue| {
            let text = cue.text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(CaptionLine::new(text, cue.start_ms))
            }
        })
        .collect()
}

/// Format cues as SRT.
pub fn format_srt(cues: &[SrtCue]) -> String {
    let mut output = String::new();

    for cue in cues {
        output.push_str(&format!("{}\n", cue.index));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(cue.start_ms),
            format_srt_timestamp(cue.end_ms)
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

/// Format milliseconds as an SRT timestamp (00:00:00,000).
pub fn format_srt_timestamp(ms: i64) -> String {
    let total_ms = ms.max(0);
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\r\n00:00:01,000 --> 00:00:03,500\r\nWelcome back.\r\n\r\n2\r\n00:00:05,000 --> 00:00:08,250\r\nLet's begin\r\nthe lesson.\r\n";

    #[test]
    fn test_parse_srt() {
        let cues = parse_srt(SAMPLE);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0], SrtCue::new(1, 1000, 3500, "Welcome back."));
        assert_eq!(cues[1].start_ms, 5000);
        assert_eq!(cues[1].end_ms, 8250);
        assert_eq!(cues[1].text, "Let's begin\nthe lesson.");
    }

    #[test]
    fn test_parse_srt_without_index_lines() {
        let content = "00:00:01,000 --> 00:00:02,000\nFirst\n\n00:01:00,5 --> 00:01:02,000\nSecond\n";
        let cues = parse_srt(content);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].index, 1);
        assert_eq!(cues[1].index, 2);
        assert_eq!(cues[1].start_ms, 60_500);
    }

    #[test]
    fn test_parse_srt_skips_garbage_blocks() {
        let content = "garbage\nmore garbage\n\n3\n00:00:01,000 --> 00:00:02,000\nKept\n";
        let cues = parse_srt(content);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].index, 3);
        assert_eq!(cues[0].text, "Kept");
    }

    #[test]
    fn test_parse_srt_empty() {
        assert!(parse_srt("").is_empty());
    }

    #[test]
    fn test_cues_to_lines() {
        let mut cues = parse_srt(SAMPLE);
        cues.push(SrtCue::new(3, 9000, 9500, "  "));
        let lines = cues_to_lines(&cues);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], CaptionLine::new("Let's begin the lesson.", 5000));
    }

    #[test]
    fn test_format_srt() {
        let cues = vec![SrtCue::new(1, 0, 2500, "Hello world.")];
        let srt = format_srt(&cues);
        assert_eq!(srt, "1\n00:00:00,000 --> 00:00:02,500\nHello world.\n\n");
    }

    #[test]
    fn test_srt_timestamp() {
        assert_eq!(format_srt_timestamp(0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(61_500), "00:01:01,500");
        assert_eq!(format_srt_timestamp(3_661_123), "01:01:01,123");
        assert_eq!(parse_srt_timestamp("01:01:01,123"), Some(3_661_123));
    }

    #[test]
    fn test_read_srt_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_srt(&dir.path().join("missing.srt")).unwrap_err();
        assert!(matches!(err, YtxError::NotFound(_)));
    }
}
