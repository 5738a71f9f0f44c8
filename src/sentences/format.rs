//! The sentence file line format.
//!
//! One sentence per line:
//!
//! ```text
//! [1] 0:00:00.950000 → 0:00:01.200000 Hello there.
//! [1] 00:00:01 → Welcome back.
//! ```
//!
//! The first form carries a start and end time (fine alignment), the second
//! only a start time (coarse alignment). The preview page and the LLM
//! prompts read these files back line by line, so writer and reader must
//! agree on this exact grammar.

use super::{CoarseSentence, SentenceRecord};
use crate::error::{Result, YtxError};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Placeholder written when a coarse sentence has no known start time.
pub const UNKNOWN_TIME: &str = "--:--:--";

/// Separator between the timestamps and the sentence text.
pub const ARROW: &str = " → ";

/// Format milliseconds as `H:MM:SS.ffffff`.
///
/// Hours are unpadded. Negative values clamp to zero.
pub fn format_precise(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1000;
    let micros = (ms % 1000) * 1000;

    format!("{}:{:02}:{:02}.{:06}", hours, minutes, secs, micros)
}

/// Format milliseconds as `HH:MM:SS`, truncating sub-second precision.
pub fn format_clock(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1000;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Render a fine-aligned sentence as one line.
pub fn format_record(record: &SentenceRecord) -> String {
    format!(
        "[{}] {}{}{} {}",
        record.index,
        format_precise(record.start_ms),
        ARROW,
        format_precise(record.end_ms),
        record.text
    )
}

/// Render a coarse-aligned sentence as one line.
pub fn format_coarse(sentence: &CoarseSentence) -> String {
    let time = sentence
        .start_ms
        .map(format_clock)
        .unwrap_or_else(|| UNKNOWN_TIME.to_string());
    format!("[{}] {}{}{}", sentence.index, time, ARROW, sentence.text)
}

/// Write fine-aligned sentences to `path`, one per line.
pub fn write_records(path: &Path, records: &[SentenceRecord]) -> Result<()> {
    let content: String = records
        .iter()
        .map(|r| format_record(r) + "\n")
        .collect();
    std::fs::write(path, content)?;
    Ok(())
}

/// Write coarse-aligned sentences to `path`, one per line.
pub fn write_coarse(path: &Path, sentences: &[CoarseSentence]) -> Result<()> {
    let content: String = sentences
        .iter()
        .map(|s| format_coarse(s) + "\n")
        .collect();
    std::fs::write(path, content)?;
    Ok(())
}

/// A sentence line read back from a sentence file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceLine {
    pub index: usize,
    /// Start time as written; `None` for the unknown placeholder.
    pub start: Option<String>,
    /// End time as written; only present in fine-aligned files.
    pub end: Option<String>,
    pub text: String,
}

/// Only a fractional start time may be followed by an end time; a coarse
/// line keeps everything after the arrow as text, even a leading `1:30:00`.
fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^\[(\d+)\] (?:(\d+:\d{2}:\d{2}\.\d{1,6}) → (\d+:\d{2}:\d{2}\.\d{1,6}) |(\d+:\d{2}:\d{2}(?:\.\d{1,6})?|--:--:--) → )(.+)$",
        )
        .expect("valid sentence line regex")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[.*?\]").expect("valid tag regex"))
}

/// Parse one sentence line. Lines that do not match the grammar yield `None`.
pub fn parse_line(line: &str) -> Option<SentenceLine> {
    let caps = line_regex().captures(line.trim())?;

    let index = caps.get(1)?.as_str().parse().ok()?;
    let start = caps
        .get(2)
        .or_else(|| caps.get(4))
        .map(|m| m.as_str())
        .filter(|s| *s != UNKNOWN_TIME)
        .map(str::to_string);
    let end = caps.get(3).map(|m| m.as_str().to_string());
    let text = caps.get(5)?.as_str().trim().to_string();

    Some(SentenceLine {
        index,
        start,
        end,
        text,
    })
}

/// Parse every well-formed line of a sentence file's content.
pub fn parse_sentences(content: &str) -> Vec<SentenceLine> {
    content.lines().filter_map(parse_line).collect()
}

/// Read a sentence file.
pub fn read_sentences(path: &Path) -> Result<Vec<SentenceLine>> {
    if !path.exists() {
        return Err(YtxError::NotFound(format!(
            "Sentence file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_sentences(&content))
}

/// Join sentence texts into plain transcript text.
///
/// Bracketed tags such as `[Music]` are removed and sentences left empty
/// are dropped.
pub fn transcript_text(lines: &[SentenceLine]) -> String {
    lines
        .iter()
        .map(|l| tag_regex().replace_all(&l.text, "").trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Zero-pad a clock time to `HH:MM:SS`, keeping any fractional part.
///
/// `1:02:03.5` becomes `01:02:03.5`; `2:03` becomes `00:02:03`.
pub fn pad_time(time: &str) -> String {
    let (main, fraction) = match time.split_once('.') {
        Some((main, fraction)) => (main, Some(fraction)),
        None => (time, None),
    };

    let mut parts: Vec<String> = main.split(':').map(|p| format!("{:0>2}", p)).collect();
    while parts.len() < 3 {
        parts.insert(0, "00".to_string());
    }

    match fraction {
        Some(f) => format!("{}.{}", parts.join(":"), f),
        None => parts.join(":"),
    }
}

/// Parse a clock time (`H:MM:SS` or `H:MM:SS.ffffff`) into milliseconds.
pub fn parse_time_ms(time: &str) -> Option<i64> {
    let (main, fraction) = match time.split_once('.') {
        Some((main, fraction)) => (main, fraction),
        None => (time, ""),
    };

    let mut total_secs: i64 = 0;
    for part in main.split(':') {
        total_secs = total_secs * 60 + part.parse::<i64>().ok()?;
    }

    let millis = if fraction.is_empty() {
        0
    } else {
        let digits: String = fraction.chars().chain(std::iter::repeat('0')).take(3).collect();
        digits.parse::<i64>().ok()?
    };

    Some(total_secs * 1000 + millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::CaptionLine;
    use crate::sentences::align_lines;

    #[test]
    fn test_format_precise() {
        assert_eq!(format_precise(0), "0:00:00.000000");
        assert_eq!(format_precise(950), "0:00:00.950000");
        assert_eq!(format_precise(3_723_456), "1:02:03.456000");
        assert_eq!(format_precise(36_000_000), "10:00:00.000000");
    }

    #[test]
    fn test_format_precise_clamps_negative() {
        assert_eq!(format_precise(-50), "0:00:00.000000");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(1000), "00:00:01");
        assert_eq!(format_clock(5999), "00:00:05");
        assert_eq!(format_clock(3_723_456), "01:02:03");
        assert_eq!(format_clock(-1), "00:00:00");
    }

    #[test]
    fn test_format_record() {
        let record = SentenceRecord::new(1, 950, 1200, "Hello there.");
        assert_eq!(
            format_record(&record),
            "[1] 0:00:00.950000 → 0:00:01.200000 Hello there."
        );
    }

    #[test]
    fn test_format_coarse() {
        let known = CoarseSentence::new(2, Some(5000), "Let's begin the lesson.");
        assert_eq!(format_coarse(&known), "[2] 00:00:05 → Let's begin the lesson.");

        let unknown = CoarseSentence::new(3, None, "Lost.");
        assert_eq!(format_coarse(&unknown), "[3] --:--:-- → Lost.");
    }

    #[test]
    fn test_parse_fine_line() {
        let line = parse_line("[12] 0:01:02.500000 → 0:01:04.100000 See you soon.").unwrap();
        assert_eq!(line.index, 12);
        assert_eq!(line.start.as_deref(), Some("0:01:02.500000"));
        assert_eq!(line.end.as_deref(), Some("0:01:04.100000"));
        assert_eq!(line.text, "See you soon.");
    }

    #[test]
    fn test_parse_coarse_line() {
        let line = parse_line("[1] 00:00:01 → Hello, welcome to this video.").unwrap();
        assert_eq!(line.start.as_deref(), Some("00:00:01"));
        assert_eq!(line.end, None);
        assert_eq!(line.text, "Hello, welcome to this video.");

        let unknown = parse_line("[4] --:--:-- → Somewhere.").unwrap();
        assert_eq!(unknown.start, None);
        assert_eq!(unknown.text, "Somewhere.");
    }

    #[test]
    fn test_coarse_text_starting_with_a_time_reads_back_whole() {
        let lines = align_lines(&[CaptionLine::new("1:30:00 is when we start.", 1000)]);
        let written = format_coarse(&lines[0]);
        assert_eq!(written, "[1] 00:00:01 → 1:30:00 is when we start.");

        let read = parse_sentences(&written);
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].start.as_deref(), Some("00:00:01"));
        assert_eq!(read[0].end, None);
        assert_eq!(transcript_text(&read), "1:30:00 is when we start.");
    }

    #[test]
    fn test_fine_text_starting_with_a_time_keeps_it() {
        let line =
            parse_line("[3] 0:00:02.950000 → 0:00:04.200000 10:15:00 works for me.").unwrap();
        assert_eq!(line.end.as_deref(), Some("0:00:04.200000"));
        assert_eq!(line.text, "10:15:00 works for me.");
    }

    #[test]
    fn test_parse_line_rejects_noise() {
        assert!(parse_line("").is_none());
        assert!(parse_line("# heading").is_none());
        assert!(parse_line("[x] 00:00:01 → text").is_none());
        assert!(parse_line("[1] 00:00:01 text without arrow").is_none());
    }

    #[test]
    fn test_written_lines_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v.en.precise.sentences.md");
        let records = vec![
            SentenceRecord::new(1, -50, 1100, "So today we start."),
            SentenceRecord::new(2, 1450, 2000, "Ready now?"),
        ];
        write_records(&path, &records).unwrap();

        let lines = read_sentences(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].start.as_deref(), Some("0:00:00.000000"));
        assert_eq!(lines[1].end.as_deref(), Some("0:00:02.000000"));
        assert_eq!(lines[1].text, "Ready now?");
    }

    #[test]
    fn test_transcript_text_strips_tags() {
        let lines = parse_sentences(
            "[1] 00:00:01 → Hello, welcome to this video.\n\
             [2] 00:00:05 → Today we will discuss AI technology.\n\
             [3] 00:00:10 → [Music] Let's begin.\n\
             [4] 00:00:12 → [Applause]\n",
        );
        assert_eq!(
            transcript_text(&lines),
            "Hello, welcome to this video. Today we will discuss AI technology. Let's begin."
        );
    }

    #[test]
    fn test_transcript_text_empty() {
        assert_eq!(transcript_text(&[]), "");
    }

    #[test]
    fn test_pad_time() {
        assert_eq!(pad_time("0:00:01.950000"), "00:00:01.950000");
        assert_eq!(pad_time("1:2:3"), "01:02:03");
        assert_eq!(pad_time("2:03"), "00:02:03");
        assert_eq!(pad_time("12:34:56"), "12:34:56");
    }

    #[test]
    fn test_parse_time_ms() {
        assert_eq!(parse_time_ms("0:00:00.950000"), Some(950));
        assert_eq!(parse_time_ms("01:02:03"), Some(3_723_000));
        assert_eq!(parse_time_ms("00:00:01.5"), Some(1500));
        assert_eq!(parse_time_ms("bad"), None);
    }
}
