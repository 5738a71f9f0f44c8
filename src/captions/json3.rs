//! YouTube JSON3 timed-text parsing.
//!
//! A JSON3 document is a list of events. Each event has an absolute start
//! (`tStartMs`) and a list of text segments, each with a relative offset
//! (`tOffsetMs`). Auto-generated captions carry roughly one segment per word.

use super::{is_annotation, CaptionToken};
use crate::error::{Result, YtxError};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Json3Document {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs")]
    start_ms: Option<i64>,
    segs: Option<Vec<Json3Segment>>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
    #[serde(rename = "tOffsetMs", default)]
    offset_ms: i64,
}

/// Parse JSON3 content into timed caption tokens.
///
/// Events without segments or a start time are skipped. Segment text is
/// HTML-unescaped and trimmed; empty segments and bracketed annotations
/// (`[Music]`) are dropped.
pub fn parse_json3(content: &str) -> Result<Vec<CaptionToken>> {
    let document: Json3Document = serde_json::from_str(content)?;

    let mut tokens = Vec::new();
    for event in document.events {
        let (Some(base_ms), Some(segs)) = (event.start_ms, event.segs) else {
            continue;
        };

        for seg in segs {
            let text = unescape_html(&seg.utf8);
            let text = text.trim();
            if text.is_empty() || is_annotation(text) {
                continue;
            }
            tokens.push(CaptionToken::new(text, base_ms + seg.offset_ms));
        }
    }

    Ok(tokens)
}

/// Read and parse a JSON3 caption file.
pub fn read_json3(path: &Path) -> Result<Vec<CaptionToken>> {
    if !path.exists() {
        return Err(YtxError::NotFound(format!(
            "Caption file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    parse_json3(&content)
}

/// Decode HTML character references (`&amp;`, `&#39;`, `&#x27;`, ...).
///
/// Unknown or malformed references are left as-is.
pub fn unescape_html(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        // Longest named reference we decode is "&quot;"/"&apos;"/"&nbsp;"
        let decoded = candidate
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&candidate[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                output.push(c);
                rest = &candidate[semi + 1..];
            }
            None => {
                output.push('&');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let hex = digits
                .strip_prefix('x')
                .or_else(|| digits.strip_prefix('X'));
            let code = match hex {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json3_tokens() {
        let content = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 5000, "id": 1},
                {"tStartMs": 1000, "segs": [{"utf8": "Hello"}, {"utf8": " there.", "tOffsetMs": 400}]},
                {"tStartMs": 2000, "aAppend": 1, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 2500, "segs": [{"utf8": "[Music]"}]},
                {"segs": [{"utf8": "orphan"}]},
                {"tStartMs": 3000, "segs": [{"utf8": "it&#39;s"}, {"utf8": " &amp; more", "tOffsetMs": 120}]}
            ]
        }"#;

        let tokens = parse_json3(content).unwrap();
        assert_eq!(
            tokens,
            vec![
                CaptionToken::new("Hello", 1000),
                CaptionToken::new("there.", 1400),
                CaptionToken::new("it's", 3000),
                CaptionToken::new("& more", 3120),
            ]
        );
    }

    #[test]
    fn test_parse_json3_annotation_only() {
        let content = r#"{"events": [{"tStartMs": 0, "segs": [{"utf8": "[Music]"}]}]}"#;
        assert!(parse_json3(content).unwrap().is_empty());
    }

    #[test]
    fn test_parse_json3_malformed() {
        let err = parse_json3("{ not json").unwrap_err();
        assert!(matches!(err, YtxError::Json(_)));
    }

    #[test]
    fn test_parse_json3_missing_events() {
        assert!(parse_json3("{}").unwrap().is_empty());
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("plain"), "plain");
        assert_eq!(unescape_html("a &amp; b"), "a & b");
        assert_eq!(unescape_html("&lt;i&gt;"), "<i>");
        assert_eq!(unescape_html("it&#39;s &#x27;ok&#x27;"), "it's 'ok'");
        assert_eq!(unescape_html("R&D; AT&T"), "R&D; AT&T");
        assert_eq!(unescape_html("trailing &"), "trailing &");
    }
}
