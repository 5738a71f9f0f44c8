//! Sentence segmentation and timestamp alignment.
//!
//! Both variants follow the same shape: concatenate the timed inputs into
//! one running string while remembering where each input starts, split the
//! string on terminal punctuation, then map every sentence back to the
//! inputs that fall inside it.
//!
//! Sentences are anchored with a cursor that only moves forward, so a
//! phrase that repeats ("thank you ... thank you") always resolves to the
//! occurrence that follows the previous sentence.

use super::{CoarseSentence, SentenceRecord};
use crate::captions::{CaptionLine, CaptionToken};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default lead-in subtracted from a sentence's first token time.
pub const DEFAULT_LEAD_IN_MS: i64 = 50;

/// Default pad added to a sentence's last token time.
pub const DEFAULT_TRAIL_PAD_MS: i64 = 200;

/// Timing adjustments for the fine-grained aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Milliseconds subtracted from the first token time.
    pub lead_in_ms: i64,
    /// Milliseconds added to the last token time.
    pub trail_pad_ms: i64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            lead_in_ms: DEFAULT_LEAD_IN_MS,
            trail_pad_ms: DEFAULT_TRAIL_PAD_MS,
        }
    }
}

fn latin_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").expect("valid boundary regex"))
}

fn cjk_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?。！？]\s+").expect("valid boundary regex"))
}

/// Split text after every terminal mark that is followed by whitespace.
///
/// The terminal mark stays with its sentence; the whitespace run is
/// dropped. Abbreviations and decimals are not special-cased.
fn split_sentences<'a>(text: &'a str, boundary: &Regex) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for m in boundary.find_iter(text) {
        let terminal_len = m.as_str().chars().next().map_or(1, char::len_utf8);
        pieces.push(&text[last..m.start() + terminal_len]);
        last = m.end();
    }
    pieces.push(&text[last..]);

    pieces
}

/// Running text plus the byte offset and time at which each input begins.
struct TimedText {
    text: String,
    marks: Vec<(usize, i64)>,
}

impl TimedText {
    fn build<'a>(inputs: impl Iterator<Item = (&'a str, i64)>) -> Self {
        let mut text = String::new();
        let mut marks = Vec::new();

        for (piece, time_ms) in inputs {
            if !text.is_empty() {
                text.push(' ');
            }
            marks.push((text.len(), time_ms));
            text.push_str(piece);
        }

        Self { text, marks }
    }

    /// Non-empty sentences paired with their byte offset in the running text.
    fn anchored_sentences(&self, boundary: &Regex) -> Vec<(usize, &str)> {
        let mut cursor = 0;
        let mut anchored = Vec::new();

        for raw in split_sentences(&self.text, boundary) {
            let sentence = raw.trim();
            if sentence.is_empty() {
                continue;
            }
            let Some(found) = self.text[cursor..].find(sentence) else {
                continue;
            };
            let start = cursor + found;
            cursor = start + sentence.len();
            anchored.push((start, sentence));
        }

        anchored
    }
}

/// Align fine-grained tokens into sentence records.
///
/// A sentence spans `[start, start + len)` in the running text; every token
/// whose offset falls in that range belongs to it. Sentences that contain
/// no token start are dropped without consuming an index.
pub fn align_tokens(tokens: &[CaptionToken], config: &AlignConfig) -> Vec<SentenceRecord> {
    let timed = TimedText::build(tokens.iter().map(|t| (t.text.as_str(), t.start_ms)));
    let mut records = Vec::new();
    let mut first_mark = 0;

    for (start, sentence) in timed.anchored_sentences(latin_boundary()) {
        let end = start + sentence.len();

        // Marks are sorted by offset and sentences advance monotonically.
        while first_mark < timed.marks.len() && timed.marks[first_mark].0 < start {
            first_mark += 1;
        }
        let contained = timed.marks[first_mark..]
            .iter()
            .take_while(|(offset, _)| *offset < end);

        let mut bounds: Option<(i64, i64)> = None;
        for &(_, time_ms) in contained {
            bounds = Some(match bounds {
                None => (time_ms, time_ms),
                Some((first, _)) => (first, time_ms),
            });
        }

        let Some((first_ms, last_ms)) = bounds else {
            continue;
        };

        records.push(SentenceRecord {
            index: records.len() + 1,
            start_ms: first_ms - config.lead_in_ms,
            end_ms: last_ms + config.trail_pad_ms,
            text: sentence.to_string(),
        });
    }

    records
}

/// Align whole caption lines into sentences with a single start time.
///
/// Each sentence takes the time of the latest line that begins at or
/// before the sentence. Empty lines are ignored.
pub fn align_lines(lines: &[CaptionLine]) -> Vec<CoarseSentence> {
    let timed = TimedText::build(
        lines
            .iter()
            .map(|l| (l.text.trim(), l.start_ms))
            .filter(|(text, _)| !text.is_empty()),
    );

    timed
        .anchored_sentences(cjk_boundary())
        .into_iter()
        .enumerate()
        .map(|(i, (start, sentence))| {
            let start_ms = timed
                .marks
                .iter()
                .rev()
                .find(|(offset, _)| *offset <= start)
                .map(|&(_, time_ms)| time_ms);

            CoarseSentence {
                index: i + 1,
                start_ms,
                text: sentence.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[(&str, i64)]) -> Vec<CaptionToken> {
        items.iter().map(|&(t, ms)| CaptionToken::new(t, ms)).collect()
    }

    fn lines(items: &[(&str, i64)]) -> Vec<CaptionLine> {
        items.iter().map(|&(t, ms)| CaptionLine::new(t, ms)).collect()
    }

    #[test]
    fn test_split_sentences() {
        let pieces = split_sentences("Hi. How are you?  Fine! ok", latin_boundary());
        assert_eq!(pieces, vec!["Hi.", "How are you?", "Fine!", "ok"]);
    }

    #[test]
    fn test_split_sentences_keeps_unspaced_marks() {
        let pieces = split_sentences("It costs 3.50 dollars. Done", latin_boundary());
        assert_eq!(pieces, vec!["It costs 3.50 dollars.", "Done"]);
    }

    #[test]
    fn test_split_sentences_cjk() {
        let pieces = split_sentences("你好。 再见！ bye", cjk_boundary());
        assert_eq!(pieces, vec!["你好。", "再见！", "bye"]);
    }

    #[test]
    fn test_align_tokens_scenario() {
        let input = tokens(&[
            ("Hello there.", 1000),
            ("How are you?", 2000),
            ("Fine, thanks.", 3500),
        ]);

        let records = align_tokens(&input, &AlignConfig::default());

        assert_eq!(
            records,
            vec![
                SentenceRecord::new(1, 950, 1200, "Hello there."),
                SentenceRecord::new(2, 1950, 2200, "How are you?"),
                SentenceRecord::new(3, 3450, 3700, "Fine, thanks."),
            ]
        );
    }

    #[test]
    fn test_align_tokens_word_level() {
        let input = tokens(&[
            ("So", 0),
            ("today", 300),
            ("we", 600),
            ("start.", 900),
            ("Ready", 1500),
            ("now?", 1800),
        ]);

        let records = align_tokens(&input, &AlignConfig::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], SentenceRecord::new(1, -50, 1100, "So today we start."));
        assert_eq!(records[1], SentenceRecord::new(2, 1450, 2000, "Ready now?"));
    }

    #[test]
    fn test_align_tokens_drops_sentence_without_token_start() {
        // "No." lives entirely inside the first token, so it owns no token start.
        let input = tokens(&[("Yes. No.", 100), ("ok", 400)]);
        let records = align_tokens(&input, &AlignConfig::default());

        assert_eq!(
            records,
            vec![
                SentenceRecord::new(1, 50, 300, "Yes."),
                SentenceRecord::new(2, 350, 600, "ok"),
            ]
        );
    }

    #[test]
    fn test_align_tokens_empty() {
        assert!(align_tokens(&[], &AlignConfig::default()).is_empty());
    }

    #[test]
    fn test_align_tokens_exact_padding() {
        let config = AlignConfig {
            lead_in_ms: 120,
            trail_pad_ms: 30,
        };
        let input = tokens(&[("One", 5000), ("two.", 5400), ("Three.", 7000)]);

        for record in align_tokens(&input, &config) {
            let first = input
                .iter()
                .find(|t| record.text.starts_with(&t.text))
                .unwrap();
            assert_eq!(record.start_ms, first.start_ms - 120);
        }

        let records = align_tokens(&input, &config);
        assert_eq!(records[0].end_ms, 5430);
        assert_eq!(records[1].end_ms, 7030);
    }

    #[test]
    fn test_align_tokens_repeated_phrase_uses_cursor() {
        let input = tokens(&[
            ("thank", 1000),
            ("you.", 1200),
            ("Great", 2000),
            ("show.", 2300),
            ("thank", 9000),
            ("you.", 9200),
        ]);

        let first = align_tokens(&input, &AlignConfig::default());
        let second = align_tokens(&input, &AlignConfig::default());

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first[2], SentenceRecord::new(3, 8950, 9400, "thank you."));
    }

    #[test]
    fn test_align_tokens_indices_dense() {
        let input = tokens(&[
            ("A.", 0),
            ("B.", 100),
            ("C.", 200),
            ("D", 300),
        ]);
        let records = align_tokens(&input, &AlignConfig::default());
        let indices: Vec<usize> = records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert!(records.iter().all(|r| !r.text.trim().is_empty()));
    }

    #[test]
    fn test_align_lines_scenario() {
        let input = lines(&[("Welcome back.", 1000), ("Let's begin the lesson.", 5000)]);
        let sentences = align_lines(&input);

        assert_eq!(
            sentences,
            vec![
                CoarseSentence::new(1, Some(1000), "Welcome back."),
                CoarseSentence::new(2, Some(5000), "Let's begin the lesson."),
            ]
        );
    }

    #[test]
    fn test_align_lines_sentence_spanning_lines() {
        let input = lines(&[
            ("we talked about", 1000),
            ("grammar. Next we", 4000),
            ("look at words.", 7000),
        ]);
        let sentences = align_lines(&input);

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "we talked about grammar.");
        assert_eq!(sentences[0].start_ms, Some(1000));
        // "Next we" begins inside the second line.
        assert_eq!(sentences[1].text, "Next we look at words.");
        assert_eq!(sentences[1].start_ms, Some(4000));
    }

    #[test]
    fn test_align_lines_cjk_punctuation() {
        let input = lines(&[("今天很好。 明天见！", 2000), ("再见。", 3000)]);
        let sentences = align_lines(&input);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[1].text, "明天见！");
        assert_eq!(sentences[1].start_ms, Some(2000));
        assert_eq!(sentences[2].text, "再见。");
        assert_eq!(sentences[2].start_ms, Some(3000));
    }

    #[test]
    fn test_align_lines_skips_blank_lines() {
        let input = lines(&[("   ", 0), ("Only line.", 3000)]);
        let sentences = align_lines(&input);
        assert_eq!(sentences, vec![CoarseSentence::new(1, Some(3000), "Only line.")]);
    }

    #[test]
    fn test_align_lines_empty() {
        assert!(align_lines(&[]).is_empty());
    }
}
