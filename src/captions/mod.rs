//! Caption parsing for ytx.
//!
//! Turns downloaded caption files into the timed inputs the sentence aligner
//! consumes. Two formats are supported:
//!
//! - **SRT** cues, one timestamp per line of text (coarse timing).
//! - **JSON3** events, YouTube's native timed-text format, where every
//!   segment carries its own offset (fine timing).

mod json3;
mod merge;
mod models;
mod srt;

pub use json3::{parse_json3, read_json3, unescape_html};
pub use merge::{merge_bilingual, merge_srt_files};
pub use models::{is_annotation, CaptionLine, CaptionToken, SrtCue};
pub use srt::{cues_to_lines, format_srt, format_srt_timestamp, parse_srt, read_srt};
