//! ytx - YouTube study projects
//!
//! A CLI tool that turns a YouTube video into a local project directory:
//! metadata, video, bilingual captions, sentence-aligned transcripts, an LLM
//! overview with a language difficulty profile, and an HTML preview page.
//!
//! # Architecture
//!
//! - `captions` - SRT and JSON3 caption parsing, SRT writing, bilingual merge
//! - `sentences` - sentence segmentation and timestamp alignment
//! - `youtube` - video IDs, yt-dlp metadata and caption downloads
//! - `project` - the per-video project directory and `project.json`
//! - `download` - video and caption track downloads
//! - `overview` - metadata card plus LLM summary and difficulty
//! - `summary` - LLM chapter summary
//! - `preview` - HTML preview page
//! - `llm` - chat completion seam
//! - `config` - settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use ytx::captions::parse_json3;
//! use ytx::sentences::{align_tokens, format_record, AlignConfig};
//!
//! fn main() -> ytx::Result<()> {
//!     let json = std::fs::read_to_string("abc123def45.en.json3")?;
//!     let tokens = parse_json3(&json)?;
//!
//!     for record in align_tokens(&tokens, &AlignConfig::default()) {
//!         println!("{}", format_record(&record));
//!     }
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod llm;
pub mod openai;
pub mod overview;
pub mod preview;
pub mod project;
pub mod sentences;
pub mod summary;
pub mod youtube;

#[cfg(test)]
mod test_support;

pub use error::{Result, YtxError};
