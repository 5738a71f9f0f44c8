//! Configuration module for ytx.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{OverviewPrompts, Prompts, SummaryPrompts};
pub use settings::{
    GeneralSettings, LlmSettings, PreviewSettings, PromptSettings, Settings, YoutubeSettings,
};
