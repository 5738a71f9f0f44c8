//! Sentences command - build a sentence file from a local caption file.

use crate::cli::Output;
use crate::config::Settings;
use crate::sentences::{sentences_from_json3, sentences_from_srt};
use anyhow::{bail, Result};

/// Run the sentences command.
pub fn run_sentences(input: &str, settings: &Settings) -> Result<()> {
    let path = Settings::expand_path(input);
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let out = match extension.as_str() {
        "srt" => sentences_from_srt(&path)?,
        "json3" => sentences_from_json3(&path, &settings.alignment)?,
        _ => {
            Output::error(&format!("Unsupported caption file: {}", path.display()));
            bail!("expected a .srt or .json3 file");
        }
    };

    Output::success(&format!("Sentences written to {}", out.display()));
    Ok(())
}
