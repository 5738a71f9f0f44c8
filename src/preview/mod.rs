//! HTML preview page: the video next to its clickable, time-aligned sentences.

use crate::error::{Result, YtxError};
use crate::project::load_with_metadata;
use crate::sentences::{
    pad_time, parse_time_ms, read_sentences, sentences_from_json3, AlignConfig, SentenceLine,
};
use crate::youtube::{fetch_captions, CaptionFormat, YtDlp};
use regex::{Captures, Regex};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, instrument};

/// Built-in page template.
pub const DEFAULT_TEMPLATE: &str = include_str!("template.html");

/// File name of the generated page.
pub const PREVIEW_FILE: &str = "preview.html";

/// One sentence as the page script sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSentence {
    pub id: usize,
    /// Zero-padded `HH:MM:SS.ffffff`.
    pub start: String,
    pub end: String,
    pub text: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

impl PreviewSentence {
    /// Convert a sentence line; lines without a start time are skipped.
    pub fn from_line(line: &SentenceLine) -> Option<Self> {
        let start = line.start.as_deref()?;
        let end = line.end.as_deref().unwrap_or(start);
        let seconds = |t: &str| parse_time_ms(t).map(|ms| ms as f64 / 1000.0).unwrap_or(0.0);

        Some(Self {
            id: line.index,
            start: pad_time(start),
            end: pad_time(end),
            text: line.text.clone(),
            start_seconds: seconds(start),
            end_seconds: seconds(end),
        })
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn sentence_items(sentences: &[PreviewSentence]) -> String {
    sentences
        .iter()
        .map(|s| {
            format!(
                "    <li class=\"sentence\" data-id=\"{}\" data-start=\"{}\" data-end=\"{}\">\
                 <span class=\"time\">{}</span><span class=\"text\">{}</span></li>",
                s.id,
                s.start_seconds,
                s.end_seconds,
                escape_html(&s.start),
                escape_html(&s.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the page from a template with `{{title}}`, `{{video_path}}`,
/// `{{sentences}}` and `{{sentences_json}}` placeholders.
pub fn render(
    template: &str,
    title: &str,
    video_path: &str,
    sentences: &[PreviewSentence],
) -> Result<String> {
    if !template.contains("{{sentences}}") && !template.contains("{{sentences_json}}") {
        return Err(YtxError::Template(
            "template has neither {{sentences}} nor {{sentences_json}}".to_string(),
        ));
    }

    // `</` inside a <script> block would end it early.
    let json = serde_json::to_string(sentences)?.replace("</", "<\\/");

    let vars = [
        ("title", escape_html(title)),
        ("video_path", escape_html(video_path)),
        ("sentences_json", json),
        ("sentences", sentence_items(sentences)),
    ];

    // One pass over the template: substituted values are never scanned again.
    let html = placeholder_regex().replace_all(template, |caps: &Captures| {
        vars.iter()
            .find(|(key, _)| *key == &caps[1])
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| caps[0].to_string())
    });
    Ok(html.into_owned())
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"))
}

fn load_template(custom: Option<&Path>) -> Result<String> {
    match custom {
        Some(path) if path.exists() => Ok(std::fs::read_to_string(path)?),
        Some(path) => Err(YtxError::NotFound(format!(
            "Preview template not found: {}",
            path.display()
        ))),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Build the preview page of a project.
///
/// Fetches JSON3 captions, writes the fine-aligned sentence file, and
/// renders `preview.html` in the project directory.
#[instrument(skip(ytdlp, align))]
pub async fn run(
    ytdlp: &YtDlp,
    align: &AlignConfig,
    project_dir: &Path,
    caption_lang: &str,
    template: Option<&Path>,
    force: bool,
) -> Result<PathBuf> {
    let (project, metadata) = load_with_metadata(project_dir)?;

    let captions = fetch_captions(
        ytdlp,
        project_dir,
        &metadata,
        caption_lang,
        CaptionFormat::Json3,
        force,
    )
    .await?;
    let sentence_file = sentences_from_json3(&captions, align)?;
    let sentences: Vec<PreviewSentence> = read_sentences(&sentence_file)?
        .iter()
        .filter_map(PreviewSentence::from_line)
        .collect();

    let html = render(
        &load_template(template)?,
        &project.title,
        &project.video_file(),
        &sentences,
    )?;

    let out_path = project_dir.join(PREVIEW_FILE);
    std::fs::write(&out_path, html)?;
    info!(
        "Rendered {} sentences into {}",
        sentences.len(),
        out_path.display()
    );
    Ok(out_path)
}
