//! The video overview record and its text renderings.

use crate::project::Project;
use crate::youtube::VideoMetadata;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder for fields with no data.
pub const NOT_AVAILABLE: &str = "N/A";

/// Spoken language of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    /// Region-style code such as `en-EN`.
    pub code: String,
}

impl Default for Language {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            code: NOT_AVAILABLE.to_string(),
        }
    }
}

impl Language {
    /// Build from a bare language code (`en` -> English, `en-EN`).
    pub fn from_code(code: &str) -> Self {
        let name = match code {
            "en" => "English",
            "zh" => "中文",
            "ja" => "日本語",
            "ko" => "한국어",
            "es" => "Español",
            "fr" => "Français",
            "de" => "Deutsch",
            "it" => "Italiano",
            "pt" => "Português",
            "ru" => "Русский",
            other => return Self {
                name: other.to_uppercase(),
                code: format!("{}-{}", other, other.to_uppercase()),
            },
        };
        Self {
            name: name.to_string(),
            code: format!("{}-{}", code, code.to_uppercase()),
        }
    }
}

/// Language difficulty profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    /// CEFR level, A1 to C2.
    pub cefr: String,
    /// Percentage of the video covered by speech.
    pub voice_coverage: u32,
    /// Words per minute.
    pub wpm: u32,
    pub syntax: String,
    pub style: String,
    pub vocab: String,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            cefr: NOT_AVAILABLE.to_string(),
            voice_coverage: 0,
            wpm: 0,
            syntax: NOT_AVAILABLE.to_string(),
            style: NOT_AVAILABLE.to_string(),
            vocab: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Partial difficulty values reported by the model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DifficultyUpdate {
    pub cefr: Option<String>,
    pub wpm: Option<f64>,
    pub voice_coverage: Option<f64>,
    pub syntax: Option<String>,
    pub style: Option<String>,
    pub vocab: Option<String>,
}

impl Difficulty {
    /// Return a copy with the usable fields of `update` applied.
    ///
    /// Text fields apply when non-empty and not `N/A`; numeric fields apply
    /// when greater than zero.
    pub fn with_overrides(&self, update: &DifficultyUpdate) -> Self {
        fn text(current: &str, new: &Option<String>) -> String {
            match new.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() && v != NOT_AVAILABLE => v.to_string(),
                _ => current.to_string(),
            }
        }
        fn number(current: u32, new: Option<f64>) -> u32 {
            match new {
                Some(v) if v > 0.0 => v.round() as u32,
                _ => current,
            }
        }

        Self {
            cefr: text(&self.cefr, &update.cefr),
            voice_coverage: number(self.voice_coverage, update.voice_coverage),
            wpm: number(self.wpm, update.wpm),
            syntax: text(&self.syntax, &update.syntax),
            style: text(&self.style, &update.style),
            vocab: text(&self.vocab, &update.vocab),
        }
    }
}

/// Summary card for a video project, saved as `overview.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub title: String,
    /// `YYYY-MM-DD` when known.
    pub published_at: String,
    pub duration: String,
    pub author: String,
    pub subscribers: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub summary: String,
    pub language: Language,
    pub difficulty: Difficulty,
}

impl Default for Overview {
    fn default() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            published_at: NOT_AVAILABLE.to_string(),
            duration: NOT_AVAILABLE.to_string(),
            author: NOT_AVAILABLE.to_string(),
            subscribers: 0,
            views: 0,
            likes: 0,
            comments: 0,
            summary: String::new(),
            language: Language::default(),
            difficulty: Difficulty::default(),
        }
    }
}

impl Overview {
    /// Build the metadata-only overview of a project.
    pub fn from_metadata(project: &Project, metadata: &VideoMetadata) -> Self {
        let or_na = |v: Option<&str>| v.unwrap_or(NOT_AVAILABLE).to_string();
        let lang = if project.lang.is_empty() {
            "en"
        } else {
            project.lang.as_str()
        };

        Self {
            title: if metadata.title.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                metadata.title.clone()
            },
            published_at: metadata
                .upload_date
                .as_deref()
                .map(normalize_upload_date)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            duration: or_na(metadata.duration_string.as_deref()),
            author: or_na(metadata.uploader.as_deref()),
            subscribers: metadata.channel_follower_count.unwrap_or(0),
            views: metadata.view_count.unwrap_or(0),
            likes: metadata.like_count.unwrap_or(0),
            comments: metadata.comment_count.unwrap_or(0),
            summary: NOT_AVAILABLE.to_string(),
            language: Language::from_code(lang),
            difficulty: Difficulty::default(),
        }
    }

    /// Return a copy with a model-written summary and difficulty applied.
    pub fn with_analysis(&self, summary: Option<&str>, difficulty: Option<&DifficultyUpdate>) -> Self {
        let mut next = self.clone();
        if let Some(s) = summary.map(str::trim).filter(|s| !s.is_empty()) {
            next.summary = s.to_string();
        }
        if let Some(update) = difficulty {
            next.difficulty = self.difficulty.with_overrides(update);
        }
        next
    }

    /// Multi-line text card.
    pub fn to_pretty_text(&self) -> String {
        let d = &self.difficulty;
        [
            format!("# Title: {}", self.title),
            format!(
                "# Published: {} | Duration: {} | Language: {} ({})",
                format_date(&self.published_at),
                self.duration,
                self.language.name,
                self.language.code
            ),
            format!(
                "# Author: {} ({} subscribers)",
                self.author,
                format_number(self.subscribers)
            ),
            format!(
                "# Views: {} | Likes: {} | Comments: {}",
                group_thousands(self.views),
                format_number(self.likes),
                self.comments
            ),
            format!(
                "# Difficulty: CEFR {} | Voice coverage: {}% | Speed: {} WPM | Syntax: {} | Style: {} | Vocabulary: {}",
                d.cefr, d.voice_coverage, d.wpm, d.syntax, d.style, d.vocab
            ),
            format!("# Summary: {}", self.summary),
        ]
        .join("\n")
    }

    /// Field/value rows for table output.
    pub fn table_rows(&self) -> Vec<(&'static str, String)> {
        let d = &self.difficulty;
        vec![
            ("Title", self.title.clone()),
            (
                "Author",
                format!("{} ({} subscribers)", self.author, format_number(self.subscribers)),
            ),
            ("Published", format_date(&self.published_at)),
            (
                "Language",
                format!("{} ({})", self.language.name, self.language.code),
            ),
            ("Duration", self.duration.clone()),
            ("Views", group_thousands(self.views)),
            ("Likes", format_number(self.likes)),
            ("Comments", self.comments.to_string()),
            ("CEFR level", d.cefr.clone()),
            ("Voice coverage", format!("{}%", d.voice_coverage)),
            ("Speed (WPM)", d.wpm.to_string()),
            ("Syntax", d.syntax.clone()),
            ("Style", d.style.clone()),
            ("Vocabulary", d.vocab.clone()),
            (
                "Summary",
                if self.summary.is_empty() {
                    "(no summary)".to_string()
                } else {
                    self.summary.clone()
                },
            ),
        ]
    }
}

/// `YYYYMMDD` -> `YYYY-MM-DD`; other shapes pass through.
pub fn normalize_upload_date(raw: &str) -> String {
    if raw.len() == 8 && raw.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..])
    } else {
        raw.to_string()
    }
}

/// Abbreviate counts: `8432` -> `8.4K`, `2500000` -> `2.5M`.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Full count with thousands separators: `184230` -> `184,230`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `2023-08-15` -> `Aug 15, 2023`; unparseable input passes through.
pub fn format_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}
