//! Prompt templates for ytx.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub overview: OverviewPrompts,
    pub summary: SummaryPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for the summary + language difficulty analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewPrompts {
    pub system: String,
    pub user: String,
}

impl Default for OverviewPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a video content analyst helping language learners pick suitable material. Analyze the provided captions and produce:

1. summary: a 200-300 word summary of the video's main content and key points
2. difficulty: an assessment of the spoken language
   - cefr: one of A1, A2, B1, B2, C1, C2
   - wpm: estimated speaking rate in words per minute
   - voice_coverage: percentage of the video covered by speech, based on caption completeness
   - syntax: sentence complexity (simple / moderate / complex)
   - style: register (formal / natural / academic / colloquial ...)
   - vocab: vocabulary profile (basic / technical / idiomatic / slang ...)

Respond with a JSON object only, in this shape:
{
  "summary": "...",
  "difficulty": {
    "cefr": "B2",
    "wpm": 150,
    "voice_coverage": 85,
    "syntax": "moderate",
    "style": "natural",
    "vocab": "standard vocabulary"
  }
}"#
            .to_string(),

            user: r#"Analyze the following video captions.

Title: {{title}}
Author: {{author}}
Duration: {{duration}}
Language: {{language}}

Captions:
{{transcript}}

Base your analysis on the information above."#
                .to_string(),
        }
    }
}

/// Prompts for the chapter summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: String::new(),
            user: r#"Below are the captions of a video. Split the content into chapters (no more than 5) and describe each chapter in detail, covering its key content. Finish with the core takeaways.

### Captions:
{{transcript}}

### Output format:
- A numbered chapter list, each with its approximate time range, content and key points
- Plain text only, no markdown

### Example:
1. How AI evolved and where it is heading (00:00 - 00:30)
The speaker reviews how artificial intelligence changed over the past year and argues that it will reshape most industries within a few years.

2. Ads turning into business agents (05:00 - 05:30)
The speaker explains how automation simplifies ad delivery: a business sets goals and a budget and the system optimizes for results. Every business is expected to run its own AI agent for support and sales."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let overview_path = custom_path.join("overview.toml");
            if overview_path.exists() {
                let content = std::fs::read_to_string(&overview_path)?;
                prompts.overview = toml::from_str(&content)?;
            }

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.overview.system.contains("\"difficulty\""));
        assert!(prompts.overview.user.contains("{{transcript}}"));
        assert!(prompts.summary.user.contains("{{transcript}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_with_custom_prefers_provided() {
        let mut custom = HashMap::new();
        custom.insert("audience".to_string(), "beginners".to_string());
        custom.insert("title".to_string(), "ignored".to_string());
        let prompts = Prompts {
            variables: custom,
            ..Prompts::default()
        };

        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Moving to New York".to_string());

        let rendered = prompts.render_with_custom("{{title}} for {{audience}}", &vars);
        assert_eq!(rendered, "Moving to New York for beginners");
    }

    #[test]
    fn test_load_custom_overview_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("overview.toml"),
            "system = \"Be brief.\"\nuser = \"{{transcript}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.overview.system, "Be brief.");
        assert!(prompts.summary.user.contains("chapters"));
    }
}
