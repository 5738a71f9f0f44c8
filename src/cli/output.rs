//! CLI output formatting utilities.

use console::{measure_text_width, style};
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print field/value rows as an aligned two-column table.
    pub fn table(rows: &[(&str, String)]) {
        print!("{}", format_table(rows));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Lay out rows with keys padded to the widest key; continuation lines of
/// multi-line values are indented under the value column.
fn format_table(rows: &[(&str, String)]) -> String {
    let width = rows
        .iter()
        .map(|(k, _)| measure_text_width(k))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (key, value) in rows {
        let pad = " ".repeat(width - measure_text_width(key));
        let mut lines = value.lines();
        let first = lines.next().unwrap_or("");
        out.push_str(&format!("  {}{}  {}\n", style(key).cyan(), pad, first));
        for line in lines {
            out.push_str(&format!("  {}  {}\n", " ".repeat(width), line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_alignment() {
        console::set_colors_enabled(false);
        let rows = vec![
            ("Title", "Moving".to_string()),
            ("Views", "184,230".to_string()),
            ("Summary", "Line one\nLine two".to_string()),
        ];
        assert_eq!(
            format_table(&rows),
            "  Title    Moving\n  Views    184,230\n  Summary  Line one\n           Line two\n"
        );
    }
}
