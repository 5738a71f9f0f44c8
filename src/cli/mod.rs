//! CLI module for ytx.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ytx - YouTube study projects
///
/// Turns a YouTube video into a local project directory with captions,
/// sentence-aligned transcripts, an LLM overview and an HTML preview page.
#[derive(Parser, Debug)]
#[command(name = "ytx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project directory for a YouTube video
    Init {
        /// YouTube URL or 11-character video ID
        url: String,

        /// Directory that holds project directories (overrides general.videos_dir)
        #[arg(long)]
        prefix: Option<String>,

        /// Replace an existing project
        #[arg(short, long)]
        force: bool,
    },

    /// Download the video and the bilingual caption tracks
    Download {
        /// Re-download files that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Show the video overview with summary and language difficulty
    Overview {
        /// Rebuild instead of using the saved overview
        #[arg(short, long)]
        force: bool,

        /// Print as a table instead of a text card
        #[arg(long)]
        table: bool,
    },

    /// Generate a chapter summary of the video
    Summary {
        /// Re-download the captions
        #[arg(short, long)]
        force: bool,
    },

    /// Render the HTML preview page with clickable sentences
    Preview {
        /// Re-download the captions
        #[arg(short, long)]
        force: bool,
    },

    /// Build a sentence file from a local .srt or .json3 caption file
    Sentences {
        /// Caption file path
        input: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_init() {
        let cli = Cli::parse_from(["ytx", "-vv", "init", "https://youtu.be/abc123def45", "-f"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project, ".");
        match cli.command {
            Commands::Init { url, prefix, force } => {
                assert_eq!(url, "https://youtu.be/abc123def45");
                assert!(prefix.is_none());
                assert!(force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_project_flag() {
        let cli = Cli::parse_from(["ytx", "overview", "-C", "videos/abc123def45", "--table"]);
        assert_eq!(cli.project, "videos/abc123def45");
        assert!(matches!(
            cli.command,
            Commands::Overview {
                force: false,
                table: true
            }
        ));
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["ytx", "-c", "/tmp/ytx.toml", "config", "path"]);
        assert_eq!(cli.config.as_deref(), Some("/tmp/ytx.toml"));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }
}
