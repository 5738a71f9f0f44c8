//! ytx CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ytx::cli::{commands, Cli, Commands};
use ytx::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging; -v flags win over the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ytx={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let project_dir = PathBuf::from(&cli.project);

    // Execute command
    match &cli.command {
        Commands::Init { url, prefix, force } => {
            commands::run_init(url, prefix.as_deref(), *force, &settings).await?;
        }

        Commands::Download { force } => {
            commands::run_download(&project_dir, *force, &settings).await?;
        }

        Commands::Overview { force, table } => {
            commands::run_overview(&project_dir, *force, *table, &settings).await?;
        }

        Commands::Summary { force } => {
            commands::run_summary(&project_dir, *force, &settings).await?;
        }

        Commands::Preview { force } => {
            commands::run_preview(&project_dir, *force, &settings).await?;
        }

        Commands::Sentences { input } => {
            commands::run_sentences(input, &settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, config_path.as_ref())?;
        }
    }

    Ok(())
}
