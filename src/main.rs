//! ringkas - Summarize text, articles, and YouTube videos with AI
//!
//! Entry point for the ringkas CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ringkas::cli::{commands, Cli, Commands};
use ringkas::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            commands::print_completions(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            // Initialize logging
            let default_level = if cli.verbose {
                "debug".to_string()
            } else {
                settings.general.log_level.clone()
            };
            tracing_subscriber::registry()
                .with(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(default_level)),
                )
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            let user = cli
                .user
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .unwrap_or(&settings.general.user)
                .to_string();

            // Execute command
            match command {
                Commands::Summarize { input, kind, style } => {
                    commands::summarize(&settings, &user, &input, &kind, &style).await?;
                }
                Commands::History { limit } => {
                    commands::show_history(&settings, &user, limit)?;
                }
                Commands::Show { id, json } => {
                    commands::show_summary(&settings, &user, id, json)?;
                }
                Commands::Delete { id } => {
                    commands::delete_summary(&settings, &user, id)?;
                }
                Commands::Doctor { json } => {
                    commands::run_doctor(&settings, &user, json)?;
                }
                Commands::Config(config_cmd) => {
                    commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
