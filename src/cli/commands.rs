//! CLI command implementations

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use serde::Serialize;
use std::io::{self, Read, Write};

use crate::cli::args::{Cli, ConfigCommand};
use crate::config::Settings;
use crate::content::SourceKind;
use crate::llm::SummaryStyle;
use crate::service::SummaryService;
use crate::storage::{Database, Summary};

/// Summarize input and store the result for `user`
pub async fn summarize(
    settings: &Settings,
    user: &str,
    input: &str,
    kind: &str,
    style: &str,
) -> Result<()> {
    let kind: SourceKind = kind.parse().map_err(user_facing)?;
    let style: SummaryStyle = style.parse().map_err(user_facing)?;

    let input = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read input from stdin")?;
        buf
    } else {
        input.to_string()
    };

    let service = SummaryService::from_settings(settings).map_err(user_facing)?;
    let summary = service
        .submit(user, kind, style, &input)
        .await
        .map_err(user_facing)?;

    println!(
        "Summary #{} ({}, {})",
        summary.id,
        summary.source_kind.label(),
        summary.style.label()
    );
    println!("Source: {}", summary.original_source);
    println!();
    println!("{}", summary.summary_text);

    Ok(())
}

/// List the user's summaries, newest first
pub fn show_history(settings: &Settings, user: &str, limit: Option<usize>) -> Result<()> {
    let service = SummaryService::from_settings(settings).map_err(user_facing)?;
    let summaries = service
        .history(user, limit.unwrap_or(settings.history.limit))
        .map_err(user_facing)?;

    if summaries.is_empty() {
        println!("No summaries found");
        return Ok(());
    }

    println!(
        "{:<6} {:<8} {:<16} {:<17} {}",
        "ID", "Source", "Style", "Created", "Original"
    );
    println!("{}", "-".repeat(90));

    for summary in summaries {
        println!(
            "{:<6} {:<8} {:<16} {:<17} {}",
            summary.id,
            summary.source_kind.label(),
            summary.style.label(),
            summary.created_at.format("%Y-%m-%d %H:%M"),
            truncate(&one_line(&summary.original_source), 40)
        );
    }

    Ok(())
}

/// Print one summary in full
pub fn show_summary(settings: &Settings, user: &str, id: i64, json: bool) -> Result<()> {
    let service = SummaryService::from_settings(settings).map_err(user_facing)?;
    let summary = service.get(user, id).map_err(user_facing)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print!("{}", render_summary(&summary));
    Ok(())
}

/// Delete one of the user's summaries
pub fn delete_summary(settings: &Settings, user: &str, id: i64) -> Result<()> {
    let service = SummaryService::from_settings(settings).map_err(user_facing)?;
    service.delete(user, id).map_err(user_facing)?;
    println!("Summary {} deleted", id);
    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&redacted(settings))?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Print completion script for the requested shell to stdout.
pub fn print_completions(shell: Shell) {
    write_completions(shell, &mut io::stdout());
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, command_name, out);
}

#[derive(Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
}

#[derive(Serialize)]
struct DoctorReport {
    user: String,
    checks: Vec<DoctorCheck>,
}

/// Run diagnostic checks to help troubleshoot local setup issues.
pub fn run_doctor(settings: &Settings, user: &str, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings, user);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("ringkas doctor");
    println!("user: {}", report.user);
    println!();

    for check in &report.checks {
        println!("{:<10} {:<8} {}", check.name, check.status, check.detail);
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings, user: &str) -> DoctorReport {
    let mut checks = Vec::new();

    checks.push(match Settings::config_path() {
        Ok(path) if path.exists() => DoctorCheck {
            name: "config",
            status: "ok",
            detail: path.display().to_string(),
        },
        Ok(path) => DoctorCheck {
            name: "config",
            status: "default",
            detail: format!("{} (not created, using defaults)", path.display()),
        },
        Err(e) => DoctorCheck {
            name: "config",
            status: "error",
            detail: e.to_string(),
        },
    });

    let db_path = settings.database_path();
    checks.push(
        match Database::open(settings).and_then(|db| Ok((db.schema_version()?, db.count_summaries()?))) {
            Ok((version, count)) => DoctorCheck {
                name: "database",
                status: "ok",
                detail: format!(
                    "{} (schema v{}, {} summaries)",
                    db_path.display(),
                    version,
                    count
                ),
            },
            Err(e) => DoctorCheck {
                name: "database",
                status: "error",
                detail: format!("{}: {:#}", db_path.display(), e),
            },
        },
    );

    let has_key = !settings.llm.api_key.trim().is_empty();
    checks.push(DoctorCheck {
        name: "llm",
        status: if has_key { "ok" } else { "missing" },
        detail: if has_key {
            format!("{} ({})", settings.llm.provider, settings.llm.model)
        } else {
            "API key not set (llm.api_key or RINGKAS_GEMINI_API_KEY)".to_string()
        },
    });

    DoctorReport {
        user: user.to_string(),
        checks,
    }
}

// Helper functions

/// Convert a domain error into the message shown on the terminal.
fn user_facing(err: crate::Error) -> anyhow::Error {
    tracing::debug!(error = ?err, "Request failed");
    anyhow::anyhow!(err.user_message())
}

fn redacted(settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    if !settings.llm.api_key.is_empty() {
        settings.llm.api_key = "********".to_string();
    }
    settings
}

fn render_summary(summary: &Summary) -> String {
    format!(
        "ID: {}\nSource: {} ({})\nStyle: {}\nCreated: {}\n\n{}\n",
        summary.id,
        summary.original_source,
        summary.source_kind.label(),
        summary.style.label(),
        summary.created_at.format("%Y-%m-%d %H:%M"),
        summary.summary_text
    )
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }

    #[test]
    fn redacted_hides_api_key() {
        let mut settings = Settings::default();
        settings.llm.api_key = "secret".to_string();
        let shown = toml::to_string_pretty(&redacted(&settings)).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("********"));
    }

    #[test]
    fn completions_reference_binary_name() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut out);
        assert!(String::from_utf8_lossy(&out).contains("ringkas"));
    }

    #[test]
    fn rendered_summary_includes_labels() {
        let summary = Summary {
            id: 7,
            user_id: "alice".to_string(),
            source_kind: SourceKind::Youtube,
            style: SummaryStyle::ExplainLikeFive,
            original_source: "https://youtu.be/abc123".to_string(),
            processed_text: "transcript".to_string(),
            summary_text: "It is about rockets.".to_string(),
            created_at: Utc::now(),
        };

        let rendered = render_summary(&summary);
        assert!(rendered.starts_with("ID: 7\n"));
        assert!(rendered.contains("(YouTube)"));
        assert!(rendered.contains("Style: ELI5"));
        assert!(rendered.ends_with("It is about rockets.\n"));
    }
}
