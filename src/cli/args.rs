//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// ringkas - Summarize text, articles, and YouTube videos with AI
#[derive(Parser, Debug)]
#[command(name = "ringkas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User the summaries belong to (defaults to general.user)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize text, an article URL, or a YouTube video
    Summarize {
        /// Text, URL, or '-' to read from stdin
        input: String,

        /// Source kind (text, url, youtube)
        #[arg(short, long, default_value = "text")]
        kind: String,

        /// Summary style (bullet_points, short_paragraph, explain_like_five)
        #[arg(short, long, default_value = "bullet_points")]
        style: String,
    },

    /// List your recent summaries
    History {
        /// Maximum number of summaries to show (defaults to history.limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a stored summary in full
    Show {
        /// Summary ID
        id: i64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one of your summaries
    Delete {
        /// Summary ID
        id: i64,
    },

    /// Check configuration and storage
    Doctor {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
