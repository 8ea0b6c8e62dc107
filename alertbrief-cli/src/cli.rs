use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Write a self-contained HTML preview to --output
    Html,
    /// Print the markdown report to stdout
    Markdown,
}

/// Report open Dependabot alerts whose automated update failed
#[derive(Parser)]
#[command(name = "alertbrief", version)]
pub struct Cli {
    /// Repository owner
    #[arg(long, default_value = "cumet04")]
    pub owner: String,

    /// Repository name
    #[arg(long, default_value = "dependabot-issues")]
    pub repo: String,

    /// Number of open alerts to fetch (a single page)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub count: u32,

    /// GitHub token used as a bearer credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub GraphQL endpoint
    #[arg(long, env = "ALERTBRIEF_GRAPHQL_URL", default_value = alertbrief::github::GRAPHQL_URL)]
    pub api_url: String,

    /// Output file for the HTML preview
    #[arg(short, long, default_value = "preview.html")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    pub format: Format,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}
