mod cli;

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use alertbrief::{GitHubAlertSource, GitHubClient, PageRequest, ReportOptions, Reporter, preview};
use cli::{Cli, Format};

fn init_tracing(level: LevelFilter, json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let client = GitHubClient::new(args.github_token)?.with_graphql_url(args.api_url);
    if !client.has_token() {
        warn!("no GitHub token provided; the request will be unauthenticated");
    }

    let options = ReportOptions {
        owner: args.owner,
        repo: args.repo,
        page: PageRequest::first(args.count),
    };
    let reporter = Reporter::new(GitHubAlertSource::new(client), options);
    let report = reporter
        .build()
        .await
        .context("failed to build alert report")?;

    match args.format {
        Format::Html => preview::emit(&args.output, &report.content)
            .with_context(|| format!("failed to emit {}", args.output.display()))?,
        Format::Markdown => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose.tracing_level_filter(), args.log_json);

    if let Err(e) = run(args).await {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
