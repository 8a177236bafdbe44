mod banner;
mod present;

use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use ytubedata_extract::{TargetKind, Workflow};
use ytubedata_innertube::MetadataClient;

use crate::present::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "ytubedata")]
#[command(about = "Extract public metadata for a YouTube video or channel")]
struct Cli {
    /// Video or channel URL.
    url: String,

    /// What the URL points at.
    #[arg(short = 't', long = "type", value_enum, default_value_t = LinkType::Video)]
    link_type: LinkType,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// Output file (json and csv formats).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the banner.
    #[arg(long)]
    no_banner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LinkType {
    Video,
    Channel,
}

impl From<LinkType> for TargetKind {
    fn from(value: LinkType) -> Self {
        match value {
            LinkType::Video => TargetKind::Video,
            LinkType::Channel => TargetKind::Channel,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match entry(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "unexpected failure");
            eprintln!("Unexpected error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn entry(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = ytubedata_core::load_app_config()?;
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if !cli.no_banner {
        banner::print_banner();
    }

    let workflow = Workflow::from_config(&config)?;

    until_interrupted(run(&cli, &workflow), interrupted()).await
}

/// Drives `work` to completion unless `signal` resolves first.
///
/// A user interrupt is a normal stop and exits successfully.
async fn until_interrupted(
    work: impl Future<Output = anyhow::Result<()>>,
    signal: impl Future<Output = ()>,
) -> anyhow::Result<ExitCode> {
    tokio::select! {
        result = work => {
            result?;
            Ok(ExitCode::SUCCESS)
        }
        () = signal => {
            tracing::warn!("interrupted by user");
            eprintln!("\nStopped by user.");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

/// Fetches the record for `cli.url` and renders it.
///
/// An absent record is not an error: the workflow has already logged the
/// reason and nothing is rendered.
async fn run<C: MetadataClient>(cli: &Cli, workflow: &Workflow<C>) -> anyhow::Result<()> {
    let Some(record) = workflow.fetch(cli.link_type.into(), &cli.url).await else {
        eprintln!("No metadata could be extracted for {}", cli.url);
        return Ok(());
    };

    if let Some(note) = record.note() {
        tracing::info!(note, "record produced by the fallback tier");
    }

    let written = present::render(
        &record,
        cli.format,
        cli.output.as_deref(),
        &mut std::io::stdout(),
    )?;
    for path in written {
        println!("Saved data to {}", path.display());
    }
    Ok(())
}
