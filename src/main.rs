use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use resegment::cli::Cli;
use resegment::config::resolve_options;
use resegment::transcript::{load_transcript, render, write_output};
use resegment::{split_segments, SplitMode};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    cli.split
        .validate()
        .context("Failed to validate command-line arguments")?;

    let options = resolve_options(
        cli.split.options_file.as_deref(),
        cli.split.options_json.as_deref(),
        &cli.split.overrides(),
    )
    .context("Failed to resolve split options")?;
    if options.mode == SplitMode::Unrecognized {
        warn!("unrecognized split mode; segments will pass through unchanged");
    }

    let transcript = load_transcript(cli.input.as_deref()).context("Failed to load transcript")?;
    info!(
        segments = transcript.segments.len(),
        mode = options.mode.as_str(),
        "loaded transcript"
    );

    let segments = split_segments(&transcript.segments, &options);
    info!(segments = segments.len(), "resegmented transcript");

    let rendered = render(&segments, cli.format)?;
    write_output(&rendered, cli.output.as_deref())?;

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
