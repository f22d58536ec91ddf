#![forbid(unsafe_code)]

//! # Reflow CLI
//!
//! Renders pre-parsed AsciiDoc element trees to canonical source.
//!
//! ## Usage
//!
//! ```bash
//! reflow cluster.json                  # Render to stdout, unwrapped
//! reflow --wrap 80 cluster.json        # Render wrapped at column 80
//! reflow -o out/ docs/*.json           # Write out/<stem>.adoc per input
//! ```

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use reflow::cli::Cli;
use reflow::{Config, Reflow};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = match cli.log_filter() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env("REFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Renders every input. Returns `false` if any document failed.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let config = cli.apply(config);
    let to_stdout = cli.writes_stdout(&config);
    if !to_stdout {
        match &config.output_dir {
            Some(dir) => fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?,
            None => bail!("several inputs need --output-dir or --stdout"),
        }
    }
    debug!(?config, inputs = cli.inputs.len(), to_stdout, "starting");

    let reflow = Reflow::new(config);
    let mut stdout = io::stdout().lock();
    let mut succeeded = true;
    for rendered in reflow.render_all(&cli.inputs) {
        let text = match rendered.result {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error: {}: {err}", rendered.input.display());
                succeeded = false;
                continue;
            }
        };
        let destination = if to_stdout {
            None
        } else {
            reflow.output_path(&rendered.input)
        };
        match destination {
            Some(path) => {
                fs::write(&path, text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(input = %rendered.input.display(), output = %path.display(), "rendered");
            }
            None => stdout.write_all(text.as_bytes())?,
        }
    }
    stdout.flush()?;
    Ok(succeeded)
}
