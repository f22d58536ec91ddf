//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Render pre-parsed AsciiDoc element trees to canonical source text.
#[derive(Parser, Debug, Clone)]
#[command(name = "reflow", author, version, about)]
pub struct Cli {
    /// Element tree files (.json, .yaml or .yml)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Wrap column (0 disables wrapping)
    #[arg(long, short = 'w', env = "REFLOW_WRAP")]
    pub wrap: Option<usize>,

    /// Configuration file (TOML)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Write rendered documents into this directory
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Write every rendered document to stdout
    #[arg(long)]
    pub stdout: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Applies command-line overrides on top of a loaded configuration.
    #[must_use]
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(wrap) = self.wrap {
            config.wrap = wrap;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        config
    }

    /// Log filter requested by `-v`, if any.
    #[must_use]
    pub fn log_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }

    /// Whether output goes to stdout rather than into files.
    #[must_use]
    pub fn writes_stdout(&self, config: &Config) -> bool {
        self.stdout || (config.output_dir.is_none() && self.inputs.len() == 1)
    }
}
