//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::ConfigError;

/// Extract debug sessions from failed patch operations in a metrics.jsonl log.
///
/// Every failed patch that logged its original file content gets its own
/// debug_session_<N> directory holding the attempted diff and the pre-patch
/// files, so the failure can be reproduced by hand.
#[derive(Debug, Parser)]
#[command(name = "patchdump", version)]
pub struct Cli {
    /// Path to the metrics.jsonl file
    pub metrics_file: PathBuf,

    /// Directory to create debug sessions in [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Load settings from a TOML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective configuration: defaults, then file, then flags.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        Ok(config)
    }
}
