use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use diagram_runner_core::RunnerConfig;

use crate::commands::{run_all_command, run_one_command};

/// Batch-generate diagrams from declarative diagram scripts
#[derive(Parser, Debug)]
#[command(name = "diagram-runner")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Path to a single diagram script; omit to run every script under
    /// the source root
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Print each render command without executing it
    #[arg(short, long)]
    pub dry_run: bool,

    /// Fail on a non-zero child exit instead of ignoring it
    #[arg(long)]
    pub check: bool,

    /// Path to a config file (default: nearest .diagram-runner.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured source root
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Override the configured output root
    #[arg(long, value_name = "DIR")]
    pub output_root: Option<PathBuf>,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;
        debug!("resolved config: {config:?}");

        match &self.script {
            Some(script) => run_one_command(&config, script, self.dry_run),
            None => run_all_command(&config, self.dry_run),
        }
    }

    fn resolve_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                RunnerConfig::load_or_default(&cwd)?
            }
        };

        if let Some(root) = &self.source_root {
            config.source_root = root.clone();
        }
        if let Some(root) = &self.output_root {
            config.output_root = root.clone();
        }
        if self.check {
            config.check_child_status = true;
        }

        Ok(config)
    }
}
