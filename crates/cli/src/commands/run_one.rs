use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use diagram_runner_core::{DiagramRunner, Error, RenderCommand, RunnerConfig};

pub fn run_one_command(config: &RunnerConfig, script: &Path, dry_run: bool) -> Result<()> {
    debug!("single-script run: {}", script.display());

    let runner = DiagramRunner::new(config.clone());
    let job = match runner.prepare_one(script) {
        Ok(job) => job,
        // A missing script aborts this job only, not the process.
        Err(Error::MissingScript(path)) => {
            eprintln!("Error: diagram script '{}' not found.", path.display());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if dry_run {
        let command = RenderCommand::for_script(config, &job.script)?;
        println!("{}", command.to_shell_command());
        return Ok(());
    }

    println!("Generating diagram from {}...", job.script.display());

    match runner.run_job(job) {
        Ok(report) => {
            println!(
                "Diagram {} generated successfully!",
                report.artifact_hint.display()
            );
            Ok(())
        }
        Err(Error::ChildFailed { script, code }) => {
            eprintln!(
                "Error: diagram script '{}' exited with code {code}.",
                script.display()
            );
            std::process::exit(code);
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to render {}", script.display()))
        }
    }
}
