use std::fs;

use anyhow::{Context, Result};
use tracing::debug;

use diagram_runner_core::{DiagramRunner, Error, RenderCommand, RunnerConfig};

pub fn run_all_command(config: &RunnerConfig, dry_run: bool) -> Result<()> {
    let runner = DiagramRunner::new(config.clone());

    if dry_run {
        for job in runner.jobs()? {
            let command = RenderCommand::for_script(config, &job.script)?;
            println!("{}", command.to_shell_command());
        }
        return Ok(());
    }

    fs::create_dir_all(&config.output_root).with_context(|| {
        format!(
            "Failed to create output root {}",
            config.output_root.display()
        )
    })?;

    let jobs = runner.jobs()?;
    let total = jobs.len();
    let mut failed = 0usize;

    for job in jobs {
        println!("Generating diagram from {}...", job.script.display());

        match runner.run_job(job) {
            Ok(report) => {
                debug!("exit code: {:?}", report.exit_code);
                println!(
                    "Diagram {} generated successfully!",
                    report.artifact_hint.display()
                );
            }
            Err(Error::ChildFailed { script, code }) => {
                eprintln!(
                    "Error: diagram script '{}' exited with code {code}.",
                    script.display()
                );
                failed += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {total} diagram scripts failed.");
        std::process::exit(1);
    }

    println!(
        "All diagrams have been generated and saved to the {} folder.",
        config.output_root.display()
    );
    Ok(())
}
