use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::command::RenderCommand;
use crate::config::RunnerConfig;
use crate::discover::discover_scripts;
use crate::error::{Error, Result};
use crate::job::DiagramJob;

/// Outcome of a single render invocation.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub job: DiagramJob,
    /// Where the script is expected to have written its artifact.
    pub artifact_hint: PathBuf,
    /// The child's exit code, `None` when it was killed by a signal.
    /// Recorded regardless of `check_child_status`.
    pub exit_code: Option<i32>,
}

/// Totals for a bulk run. `failed` stays zero unless `check_child_status`
/// is enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Translates "run one diagram script" or "run all diagram scripts" into
/// sequential child-process invocations, creating output directories as
/// needed.
pub struct DiagramRunner {
    config: RunnerConfig,
}

impl DiagramRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Validate a single-script request and map it to its mirrored job.
    /// Performs no filesystem writes.
    pub fn prepare_one(&self, script: &Path) -> Result<DiagramJob> {
        if !script.is_file() {
            return Err(Error::MissingScript(script.to_path_buf()));
        }

        DiagramJob::mirrored(&self.config, script)
    }

    /// Map every discovered script to its flattened job.
    pub fn jobs(&self) -> Result<Vec<DiagramJob>> {
        let scripts = discover_scripts(&self.config)?;
        info!(
            "discovered {} diagram scripts under {}",
            scripts.len(),
            self.config.source_root.display()
        );

        Ok(scripts
            .iter()
            .map(|script| DiagramJob::flattened(&self.config, script))
            .collect())
    }

    /// Create the job's output directories, then spawn its script and
    /// block until the child exits. A non-zero exit becomes
    /// `Error::ChildFailed` only when `check_child_status` is set;
    /// otherwise the status is recorded in the report and ignored.
    pub fn run_job(&self, job: DiagramJob) -> Result<JobReport> {
        job.ensure_output_dirs()?;

        let command = RenderCommand::for_script(&self.config, &job.script)?;
        let status = command.execute()?;
        debug!("{} exited with {status}", job.script.display());

        if self.config.check_child_status && !status.success() {
            return Err(Error::ChildFailed {
                script: job.script,
                code: status.code().unwrap_or(1),
            });
        }

        let artifact_hint = job.artifact_hint(&self.config.image_extension);
        Ok(JobReport {
            job,
            artifact_hint,
            exit_code: status.code(),
        })
    }

    /// Run a single script. Its output base mirrors the script's location
    /// under the source root.
    pub fn run_one(&self, script: &Path) -> Result<JobReport> {
        let job = self.prepare_one(script)?;
        self.run_job(job)
    }

    /// Run every script under the source root, sequentially, each blocking
    /// until its child exits. Output bases use the file stem only, so
    /// same-named scripts in different subdirectories share one base.
    pub fn run_all(&self) -> Result<BatchSummary> {
        fs::create_dir_all(&self.config.output_root)?;

        let mut summary = BatchSummary::default();
        for job in self.jobs()? {
            summary.total += 1;
            info!("rendering {}", job.script.display());

            match self.run_job(job) {
                Ok(_) => summary.succeeded += 1,
                Err(Error::ChildFailed { script, code }) => {
                    warn!("diagram script {} exited with code {code}", script.display());
                    summary.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(summary)
    }
}
