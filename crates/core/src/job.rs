use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::RunnerConfig;
use crate::error::{Error, Result};

/// One (script, output base) pairing processed by a single child-process
/// invocation. Constructed fresh per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramJob {
    /// Path to the diagram script to invoke.
    pub script: PathBuf,
    /// Extension-less path the script is expected to write its artifact
    /// next to.
    pub output_base: PathBuf,
}

impl DiagramJob {
    /// Build a job whose output base mirrors the script's location under
    /// the source root: `diagrams/examples/aws/workers.py` maps to
    /// `output_diagrams/examples/aws/workers`.
    ///
    /// Single-script runs use this mapping.
    pub fn mirrored(config: &RunnerConfig, script: &Path) -> Result<Self> {
        let relative = script
            .strip_prefix(&config.source_root)
            .map_err(|_| Error::OutsideSourceRoot {
                script: script.to_path_buf(),
                source_root: config.source_root.clone(),
            })?;

        Ok(Self {
            script: script.to_path_buf(),
            output_base: config.output_root.join(relative.with_extension("")),
        })
    }

    /// Build a job whose output base keeps only the script's file stem:
    /// `diagrams/examples/aws/workers.py` maps to
    /// `output_diagrams/workers`.
    ///
    /// Bulk runs use this mapping, so two scripts with the same name in
    /// different subdirectories collide on the same output base.
    pub fn flattened(config: &RunnerConfig, script: &Path) -> Self {
        let stem = script.file_stem().unwrap_or_default();

        Self {
            script: script.to_path_buf(),
            output_base: config.output_root.join(stem),
        }
    }

    /// Create the output base's directory chain, output root included.
    /// Safe to repeat.
    pub fn ensure_output_dirs(&self) -> io::Result<()> {
        if let Some(parent) = self.output_base.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Where the script is expected to leave its artifact. Reporting only;
    /// nothing checks that the file exists.
    pub fn artifact_hint(&self, image_extension: &str) -> PathBuf {
        let mut hint = self.output_base.clone().into_os_string();
        hint.push(".");
        hint.push(image_extension);
        PathBuf::from(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config() -> RunnerConfig {
        RunnerConfig::default()
    }

    #[test]
    fn mirrored_strips_extension_and_keeps_subdirectories() {
        let cases = [
            (
                "diagrams/examples/aws/aws-workers.py",
                "output_diagrams/examples/aws/aws-workers",
            ),
            ("diagrams/helm-charts.py", "output_diagrams/helm-charts"),
            (
                "diagrams/examples/k8s/k8s-exposed-3-replicas.py",
                "output_diagrams/examples/k8s/k8s-exposed-3-replicas",
            ),
        ];

        for (script, expected) in cases {
            let job = DiagramJob::mirrored(&config(), Path::new(script)).unwrap();
            assert_eq!(job.output_base, PathBuf::from(expected), "for {script}");
        }
    }

    #[test]
    fn mirrored_rejects_scripts_outside_the_source_root() {
        let err = DiagramJob::mirrored(&config(), Path::new("elsewhere/one.py")).unwrap_err();
        assert!(matches!(err, Error::OutsideSourceRoot { .. }));
    }

    #[test]
    fn flattened_drops_subdirectories() {
        let job = DiagramJob::flattened(&config(), Path::new("diagrams/examples/aws/one.py"));
        assert_eq!(job.output_base, PathBuf::from("output_diagrams/one"));
    }

    #[test]
    fn flattened_jobs_with_the_same_stem_collide() {
        let a = DiagramJob::flattened(&config(), Path::new("diagrams/a/one.py"));
        let b = DiagramJob::flattened(&config(), Path::new("diagrams/b/one.py"));
        assert_eq!(a.output_base, b.output_base);

        // The mirrored mapping keeps them apart.
        let a = DiagramJob::mirrored(&config(), Path::new("diagrams/a/one.py")).unwrap();
        let b = DiagramJob::mirrored(&config(), Path::new("diagrams/b/one.py")).unwrap();
        assert_ne!(a.output_base, b.output_base);
        assert_eq!(a.output_base, PathBuf::from("output_diagrams/a/one"));
    }

    #[test]
    fn ensure_output_dirs_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let job = DiagramJob {
            script: PathBuf::from("diagrams/a/one.py"),
            output_base: temp.path().join("out/a/one"),
        };

        job.ensure_output_dirs().unwrap();
        assert!(temp.path().join("out/a").is_dir());

        job.ensure_output_dirs().unwrap();
        assert!(temp.path().join("out/a").is_dir());
    }

    #[test]
    fn artifact_hint_appends_the_image_extension() {
        let job = DiagramJob {
            script: PathBuf::from("diagrams/one.py"),
            output_base: PathBuf::from("output_diagrams/one"),
        };
        assert_eq!(
            job.artifact_hint("png"),
            PathBuf::from("output_diagrams/one.png")
        );

        // A dotted stem is appended to, not truncated at the dot.
        let job = DiagramJob {
            script: PathBuf::from("diagrams/my.diagram.py"),
            output_base: PathBuf::from("output_diagrams/my.diagram"),
        };
        assert_eq!(
            job.artifact_hint("png"),
            PathBuf::from("output_diagrams/my.diagram.png")
        );
    }
}
