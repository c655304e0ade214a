use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the config file discovered by walking ancestor directories.
pub const CONFIG_FILE_NAME: &str = ".diagram-runner.json";

/// Runner configuration. Every field has a default matching the
/// conventional project layout, so an empty (or absent) config file is
/// valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct RunnerConfig {
    /// Directory under which diagram scripts are discovered.
    pub source_root: PathBuf,

    /// Directory under which rendered artifacts are expected to appear.
    pub output_root: PathBuf,

    /// Extension (without the dot) that marks a file as a diagram script.
    pub script_extension: String,

    /// Command prefix the script path is appended to, e.g.
    /// `["poetry", "run", "python"]`. The first element is the program.
    pub command_prefix: Vec<String>,

    /// Extension of the artifact each script is expected to write next to
    /// its output base. Used for reporting only; the artifact is never
    /// verified.
    pub image_extension: String,

    /// When set, a non-zero child exit is treated as a failure instead of
    /// being ignored. Off by default: existing scripts were written
    /// against a runner that never inspected the child's status.
    pub check_child_status: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("diagrams"),
            output_root: PathBuf::from("output_diagrams"),
            script_extension: "py".to_string(),
            command_prefix: vec![
                "poetry".to_string(),
                "run".to_string(),
                "python".to_string(),
            ],
            image_extension: "png".to_string(),
            check_child_status: false,
        }
    }
}

impl RunnerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
        Ok(config)
    }

    /// Walk up from `start_path` looking for a config file.
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config file above `start_path`, falling back to
    /// the defaults when none exists.
    pub fn load_or_default(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }
}
