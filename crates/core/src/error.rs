use std::io;
use std::path::PathBuf;

/// Errors that can occur during diagram-runner operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("diagram script '{}' not found", .0.display())]
    MissingScript(PathBuf),

    #[error("script '{}' is not under the source root '{}'", .script.display(), .source_root.display())]
    OutsideSourceRoot {
        script: PathBuf,
        source_root: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("diagram script '{}' exited with code {code}", .script.display())]
    ChildFailed { script: PathBuf, code: i32 },
}

/// Result type alias for diagram-runner operations
pub type Result<T> = std::result::Result<T, Error>;
