use std::path::PathBuf;

use walkdir::WalkDir;

use crate::config::RunnerConfig;
use crate::error::Result;

/// Recursively enumerate every diagram script under the source root,
/// regardless of nesting depth. Results are sorted so reporting is
/// stable across runs.
///
/// A missing source root yields an empty list, matching a walk over an
/// empty tree.
pub fn discover_scripts(config: &RunnerConfig) -> Result<Vec<PathBuf>> {
    let mut scripts = Vec::new();

    for entry in WalkDir::new(&config.source_root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == config.script_extension);
        if matches {
            scripts.push(entry.path().to_path_buf());
        }
    }

    scripts.sort();
    Ok(scripts)
}
