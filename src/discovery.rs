use std::ffi::OsStr;
use std::path::PathBuf;

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::BatchConfig;
use crate::error::DiscoveryError;

/// Walks `config.input_root` depth-first and returns every eligible source file,
/// in directory-listing order.
///
/// Symbolic links are followed. A link that loops back to one of its ancestors is
/// skipped with a warning; every other traversal error aborts discovery.
pub fn find_source_files(config: &BatchConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = config.input_root.as_path();
    // Missing roots are left to walkdir so the io cause is kept.
    if root.exists() && !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if let Some(ancestor) = e.loop_ancestor() {
                    warn!(
                        "Skipping symlink loop at {:?} (points back to {:?})",
                        e.path().unwrap_or(root),
                        ancestor
                    );
                    continue;
                }
                return Err(DiscoveryError::Walk {
                    root: root.to_path_buf(),
                    source: e,
                });
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if is_eligible(entry.file_name(), config) {
            files.push(entry.into_path());
        } else {
            debug!("Skipping {:?}", entry.path());
        }
    }

    info!("Found {} source file(s) under {:?}", files.len(), root);
    Ok(files)
}

/// True when `file_name` ends with the source extension (case-sensitive) and is not
/// the excluded marker file.
pub fn is_eligible(file_name: &OsStr, config: &BatchConfig) -> bool {
    let name = file_name.as_encoded_bytes();
    name.ends_with(config.source_extension.as_bytes())
        && name != config.excluded_file_name.as_bytes()
}
