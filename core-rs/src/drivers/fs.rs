//! File system helpers shared by descriptors and the command line

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Whether a command line token looks like a path rather than a name
///
/// `.` and `..` count as paths, as does anything containing a separator.
pub fn is_path_like(value: &str) -> bool {
    value == "." || value == ".." || value.contains('/') || value.contains('\\')
}

/// File name without its last extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name with extension
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Rename a file within its directory
///
/// Returns the new path, or `None` when the name is unchanged, the source
/// is missing, the target already exists, or the move fails.
pub fn rename_file(path: &Path, new_file_name: &str) -> Option<PathBuf> {
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let new_path = directory.join(new_file_name);

    if new_path == path || !path.is_file() || new_path.exists() {
        debug!(
            "Skipping rename of {} to {}",
            path.display(),
            new_path.display()
        );
        return None;
    }

    match fs::rename(path, &new_path) {
        Ok(()) => {
            debug!("Renamed {} to {}", path.display(), new_path.display());
            Some(new_path)
        }
        Err(e) => {
            warn!("Failed to rename {}: {}", path.display(), e);
            None
        }
    }
}
