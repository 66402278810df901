//! Device configuration (`.ioc`) file

use crate::drivers::fs::{file_name, file_stem, rename_file};
use std::path::{Path, PathBuf};

/// The `.ioc` file, the authoritative source of the project name
///
/// Its contents are never read; the name is the file stem.
#[derive(Debug, Clone, Default)]
pub struct DeviceConfig {
    exists: bool,
    path: PathBuf,
    name: String,
    file_name: String,
}

impl DeviceConfig {
    /// Describe the `.ioc` file at `path`; empty or missing paths give a non-existent file
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || !path.is_file() {
            return Self::default();
        }
        Self {
            exists: true,
            path: path.to_path_buf(),
            name: file_stem(path),
            file_name: file_name(path),
        }
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name with extension
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Move the file to `new_file_name` in the same directory
    ///
    /// Returns true if the file was moved; name and file name follow the new path.
    pub fn rename(&mut self, new_file_name: &str) -> bool {
        if !self.exists {
            return false;
        }
        match rename_file(&self.path, new_file_name) {
            Some(new_path) => {
                self.name = file_stem(&new_path);
                self.file_name = file_name(&new_path);
                self.path = new_path;
                true
            }
            None => false,
        }
    }
}
