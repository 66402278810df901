/**
 * files.rs
 * Discovery of the descriptor files inside a project root
 *
 * Layout:
 * ```text
 * <root>/<name>.ioc                        required, top level
 * <root>/STM32CubeIDE/.project             required, top level of the IDE dir
 * <root>/STM32CubeIDE/<name> Debug.launch  optional, top level of the IDE dir
 * <root>/.../<name>.touchgfx                optional, recursive
 * <root>/.../<name>.touchgfx.part           optional, recursive
 * <root>/.../target.config                  optional, recursive
 * ```
 */

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::errors::{ProjectError, Result};
use crate::project::layout::LayoutConfig;

/// Paths of the descriptor files found in a project root
///
/// Each entry is the first match in file-name order, `None` if absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFiles {
    pub device_config: Option<PathBuf>,
    pub main_project: Option<PathBuf>,
    pub launch_config: Option<PathBuf>,
    pub gui_project: Option<PathBuf>,
    pub gui_part: Option<PathBuf>,
    pub gui_target_config: Option<PathBuf>,
}

impl ProjectFiles {
    /// Discover descriptor files under `root`
    ///
    /// Fails only if `root` isn't a directory; missing files are `None`.
    pub fn discover<P: AsRef<Path>>(root: P, layout: &LayoutConfig) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ProjectError::RootNotFound(root.to_path_buf()));
        }

        let cube_dir = root.join(&layout.cube_directory);
        let gui_part_extension = layout.gui_part_extension();

        let files = Self {
            device_config: find_top_level(root, |name| name.ends_with(&layout.device_config_extension)),
            main_project: find_top_level(&cube_dir, |name| name.ends_with(&layout.main_project_extension)),
            launch_config: find_top_level(&cube_dir, |name| name.ends_with(&layout.launch_extension)),
            gui_project: find_recursive(root, |name| name.ends_with(&layout.gui_project_extension)),
            gui_part: find_recursive(root, |name| name.ends_with(&gui_part_extension)),
            gui_target_config: find_recursive(root, |name| name == layout.target_config_file_name),
        };

        debug!("Discovered project files in {}: {:?}", root.display(), files);
        Ok(files)
    }

    /// Check that the required files are present
    ///
    /// The main project is checked first, then the device configuration.
    pub fn require(&self, root: &Path) -> Result<()> {
        if self.main_project.is_none() {
            return Err(ProjectError::MainProjectNotFound(root.to_path_buf()));
        }
        if self.device_config.is_none() {
            return Err(ProjectError::DeviceConfigNotFound(root.to_path_buf()));
        }
        Ok(())
    }
}

fn find_top_level<F>(dir: &Path, matches: F) -> Option<PathBuf>
where
    F: Fn(&str) -> bool,
{
    if !dir.is_dir() {
        return None;
    }
    find(WalkDir::new(dir).min_depth(1).max_depth(1), matches)
}

fn find_recursive<F>(root: &Path, matches: F) -> Option<PathBuf>
where
    F: Fn(&str) -> bool,
{
    find(WalkDir::new(root).min_depth(1), matches)
}

fn find<F>(walker: WalkDir, matches: F) -> Option<PathBuf>
where
    F: Fn(&str) -> bool,
{
    walker
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_vcs_dir(entry))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| entry.file_name().to_str().is_some_and(&matches))
        .map(DirEntry::into_path)
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}
