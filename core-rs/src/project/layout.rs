/**
 * layout.rs
 * Fixed project layout of an STM32CubeIDE / TouchGFX tree
 *
 * The defaults describe what STM32CubeMX generates. A YAML file can
 * override any subset of the keys:
 * ```yaml
 * cubeDirectory: STM32CubeIDE
 * deviceConfigExtension: .ioc
 * guiProjectExtension: .touchgfx
 * linkLocationPatterns:
 *   - ".*PROJECT_LOC$"
 * ```
 */

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{ProjectError, Result};

/// Names and patterns of the descriptor files inside a project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Subdirectory holding the main project and launch files
    pub cube_directory: String,
    /// Extension of the device configuration file
    pub device_config_extension: String,
    /// Extension of the main project file
    pub main_project_extension: String,
    /// Extension of the debug launch configuration
    pub launch_extension: String,
    /// Extension of the primary GUI project file
    pub gui_project_extension: String,
    /// Suffix appended to the GUI project extension for the part variant
    pub gui_part_suffix: String,
    /// File name of the GUI target configuration
    pub target_config_file_name: String,
    /// Placeholder segments of the main project's `.ioc` link location
    pub link_location_patterns: Vec<String>,
    /// Placeholder segments of the launch configuration's program name
    pub program_name_patterns: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cube_directory: "STM32CubeIDE".to_string(),
            device_config_extension: ".ioc".to_string(),
            main_project_extension: ".project".to_string(),
            launch_extension: ".launch".to_string(),
            gui_project_extension: ".touchgfx".to_string(),
            gui_part_suffix: ".part".to_string(),
            target_config_file_name: "target.config".to_string(),
            link_location_patterns: vec![".*PROJECT_LOC$".to_string()],
            program_name_patterns: vec!["^(Debug|Release)$".to_string()],
        }
    }
}

impl LayoutConfig {
    /// Load layout overrides from a YAML file
    ///
    /// Keys missing from the file keep their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ProjectError::Layout(format!(
                "layout file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let layout: LayoutConfig = serde_yaml::from_str(&content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Validate the layout
    ///
    /// Ensures:
    /// - extensions and the part suffix start with a dot
    /// - directory and target config names are non-empty
    /// - every pattern compiles
    pub fn validate(&self) -> Result<()> {
        let extensions = [
            ("deviceConfigExtension", &self.device_config_extension),
            ("mainProjectExtension", &self.main_project_extension),
            ("launchExtension", &self.launch_extension),
            ("guiProjectExtension", &self.gui_project_extension),
            ("guiPartSuffix", &self.gui_part_suffix),
        ];
        for (key, value) in extensions {
            if !value.starts_with('.') || value.len() < 2 {
                return Err(ProjectError::Layout(format!(
                    "{} must start with a dot, got {:?}",
                    key, value
                )));
            }
        }

        if self.cube_directory.is_empty() {
            return Err(ProjectError::Layout("cubeDirectory must not be empty".to_string()));
        }
        if self.target_config_file_name.is_empty() {
            return Err(ProjectError::Layout(
                "targetConfigFileName must not be empty".to_string(),
            ));
        }

        self.link_location_regexes()?;
        self.program_name_regexes()?;
        Ok(())
    }

    /// Full extension of the GUI part file, e.g. `.touchgfx.part`
    pub fn gui_part_extension(&self) -> String {
        format!("{}{}", self.gui_project_extension, self.gui_part_suffix)
    }

    pub fn link_location_regexes(&self) -> Result<Vec<Regex>> {
        compile(&self.link_location_patterns)
    }

    pub fn program_name_regexes(&self) -> Result<Vec<Regex>> {
        compile(&self.program_name_patterns)
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).map_err(ProjectError::from))
        .collect()
}
