//! Error types for st-project-name

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a malformed command line
pub const EXIT_SYNTAX_ERROR: i32 = 1;
/// Exit code when the project root directory is missing
pub const EXIT_NO_ROOT_DIR: i32 = 2;
/// Exit code when the main `.project` file is missing
pub const EXIT_NO_PROJECT_FILE: i32 = 3;
/// Exit code when the `.ioc` file is missing
pub const EXIT_NO_IOC_FILE: i32 = 4;
/// Exit code for an invalid new project name
pub const EXIT_INVALID_NAME: i32 = 5;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("The specified project root directory doesn't exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("The main project file not found in {}", .0.display())]
    MainProjectNotFound(PathBuf),

    #[error("The project .ioc file not found in {}", .0.display())]
    DeviceConfigNotFound(PathBuf),

    #[error("Invalid project name: {0:?}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Regex error: {0}")]
    RegexError(String),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Layout error: {0}")]
    Layout(String),
}

impl ProjectError {
    /// Process exit code reported by the command line tool for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ProjectError::RootNotFound(_) => EXIT_NO_ROOT_DIR,
            ProjectError::MainProjectNotFound(_) => EXIT_NO_PROJECT_FILE,
            ProjectError::DeviceConfigNotFound(_) => EXIT_NO_IOC_FILE,
            ProjectError::InvalidName(_) => EXIT_INVALID_NAME,
            _ => EXIT_SYNTAX_ERROR,
        }
    }
}

impl From<regex::Error> for ProjectError {
    fn from(err: regex::Error) -> Self {
        ProjectError::RegexError(err.to_string())
    }
}

impl From<quick_xml::Error> for ProjectError {
    fn from(err: quick_xml::Error) -> Self {
        ProjectError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProjectError>;
