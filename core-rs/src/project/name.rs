/**
 * name.rs
 * Project name validation
 *
 * A name being set must start with a letter and continue with letters,
 * digits or underscores. Names read from existing files are only compared.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{ProjectError, Result};

static PROJECT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][0-9A-Za-z_]*$").unwrap());

/// Whether `name` can be used as a new project name
pub fn is_valid_project_name(name: &str) -> bool {
    PROJECT_NAME.is_match(name)
}

/// Validate a new project name
pub fn validate_project_name(name: &str) -> Result<()> {
    if is_valid_project_name(name) {
        Ok(())
    } else {
        Err(ProjectError::InvalidName(name.to_string()))
    }
}
