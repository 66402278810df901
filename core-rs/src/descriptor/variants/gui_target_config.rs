//! TouchGFX target configuration (`target.config`) file

use crate::descriptor::{JsonDescriptor, StructuredDescriptor};
use std::path::Path;

const TARGET_CONFIGURATION_KEY: &str = "target_configuration";
const PROJECT_FILE_KEY: &str = "project_file";

/// TouchGFX target configuration, carrying only the `.ioc` reference
#[derive(Debug, Clone)]
pub struct GuiTargetConfig {
    descriptor: JsonDescriptor,
}

impl GuiTargetConfig {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let mut descriptor = JsonDescriptor::load(path, TARGET_CONFIGURATION_KEY);
        descriptor.bind(PROJECT_FILE_KEY);
        Self { descriptor }
    }

    pub fn exists(&self) -> bool {
        self.descriptor.exists()
    }

    pub fn path(&self) -> &Path {
        self.descriptor.path()
    }

    /// `target_configuration.project_file`
    pub fn project_file(&self) -> String {
        self.descriptor.get_field(PROJECT_FILE_KEY)
    }

    pub fn set_project_file(&mut self, value: &str) {
        self.descriptor.set_field(PROJECT_FILE_KEY, value);
    }

    pub fn update(&mut self) -> bool {
        self.descriptor.update()
    }
}
