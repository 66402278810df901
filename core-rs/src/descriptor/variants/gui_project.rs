//! TouchGFX project (`.touchgfx`) and its `.touchgfx.part` variant

use crate::descriptor::{JsonDescriptor, StructuredDescriptor};
use std::path::Path;

const APPLICATION_KEY: &str = "Application";
const NAME_KEY: &str = "Name";
const PROJECT_FILE_KEY: &str = "ProjectFile";

/// Which of the two TouchGFX project files a descriptor is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuiProjectKind {
    /// `<name>.touchgfx`
    Primary,
    /// `<name>.touchgfx.part`
    Part,
}

/// TouchGFX application settings: name and relative `.ioc` reference
#[derive(Debug, Clone)]
pub struct GuiProject {
    kind: GuiProjectKind,
    descriptor: JsonDescriptor,
}

impl GuiProject {
    pub fn load(path: impl AsRef<Path>, kind: GuiProjectKind) -> Self {
        let mut descriptor = JsonDescriptor::load(path, APPLICATION_KEY);
        descriptor.bind(NAME_KEY);
        descriptor.bind(PROJECT_FILE_KEY);
        Self { kind, descriptor }
    }

    pub fn kind(&self) -> GuiProjectKind {
        self.kind
    }

    pub fn exists(&self) -> bool {
        self.descriptor.exists()
    }

    pub fn path(&self) -> &Path {
        self.descriptor.path()
    }

    /// Current physical file name
    pub fn file_name(&self) -> String {
        self.descriptor.file_name()
    }

    /// `Application.Name`
    pub fn name(&self) -> String {
        self.descriptor.get_field(NAME_KEY)
    }

    pub fn set_name(&mut self, value: &str) {
        self.descriptor.set_field(NAME_KEY, value);
    }

    /// `Application.ProjectFile`, the relative path of the `.ioc` file
    pub fn project_file(&self) -> String {
        self.descriptor.get_field(PROJECT_FILE_KEY)
    }

    pub fn set_project_file(&mut self, value: &str) {
        self.descriptor.set_field(PROJECT_FILE_KEY, value);
    }

    /// Move the file to `new_file_name` next to it
    pub fn rename_file(&mut self, new_file_name: &str) -> bool {
        self.descriptor.rename_file(new_file_name)
    }

    pub fn update(&mut self) -> bool {
        self.descriptor.update()
    }
}
