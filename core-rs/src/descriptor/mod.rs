//! Structured project descriptors
//!
//! Every descriptor file the tool edits is reached through the
//! [`StructuredDescriptor`] capability trait, with two backings:
//! - [`XmlDescriptor`]: STM32CubeIDE `.project` and `.launch` files
//! - [`JsonDescriptor`]: TouchGFX `.touchgfx`, `.touchgfx.part` and `target.config`
//!
//! Fields are bound to concrete nodes once, when the file is loaded. A field
//! whose node is missing reads as an empty string and ignores writes; the
//! tool never invents structure, it only edits values that already exist.

mod document;
mod json;
mod xml;
pub mod variants;

pub use document::{ElementId, XmlDocument};
pub use json::JsonDescriptor;
pub use xml::{XmlBinding, XmlDescriptor};

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read/write access to named fields of one physical descriptor file
pub trait StructuredDescriptor {
    /// Whether the file existed when the descriptor was loaded
    fn exists(&self) -> bool;

    /// Current location of the file
    fn path(&self) -> &Path;

    /// Value of a bound field, empty if missing
    fn get_field(&self, key: &str) -> String;

    /// Set a bound field; no-op if the field is missing or the file doesn't exist
    fn set_field(&mut self, key: &str, value: &str);

    /// Whether a setter changed the document since it was loaded or saved
    fn is_dirty(&self) -> bool;

    /// Save the document if dirty
    ///
    /// Returns true only if the file was actually written. Write failures
    /// are logged and reported as `false`.
    fn update(&mut self) -> bool;

    /// File name with extension
    fn file_name(&self) -> String {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Whether a descriptor path points at an existing file
pub(crate) fn is_present(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_file()
}

/// Read a descriptor file, logging and swallowing failures
pub(crate) fn read_source(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Write descriptor bytes, logging and swallowing failures
pub(crate) fn persist(path: &Path, bytes: &[u8]) -> bool {
    match fs::write(path, bytes) {
        Ok(()) => {
            debug!("Saved {}", path.display());
            true
        }
        Err(e) => {
            warn!("Failed to save {}: {}", path.display(), e);
            false
        }
    }
}
