//! XML-backed descriptor

use super::{is_present, persist, read_source, ElementId, StructuredDescriptor, XmlDocument};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BOM: char = '\u{feff}';

/// Node a descriptor field is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlBinding {
    /// Text content of an element
    Text(ElementId),
    /// Value of an attribute that exists on the element
    Attribute(ElementId, &'static str),
}

/// Descriptor backed by an XML file
#[derive(Debug, Clone)]
pub struct XmlDescriptor {
    path: PathBuf,
    exists: bool,
    bom: bool,
    document: Option<XmlDocument>,
    bindings: HashMap<&'static str, XmlBinding>,
    dirty: bool,
}

impl XmlDescriptor {
    /// Load an XML descriptor
    ///
    /// An empty or missing path gives a non-existent descriptor. A file that
    /// can't be parsed exists but binds no fields.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let exists = is_present(&path);
        let mut bom = false;
        let document = if exists {
            read_source(&path).and_then(|text| {
                bom = text.starts_with(BOM);
                match XmlDocument::parse(text.trim_start_matches(BOM)) {
                    Ok(document) => Some(document),
                    Err(e) => {
                        warn!("Failed to parse {}: {}", path.display(), e);
                        None
                    }
                }
            })
        } else {
            None
        };

        Self {
            path,
            exists,
            bom,
            document,
            bindings: HashMap::new(),
            dirty: false,
        }
    }

    /// Bind a field name to a node located in the loaded document
    ///
    /// Nothing is bound when the document is absent or `locate` finds no node.
    pub fn bind<F>(&mut self, key: &'static str, locate: F)
    where
        F: FnOnce(&XmlDocument) -> Option<XmlBinding>,
    {
        match self.document.as_ref().and_then(locate) {
            Some(binding) => {
                self.bindings.insert(key, binding);
            }
            None if self.exists => debug!("{}: field '{}' not present", self.path.display(), key),
            None => {}
        }
    }

    /// Whether a field is bound to a node
    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }
}

impl StructuredDescriptor for XmlDescriptor {
    fn exists(&self) -> bool {
        self.exists
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn get_field(&self, key: &str) -> String {
        let (Some(document), Some(binding)) = (self.document.as_ref(), self.bindings.get(key)) else {
            return String::new();
        };
        match *binding {
            XmlBinding::Text(id) => document.text(id),
            XmlBinding::Attribute(id, name) => document.attribute(id, name).unwrap_or_default(),
        }
    }

    fn set_field(&mut self, key: &str, value: &str) {
        let (Some(document), Some(binding)) = (self.document.as_mut(), self.bindings.get(key)) else {
            return;
        };
        match *binding {
            XmlBinding::Text(id) => document.set_text(id, value),
            XmlBinding::Attribute(id, name) => document.set_attribute(id, name, value),
        }
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn update(&mut self) -> bool {
        if !self.exists || !self.dirty {
            return false;
        }
        let Some(document) = self.document.as_ref() else {
            return false;
        };
        let mut bytes = Vec::new();
        if self.bom {
            bytes.extend_from_slice(BOM.to_string().as_bytes());
        }
        match document.to_bytes() {
            Ok(body) => bytes.extend_from_slice(&body),
            Err(e) => {
                warn!("Failed to serialize {}: {}", self.path.display(), e);
                return false;
            }
        }
        let written = persist(&self.path, &bytes);
        if written {
            self.dirty = false;
        }
        written
    }
}
