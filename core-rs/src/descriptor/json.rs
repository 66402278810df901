//! JSON-backed descriptor

use super::{is_present, persist, read_source, StructuredDescriptor};
use crate::drivers::fs::rename_file;
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const BOM: char = '\u{feff}';

/// Descriptor backed by a JSON file
///
/// Only one top-level object, selected by `root_key`, is visible: field
/// keys are looked up directly under it. A key is bound if it holds a
/// string when the file is loaded.
///
/// Saving splices the changed string literals into the source text, every
/// other byte of the file is written back as it was read.
#[derive(Debug, Clone)]
pub struct JsonDescriptor {
    path: PathBuf,
    exists: bool,
    root_key: &'static str,
    source: String,
    literals: HashMap<String, Literal>,
    values: HashMap<&'static str, String>,
    dirty: bool,
}

/// String value of the root object and its byte span in the source
#[derive(Debug, Clone)]
struct Literal {
    span: Range<usize>,
    value: String,
}

impl JsonDescriptor {
    /// Load a JSON descriptor exposing the object under `root_key`
    pub fn load(path: impl AsRef<Path>, root_key: &'static str) -> Self {
        let path = path.as_ref().to_path_buf();
        let exists = is_present(&path);
        let source = if exists { read_source(&path) } else { None };

        let literals = match source.as_deref().map(|text| string_literals(text, root_key)) {
            Some(Ok(Some(literals))) => literals,
            Some(Ok(None)) => {
                debug!("{}: no '{}' object", path.display(), root_key);
                HashMap::new()
            }
            Some(Err(e)) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                HashMap::new()
            }
            None => HashMap::new(),
        };

        Self {
            path,
            exists,
            root_key,
            source: source.unwrap_or_default(),
            literals,
            values: HashMap::new(),
            dirty: false,
        }
    }

    /// Bind a key of the root object; ignored if the key is absent
    pub fn bind(&mut self, key: &'static str) {
        if let Some(literal) = self.literals.get(key) {
            self.values.insert(key, literal.value.clone());
        } else if self.exists {
            debug!("{}: field '{}.{}' not present", self.path.display(), self.root_key, key);
        }
    }

    /// Move the file to `new_file_name` in the same directory
    ///
    /// Returns true if the file was moved; the stored path follows it.
    pub fn rename_file(&mut self, new_file_name: &str) -> bool {
        if !self.exists || new_file_name.is_empty() {
            return false;
        }
        match rename_file(&self.path, new_file_name) {
            Some(new_path) => {
                self.path = new_path;
                true
            }
            None => false,
        }
    }

    /// Source text with every changed value spliced in
    fn render(&self) -> serde_json::Result<String> {
        let mut edits = Vec::new();
        for (key, value) in &self.values {
            if let Some(literal) = self.literals.get(*key).filter(|literal| literal.value != *value) {
                edits.push((literal.span.clone(), serde_json::to_string(value)?));
            }
        }
        edits.sort_by_key(|(span, _)| span.start);

        let mut text = self.source.clone();
        for (span, replacement) in edits.into_iter().rev() {
            text.replace_range(span, &replacement);
        }
        Ok(text)
    }
}

/// String values directly under `root_key`, located in `text`
///
/// Returns `None` if the document has no `root_key` object.
fn string_literals(text: &str, root_key: &str) -> serde_json::Result<Option<HashMap<String, Literal>>> {
    let Some(top) = object_fields(text.trim_start_matches(BOM))? else {
        return Ok(None);
    };
    let Some(&root) = top.get(root_key) else {
        return Ok(None);
    };
    let Some(fields) = object_fields(root.get())? else {
        return Ok(None);
    };

    let mut literals = HashMap::new();
    for (key, raw) in fields {
        let literal = raw.get();
        if !literal.starts_with('"') {
            continue;
        }
        let value: String = serde_json::from_str(literal)?;
        // raw values borrow from `text`
        let start = literal.as_ptr() as usize - text.as_ptr() as usize;
        literals.insert(key, Literal { span: start..start + literal.len(), value });
    }
    Ok(Some(literals))
}

/// Members of a JSON object as unparsed values, `None` for other values
fn object_fields(text: &str) -> serde_json::Result<Option<HashMap<String, &RawValue>>> {
    let value: &RawValue = serde_json::from_str(text)?;
    if !value.get().starts_with('{') {
        return Ok(None);
    }
    serde_json::from_str(value.get()).map(Some)
}

impl StructuredDescriptor for JsonDescriptor {
    fn exists(&self) -> bool {
        self.exists
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn get_field(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    fn set_field(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.values.get_mut(key) {
            *slot = value.to_string();
            self.dirty = true;
        }
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn update(&mut self) -> bool {
        if !self.exists || !self.dirty {
            return false;
        }
        let text = match self.render() {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to serialize {}: {}", self.path.display(), e);
                return false;
            }
        };
        if !persist(&self.path, text.as_bytes()) {
            return false;
        }

        match string_literals(&text, self.root_key) {
            Ok(literals) => self.literals = literals.unwrap_or_default(),
            Err(e) => warn!("Failed to parse {} after saving: {}", self.path.display(), e),
        }
        self.source = text;
        self.dirty = false;
        true
    }
}
