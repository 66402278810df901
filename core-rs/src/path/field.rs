//! Path field with a single renamable target segment

use crate::errors::Result;
use regex::Regex;
use std::fmt;

/// A slash or backslash delimited relative path with one target segment
///
/// The target is the first segment, scanning left to right, that is not
/// `.`, `..`, or matched by one of the special patterns supplied at
/// construction (placeholders such as `PARENT-1-PROJECT_LOC`). Only the
/// target is ever rewritten.
///
/// `Clone` produces an independent copy, so an expected value can be
/// computed without touching the live path:
///
/// ```
/// use stpn_core::PathField;
///
/// let live = PathField::with_patterns("PARENT-1-PROJECT_LOC/Bar.ioc", &[".*PROJECT_LOC$"]).unwrap();
/// let mut expected = live.clone();
/// expected.rename_target("Foo");
///
/// assert_eq!(expected.to_string(), "PARENT-1-PROJECT_LOC/Foo.ioc");
/// assert_eq!(live.to_string(), "PARENT-1-PROJECT_LOC/Bar.ioc");
/// ```
#[derive(Debug, Clone)]
pub struct PathField {
    separator: char,
    segments: Vec<String>,
    patterns: Vec<Regex>,
    target_index: Option<usize>,
    exists: bool,
}

impl PathField {
    /// Create a path field from a path string and precompiled special patterns
    pub fn new(path: &str, special_patterns: &[Regex]) -> Self {
        let separator = if path.contains('\\') { '\\' } else { '/' };
        let segments: Vec<String> = path.split(separator).map(str::to_string).collect();
        let patterns = special_patterns.to_vec();
        let target_index = segments
            .iter()
            .position(|segment| !Self::is_special(segment, &patterns));

        Self {
            separator,
            segments,
            patterns,
            target_index,
            exists: !path.is_empty(),
        }
    }

    /// Create a path field, compiling the special patterns first
    pub fn with_patterns(path: &str, special_patterns: &[&str]) -> Result<Self> {
        let patterns = special_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(path, &patterns))
    }

    /// Whether the field was built from a non-empty string
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Path separator detected from the source string
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Current target segment, empty if the path has none
    pub fn target(&self) -> &str {
        match self.target_index {
            Some(index) => &self.segments[index],
            None => "",
        }
    }

    /// Replace the target segment; no-op without a target
    pub fn set_target(&mut self, value: &str) {
        if let Some(index) = self.target_index {
            self.segments[index] = value.to_string();
        }
    }

    /// Rename the target segment
    ///
    /// A `new_base` containing a dot is used verbatim. Otherwise the
    /// extension of the current target, if any, is appended.
    pub fn rename_target(&mut self, new_base: &str) -> &mut Self {
        if self.target_index.is_none() || new_base.is_empty() {
            return self;
        }
        let renamed = if new_base.contains('.') {
            new_base.to_string()
        } else {
            format!("{}{}", new_base, extension_of(self.target()))
        };
        self.set_target(&renamed);
        self
    }

    fn is_special(segment: &str, patterns: &[Regex]) -> bool {
        segment == "." || segment == ".." || patterns.iter().any(|re| re.is_match(segment))
    }
}

impl fmt::Display for PathField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.exists {
            return Ok(());
        }
        let mut buf = [0u8; 4];
        let separator: &str = self.separator.encode_utf8(&mut buf);
        f.write_str(&self.segments.join(separator))
    }
}

/// Extension of a file name including the leading dot, or `""`
fn extension_of(segment: &str) -> &str {
    match segment.rfind('.') {
        Some(index) if index + 1 < segment.len() => &segment[index..],
        _ => "",
    }
}
