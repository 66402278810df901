//! STM32CubeIDE debug launch configuration (`.launch`) file

use crate::descriptor::{StructuredDescriptor, XmlBinding, XmlDescriptor, XmlDocument};
use std::path::Path;

const STRING_ATTRIBUTE_KEY: &str = "stringAttribute";
const KEY_ATTRIBUTE: &str = "key";
const VALUE_ATTRIBUTE: &str = "value";
const PROGRAM_NAME_SUFFIX: &str = "PROGRAM_NAME";
const PROJECT_ATTR_SUFFIX: &str = "PROJECT_ATTR";

const FIELD_PROGRAM_NAME: &str = "PROGRAM_NAME";
const FIELD_PROJECT_ATTR: &str = "PROJECT_ATTR";

/// Launch configuration referencing the project and its build artifact
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    descriptor: XmlDescriptor,
}

impl LaunchConfig {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let mut descriptor = XmlDescriptor::load(path);
        descriptor.bind(FIELD_PROGRAM_NAME, |doc| string_attribute(doc, PROGRAM_NAME_SUFFIX));
        descriptor.bind(FIELD_PROJECT_ATTR, |doc| string_attribute(doc, PROJECT_ATTR_SUFFIX));
        Self { descriptor }
    }

    pub fn exists(&self) -> bool {
        self.descriptor.exists()
    }

    pub fn path(&self) -> &Path {
        self.descriptor.path()
    }

    /// Build artifact path, e.g. `Debug/Widget.elf`
    pub fn program_name(&self) -> String {
        self.descriptor.get_field(FIELD_PROGRAM_NAME)
    }

    pub fn set_program_name(&mut self, value: &str) {
        self.descriptor.set_field(FIELD_PROGRAM_NAME, value);
    }

    /// Name of the project the launch belongs to
    pub fn project_attr(&self) -> String {
        self.descriptor.get_field(FIELD_PROJECT_ATTR)
    }

    pub fn set_project_attr(&mut self, value: &str) {
        self.descriptor.set_field(FIELD_PROJECT_ATTR, value);
    }

    pub fn update(&mut self) -> bool {
        self.descriptor.update()
    }
}

/// `value` of the first `stringAttribute` whose `key` ends with `suffix`
fn string_attribute(doc: &XmlDocument, suffix: &str) -> Option<XmlBinding> {
    let root = doc.root()?;
    doc.children(root, STRING_ATTRIBUTE_KEY)
        .find(|&element| {
            doc.attribute(element, KEY_ATTRIBUTE)
                .is_some_and(|key| key.ends_with(suffix))
        })
        .filter(|&element| doc.attribute(element, VALUE_ATTRIBUTE).is_some())
        .map(|element| XmlBinding::Attribute(element, VALUE_ATTRIBUTE))
}
