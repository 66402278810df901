//! Main STM32CubeIDE project (`.project`) file

use crate::descriptor::{StructuredDescriptor, XmlBinding, XmlDescriptor, XmlDocument};
use std::path::Path;

const NAME_KEY: &str = "name";
const LINKED_RESOURCES_KEY: &str = "linkedResources";
const LINK_KEY: &str = "link";
const LOCATION_URI_KEY: &str = "locationURI";

const FIELD_NAME: &str = "name";
const FIELD_LINK_NAME: &str = "link.name";
const FIELD_LINK_LOCATION_URI: &str = "link.locationURI";

/// Eclipse project description of the STM32CubeIDE project
///
/// Exposes the project name and the linked resource that points at the
/// `.ioc` file (the `link` whose `locationURI` ends with the device
/// configuration extension).
#[derive(Debug, Clone)]
pub struct MainProject {
    descriptor: XmlDescriptor,
}

impl MainProject {
    /// Load the project file, binding the `.ioc` link by `device_config_extension`
    pub fn load(path: impl AsRef<Path>, device_config_extension: &str) -> Self {
        let mut descriptor = XmlDescriptor::load(path);

        descriptor.bind(FIELD_NAME, |doc| {
            let root = doc.root()?;
            doc.child(root, NAME_KEY).map(XmlBinding::Text)
        });

        let ioc_link = |doc: &XmlDocument| {
            let root = doc.root()?;
            let resources = doc.child(root, LINKED_RESOURCES_KEY)?;
            doc.children(resources, LINK_KEY).find(|&link| {
                doc.child(link, LOCATION_URI_KEY)
                    .is_some_and(|uri| doc.text(uri).ends_with(device_config_extension))
            })
        };

        descriptor.bind(FIELD_LINK_NAME, |doc| {
            let link = ioc_link(doc)?;
            doc.child(link, NAME_KEY).map(XmlBinding::Text)
        });
        descriptor.bind(FIELD_LINK_LOCATION_URI, |doc| {
            let link = ioc_link(doc)?;
            doc.child(link, LOCATION_URI_KEY).map(XmlBinding::Text)
        });

        Self { descriptor }
    }

    pub fn exists(&self) -> bool {
        self.descriptor.exists()
    }

    pub fn path(&self) -> &Path {
        self.descriptor.path()
    }

    /// Project name
    pub fn name(&self) -> String {
        self.descriptor.get_field(FIELD_NAME)
    }

    pub fn set_name(&mut self, value: &str) {
        self.descriptor.set_field(FIELD_NAME, value);
    }

    /// Name of the `.ioc` linked resource
    pub fn link_name(&self) -> String {
        self.descriptor.get_field(FIELD_LINK_NAME)
    }

    pub fn set_link_name(&mut self, value: &str) {
        self.descriptor.set_field(FIELD_LINK_NAME, value);
    }

    /// Location URI of the `.ioc` linked resource
    pub fn link_location_uri(&self) -> String {
        self.descriptor.get_field(FIELD_LINK_LOCATION_URI)
    }

    pub fn set_link_location_uri(&mut self, value: &str) {
        self.descriptor.set_field(FIELD_LINK_LOCATION_URI, value);
    }

    /// Save pending changes, see [`StructuredDescriptor::update`]
    pub fn update(&mut self) -> bool {
        self.descriptor.update()
    }
}
