//! Event-preserving XML document
//!
//! The document keeps every event produced by `quick-xml` so that a save
//! reproduces untouched content byte for byte (declaration, comments,
//! whitespace, attribute quoting). Edits are recorded as overrides keyed by
//! element and applied while writing; the event list itself never changes,
//! so element handles stay valid for the lifetime of the document.

use crate::errors::{ProjectError, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;

/// Handle to an element of an [`XmlDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct ElementSpan {
    name: String,
    /// Index of the `Start` (or `Empty`) event
    start: usize,
    /// Index of the matching `End` event; equals `start` for empty elements
    end: usize,
    parent: Option<usize>,
}

/// Parsed XML file with value overrides
#[derive(Debug, Clone)]
pub struct XmlDocument {
    events: Vec<Event<'static>>,
    elements: Vec<ElementSpan>,
    element_at: HashMap<usize, usize>,
    text_overrides: HashMap<usize, String>,
    attribute_overrides: HashMap<usize, Vec<(String, String)>>,
}

impl XmlDocument {
    /// Parse a document from text
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut events: Vec<Event<'static>> = Vec::new();
        let mut elements: Vec<ElementSpan> = Vec::new();
        let mut element_at = HashMap::new();
        let mut open: Vec<usize> = Vec::new();

        loop {
            let event = reader.read_event()?;
            let index = events.len();
            match &event {
                Event::Start(e) | Event::Empty(e) => {
                    let id = elements.len();
                    element_at.insert(index, id);
                    elements.push(ElementSpan {
                        name: element_name(e),
                        start: index,
                        end: index,
                        parent: open.last().copied(),
                    });
                    if matches!(event, Event::Start(_)) {
                        open.push(id);
                    }
                }
                Event::End(_) => {
                    let id = open
                        .pop()
                        .ok_or_else(|| ProjectError::Xml("unexpected closing tag".to_string()))?;
                    elements[id].end = index;
                }
                Event::Eof => break,
                _ => {}
            }
            events.push(event.into_owned());
        }

        if !open.is_empty() {
            return Err(ProjectError::Xml("unclosed element at end of document".to_string()));
        }

        Ok(Self {
            events,
            elements,
            element_at,
            text_overrides: HashMap::new(),
            attribute_overrides: HashMap::new(),
        })
    }

    /// The document element
    pub fn root(&self) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|span| span.parent.is_none())
            .map(ElementId)
    }

    /// Element name, including any namespace prefix
    pub fn name(&self, id: ElementId) -> &str {
        &self.elements[id.0].name
    }

    /// Direct children of `parent` named `name`, in document order
    pub fn children<'a>(&'a self, parent: ElementId, name: &'a str) -> impl Iterator<Item = ElementId> + 'a {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, span)| span.parent == Some(parent.0) && span.name == name)
            .map(|(index, _)| ElementId(index))
    }

    /// First direct child of `parent` named `name`
    pub fn child(&self, parent: ElementId, name: &str) -> Option<ElementId> {
        self.children(parent, name).next()
    }

    /// Concatenated text content of an element
    pub fn text(&self, id: ElementId) -> String {
        if let Some(text) = self.text_overrides.get(&id.0) {
            return text.clone();
        }
        let span = &self.elements[id.0];
        let mut text = String::new();
        if span.end <= span.start {
            return text;
        }
        for event in &self.events[span.start + 1..span.end] {
            match event {
                Event::Text(t) => text.push_str(&t.unescape().unwrap_or_default()),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(c.as_ref())),
                _ => {}
            }
        }
        text
    }

    /// Replace the whole content of an element with text
    pub fn set_text(&mut self, id: ElementId, value: &str) {
        self.text_overrides.insert(id.0, value.to_string());
    }

    /// Attribute value, `None` if the attribute is absent
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        if let Some(value) = self
            .attribute_overrides
            .get(&id.0)
            .and_then(|overrides| overrides.iter().find(|(key, _)| key == name))
        {
            return Some(value.1.clone());
        }
        let start = self.start_event(id)?;
        let attribute = start.try_get_attribute(name).ok()??;
        attribute.unescape_value().ok().map(|value| value.into_owned())
    }

    /// Replace the value of an existing attribute; absent attributes are left alone
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if self.start_event(id).and_then(|s| s.try_get_attribute(name).ok().flatten()).is_none() {
            return;
        }
        let overrides = self.attribute_overrides.entry(id.0).or_default();
        match overrides.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => overrides.push((name.to_string(), value.to_string())),
        }
    }

    /// Whether any value has been overridden since parsing
    pub fn is_modified(&self) -> bool {
        !self.text_overrides.is_empty() || !self.attribute_overrides.is_empty()
    }

    /// Serialize the document, applying all overrides
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        let mut index = 0;

        while index < self.events.len() {
            let event = &self.events[index];
            let element = self.element_at.get(&index).copied();

            match (event, element) {
                (Event::Start(start) | Event::Empty(start), Some(id)) => {
                    let start = self.rewrite_start(id, start)?;
                    let is_empty = matches!(event, Event::Empty(_));

                    if let Some(text) = self.text_overrides.get(&id) {
                        let span = &self.elements[id];
                        write(&mut writer, Event::Start(start))?;
                        write(&mut writer, Event::Text(BytesText::new(text)))?;
                        write(&mut writer, Event::End(BytesEnd::new(span.name.clone())))?;
                        index = span.end + 1;
                        continue;
                    }

                    if is_empty {
                        write(&mut writer, Event::Empty(start))?;
                    } else {
                        write(&mut writer, Event::Start(start))?;
                    }
                }
                (other, _) => write(&mut writer, other.clone())?,
            }
            index += 1;
        }

        Ok(writer.into_inner())
    }

    fn start_event(&self, id: ElementId) -> Option<&BytesStart<'static>> {
        match &self.events[self.elements[id.0].start] {
            Event::Start(start) | Event::Empty(start) => Some(start),
            _ => None,
        }
    }

    fn rewrite_start(&self, id: usize, original: &BytesStart<'static>) -> Result<BytesStart<'static>> {
        let overrides = match self.attribute_overrides.get(&id) {
            Some(overrides) if !overrides.is_empty() => overrides,
            _ => return Ok(original.clone()),
        };

        let mut start = BytesStart::new(self.elements[id].name.clone());
        for attribute in original.attributes() {
            let attribute = attribute.map_err(|e| ProjectError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            match overrides.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => start.push_attribute((key.as_str(), value.as_str())),
                None => start.push_attribute(attribute),
            }
        }
        Ok(start)
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ProjectError::Xml(e.to_string()))
}
