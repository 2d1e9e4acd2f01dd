//! Element factory.
//!
//! [`Document::markup`] creates an element from a tag, its content, and an
//! [`Attributes`] map in one call. It is the building block controls use to
//! assemble their subtrees.
//!
//! # Attribute Rules
//!
//! - `className` is written as the `class` attribute
//! - [`AttrValue::Flag`]`(true)` writes a present, empty attribute
//! - [`AttrValue::Flag`]`(false)` omits the attribute
//! - Event handlers registered with [`Attributes::on`] are attached to the new element
//!
//! # Example
//!
//! ```
//! use horizon_forms_core::{Attributes, Document};
//!
//! let mut doc = Document::new();
//! let attrs = Attributes::new()
//!     .with("className", "choice")
//!     .with("disabled", true);
//! let option = doc.markup("option", "Pick one", attrs).unwrap();
//!
//! assert_eq!(doc.outer_html(option), r#"<option class="choice" disabled="">Pick one</option>"#);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::dom::{Document, NodeId};
use crate::error::DomResult;
use crate::event::{Event, EventHandler, EventKind};

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A textual value.
    Text(String),
    /// A boolean attribute: present when `true`, omitted when `false`.
    Flag(bool),
}

impl AttrValue {
    /// The textual value, if any. A set flag reads as an empty string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(true) => Some(""),
            Self::Flag(false) => None,
        }
    }

    /// Whether the attribute would be written to an element.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// An ordered attribute map with attached event handlers.
///
/// Setting an existing name replaces its value in place, so the original
/// ordering is kept.
#[derive(Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
    events: Vec<(EventKind, EventHandler)>,
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events: Vec<EventKind> = self.events.iter().map(|(k, _)| *k).collect();
        f.debug_struct("Attributes")
            .field("entries", &self.entries)
            .field("events", &events)
            .finish()
    }
}

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Set an attribute using builder pattern.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get an attribute's textual value.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_text)
    }

    /// Check whether an attribute is set and present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some_and(AttrValue::is_present)
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Overlay `other` on top of `self`: its attributes override, its events append.
    pub fn merge(&mut self, other: &Attributes) {
        for (name, value) in &other.entries {
            self.set(name.clone(), value.clone());
        }
        self.events.extend(other.events.iter().cloned());
    }

    /// Register an event handler using builder pattern.
    pub fn on<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: Fn(&mut Document, &Event) -> DomResult<()> + Send + Sync + 'static,
    {
        self.events.push((kind, Arc::new(handler)));
        self
    }

    /// Iterate over attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered event handlers.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// The content placed inside an element built by [`Document::markup`].
#[derive(Debug, Clone, Default)]
pub enum Content {
    /// No children.
    #[default]
    Empty,
    /// A single text node.
    Text(String),
    /// An existing node, re-parented under the new element.
    Node(NodeId),
    /// Several pieces of content in order.
    List(Vec<Content>),
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NodeId> for Content {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Vec<NodeId>> for Content {
    fn from(ids: Vec<NodeId>) -> Self {
        Self::List(ids.into_iter().map(Content::Node).collect())
    }
}

impl From<Vec<Content>> for Content {
    fn from(items: Vec<Content>) -> Self {
        Self::List(items)
    }
}

impl Document {
    /// Create an element with content and attributes.
    ///
    /// `className` becomes `class`, unset flags are skipped, and handlers
    /// registered with [`Attributes::on`] are attached to the new element.
    pub fn markup(
        &mut self,
        tag: &str,
        content: impl Into<Content>,
        attributes: Attributes,
    ) -> DomResult<NodeId> {
        let element = self.create_element(tag);
        for (name, value) in &attributes.entries {
            let name = if name == "className" { "class" } else { name.as_str() };
            if let Some(text) = value.as_text() {
                self.set_attribute(element, name, text)?;
            }
        }
        for (kind, handler) in attributes.events {
            self.add_event_handler(element, kind, handler)?;
        }
        self.append_content(element, content.into())?;
        Ok(element)
    }

    fn append_content(&mut self, parent: NodeId, content: Content) -> DomResult<()> {
        match content {
            Content::Empty => Ok(()),
            Content::Text(text) => {
                let node = self.create_text(text);
                self.append_child(parent, node)
            }
            Content::Node(node) => self.append_child(parent, node),
            Content::List(items) => {
                for item in items {
                    self.append_content(parent, item)?;
                }
                Ok(())
            }
        }
    }
}
