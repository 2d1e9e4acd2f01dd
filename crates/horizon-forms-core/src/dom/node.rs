//! Node storage for the document arena.

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for a node in a [`Document`](super::Document).
    ///
    /// `NodeId`s are stable handles that stay valid for the lifetime of the
    /// document. They are only meaningful for the document that created them.
    pub struct NodeId;
}

/// The payload of a node.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    /// An element such as `<input>` or `<div>`.
    Element(ElementData),
    /// A text node.
    Text(String),
}

/// Element-specific state.
#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    /// Lower-case tag name.
    pub tag: String,
    /// Attributes in insertion order. Names are unique.
    pub attributes: Vec<(String, String)>,
    /// Inline style declarations in insertion order. Properties are unique.
    pub style: Vec<(String, String)>,
    /// Message set through `setCustomValidity`. Empty means no custom error.
    pub custom_validity: String,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
            custom_validity: String::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping the original position when it already exists.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(n, _)| n != name);
        before != self.attributes.len()
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, slot)) => *slot = value,
            None => self.style.push((property.to_string(), value)),
        }
    }

    /// The `type` attribute of an `<input>`, lower-cased, defaulting to `text`.
    pub fn input_type(&self) -> Option<String> {
        (self.tag == "input").then(|| {
            self.attribute("type")
                .map(str::to_ascii_lowercase)
                .unwrap_or_else(|| "text".to_string())
        })
    }

    pub fn is_checkable(&self) -> bool {
        matches!(self.input_type().as_deref(), Some("checkbox" | "radio"))
    }
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element(ElementData::new(tag)),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(text.into()),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_keeps_position() {
        let mut el = ElementData::new("INPUT");
        el.set_attribute("id", "a");
        el.set_attribute("type", "checkbox");
        el.set_attribute("id", "b");

        assert_eq!(el.tag, "input");
        assert_eq!(
            el.attributes,
            vec![
                ("id".to_string(), "b".to_string()),
                ("type".to_string(), "checkbox".to_string()),
            ]
        );
    }

    #[test]
    fn test_input_type_defaults_to_text() {
        let mut el = ElementData::new("input");
        assert_eq!(el.input_type().as_deref(), Some("text"));
        assert!(!el.is_checkable());

        el.set_attribute("type", "Radio");
        assert!(el.is_checkable());

        assert_eq!(ElementData::new("div").input_type(), None);
    }
}
