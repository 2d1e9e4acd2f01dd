//! Document tree for Horizon Forms.
//!
//! Provides an arena-backed element tree that controls render into:
//! - Stable node identifiers via [`slotmap`] storage
//! - Ordered attributes and inline styles
//! - Form state (checked, selected, value) reflected as attributes
//! - Native-style constraint validation with custom validity messages
//!
//! A [`Document`] owns a root `<body>` element. Nodes reachable from that
//! root are *connected*, which is the equivalent of being mounted in a page.
//!
//! # Example
//!
//! ```
//! use horizon_forms_core::Document;
//!
//! let mut doc = Document::new();
//! let input = doc.create_element("input");
//! doc.set_attribute(input, "type", "checkbox").unwrap();
//! doc.set_attribute(input, "id", "agree").unwrap();
//!
//! assert!(doc.get_element_by_id("agree").is_none());
//! doc.append_child(doc.root(), input).unwrap();
//! assert_eq!(doc.get_element_by_id("agree"), Some(input));
//! ```

mod node;
mod serialize;

use slotmap::SlotMap;
use tracing::trace;

pub use node::NodeId;
pub(crate) use node::{ElementData, Node, NodeKind};

use crate::error::{DomError, DomResult};
use crate::event::Listener;
use crate::event::ListenerId;
use crate::logging::targets;

/// An element tree with attached event listeners.
///
/// All node access goes through the document using [`NodeId`] handles.
/// Reads on an unknown node return `None` (or an empty value); writes return
/// [`DomError::InvalidNode`].
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) listeners: SlotMap<ListenerId, Listener>,
    pub(crate) next_listener_seq: u64,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("root", &self.root)
            .finish()
    }
}

impl Document {
    /// Create an empty document with a `<body>` root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::element("body"));
        Self {
            nodes,
            listeners: SlotMap::with_key(),
            next_listener_seq: 0,
            root,
        }
    }

    /// The root element. Nodes under it are connected.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, including the root and detached nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the node belongs to this document.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // =========================================================================
    // Construction and tree structure
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::element(tag))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(Node::text(text))
    }

    /// Append `child` as the last child of `parent`, detaching it first if needed.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.nodes.get(parent).ok_or(DomError::InvalidNode)?;
        if parent_node.as_element().is_none() {
            return Err(DomError::HierarchyRequest("text nodes cannot have children"));
        }
        if !self.nodes.contains_key(child) {
            return Err(DomError::InvalidNode);
        }
        if child == self.root {
            return Err(DomError::HierarchyRequest("the root cannot be re-parented"));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(
                "a node cannot be appended to its own descendant",
            ));
        }

        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        trace!(target: targets::DOM, ?parent, ?child, "appended child");
        Ok(())
    }

    /// Remove `child` from its parent. The node stays alive in the arena.
    pub fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
        self.nodes[child].parent = None;
    }

    /// The parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Direct children in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// All descendants of `id` in pre-order (document order), excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Descendant elements with the given tag, in document order.
    pub fn elements_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.tag(n) == Some(tag.as_str()))
            .collect()
    }

    /// Find a connected element by its `id` attribute.
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.attribute(n, "id") == Some(element_id))
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, id)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // =========================================================================
    // Node inspection
    // =========================================================================

    /// The tag name of an element, or `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Whether the node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let Some(Node { kind: NodeKind::Text(t), .. }) = self.nodes.get(id) {
            text.push_str(t);
        }
        for node in self.descendants(id) {
            if let NodeKind::Text(t) = &self.nodes[node].kind {
                text.push_str(t);
            }
        }
        text
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(Node::as_element)
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.nodes
            .get_mut(id)
            .ok_or(DomError::InvalidNode)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement)
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Get an attribute value.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    /// Check whether an attribute is present.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Attribute name/value pairs in insertion order.
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        self.element(id)
            .map(|e| e.attributes.as_slice())
            .unwrap_or_default()
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> DomResult<()> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.element_mut(id)?.remove_attribute(name))
    }

    /// The whitespace-separated entries of the `class` attribute.
    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.attribute(id, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check whether the `class` attribute contains `class_name`.
    pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
        self.classes(id).contains(&class_name)
    }

    // =========================================================================
    // Inline style
    // =========================================================================

    /// Get an inline style property, e.g. `display`.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style(property))
    }

    /// Set an inline style property.
    pub fn set_style(
        &mut self,
        id: NodeId,
        property: &str,
        value: impl Into<String>,
    ) -> DomResult<()> {
        self.element_mut(id)?.set_style(property, value);
        Ok(())
    }

    // =========================================================================
    // Form state
    // =========================================================================

    /// Whether a checkbox or radio input is checked.
    pub fn checked(&self, id: NodeId) -> bool {
        self.has_attribute(id, "checked")
    }

    /// Check or uncheck an input.
    ///
    /// Checking a radio unchecks every other radio with the same `name`
    /// under the same top-level ancestor.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> DomResult<()> {
        let element = self.element_mut(id)?;
        if !checked {
            element.remove_attribute("checked");
            return Ok(());
        }
        element.set_attribute("checked", "checked");
        if element.input_type().as_deref() == Some("radio") {
            self.uncheck_radio_siblings(id)?;
        }
        Ok(())
    }

    fn uncheck_radio_siblings(&mut self, node: NodeId) -> DomResult<()> {
        let Some(name) = self.attribute(node, "name").map(str::to_string) else {
            return Ok(());
        };
        let mut top = node;
        while let Some(parent) = self.parent(top) {
            top = parent;
        }
        let others: Vec<NodeId> = self
            .elements_by_tag(top, "input")
            .into_iter()
            .filter(|&n| n != node)
            .filter(|&n| self.attribute(n, "type") == Some("radio"))
            .filter(|&n| self.attribute(n, "name") == Some(name.as_str()))
            .collect();
        for other in others {
            self.set_checked(other, false)?;
        }
        Ok(())
    }

    /// Whether an `<option>` is selected.
    pub fn selected(&self, id: NodeId) -> bool {
        self.has_attribute(id, "selected")
    }

    /// Select or deselect an `<option>`.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> DomResult<()> {
        let element = self.element_mut(id)?;
        if selected {
            element.set_attribute("selected", "selected");
        } else {
            element.remove_attribute("selected");
        }
        Ok(())
    }

    /// The current value of a form element.
    ///
    /// An `<option>` without a `value` attribute reports its text content.
    /// Other elements without a `value` attribute report an empty string.
    pub fn value(&self, id: NodeId) -> String {
        match self.attribute(id, "value") {
            Some(value) => value.to_string(),
            None if self.tag(id) == Some("option") => self.text_content(id),
            None => String::new(),
        }
    }

    /// Set the value of a form element.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> DomResult<()> {
        self.set_attribute(id, "value", value)
    }

    /// Whether the element carries the `disabled` attribute.
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.has_attribute(id, "disabled")
    }

    // =========================================================================
    // Constraint validation
    // =========================================================================

    /// Set a custom validity message. An empty message clears the custom error.
    pub fn set_custom_validity(&mut self, id: NodeId, message: impl Into<String>) -> DomResult<()> {
        self.element_mut(id)?.custom_validity = message.into();
        Ok(())
    }

    /// The current custom validity message, empty when none is set.
    pub fn validation_message(&self, id: NodeId) -> &str {
        self.element(id)
            .map(|e| e.custom_validity.as_str())
            .unwrap_or_default()
    }

    /// Run constraint validation on a single element.
    ///
    /// Fails when a custom validity message is set, or when the element is
    /// `required` and is an unchecked checkbox/radio or has an empty value.
    pub fn check_validity(&self, id: NodeId) -> bool {
        let Some(element) = self.element(id) else {
            return true;
        };
        if !element.custom_validity.is_empty() {
            return false;
        }
        if element.attribute("required").is_none() || element.attribute("disabled").is_some() {
            return true;
        }
        if element.is_checkable() {
            element.attribute("checked").is_some()
        } else {
            !self.value(id).is_empty()
        }
    }
}

static_assertions::assert_impl_all!(Document: Send, Sync);
