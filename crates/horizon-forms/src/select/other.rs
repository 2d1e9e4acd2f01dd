//! The free-text "other" choice.
//!
//! The other choice is a checkable input paired with a text field. The text
//! field is only visible while the input is checked, and whatever is typed
//! into it becomes the input's submitted value. All state lives in the
//! document; [`OtherNodes`] only remembers which nodes form the pair.

use horizon_forms_core::{DomResult, Document, Event, NodeId};

/// Class of the paired text field.
pub const OTHER_VALUE_CLASS: &str = "other-val";

/// The nodes making up a rendered "other" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtherNodes {
    /// The checkable input, id `{id}-other`.
    pub input: NodeId,
    /// The paired text field, id `{id}-other-value`.
    pub text_field: NodeId,
}

impl OtherNodes {
    /// Show the text field while the input is checked, hide it otherwise.
    pub fn sync_visibility(&self, document: &mut Document) -> DomResult<()> {
        let checked = document.checked(self.input);
        set_visible(document, self.text_field, checked)
    }

    /// Copy the text field's value into the input's `value` attribute.
    pub fn mirror_value(&self, document: &mut Document) -> DomResult<()> {
        let value = document.value(self.text_field);
        document.set_value(self.input, value)
    }

    /// Check the input, give both nodes `value`, and show the text field.
    pub fn reveal_with(&self, document: &mut Document, value: &str) -> DomResult<()> {
        document.set_checked(self.input, true)?;
        document.set_value(self.input, value)?;
        document.set_value(self.text_field, value)?;
        set_visible(document, self.text_field, true)
    }

    /// Click handler for the input.
    pub(crate) fn on_input_click(&self, document: &mut Document, _event: &Event) -> DomResult<()> {
        self.sync_visibility(document)
    }

    /// Input handler for the text field.
    pub(crate) fn on_text_input(&self, document: &mut Document, _event: &Event) -> DomResult<()> {
        self.mirror_value(document)
    }
}

fn set_visible(document: &mut Document, node: NodeId, visible: bool) -> DomResult<()> {
    let display = if visible { "inline-block" } else { "none" };
    document.set_style(node, "display", display)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, OtherNodes) {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attribute(input, "type", "checkbox").unwrap();
        let text_field = doc.create_element("input");
        doc.set_attribute(text_field, "type", "text").unwrap();
        (doc, OtherNodes { input, text_field })
    }

    #[test]
    fn test_visibility_follows_checked_state() {
        let (mut doc, other) = setup();
        doc.set_checked(other.input, true).unwrap();
        other.sync_visibility(&mut doc).unwrap();
        assert_eq!(doc.style(other.text_field, "display"), Some("inline-block"));

        // Idempotent.
        other.sync_visibility(&mut doc).unwrap();
        assert_eq!(doc.style(other.text_field, "display"), Some("inline-block"));

        doc.set_checked(other.input, false).unwrap();
        other.sync_visibility(&mut doc).unwrap();
        assert_eq!(doc.style(other.text_field, "display"), Some("none"));
    }

    #[test]
    fn test_mirror_value() {
        let (mut doc, other) = setup();
        doc.set_value(other.text_field, "teal").unwrap();
        other.mirror_value(&mut doc).unwrap();
        assert_eq!(doc.attribute(other.input, "value"), Some("teal"));
    }

    #[test]
    fn test_reveal_with() {
        let (mut doc, other) = setup();
        other.reveal_with(&mut doc, "d").unwrap();
        assert!(doc.checked(other.input));
        assert_eq!(doc.value(other.input), "d");
        assert_eq!(doc.value(other.text_field), "d");
        assert_eq!(doc.style(other.text_field, "display"), Some("inline-block"));
    }
}
