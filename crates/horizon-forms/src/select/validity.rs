//! Group-level "at least one checked" constraint.
//!
//! Native validation only knows single-field `required`. A required checkbox
//! group is expressed by keeping every checkbox `required` with a custom
//! validity message while none is checked, and clearing both from all of them
//! as soon as one is.

use std::sync::Arc;

use horizon_forms_core::{DomResult, Document, EventKind, NodeId};
use tracing::{debug, trace};

use crate::logging::targets;

/// Localization key of the validity message.
pub const MIN_SELECTION_KEY: &str = "minSelectionRequired";

/// Minimum number of checked boxes in a required group.
pub const MIN_SELECTIONS: usize = 1;

/// The constraint for one group of checkboxes.
#[derive(Debug, Clone)]
pub struct GroupRequired {
    checkboxes: Arc<[NodeId]>,
    message: String,
}

impl GroupRequired {
    /// Create a constraint over `checkboxes` reporting `message` when unmet.
    pub fn new(checkboxes: impl Into<Arc<[NodeId]>>, message: impl Into<String>) -> Self {
        Self {
            checkboxes: checkboxes.into(),
            message: message.into(),
        }
    }

    /// The checkboxes this constraint covers.
    pub fn checkboxes(&self) -> &[NodeId] {
        &self.checkboxes
    }

    /// Whether enough boxes are checked.
    pub fn is_satisfied(&self, document: &Document) -> bool {
        self.checkboxes
            .iter()
            .filter(|&&node| document.checked(node))
            .count()
            >= MIN_SELECTIONS
    }

    /// Listen for changes on every checkbox and establish the initial state.
    pub fn attach(self, document: &mut Document) -> DomResult<()> {
        let constraint = Arc::new(self);
        for &checkbox in constraint.checkboxes.iter() {
            let constraint = Arc::clone(&constraint);
            document.add_event_listener(checkbox, EventKind::Change, move |doc, _| {
                constraint.refresh(doc)
            })?;
        }
        debug!(
            target: targets::VALIDITY,
            checkboxes = constraint.checkboxes.len(),
            "attached group required constraint"
        );
        constraint.refresh(document)
    }

    /// Recompute validity and update every checkbox.
    pub fn refresh(&self, document: &mut Document) -> DomResult<()> {
        let satisfied = self.is_satisfied(document);
        trace!(target: targets::VALIDITY, satisfied, "refreshing group validity");
        for &checkbox in self.checkboxes.iter() {
            if satisfied {
                document.remove_attribute(checkbox, "required")?;
                document.set_custom_validity(checkbox, "")?;
            } else {
                document.set_attribute(checkbox, "required", "required")?;
                document.set_custom_validity(checkbox, self.message.as_str())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(count: usize) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let group = doc.create_element("div");
        doc.append_child(doc.root(), group).unwrap();
        let boxes = (0..count)
            .map(|_| {
                let cb = doc.create_element("input");
                doc.set_attribute(cb, "type", "checkbox").unwrap();
                doc.append_child(group, cb).unwrap();
                cb
            })
            .collect();
        (doc, boxes)
    }

    #[test]
    fn test_initial_state_is_invalid() {
        let (mut doc, boxes) = setup(3);
        GroupRequired::new(boxes.clone(), "pick one")
            .attach(&mut doc)
            .unwrap();
        for &cb in &boxes {
            assert!(doc.has_attribute(cb, "required"));
            assert_eq!(doc.validation_message(cb), "pick one");
            assert!(!doc.check_validity(cb));
        }
    }

    #[test]
    fn test_checking_any_box_clears_all() {
        let (mut doc, boxes) = setup(3);
        GroupRequired::new(boxes.clone(), "pick one")
            .attach(&mut doc)
            .unwrap();

        doc.click(boxes[1]).unwrap();
        for &cb in &boxes {
            assert!(!doc.has_attribute(cb, "required"));
            assert_eq!(doc.validation_message(cb), "");
            assert!(doc.check_validity(cb));
        }

        doc.click(boxes[1]).unwrap();
        assert!(boxes.iter().all(|&cb| doc.has_attribute(cb, "required")));
    }

    #[test]
    fn test_already_checked_at_attach() {
        let (mut doc, boxes) = setup(2);
        doc.set_checked(boxes[0], true).unwrap();
        let constraint = GroupRequired::new(boxes.clone(), "pick one");
        assert!(constraint.is_satisfied(&doc));
        constraint.attach(&mut doc).unwrap();
        assert!(!doc.has_attribute(boxes[1], "required"));
        assert_eq!(doc.listener_count(boxes[1], EventKind::Change), 1);
    }
}
