//! Re-applies previously submitted values to a mounted control.
//!
//! Selects select every `<option>` whose value was stored. Groups walk their
//! inputs in document order; each stored value checks at most one input, the
//! first one whose value matches. The "other" input never matches directly;
//! whatever is left over when it is reached (it is always last) goes into
//! the other text field. Checking a radio unchecks the rest of its group, so
//! a radio group keeps only the last match.

use horizon_forms_core::{DomResult, Document, NodeId};
use tracing::{debug, trace};

use super::other::OTHER_VALUE_CLASS;
use super::render::RenderedControl;
use crate::logging::targets;

/// An ordered multiset of values still waiting for an input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSelections {
    values: Vec<String>,
}

impl PendingSelections {
    /// Copy `values`, keeping their order and duplicates.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Remove the first occurrence of `value`. Returns whether one was found.
    pub fn take(&mut self, value: &str) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    /// The earliest remaining value.
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Remove and return the earliest remaining value.
    pub fn take_first(&mut self) -> Option<String> {
        (!self.values.is_empty()).then(|| self.values.remove(0))
    }

    /// Number of remaining values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether every value has been consumed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Apply `values` to `rendered`.
pub fn restore_selections(
    document: &mut Document,
    rendered: &RenderedControl,
    values: &[String],
) -> DomResult<()> {
    debug!(
        target: targets::RESTORE,
        values = values.len(),
        is_select = rendered.is_select,
        "restoring selections"
    );
    if rendered.is_select {
        restore_select(document, rendered, values)
    } else {
        restore_group(document, rendered, PendingSelections::new(values.iter().cloned()))
    }
}

fn restore_select(
    document: &mut Document,
    rendered: &RenderedControl,
    values: &[String],
) -> DomResult<()> {
    let options = document.elements_by_tag(rendered.root, "option");
    let matches: Vec<bool> = options
        .iter()
        .map(|&option| {
            let value = document.value(option);
            values.iter().any(|v| *v == value)
        })
        .collect();

    // A single select keeps only its last match.
    let keep_last = if rendered.multiple {
        None
    } else {
        matches.iter().rposition(|&m| m)
    };

    for (index, (&option, &matched)) in options.iter().zip(&matches).enumerate() {
        let selected = match keep_last {
            Some(last) => index == last,
            None => matched && rendered.multiple,
        };
        document.set_selected(option, selected)?;
    }
    Ok(())
}

fn restore_group(
    document: &mut Document,
    rendered: &RenderedControl,
    mut pending: PendingSelections,
) -> DomResult<()> {
    let inputs: Vec<NodeId> = document
        .elements_by_tag(rendered.root, "input")
        .into_iter()
        .filter(|&input| !document.has_class(input, OTHER_VALUE_CLASS))
        .collect();

    for input in inputs {
        // The other input's value comes from an earlier restore or typing,
        // so it only ever takes the leftovers.
        if let Some(other) = rendered.other.filter(|other| other.input == input) {
            match pending.take_first() {
                Some(first) => {
                    debug!(target: targets::RESTORE, value = %first, "restored into other option");
                    other.reveal_with(document, &first)?;
                }
                None => break,
            }
            continue;
        }

        let value = document.value(input);
        if pending.take(&value) {
            trace!(target: targets::RESTORE, value = %value, "checked stored value");
            document.set_checked(input, true)?;
        }
    }

    if !pending.is_empty() {
        debug!(
            target: targets::RESTORE,
            unmatched = pending.len(),
            "stored values without a matching option"
        );
    }
    Ok(())
}
