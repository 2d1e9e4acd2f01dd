//! Event listeners and dispatch for Horizon Forms.
//!
//! Listeners are attached to a single node for a single [`EventKind`] and are
//! invoked with mutable access to the [`Document`], so a handler can update
//! other nodes in response to user interaction.
//!
//! # Dispatch Order
//!
//! Listeners run at the target only (there is no capture or bubble phase), in
//! the order they were registered. A listener registered or removed while an
//! event is being dispatched takes effect from the next dispatch.
//!
//! # Example
//!
//! ```
//! use horizon_forms_core::{Document, EventKind};
//!
//! let mut doc = Document::new();
//! let input = doc.create_element("input");
//! doc.set_attribute(input, "type", "checkbox").unwrap();
//! let status = doc.create_element("span");
//!
//! doc.add_event_listener(input, EventKind::Change, move |doc, event| {
//!     let text = if doc.checked(event.target) { "on" } else { "off" };
//!     doc.set_attribute(status, "data-state", text)
//! })
//! .unwrap();
//!
//! doc.click(input).unwrap();
//! assert_eq!(doc.attribute(status, "data-state"), Some("on"));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use slotmap::new_key_type;
use tracing::{trace, warn};

use crate::dom::{Document, NodeId};
use crate::error::{DomError, DomResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a registered event listener.
    ///
    /// Use this ID to remove a listener via [`Document::remove_event_listener`].
    pub struct ListenerId;
}

/// The kinds of events form controls react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The element was activated by the pointer or keyboard.
    Click,
    /// A committed change to a checkbox, radio, or select.
    Change,
    /// The value of an editable element changed.
    Input,
}

impl EventKind {
    /// The DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
            Self::Input => "input",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "click" => Ok(Self::Click),
            "change" => Ok(Self::Change),
            "input" => Ok(Self::Input),
            other => Err(format!("unsupported event type '{other}'")),
        }
    }
}

/// An event delivered to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// The node the event was dispatched to.
    pub target: NodeId,
}

/// A listener callback.
///
/// Handlers receive the document mutably. An error returned from a handler
/// is logged and does not stop the remaining listeners.
pub type EventHandler = Arc<dyn Fn(&mut Document, &Event) -> DomResult<()> + Send + Sync>;

/// Internal storage for a single listener.
pub(crate) struct Listener {
    node: NodeId,
    kind: EventKind,
    /// Registration order; slotmap iteration order is not insertion order.
    seq: u64,
    handler: EventHandler,
}

impl Document {
    /// Attach a listener to `node` for events of `kind`.
    pub fn add_event_listener<F>(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: F,
    ) -> DomResult<ListenerId>
    where
        F: Fn(&mut Document, &Event) -> DomResult<()> + Send + Sync + 'static,
    {
        self.add_event_handler(node, kind, Arc::new(handler))
    }

    /// Attach an already shared handler to `node` for events of `kind`.
    pub fn add_event_handler(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: EventHandler,
    ) -> DomResult<ListenerId> {
        if !self.is_element(node) {
            return Err(if self.contains(node) {
                DomError::NotAnElement
            } else {
                DomError::InvalidNode
            });
        }
        let seq = self.next_listener_seq;
        self.next_listener_seq += 1;
        let id = self.listeners.insert(Listener {
            node,
            kind,
            seq,
            handler,
        });
        trace!(target: targets::EVENT, ?node, %kind, ?id, "listener added");
        Ok(id)
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Number of listeners attached to `node` for `kind`.
    pub fn listener_count(&self, node: NodeId, kind: EventKind) -> usize {
        self.listeners
            .values()
            .filter(|l| l.node == node && l.kind == kind)
            .count()
    }

    /// Dispatch an event to the listeners attached to `target`.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind) -> usize {
        let mut matching: Vec<(u64, EventHandler)> = self
            .listeners
            .values()
            .filter(|l| l.node == target && l.kind == kind)
            .map(|l| (l.seq, Arc::clone(&l.handler)))
            .collect();
        matching.sort_by_key(|(seq, _)| *seq);

        let event = Event { kind, target };
        trace!(target: targets::EVENT, ?target, %kind, listeners = matching.len(), "dispatching");
        for (_, handler) in &matching {
            if let Err(err) = (**handler)(self, &event) {
                warn!(target: targets::EVENT, ?target, %kind, error = %err, "event listener failed");
            }
        }
        matching.len()
    }

    // =========================================================================
    // Simulated user interaction
    // =========================================================================

    /// Simulate a user click on `node`.
    ///
    /// Disabled elements ignore the click. Checkboxes toggle; radios become
    /// checked and uncheck every other radio with the same `name` under the
    /// same root. `click` is dispatched first, then `input` and `change` if
    /// the checked state changed.
    pub fn click(&mut self, node: NodeId) -> DomResult<()> {
        if !self.contains(node) {
            return Err(DomError::InvalidNode);
        }
        if self.is_disabled(node) {
            trace!(target: targets::EVENT, ?node, "click ignored on disabled element");
            return Ok(());
        }

        let input_type = self.element(node).and_then(|e| e.input_type());
        let changed = match input_type.as_deref() {
            Some("checkbox") => {
                let checked = self.checked(node);
                self.set_checked(node, !checked)?;
                true
            }
            Some("radio") if !self.checked(node) => {
                self.set_checked(node, true)?;
                true
            }
            _ => false,
        };

        self.dispatch(node, EventKind::Click);
        if changed {
            self.dispatch(node, EventKind::Input);
            self.dispatch(node, EventKind::Change);
        }
        Ok(())
    }

    /// Simulate the user replacing the text of an editable element.
    ///
    /// Sets the value and dispatches `input`.
    pub fn type_text(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        if self.is_disabled(node) {
            return Ok(());
        }
        self.set_value(node, text)?;
        self.dispatch(node, EventKind::Input);
        Ok(())
    }
}
