//! The control abstraction shared by every form field renderer.
//!
//! A control is bound to one [`ControlConfig`] and owns the subtree it builds.
//! Its lifecycle has two steps:
//!
//! 1. [`Control::build`] creates the detached subtree and returns its root
//! 2. After the caller attaches that root to the document, it calls
//!    [`Control::on_render`] exactly once
//!
//! [`mount`] performs both steps in the right order.

use horizon_forms_core::{Document, NodeId};
use tracing::debug;

use crate::config::ControlConfig;
use crate::error::Result;
use crate::logging::targets;

/// Static metadata describing a control class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDefinition {
    /// Registered type names for which the control disables its editor
    /// capabilities (e.g. option editing makes no sense for a lone checkbox).
    pub inactive: &'static [&'static str],
    /// Localization keys the control looks up at runtime.
    pub i18n_keys: &'static [&'static str],
}

impl ControlDefinition {
    /// Whether the control is inactive for `type_name`.
    pub fn is_inactive(&self, type_name: &str) -> bool {
        self.inactive.contains(&type_name)
    }
}

/// A form field renderer.
pub trait Control: Send + Sync {
    /// The configuration this control was created with.
    fn config(&self) -> &ControlConfig;

    /// Static metadata for this control class.
    fn definition(&self) -> &'static ControlDefinition;

    /// Build the control's subtree and return its detached root.
    ///
    /// Building again discards the previous subtree's bookkeeping.
    fn build(&mut self, document: &mut Document) -> Result<NodeId>;

    /// Post-mount hook, called once after the root is attached.
    fn on_render(&mut self, _document: &mut Document) -> Result<()> {
        Ok(())
    }

    /// The root built by the last call to [`build`](Control::build).
    fn dom(&self) -> Option<NodeId>;
}

/// Build `control`, append it to `parent`, then run its post-mount hook.
pub fn mount(document: &mut Document, parent: NodeId, control: &mut dyn Control) -> Result<NodeId> {
    let root = control.build(document)?;
    document.append_child(parent, root)?;
    debug!(
        target: targets::CONTROL,
        control_type = %control.config().control_type,
        id = %control.config().id,
        "mounted control"
    );
    control.on_render(document)?;
    Ok(root)
}
