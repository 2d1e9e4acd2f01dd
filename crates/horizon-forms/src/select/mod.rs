//! The choice control: selects, checkbox groups, radio groups and lone checkboxes.
//!
//! One control type covers every configuration that picks from a list of
//! options. Building goes through three stages:
//!
//! 1. [`NormalizedConfig`] expands option shorthands and separates the
//!    attributes carried onto inputs from the presentation settings
//! 2. [`OptionRenderer`] creates the elements, including the placeholder and
//!    the free-text "other" choice
//! 3. After mounting, stored `userData` is restored and, for required
//!    checkbox groups, the [`GroupRequired`] constraint is attached
//!
//! # Generated Ids
//!
//! | Element                 | Id                  |
//! |-------------------------|---------------------|
//! | `<select>`              | `{id}`              |
//! | option or input `n`     | `{id}-{n}`          |
//! | "other" input           | `{id}-other`        |
//! | "other" text field      | `{id}-other-value`  |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_forms::{mount, ControlConfig, SelectControl};
//! use horizon_forms_core::{Catalog, Document};
//!
//! let config = ControlConfig::new("checkbox-group", "pets")
//!     .with_values(["cat", "dog"])
//!     .with_other()
//!     .with_user_data(["dog", "ferret"]);
//! let mut control = SelectControl::new(config, Arc::new(Catalog::english()));
//!
//! let mut doc = Document::new();
//! let body = doc.root();
//! mount(&mut doc, body, &mut control).unwrap();
//! assert_eq!(control.selected_values(&doc), vec!["dog", "ferret"]);
//! ```

mod normalize;
mod other;
mod render;
mod restore;
mod validity;

use std::fmt;
use std::sync::Arc;

use horizon_forms_core::{Document, Localizer, NodeId};
use tracing::debug;

use crate::config::{ControlConfig, ControlType};
use crate::control::{Control, ControlDefinition};
use crate::error::Result;
use crate::logging::targets;

pub use normalize::{ChoiceOption, NormalizedConfig};
pub use other::{OtherNodes, OTHER_VALUE_CLASS};
pub use render::{OptionRenderer, RenderedControl, OTHER_LABEL_KEY, TOGGLE_CLASS};
pub use restore::{restore_selections, PendingSelections};
pub use validity::{GroupRequired, MIN_SELECTIONS, MIN_SELECTION_KEY};

static DEFINITION: ControlDefinition = ControlDefinition {
    inactive: &["checkbox"],
    i18n_keys: &[MIN_SELECTION_KEY, OTHER_LABEL_KEY],
};

/// A select, checkbox group, radio group or single checkbox.
pub struct SelectControl {
    config: ControlConfig,
    localizer: Arc<dyn Localizer>,
    rendered: Option<RenderedControl>,
    validity_attached: bool,
}

impl fmt::Debug for SelectControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectControl")
            .field("config", &self.config)
            .field("rendered", &self.rendered)
            .field("validity_attached", &self.validity_attached)
            .finish_non_exhaustive()
    }
}

impl SelectControl {
    /// The type names this control handles.
    pub const TYPES: &'static [&'static str] = &["select", "checkbox-group", "radio-group", "checkbox"];

    /// Create a control for `config`.
    pub fn new(config: ControlConfig, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            config,
            localizer,
            rendered: None,
            validity_attached: false,
        }
    }

    /// Constructor suitable for [`ControlRegistry`](crate::ControlRegistry).
    pub fn boxed(config: ControlConfig, localizer: Arc<dyn Localizer>) -> Box<dyn Control> {
        Box::new(Self::new(config, localizer))
    }

    /// Handles to the nodes of the last build.
    pub fn rendered(&self) -> Option<&RenderedControl> {
        self.rendered.as_ref()
    }

    /// Check or select the options matching `values`.
    ///
    /// Does nothing before the control is built. Running it twice with the
    /// same values leaves the same options checked.
    pub fn restore(&self, document: &mut Document, values: &[String]) -> Result<()> {
        if let Some(rendered) = &self.rendered {
            restore_selections(document, rendered, values)?;
        }
        Ok(())
    }

    /// The values that would be submitted right now.
    ///
    /// Selected `<option>` values for selects, checked input values
    /// otherwise. A checked "other" contributes the text it mirrors.
    pub fn selected_values(&self, document: &Document) -> Vec<String> {
        let Some(rendered) = &self.rendered else {
            return Vec::new();
        };
        if rendered.is_select {
            rendered
                .options
                .iter()
                .filter(|&&option| document.selected(option))
                .map(|&option| document.value(option))
                .collect()
        } else {
            rendered
                .checkable_inputs()
                .into_iter()
                .filter(|&input| document.checked(input))
                .map(|input| document.value(input))
                .collect()
        }
    }

    fn needs_group_required(&self) -> bool {
        self.config.control_type == ControlType::CheckboxGroup && self.config.required
    }

    fn attach_validity(&mut self, document: &mut Document) -> Result<()> {
        if self.validity_attached || !self.needs_group_required() {
            return Ok(());
        }
        let Some(rendered) = &self.rendered else {
            return Ok(());
        };
        let min = MIN_SELECTIONS.to_string();
        let message = self.localizer.get(MIN_SELECTION_KEY, &[min.as_str()]);
        GroupRequired::new(rendered.checkable_inputs(), message).attach(document)?;
        self.validity_attached = true;
        Ok(())
    }
}

impl Control for SelectControl {
    fn config(&self) -> &ControlConfig {
        &self.config
    }

    fn definition(&self) -> &'static ControlDefinition {
        &DEFINITION
    }

    fn build(&mut self, document: &mut Document) -> Result<NodeId> {
        let normalized = NormalizedConfig::from_config(&self.config);
        let rendered = OptionRenderer::new(&normalized, self.localizer.as_ref()).render(document)?;
        let root = rendered.root;
        self.rendered = Some(rendered);
        self.validity_attached = false;
        Ok(root)
    }

    fn on_render(&mut self, document: &mut Document) -> Result<()> {
        if let Some(user_data) = &self.config.user_data {
            self.restore(document, user_data)?;
        }
        self.attach_validity(document)?;
        debug!(
            target: targets::CONTROL,
            id = %self.config.id,
            validity = self.validity_attached,
            "choice control rendered"
        );
        Ok(())
    }

    fn dom(&self) -> Option<NodeId> {
        self.rendered.as_ref().map(|r| r.root)
    }
}
