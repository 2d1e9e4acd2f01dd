//! Canonical form of a choice control's configuration.
//!
//! Everything downstream of this module works with [`NormalizedConfig`] and
//! [`ChoiceOption`], never with raw option entries.

use horizon_forms_core::{AttrValue, Attributes};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::{scalar_text, ControlConfig, ControlType};

/// A single option in canonical shape.
#[derive(Debug, Clone)]
pub struct ChoiceOption {
    /// Visible text.
    pub label: String,
    /// Submitted value, if any.
    pub value: Option<String>,
    /// The option's own `selected` flag, before any control-level override.
    pub selected: bool,
    /// Extra attributes copied onto the rendered option.
    pub attrs: Attributes,
}

/// A configuration split into the pieces the renderer consumes.
#[derive(Debug, Clone)]
pub struct NormalizedConfig {
    /// The configured control type.
    pub control_type: ControlType,
    /// Input type of each option (`checkbox`, `radio`, or `select`).
    pub option_type: String,
    /// Whether the control renders a `<select>`.
    pub is_select: bool,
    /// Base for generated ids.
    pub base_id: String,
    /// The configured class name.
    pub class_name: String,
    /// The options, or `None` when the configuration has no list of values.
    pub options: Option<Vec<ChoiceOption>>,
    /// Attributes carried onto every input (or the `<select>`).
    pub data: Attributes,
    /// Control-level value to force-select.
    pub value: Option<String>,
    /// Prompt option for selects.
    pub placeholder: Option<String>,
    /// Inline layout.
    pub inline: bool,
    /// Render the free-text "other" choice.
    pub other: bool,
    /// Render switch-style toggles.
    pub toggle: bool,
    /// Multiple selections allowed.
    pub multiple: bool,
    /// Whether some option's value equals the control-level value.
    value_matches_option: bool,
}

impl NormalizedConfig {
    /// Normalize a raw configuration. Never fails.
    pub fn from_config(config: &ControlConfig) -> Self {
        let control_type = config.control_type.clone();
        let is_select = control_type.is_select();

        let mut data = Attributes::new();
        if !config.id.is_empty() {
            data.set("id", config.id.as_str());
        }
        if let Some(name) = &config.name {
            let submits_array =
                config.multiple || control_type == ControlType::CheckboxGroup;
            let name = if submits_array {
                format!("{name}[]")
            } else {
                name.clone()
            };
            data.set("name", name);
        }
        if !config.class_name.is_empty() {
            data.set("className", config.class_name.as_str());
        }
        data.set("required", config.required);
        data.set("multiple", config.multiple);
        extend_attributes(&mut data, &config.attrs);

        let options: Option<Vec<ChoiceOption>> = config.values.as_ref().map(|values| {
            values
                .iter()
                .cloned()
                .map(|entry| {
                    let spec = entry.into_spec();
                    let mut attrs = Attributes::new();
                    extend_attributes(&mut attrs, &spec.attrs);
                    ChoiceOption {
                        label: spec.label,
                        value: spec.value,
                        selected: spec.selected,
                        attrs,
                    }
                })
                .collect()
        });

        let value_matches_option = match (&config.value, &options) {
            (Some(value), Some(options)) => options
                .iter()
                .any(|o| o.value.as_ref() == Some(value)),
            _ => false,
        };

        Self {
            option_type: control_type.input_type(),
            is_select,
            control_type,
            base_id: config.id.clone(),
            class_name: config.class_name.clone(),
            options,
            data,
            value: config.value.clone(),
            placeholder: config.placeholder.clone().filter(|p| !p.is_empty()),
            inline: config.inline,
            other: config.other,
            toggle: config.toggle,
            multiple: config.multiple,
            value_matches_option,
        }
    }

    /// Whether `option` renders selected.
    ///
    /// A control-level value equal to the option's value always selects it.
    /// An option's own flag only counts when there is no placeholder and the
    /// control-level value matches no option, so distinct values never end
    /// up with more than one forced selection.
    pub fn resolve_selected(&self, option: &ChoiceOption) -> bool {
        let own = option.selected && self.placeholder.is_none() && !self.value_matches_option;
        let forced = self.value.is_some() && option.value == self.value;
        own || forced
    }

    /// The generated id of the option at `index`.
    pub fn option_id(&self, index: usize) -> String {
        format!("{}-{}", self.base_id, index)
    }

    /// The generated id of the "other" input.
    pub fn other_id(&self) -> String {
        format!("{}-other", self.base_id)
    }

    /// The class of the wrapper around each checkable option.
    pub fn wrapper_class(&self) -> String {
        if self.inline {
            format!("{}-inline", self.option_type)
        } else {
            self.option_type.clone()
        }
    }
}

/// Copy JSON attributes as element attributes. Booleans become flags;
/// `null` and containers are skipped.
fn extend_attributes(target: &mut Attributes, source: &BTreeMap<String, Value>) {
    for (name, value) in source {
        match value {
            Value::Bool(flag) => target.set(name.as_str(), AttrValue::Flag(*flag)),
            other => {
                if let Some(text) = scalar_text(other) {
                    target.set(name.as_str(), text);
                }
            }
        }
    }
}
