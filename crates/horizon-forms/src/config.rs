//! Declarative control configuration.
//!
//! A [`ControlConfig`] is usually deserialized from the JSON a form builder
//! stores, but can also be assembled in code with the builder methods.
//!
//! ```
//! use horizon_forms::ControlConfig;
//!
//! let config = ControlConfig::from_json(r#"{
//!     "type": "checkbox-group",
//!     "id": "colors",
//!     "name": "colors",
//!     "values": ["red", {"label": "Green", "value": "green", "selected": true}],
//!     "data-section": "palette"
//! }"#).unwrap();
//!
//! assert_eq!(config.values.as_ref().map(Vec::len), Some(2));
//! assert!(config.attrs.contains_key("data-section"));
//! ```
//!
//! # Leniency
//!
//! Malformed shapes never fail deserialization of an otherwise valid JSON
//! document. A `values` field that is not a list is treated as absent, and
//! option entries that are neither strings, scalars nor objects are dropped.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::logging::targets;

/// The kind of choice control to render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlType {
    /// A `<select>` dropdown.
    Select,
    /// A single checkbox.
    Checkbox,
    /// A group of radio buttons.
    RadioGroup,
    /// A group of checkboxes.
    CheckboxGroup,
    /// Any other type name, kept verbatim.
    Other(String),
}

impl ControlType {
    /// The configuration name, e.g. `checkbox-group`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::RadioGroup => "radio-group",
            Self::CheckboxGroup => "checkbox-group",
            Self::Other(name) => name,
        }
    }

    /// The underlying input type: the name with any `-group` suffix removed.
    pub fn input_type(&self) -> String {
        self.as_str().replace("-group", "")
    }

    /// Whether this renders a `<select>`.
    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select)
    }

    /// Whether the name ends in `-group`.
    pub fn is_group(&self) -> bool {
        self.as_str().ends_with("-group")
    }
}

impl From<String> for ControlType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "radio-group" => Self::RadioGroup,
            "checkbox-group" => Self::CheckboxGroup,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for ControlType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<ControlType> for String {
    fn from(kind: ControlType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Visible text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    /// Submitted value. An option without one has no `value` attribute.
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    /// Whether the option starts selected.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub selected: bool,
    /// Extra attributes copied onto the rendered option.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, Value>,
}

impl OptionSpec {
    /// An option whose label and value are the same text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: Some(text),
            ..Self::default()
        }
    }

    /// An option with distinct label and value.
    pub fn labeled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Mark the option selected using builder pattern.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Add an extra attribute using builder pattern.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// One entry of the `values` list: shorthand text or a full option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionEntry {
    /// Shorthand for an option whose label and value are this text.
    Text(String),
    /// A fully specified option.
    Spec(OptionSpec),
}

impl OptionEntry {
    /// Expand into the canonical option shape.
    pub fn into_spec(self) -> OptionSpec {
        match self {
            Self::Text(text) => OptionSpec::new(text),
            Self::Spec(spec) => spec,
        }
    }
}

impl From<&str> for OptionEntry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for OptionEntry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<OptionSpec> for OptionEntry {
    fn from(spec: OptionSpec) -> Self {
        Self::Spec(spec)
    }
}

/// Configuration for a choice control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlConfig {
    /// Which control to render.
    #[serde(rename = "type", deserialize_with = "lenient_control_type")]
    pub control_type: ControlType,
    /// Base id; option ids are derived from it.
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    /// Class applied to every rendered input (or the `<select>`).
    #[serde(default, deserialize_with = "lenient_text")]
    pub class_name: String,
    /// Form field name.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// The options. `None` when absent or not a list.
    #[serde(
        default,
        deserialize_with = "lenient_values",
        skip_serializing_if = "Option::is_none"
    )]
    pub values: Option<Vec<OptionEntry>>,
    /// Value to pre-select, overriding per-option `selected` flags.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    /// Prompt shown as the first, disabled option of a select.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<String>,
    /// Lay options out inline.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub inline: bool,
    /// Append a free-text "other" choice.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub other: bool,
    /// Render checkboxes as toggle switches.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub toggle: bool,
    /// Allow several selections in a select.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub multiple: bool,
    /// Require a selection.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub required: bool,
    /// Tooltip text. Never rendered by choice controls.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    /// Previously submitted values to restore after mounting.
    #[serde(
        default,
        deserialize_with = "lenient_user_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_data: Option<Vec<String>>,
    /// Any other attributes, carried onto the rendered inputs.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, Value>,
}

impl ControlConfig {
    /// A configuration with only a type and id set.
    pub fn new(control_type: impl Into<ControlType>, id: impl Into<String>) -> Self {
        Self {
            control_type: control_type.into(),
            id: id.into(),
            class_name: String::new(),
            name: None,
            values: None,
            value: None,
            placeholder: None,
            inline: false,
            other: false,
            toggle: false,
            multiple: false,
            required: false,
            title: None,
            user_data: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Set the options using builder pattern.
    pub fn with_values<I, E>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<OptionEntry>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the form field name using builder pattern.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the class using builder pattern.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the pre-selected value using builder pattern.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Enable inline layout using builder pattern.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Enable the "other" option using builder pattern.
    pub fn with_other(mut self) -> Self {
        self.other = true;
        self
    }

    /// Enable toggle-switch rendering using builder pattern.
    pub fn toggle(mut self) -> Self {
        self.toggle = true;
        self
    }

    /// Allow multiple selections using builder pattern.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Require a selection using builder pattern.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the values to restore after mounting using builder pattern.
    pub fn with_user_data<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_data = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Add an extra attribute using builder pattern.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Render a JSON scalar as attribute text. Containers and null have no text form.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Read a flag by truthiness: `null`, `false`, `0`, `""` and `"false"` are
/// false, everything else is true.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !(s.is_empty() || s == "false"),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn lenient_control_type<'de, D>(deserializer: D) -> std::result::Result<ControlType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value)
        .map(ControlType::from)
        .ok_or_else(|| serde::de::Error::custom("control type must be a string"))
}

fn lenient_values<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<OptionEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        debug!(target: targets::CONFIG, "ignoring non-list values");
        return Ok(None);
    };
    let entries = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(_) => match serde_json::from_value::<OptionSpec>(item) {
                Ok(spec) => Some(OptionEntry::Spec(spec)),
                Err(err) => {
                    debug!(target: targets::CONFIG, index, error = %err, "dropping malformed option");
                    None
                }
            },
            other => {
                let text = scalar_text(&other);
                if text.is_none() {
                    debug!(target: targets::CONFIG, index, "dropping option that is not a string or object");
                }
                text.map(OptionEntry::Text)
            }
        })
        .collect();
    Ok(Some(entries))
}

fn lenient_user_data<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
        Value::Null => None,
        single => scalar_text(&single).map(|s| vec![s]),
    })
}
