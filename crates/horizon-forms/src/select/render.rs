//! Builds the element tree of a choice control.

use horizon_forms_core::{AttrValue, Attributes, Content, DomResult, Document, EventKind, Localizer, NodeId};
use tracing::debug;

use super::normalize::{ChoiceOption, NormalizedConfig};
use super::other::{OtherNodes, OTHER_VALUE_CLASS};
use crate::logging::targets;

/// Localization key of the "other" label.
pub const OTHER_LABEL_KEY: &str = "other";

/// Class of the label wrapping a switch-style option.
pub const TOGGLE_CLASS: &str = "kc-toggle";

/// Handles to the nodes of a built control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedControl {
    /// The `<select>` or the group `<div>`.
    pub root: NodeId,
    /// One node per configured option: `<option>` elements for selects,
    /// checkable inputs otherwise. Excludes the placeholder and "other".
    pub options: Vec<NodeId>,
    /// The placeholder `<option>`, if rendered.
    pub placeholder: Option<NodeId>,
    /// The "other" choice, if rendered.
    pub other: Option<OtherNodes>,
    /// Whether the root is a `<select>`.
    pub is_select: bool,
    /// Whether several options may be selected at once.
    pub multiple: bool,
}

impl RenderedControl {
    /// Every checkable input, the "other" input last. Empty for selects.
    pub fn checkable_inputs(&self) -> Vec<NodeId> {
        if self.is_select {
            return Vec::new();
        }
        let mut inputs = self.options.clone();
        inputs.extend(self.other.map(|other| other.input));
        inputs
    }
}

/// Turns a [`NormalizedConfig`] into elements.
pub struct OptionRenderer<'a> {
    config: &'a NormalizedConfig,
    localizer: &'a dyn Localizer,
}

impl<'a> OptionRenderer<'a> {
    /// Create a renderer for `config`.
    pub fn new(config: &'a NormalizedConfig, localizer: &'a dyn Localizer) -> Self {
        Self { config, localizer }
    }

    /// Build the detached subtree.
    pub fn render(&self, document: &mut Document) -> DomResult<RenderedControl> {
        let config = self.config;
        let mut children = Vec::new();
        let mut options = Vec::new();
        let mut placeholder = None;
        let mut other = None;

        if let Some(values) = &config.options {
            if config.is_select {
                if let Some(text) = &config.placeholder {
                    let node = document.markup(
                        "option",
                        text.as_str(),
                        Attributes::new().with("disabled", true),
                    )?;
                    placeholder = Some(node);
                    children.push(node);
                }
            }

            for (index, option) in values.iter().enumerate() {
                if config.is_select {
                    let node = self.render_select_option(document, index, option)?;
                    options.push(node);
                    children.push(node);
                } else {
                    let (wrapper, input) = self.render_checkable(document, index, option)?;
                    options.push(input);
                    children.push(wrapper);
                }
            }

            if config.other && !config.is_select {
                let (wrapper, nodes) = self.render_other(document)?;
                other = Some(nodes);
                children.push(wrapper);
            }
        }

        let root = if config.is_select {
            document.markup("select", children, config.data.clone())?
        } else {
            document.markup(
                "div",
                children,
                Attributes::new().with("className", config.control_type.as_str()),
            )?
        };

        debug!(
            target: targets::CONTROL,
            control_type = %config.control_type,
            options = options.len(),
            placeholder = placeholder.is_some(),
            other = other.is_some(),
            "built choice control"
        );

        Ok(RenderedControl {
            root,
            options,
            placeholder,
            other,
            is_select: config.is_select,
            multiple: config.multiple,
        })
    }

    /// Attributes common to an option and its input: extras, value and id.
    fn option_attributes(&self, index: usize, option: &ChoiceOption) -> Attributes {
        let mut attrs = option.attrs.clone();
        if let Some(value) = &option.value {
            attrs.set("value", value.as_str());
        }
        attrs.set("id", self.config.option_id(index));
        attrs
    }

    fn render_select_option(
        &self,
        document: &mut Document,
        index: usize,
        option: &ChoiceOption,
    ) -> DomResult<NodeId> {
        let mut attrs = self.option_attributes(index, option);
        if self.config.resolve_selected(option) {
            attrs.set("selected", "selected");
        }
        let label = document.create_text(option.label.as_str());
        document.markup("option", label, attrs)
    }

    /// Returns the wrapper and the input.
    fn render_checkable(
        &self,
        document: &mut Document,
        index: usize,
        option: &ChoiceOption,
    ) -> DomResult<(NodeId, NodeId)> {
        let config = self.config;
        let mut attrs = config.data.clone();
        attrs.merge(&self.option_attributes(index, option));
        attrs.set("type", config.option_type.as_str());
        if config.resolve_selected(option) {
            attrs.set("checked", "checked");
        }
        let input = document.markup("input", Content::Empty, attrs)?;

        let label_attrs = Attributes::new().with("for", config.option_id(index));
        let content = if config.toggle {
            let marker = document.markup("span", Content::Empty, Attributes::new())?;
            let label = document.markup(
                "label",
                vec![
                    Content::Node(input),
                    Content::Node(marker),
                    Content::from(option.label.as_str()),
                ],
                label_attrs.with("className", TOGGLE_CLASS),
            )?;
            Content::Node(label)
        } else {
            let label = document.markup("label", option.label.as_str(), label_attrs)?;
            Content::from(vec![input, label])
        };

        let wrapper = document.markup(
            "div",
            content,
            Attributes::new().with("className", config.wrapper_class()),
        )?;
        Ok((wrapper, input))
    }

    fn render_other(&self, document: &mut Document) -> DomResult<(NodeId, OtherNodes)> {
        let config = self.config;
        let other_id = config.other_id();

        let text_field = document.markup(
            "input",
            Content::Empty,
            Attributes::new()
                .with("type", "text")
                .with("id", format!("{other_id}-value"))
                .with("className", OTHER_VALUE_CLASS),
        )?;

        let mut attrs = config.data.clone();
        attrs.merge(
            &Attributes::new()
                .with("id", other_id.as_str())
                .with(
                    "className",
                    format!("{} other-option", config.class_name).trim_start().to_string(),
                )
                .with("value", AttrValue::Text(String::new()))
                .with("type", config.option_type.as_str()),
        );
        let input = document.markup("input", Content::Empty, attrs)?;

        let nodes = OtherNodes { input, text_field };
        document.add_event_listener(input, EventKind::Click, move |doc, event| {
            nodes.on_input_click(doc, event)
        })?;
        document.add_event_listener(text_field, EventKind::Input, move |doc, event| {
            nodes.on_text_input(doc, event)
        })?;

        let label = document.markup(
            "label",
            vec![
                Content::from(self.localizer.get(OTHER_LABEL_KEY, &[])),
                Content::Node(text_field),
            ],
            Attributes::new().with("for", other_id),
        )?;
        let wrapper = document.markup(
            "div",
            vec![input, label],
            Attributes::new().with("className", config.wrapper_class()),
        )?;
        Ok((wrapper, nodes))
    }
}
