//! Integration tests for the choice control.
//!
//! Set `RUST_LOG=horizon_forms=debug` to see build and restore decisions.

use std::sync::Arc;

use horizon_forms::{mount, Control, ControlConfig, ControlRegistry, FormError, OptionSpec, SelectControl};
use horizon_forms_core::{Catalog, Document, NodeId};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn mount_control(config: ControlConfig) -> (Document, SelectControl) {
    setup();
    let mut doc = Document::new();
    let mut control = SelectControl::new(config, Arc::new(Catalog::english()));
    let body = doc.root();
    mount(&mut doc, body, &mut control).unwrap();
    (doc, control)
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id)
        .unwrap_or_else(|| panic!("no element with id {id}"))
}

fn checked_ids(doc: &Document, control: &SelectControl) -> Vec<String> {
    control
        .rendered()
        .unwrap()
        .checkable_inputs()
        .into_iter()
        .filter(|&input| doc.checked(input))
        .filter_map(|input| doc.attribute(input, "id").map(str::to_string))
        .collect()
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn test_select_placeholder_adds_one_disabled_option() {
    let values = ["small", "medium", "large", "huge"];
    let config = ControlConfig::new("select", "size")
        .with_placeholder("Choose a size")
        .with_values([
            OptionSpec::new("small").selected(),
            OptionSpec::new("medium"),
            OptionSpec::new("large"),
            OptionSpec::new("huge"),
        ]);
    let (doc, control) = mount_control(config);

    let root = control.dom().unwrap();
    let options = doc.elements_by_tag(root, "option");
    assert_eq!(options.len(), values.len() + 1);
    assert!(doc.is_disabled(options[0]));
    assert!(!doc.selected(options[0]));
    assert_eq!(doc.text_content(options[0]), "Choose a size");
    assert!(options.iter().all(|&o| !doc.selected(o)));
}

#[test]
fn test_checkbox_group_wrappers() {
    let config = ControlConfig::new("checkbox-group", "colors")
        .with_name("colors")
        .with_values(["red", "green", "blue"]);
    let (doc, control) = mount_control(config);

    let root = control.dom().unwrap();
    let wrappers = doc.children(root).to_vec();
    assert_eq!(wrappers.len(), 3);
    for wrapper in wrappers {
        assert_eq!(doc.tag(wrapper), Some("div"));
        let inputs = doc.elements_by_tag(wrapper, "input");
        let labels = doc.elements_by_tag(wrapper, "label");
        assert_eq!(inputs.len(), 1);
        assert_eq!(labels.len(), 1);
        assert_eq!(doc.attribute(inputs[0], "type"), Some("checkbox"));
        assert_eq!(doc.attribute(labels[0], "for"), doc.attribute(inputs[0], "id"));
    }
}

#[test]
fn test_top_level_value_wins() {
    for control_type in ["select", "radio-group", "checkbox-group"] {
        let config = ControlConfig::new(control_type, "pick")
            .with_values([
                OptionSpec::new("a").selected(),
                OptionSpec::new("b"),
                OptionSpec::new("c").selected(),
            ])
            .with_value("b");
        let (doc, control) = mount_control(config);
        let rendered = control.rendered().unwrap();

        let selected: Vec<NodeId> = rendered
            .options
            .iter()
            .copied()
            .filter(|&o| doc.selected(o) || doc.checked(o))
            .collect();
        assert_eq!(selected, vec![rendered.options[1]], "{control_type}");
    }
}

#[test]
fn test_malformed_values_render_nothing() {
    let config = ControlConfig::from_json(
        r#"{"type": "checkbox-group", "id": "x", "values": "not a list", "other": true}"#,
    )
    .unwrap();
    let (doc, control) = mount_control(config);
    assert!(doc.children(control.dom().unwrap()).is_empty());
}

#[test]
fn test_unknown_type_renders_group_with_type_class() {
    let config = ControlConfig::new("dropdown-group", "d").with_values(["a"]);
    let (doc, control) = mount_control(config);
    let root = control.dom().unwrap();
    assert_eq!(doc.attribute(root, "class"), Some("dropdown-group"));
    let input = control.rendered().unwrap().options[0];
    assert_eq!(doc.attribute(input, "type"), Some("dropdown"));
}

#[test]
fn test_title_is_never_rendered() {
    let config = ControlConfig::from_json(
        r#"{"type": "select", "id": "s", "title": "tip", "values": ["a"], "data-x": 1}"#,
    )
    .unwrap();
    let (doc, control) = mount_control(config);
    let root = control.dom().unwrap();
    assert!(!doc.has_attribute(root, "title"));
    assert_eq!(doc.attribute(root, "data-x"), Some("1"));
    assert_eq!(doc.outer_html(root), r#"<select id="s" data-x="1"><option value="a" id="s-0">a</option></select>"#);
}

// =========================================================================
// Group required
// =========================================================================

#[test]
fn test_required_group_validity() {
    let config = ControlConfig::new("checkbox-group", "t")
        .required()
        .with_values(["a", "b", "c"]);
    let (mut doc, control) = mount_control(config);
    let boxes = control.rendered().unwrap().options.clone();

    for &cb in &boxes {
        assert!(doc.has_attribute(cb, "required"));
        assert!(!doc.validation_message(cb).is_empty());
    }

    doc.click(boxes[2]).unwrap();
    for &cb in &boxes {
        assert!(!doc.has_attribute(cb, "required"));
        assert_eq!(doc.validation_message(cb), "");
    }

    doc.click(boxes[2]).unwrap();
    assert!(boxes.iter().all(|&cb| doc.has_attribute(cb, "required")));
}

#[test]
fn test_required_group_uses_localized_message() {
    setup();
    let catalog = Catalog::new("nl-NL").with_message("minSelectionRequired", "Kies er minstens {min}");
    let config = ControlConfig::new("checkbox-group", "t")
        .required()
        .with_values(["a"]);
    let mut control = SelectControl::new(config, Arc::new(catalog));
    let mut doc = Document::new();
    let body = doc.root();
    mount(&mut doc, body, &mut control).unwrap();

    let cb = by_id(&doc, "t-0");
    assert_eq!(doc.validation_message(cb), "Kies er minstens 1");
}

// =========================================================================
// Other option
// =========================================================================

#[test]
fn test_other_option_toggle_and_mirror() {
    let config = ControlConfig::new("checkbox-group", "pets")
        .with_values(["cat", "dog"])
        .with_other();
    let (mut doc, _control) = mount_control(config);
    let other = by_id(&doc, "pets-other");
    let field = by_id(&doc, "pets-other-value");

    doc.click(other).unwrap();
    assert_eq!(doc.style(field, "display"), Some("inline-block"));

    doc.type_text(field, "hamster").unwrap();
    assert_eq!(doc.attribute(other, "value"), Some("hamster"));

    doc.click(other).unwrap();
    assert_eq!(doc.style(field, "display"), Some("none"));
}

#[test]
fn test_other_option_in_radio_group() {
    let config = ControlConfig::new("radio-group", "size")
        .with_name("size")
        .with_values(["S", "M"])
        .with_other();
    let (mut doc, control) = mount_control(config);
    let other = by_id(&doc, "size-other");
    let field = by_id(&doc, "size-other-value");

    assert_eq!(doc.attribute(other, "type"), Some("radio"));
    assert_eq!(doc.attribute(other, "name"), Some("size"));

    doc.click(other).unwrap();
    doc.type_text(field, "XL").unwrap();
    assert_eq!(control.selected_values(&doc), vec!["XL"]);

    doc.click(by_id(&doc, "size-0")).unwrap();
    assert!(!doc.checked(other));
    assert_eq!(control.selected_values(&doc), vec!["S"]);
}

// =========================================================================
// Restoration
// =========================================================================

#[test]
fn test_restore_into_other_option() {
    let config = ControlConfig::new("checkbox-group", "letters")
        .with_values(["a", "b", "c"])
        .with_other()
        .with_user_data(["b", "d"]);
    let (doc, control) = mount_control(config);

    assert!(!doc.checked(by_id(&doc, "letters-0")));
    assert!(doc.checked(by_id(&doc, "letters-1")));
    assert!(!doc.checked(by_id(&doc, "letters-2")));

    let other = by_id(&doc, "letters-other");
    let field = by_id(&doc, "letters-other-value");
    assert!(doc.checked(other));
    assert_eq!(doc.value(other), "d");
    assert_eq!(doc.value(field), "d");
    assert_eq!(doc.style(field, "display"), Some("inline-block"));
    assert_eq!(control.selected_values(&doc), vec!["b", "d"]);
}

#[test]
fn test_restore_leaves_other_unchecked_when_all_matched() {
    let config = ControlConfig::new("checkbox-group", "letters")
        .with_values(["a", "b"])
        .with_other()
        .with_user_data(["b", "a"]);
    let (doc, control) = mount_control(config);

    assert_eq!(checked_ids(&doc, &control), vec!["letters-0", "letters-1"]);
    let field = by_id(&doc, "letters-other-value");
    assert_eq!(doc.style(field, "display"), None);
}

#[test]
fn test_restore_consumes_each_value_once() {
    let config = ControlConfig::new("checkbox-group", "dup")
        .with_values([OptionSpec::labeled("First", "x"), OptionSpec::labeled("Second", "x")])
        .with_user_data(["x"]);
    let (doc, control) = mount_control(config);
    assert_eq!(checked_ids(&doc, &control), vec!["dup-0"]);
}

#[test]
fn test_restore_is_idempotent() {
    let user_data = vec!["b".to_string(), "d".to_string()];
    let config = ControlConfig::new("checkbox-group", "letters")
        .with_values(["a", "b", "c"])
        .with_other()
        .with_user_data(user_data.clone());
    let (mut doc, control) = mount_control(config);
    let first = doc.outer_html(control.dom().unwrap());

    control.restore(&mut doc, &user_data).unwrap();
    assert_eq!(doc.outer_html(control.dom().unwrap()), first);
    assert_eq!(checked_ids(&doc, &control), vec!["letters-1", "letters-other"]);
}

#[test]
fn test_restore_twice_keeps_other_value() {
    let user_data = vec!["d".to_string(), "e".to_string()];
    let config = ControlConfig::new("checkbox-group", "letters")
        .with_values(["a", "b"])
        .with_other()
        .with_user_data(user_data.clone());
    let (mut doc, control) = mount_control(config);
    assert_eq!(control.selected_values(&doc), vec!["d"]);

    control.restore(&mut doc, &user_data).unwrap();
    assert_eq!(control.selected_values(&doc), vec!["d"]);
    assert_eq!(doc.value(by_id(&doc, "letters-other-value")), "d");
}

#[test]
fn test_restore_radio_group_keeps_one_checked() {
    let config = ControlConfig::new("radio-group", "pick")
        .with_name("pick")
        .with_values(["a", "b"])
        .with_user_data(["a", "b"]);
    let (doc, control) = mount_control(config);
    assert_eq!(control.selected_values(&doc), vec!["b"]);
    assert_eq!(checked_ids(&doc, &control), vec!["pick-1"]);
}

#[test]
fn test_lenient_config_still_renders() {
    let config = ControlConfig::from_json(
        r#"{"type": "checkbox-group", "id": "c", "required": "true", "inline": null,
            "values": [{"label": "A", "value": "a", "selected": "true"}, "b"]}"#,
    )
    .unwrap();
    let (doc, control) = mount_control(config);
    let rendered = control.rendered().unwrap();
    assert_eq!(rendered.options.len(), 2);
    assert!(doc.checked(rendered.options[0]));
    assert!(doc.has_class(doc.parent(rendered.options[0]).unwrap(), "checkbox"));
    assert!(doc.check_validity(rendered.options[1]));
}

#[test]
fn test_restore_select() {
    let config = ControlConfig::new("select", "fruit")
        .multiple()
        .with_values(["apple", "pear", "plum"])
        .with_user_data(["plum", "apple"]);
    let (mut doc, control) = mount_control(config);
    assert_eq!(control.selected_values(&doc), vec!["apple", "plum"]);

    control.restore(&mut doc, &["pear".to_string()]).unwrap();
    assert_eq!(control.selected_values(&doc), vec!["pear"]);

    let single = ControlConfig::new("select", "one")
        .with_values(["apple", "pear", "plum"])
        .with_user_data(["apple", "plum"]);
    let (doc, control) = mount_control(single);
    assert_eq!(control.selected_values(&doc), vec!["plum"]);
}

#[test]
fn test_restore_overrides_rendered_selection_in_select() {
    let config = ControlConfig::new("select", "fruit")
        .with_values(["apple", "pear"])
        .with_value("apple")
        .with_user_data(["pear"]);
    let (doc, control) = mount_control(config);
    assert_eq!(control.selected_values(&doc), vec!["pear"]);
}

// =========================================================================
// Registry
// =========================================================================

#[test]
fn test_registry_builds_every_builtin_type() {
    setup();
    let registry = ControlRegistry::with_builtin_controls();
    let localizer = Arc::new(Catalog::english());

    for type_name in SelectControl::TYPES {
        let config = ControlConfig::new(*type_name, "f").with_values(["one", "two"]);
        let mut control = registry.create(config, localizer.clone()).unwrap();
        let mut doc = Document::new();
        let body = doc.root();
        let root = mount(&mut doc, body, control.as_mut()).unwrap();
        assert_eq!(control.dom(), Some(root));
        assert!(doc.is_connected(root));
    }

    let Err(err) = registry.create(ControlConfig::new("textarea", "t"), localizer) else {
        panic!("textarea should not be registered");
    };
    assert!(matches!(err, FormError::UnknownControlType(_)));
    assert_eq!(err.to_string(), "No control registered for type 'textarea'");
}
