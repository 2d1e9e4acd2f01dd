//! Integration tests for the document tree, events and validity.

use std::sync::Arc;

use horizon_forms_core::{
    Attributes, Catalog, Content, Document, DomError, EventKind, Localizer, NodeId,
};
use parking_lot::Mutex;

fn setup() -> Document {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    Document::new()
}

fn radio(doc: &mut Document, name: &str, value: &str) -> NodeId {
    doc.markup(
        "input",
        Content::Empty,
        Attributes::new()
            .with("type", "radio")
            .with("name", name)
            .with("value", value),
    )
    .unwrap()
}

#[test]
fn test_build_and_serialize_form_fragment() {
    let mut doc = setup();
    let input = doc
        .markup(
            "input",
            Content::Empty,
            Attributes::new()
                .with("type", "checkbox")
                .with("id", "agree")
                .with("checked", "checked"),
        )
        .unwrap();
    let label = doc
        .markup("label", "I agree", Attributes::new().with("for", "agree"))
        .unwrap();
    let wrapper = doc
        .markup(
            "div",
            vec![input, label],
            Attributes::new().with("className", "checkbox"),
        )
        .unwrap();
    doc.append_child(doc.root(), wrapper).unwrap();

    assert_eq!(
        doc.outer_html(wrapper),
        r#"<div class="checkbox"><input type="checkbox" id="agree" checked="checked"><label for="agree">I agree</label></div>"#
    );
    assert_eq!(doc.get_element_by_id("agree"), Some(input));
}

#[test]
fn test_detached_nodes_are_not_found_by_id() {
    let mut doc = setup();
    let input = doc
        .markup("input", Content::Empty, Attributes::new().with("id", "lost"))
        .unwrap();
    assert_eq!(doc.get_element_by_id("lost"), None);
    doc.append_child(doc.root(), input).unwrap();
    assert_eq!(doc.get_element_by_id("lost"), Some(input));
    doc.detach(input);
    assert!(!doc.is_connected(input));
}

#[test]
fn test_hierarchy_errors() {
    let mut doc = setup();
    let outer = doc.create_element("div");
    let inner = doc.create_element("div");
    doc.append_child(outer, inner).unwrap();

    assert!(matches!(
        doc.append_child(inner, outer),
        Err(DomError::HierarchyRequest(_))
    ));
    let text = doc.create_text("x");
    assert!(matches!(
        doc.append_child(text, inner),
        Err(DomError::HierarchyRequest(_))
    ));
    assert_eq!(doc.set_checked(text, true), Err(DomError::NotAnElement));
}

#[test]
fn test_radio_groups_are_scoped_by_name_and_tree() {
    let mut doc = setup();
    let form = doc.create_element("form");
    doc.append_child(doc.root(), form).unwrap();
    let small = radio(&mut doc, "size", "S");
    let large = radio(&mut doc, "size", "L");
    let red = radio(&mut doc, "color", "red");
    for node in [small, large, red] {
        doc.append_child(form, node).unwrap();
    }
    // Same name, but in a separate tree.
    let detached = radio(&mut doc, "size", "M");
    doc.set_checked(detached, true).unwrap();

    doc.click(red).unwrap();
    doc.click(small).unwrap();
    doc.click(large).unwrap();

    assert!(!doc.checked(small));
    assert!(doc.checked(large));
    assert!(doc.checked(red));
    assert!(doc.checked(detached));
}

#[test]
fn test_change_listener_sets_custom_validity() {
    let mut doc = setup();
    let catalog = Arc::new(Catalog::english());
    let input = doc
        .markup(
            "input",
            Content::Empty,
            Attributes::new().with("type", "checkbox").with("required", true),
        )
        .unwrap();
    doc.append_child(doc.root(), input).unwrap();
    assert!(!doc.check_validity(input));

    let events = Arc::new(Mutex::new(Vec::new()));
    for kind in [EventKind::Click, EventKind::Input, EventKind::Change] {
        let events = events.clone();
        doc.add_event_listener(input, kind, move |_, event| {
            events.lock().push(event.kind);
            Ok(())
        })
        .unwrap();
    }
    let localizer = catalog.clone();
    doc.add_event_listener(input, EventKind::Change, move |doc, event| {
        let message = if doc.checked(event.target) {
            String::new()
        } else {
            localizer.get("minSelectionRequired", &["1"])
        };
        doc.set_custom_validity(event.target, message)
    })
    .unwrap();

    doc.click(input).unwrap();
    assert!(doc.check_validity(input));
    assert_eq!(
        *events.lock(),
        vec![EventKind::Click, EventKind::Input, EventKind::Change]
    );

    doc.click(input).unwrap();
    assert_eq!(doc.validation_message(input), "Minimum 1 selections required");
    assert!(!doc.check_validity(input));
}

#[test]
fn test_option_value_falls_back_to_text() {
    let mut doc = setup();
    let option = doc.markup("option", "Plain", Attributes::new()).unwrap();
    assert_eq!(doc.value(option), "Plain");
    doc.set_value(option, "p").unwrap();
    assert_eq!(doc.value(option), "p");
}
