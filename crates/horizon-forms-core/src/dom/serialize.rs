//! HTML serialization of document subtrees.

use super::{Document, NodeId, NodeKind};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Serialize a node and its subtree to HTML.
    ///
    /// Inline styles are emitted as a `style` attribute after the regular
    /// attributes. Unknown nodes serialize to an empty string.
    ///
    /// ```
    /// use horizon_forms_core::Document;
    ///
    /// let mut doc = Document::new();
    /// let label = doc.create_element("label");
    /// doc.set_attribute(label, "for", "a").unwrap();
    /// let text = doc.create_text("Fish & Chips");
    /// doc.append_child(label, text).unwrap();
    ///
    /// assert_eq!(doc.outer_html(label), r#"<label for="a">Fish &amp; Chips</label>"#);
    /// ```
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
                }
                if !element.style.is_empty() {
                    let declarations: Vec<String> = element
                        .style
                        .iter()
                        .map(|(p, v)| format!("{p}: {v}"))
                        .collect();
                    out.push_str(&format!(
                        " style=\"{}\"",
                        escape_attribute(&declarations.join("; "))
                    ));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }
                for &child in &node.children {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
