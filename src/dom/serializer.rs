use super::parser::{RAW_TEXT_ELEMENTS, VOID_ELEMENTS};
use super::{Document, NodeId, NodeKind};

impl Document {
    /// Serialize a node and its subtree
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        self.write_node(&mut html, node);
        html
    }

    /// Serialize the children of a node
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        for &child in self.children(node) {
            self.write_node(&mut html, child);
        }
        html
    }

    /// Serialize the whole document
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    fn write_node(&self, html: &mut String, node: NodeId) {
        match self.kind(node) {
            NodeKind::Document => {
                for &child in self.children(node) {
                    self.write_node(html, child);
                }
            }
            NodeKind::Doctype(name) => {
                html.push_str(&format!("<!DOCTYPE {}>", name));
            }
            NodeKind::Comment(text) => {
                html.push_str(&format!("<!--{}-->", text));
            }
            NodeKind::Text(text) => {
                let raw = self
                    .parent(node)
                    .and_then(|p| self.tag_name(p))
                    .is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t) && t != "textarea" && t != "title");
                if raw {
                    html.push_str(text);
                } else {
                    html.push_str(&html_escape::encode_text(text));
                }
            }
            NodeKind::Element(element) => {
                html.push('<');
                html.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    html.push_str(&format!(
                        " {}=\"{}\"",
                        name,
                        html_escape::encode_double_quoted_attribute(value)
                    ));
                }
                html.push('>');

                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }

                for &child in self.children(node) {
                    self.write_node(html, child);
                }
                html.push_str(&format!("</{}>", element.tag));
            }
        }
    }
}
