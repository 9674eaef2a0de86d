//! Host-owned document model.
//!
//! The TOC never owns page nodes. It holds [`NodeId`] handles into a
//! [`Document`] arena that belongs to the host page, the same way a browser
//! script holds references to DOM elements it did not create.

pub mod layout;
pub mod parser;
pub mod selector;
pub mod serializer;

pub use layout::{DomRect, LayoutBox, Position};
pub use parser::parse_html;
pub use selector::Selector;

use crate::utils::error::TocError;

/// Handle to a node owned by a [`Document`]
///
/// Handles are only meaningful for the document that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its document's arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element payload: lower-cased tag name plus attributes in source order
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Doctype(String),
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: Option<LayoutBox>,
    scroll_top: f64,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            layout: None,
            scroll_top: 0.0,
        }
    }
}

/// Arena-backed document tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        }))
    }

    /// Create a detached text node
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Comment(text.to_string()))
    }

    pub(crate) fn create_doctype(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Doctype(text.to_string()))
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    /// Append `child` to `parent`, moving it out of its current parent first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Remove a node from its parent; the node itself stays valid
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Element children only
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.parent(node);
        while let Some(id) = current {
            result.push(id);
            current = self.parent(id);
        }
        result
    }

    /// Whether `node` is `ancestor` or lies beneath it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// Whether the node is attached to the document root
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root(), node)
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            result.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        result
    }

    fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Lower-cased tag name, `None` for non-elements
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match self.element(node) {
            Some(element) => &element.attributes,
            None => &[],
        }
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| {
            e.attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }

    /// Set an attribute, keeping its position when it already exists.
    /// Non-element nodes are left untouched.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            let name = name.to_ascii_lowercase();
            match element.attributes.iter_mut().find(|(k, _)| *k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => element.attributes.push((name, value.to_string())),
            }
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
    }

    /// The element's `id` attribute, `None` when absent or empty
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.get_attribute(node, "id").filter(|id| !id.is_empty())
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attribute(node, "id", id);
    }

    /// First connected element with the given id, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.get_attribute(n, "id") == Some(id))
    }

    /// The first `body` element, if any
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.tag_name(n) == Some("body"))
    }

    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.get_attribute(node, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.is_element(node) || self.has_class(node, class) {
            return;
        }
        let mut classes: Vec<String> = self.classes(node).into_iter().map(String::from).collect();
        classes.push(class.to_string());
        self.set_attribute(node, "class", &classes.join(" "));
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let classes: Vec<String> = self
            .classes(node)
            .into_iter()
            .filter(|&c| c != class)
            .map(String::from)
            .collect();
        self.set_attribute(node, "class", &classes.join(" "));
    }

    /// Read a `data-*` attribute through its camelCase dataset key
    pub fn dataset(&self, node: NodeId, key: &str) -> Option<&str> {
        self.get_attribute(node, &dataset_attribute_name(key))
    }

    /// Write a `data-*` attribute through its camelCase dataset key
    pub fn set_dataset(&mut self, node: NodeId, key: &str, value: &str) {
        let name = dataset_attribute_name(key);
        self.set_attribute(node, &name, value);
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self, node: NodeId) -> String {
        if let NodeKind::Text(text) = &self.nodes[node.0].kind {
            return text.clone();
        }
        let mut text = String::new();
        for id in self.descendants(node) {
            if let NodeKind::Text(t) = &self.nodes[id.0].kind {
                text.push_str(t);
            }
        }
        text
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        for child in self.children(node).to_vec() {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text_node(text);
            self.append_child(node, text_node);
        }
    }

    /// First element child with the given tag
    pub fn first_child_element(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&c| self.tag_name(c) == Some(tag))
    }

    /// First descendant of `scope` matching `selector`, in document order
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| selector.matches(self, n))
    }

    /// All descendants of `scope` matching `selector`, in document order
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// Parse `selector` and look up its first match under `scope`
    pub fn select_first(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, TocError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector(scope, &selector))
    }

    /// Parse `selector` and collect every match under `scope`
    pub fn select_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, TocError> {
        let selector = Selector::parse(selector)?;
        Ok(self.query_selector_all(scope, &selector))
    }
}

/// Convert a dataset key like `headingId` into `data-heading-id`
pub fn dataset_attribute_name(key: &str) -> String {
    let mut name = String::from("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("BODY");
        let root = doc.root();
        doc.append_child(root, body);
        let section = doc.create_element("section");
        doc.append_child(body, section);
        let heading = doc.create_element("h2");
        doc.append_child(section, heading);
        let text = doc.create_text_node("  Intro  ");
        doc.append_child(heading, text);
        (doc, body, section, heading)
    }

    #[test]
    fn test_tree_navigation() {
        let (doc, body, section, heading) = sample();
        assert_eq!(doc.tag_name(body), Some("body"));
        assert_eq!(doc.body(), Some(body));
        assert_eq!(doc.parent(heading), Some(section));
        assert_eq!(doc.ancestors(heading), vec![section, body, doc.root()]);
        assert!(doc.contains(body, heading));
        assert!(!doc.contains(heading, body));
        assert_eq!(doc.descendants(body).len(), 3);
        assert_eq!(doc.text_content(section), "  Intro  ");
    }

    #[test]
    fn test_append_child_reparents() {
        let (mut doc, body, section, heading) = sample();
        doc.append_child(body, heading);
        assert!(doc.children(section).is_empty());
        assert_eq!(doc.children(body), &[section, heading]);
        assert_eq!(doc.parent(heading), Some(body));
    }

    #[test]
    fn test_attributes_and_ids() {
        let (mut doc, _, _, heading) = sample();
        assert_eq!(doc.id(heading), None);
        assert_eq!(doc.get_element_by_id("intro"), None);

        doc.set_attribute(heading, "id", "");
        assert_eq!(doc.id(heading), None);

        doc.set_id(heading, "intro");
        assert_eq!(doc.id(heading), Some("intro"));
        assert_eq!(doc.get_element_by_id("intro"), Some(heading));
        assert_eq!(doc.attributes(heading).len(), 1);

        doc.remove_attribute(heading, "ID");
        assert_eq!(doc.get_element_by_id("intro"), None);
    }

    #[test]
    fn test_detached_nodes_are_not_found_by_id() {
        let mut doc = Document::new();
        let orphan = doc.create_element("div");
        doc.set_id(orphan, "lost");
        assert!(!doc.is_connected(orphan));
        assert_eq!(doc.get_element_by_id("lost"), None);
    }

    #[test]
    fn test_class_list() {
        let (mut doc, _, section, _) = sample();
        doc.add_class(section, "toc-item");
        doc.add_class(section, "toc-level-2");
        doc.add_class(section, "toc-item");
        assert_eq!(doc.classes(section), vec!["toc-item", "toc-level-2"]);

        doc.remove_class(section, "toc-item");
        assert!(!doc.has_class(section, "toc-item"));
        assert!(doc.has_class(section, "toc-level-2"));
    }

    #[test]
    fn test_dataset() {
        let (mut doc, _, _, heading) = sample();
        doc.set_dataset(heading, "headingId", "heading-0");
        assert_eq!(doc.get_attribute(heading, "data-heading-id"), Some("heading-0"));
        assert_eq!(doc.dataset(heading, "headingId"), Some("heading-0"));
    }

    #[test]
    fn test_set_text_content() {
        let (mut doc, _, section, heading) = sample();
        doc.set_text_content(section, "replaced");
        assert_eq!(doc.text_content(section), "replaced");
        assert!(!doc.is_connected(heading));
    }

    #[test]
    fn test_select_helpers() {
        let (mut doc, body, section, heading) = sample();
        doc.add_class(section, "post-content");
        assert_eq!(doc.select_first(doc.root(), ".post-content").unwrap(), Some(section));
        assert_eq!(doc.select_all(body, "h2, section").unwrap(), vec![section, heading]);
        assert!(doc.select_first(body, "div > p").is_err());
    }
}
