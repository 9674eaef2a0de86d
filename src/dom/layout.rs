//! Element geometry supplied by the host.
//!
//! There is no rendering engine here. The host (or a test) assigns layout
//! boxes, and the document answers the geometry queries a scroll-tracking
//! script needs: bounding rects, element scroll offsets and client heights.

use super::{Document, NodeId, NodeKind};

/// How a box is positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Laid out in document coordinates, moves with the window scroll
    #[default]
    Static,
    /// Laid out in viewport coordinates, ignores the window scroll
    Fixed,
}

/// Box assigned to an element.
///
/// `top` is in document coordinates, or viewport coordinates when the
/// element or one of its ancestors is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
    pub position: Position,
}

impl LayoutBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height,
            position: Position::Static,
        }
    }

    pub fn fixed(top: f64, height: f64) -> Self {
        Self {
            top,
            height,
            position: Position::Fixed,
        }
    }
}

/// Viewport-relative rectangle, vertical axis only
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomRect {
    pub top: f64,
    pub height: f64,
}

impl DomRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

impl Document {
    pub fn set_layout(&mut self, node: NodeId, layout: LayoutBox) {
        self.nodes[node.0].layout = Some(layout);
    }

    pub fn layout(&self, node: NodeId) -> Option<LayoutBox> {
        self.nodes[node.0].layout
    }

    /// Vertical scroll offset of a scrollable element
    pub fn scroll_top(&self, node: NodeId) -> f64 {
        self.nodes[node.0].scroll_top
    }

    /// Set an element's scroll offset, clamped at zero
    pub fn set_scroll_top(&mut self, node: NodeId, top: f64) {
        self.nodes[node.0].scroll_top = top.max(0.0);
    }

    /// Visible height of an element, taken from its layout box
    pub fn client_height(&self, node: NodeId) -> f64 {
        self.layout(node).map_or(0.0, |b| b.height)
    }

    fn is_in_fixed_subtree(&self, node: NodeId) -> bool {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .any(|n| self.layout(n).is_some_and(|b| b.position == Position::Fixed))
    }

    /// Viewport rectangle of an element for the given window scroll offset.
    ///
    /// Elements without a layout box report an empty rect at the origin.
    pub fn bounding_client_rect(&self, node: NodeId, window_scroll_y: f64) -> DomRect {
        let Some(layout) = self.layout(node) else {
            return DomRect::default();
        };

        let mut top = layout.top;
        for ancestor in self.ancestors(node) {
            top -= self.scroll_top(ancestor);
        }
        if !self.is_in_fixed_subtree(node) {
            top -= window_scroll_y;
        }

        DomRect {
            top,
            height: layout.height,
        }
    }

    /// Top of an element in document coordinates, the way a script computes
    /// it from a bounding rect plus the window scroll offset
    pub fn document_top(&self, node: NodeId, window_scroll_y: f64) -> f64 {
        self.bounding_client_rect(node, window_scroll_y).top + window_scroll_y
    }

    /// Lay out the subtree under `root` as a vertical stack of lines.
    ///
    /// Every element that directly holds non-blank text gets its own line of
    /// `line_height`; every other element gets a box spanning its descendant
    /// lines. `root` keeps its own box. Returns the number of lines placed.
    pub fn stack_layout(&mut self, root: NodeId, origin_top: f64, line_height: f64) -> usize {
        let mut lines = 0;
        for child in self.children(root).to_vec() {
            self.stack_node(child, origin_top, line_height, &mut lines);
        }
        lines
    }

    fn stack_node(
        &mut self,
        node: NodeId,
        origin_top: f64,
        line_height: f64,
        lines: &mut usize,
    ) -> Option<(f64, f64)> {
        if !self.is_element(node) {
            return None;
        }

        let holds_text = self.children(node).iter().any(|&c| {
            matches!(&self.nodes[c.0].kind, NodeKind::Text(t) if !t.trim().is_empty())
        });

        let mut span = None;
        if holds_text {
            let top = origin_top + *lines as f64 * line_height;
            *lines += 1;
            span = Some((top, top + line_height));
        }

        for child in self.children(node).to_vec() {
            if let Some((top, bottom)) = self.stack_node(child, origin_top, line_height, lines) {
                span = Some(match span {
                    Some((t, b)) => (f64::min(t, top), f64::max(b, bottom)),
                    None => (top, bottom),
                });
            }
        }

        if let Some((top, bottom)) = span {
            let height = if holds_text { line_height } else { bottom - top };
            self.set_layout(node, LayoutBox::new(top, height));
        }
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_rect_tracks_window_scroll() {
        let mut doc = Document::new();
        let heading = doc.create_element("h2");
        let root = doc.root();
        doc.append_child(root, heading);
        doc.set_layout(heading, LayoutBox::new(500.0, 30.0));

        assert_eq!(doc.bounding_client_rect(heading, 0.0).top, 500.0);
        assert_eq!(doc.bounding_client_rect(heading, 200.0).top, 300.0);
        assert_eq!(doc.document_top(heading, 200.0), 500.0);
        assert_eq!(doc.bounding_client_rect(heading, 200.0).bottom(), 330.0);
    }

    #[test]
    fn test_fixed_subtree_ignores_window_scroll() {
        let mut doc = Document::new();
        let panel = doc.create_element("nav");
        let link = doc.create_element("a");
        let root = doc.root();
        doc.append_child(root, panel);
        doc.append_child(panel, link);
        doc.set_layout(panel, LayoutBox::fixed(100.0, 200.0));
        doc.set_layout(link, LayoutBox::new(150.0, 20.0));
        doc.set_scroll_top(panel, 40.0);

        assert_eq!(doc.bounding_client_rect(panel, 900.0).top, 100.0);
        assert_eq!(doc.bounding_client_rect(link, 900.0).top, 110.0);
        assert_eq!(doc.client_height(panel), 200.0);
    }

    #[test]
    fn test_missing_layout_is_empty_rect() {
        let mut doc = Document::new();
        let el = doc.create_element("p");
        assert_eq!(doc.bounding_client_rect(el, 50.0), DomRect::default());
        doc.set_scroll_top(el, -5.0);
        assert_eq!(doc.scroll_top(el), 0.0);
    }

    #[test]
    fn test_stack_layout() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let root = doc.root();
        doc.append_child(root, list);

        let mut links = Vec::new();
        let mut items = Vec::new();
        for label in ["One", "Two"] {
            let li = doc.create_element("li");
            let a = doc.create_element("a");
            let text = doc.create_text_node(label);
            doc.append_child(a, text);
            doc.append_child(li, a);
            doc.append_child(list, li);
            links.push(a);
            items.push(li);
        }
        let nested = doc.create_element("ul");
        let li = doc.create_element("li");
        let a = doc.create_element("a");
        let text = doc.create_text_node("Two.One");
        doc.append_child(a, text);
        doc.append_child(li, a);
        doc.append_child(nested, li);
        doc.append_child(items[1], nested);

        assert_eq!(doc.stack_layout(list, 10.0, 20.0), 3);
        assert_eq!(doc.layout(links[0]), Some(LayoutBox::new(10.0, 20.0)));
        assert_eq!(doc.layout(links[1]), Some(LayoutBox::new(30.0, 20.0)));
        assert_eq!(doc.layout(a), Some(LayoutBox::new(50.0, 20.0)));
        assert_eq!(doc.layout(items[1]), Some(LayoutBox::new(30.0, 40.0)));
        assert_eq!(doc.layout(list), None);
    }
}
