//! Heading extraction.
//!
//! Picks the content root, collects the headings inside it in document
//! order and gives every heading an identifier.

use log::{debug, warn};

use crate::dom::{Document, NodeId, Selector};

/// First element matching one of `candidates`, tried in order.
///
/// Falls back to the document body, then to the document root, so there
/// is always a scope to scan.
pub fn find_content_root(doc: &Document, candidates: &[Selector]) -> NodeId {
    for selector in candidates {
        if let Some(node) = doc.query_selector(doc.root(), selector) {
            debug!("Content root matched '{}'", selector);
            return node;
        }
    }

    match doc.body() {
        Some(body) => {
            debug!("No content selector matched, scanning <body>");
            body
        }
        None => doc.root(),
    }
}

/// Level of a heading element, e.g. 3 for `h3`
pub fn heading_level(doc: &Document, node: NodeId) -> Option<u8> {
    let tag = doc.tag_name(node)?;
    let digits = tag.strip_prefix('h')?;
    match digits.parse::<u8>() {
        Ok(level) if (1..=6).contains(&level) => Some(level),
        _ => None,
    }
}

/// Heading elements of `min_level..=max_level` under `root`, in document order
pub fn collect_headings(doc: &Document, root: NodeId, min_level: u8, max_level: u8) -> Vec<NodeId> {
    let selector = Selector::tags((min_level..=max_level).map(|level| format!("h{}", level)));
    doc.query_selector_all(root, &selector)
}

/// Give every heading without an id the id `<prefix><index>`, where index
/// is the heading's 0-based position in `headings`.
///
/// Existing ids are kept untouched. Returns the id of every heading, in the
/// same order.
pub fn assign_heading_ids(doc: &mut Document, headings: &[NodeId], prefix: &str) -> Vec<String> {
    let mut ids = Vec::with_capacity(headings.len());

    for (index, &heading) in headings.iter().enumerate() {
        let id = match doc.id(heading) {
            Some(existing) => existing.to_string(),
            None => {
                let generated = format!("{}{}", prefix, index);
                if doc.get_element_by_id(&generated).is_some() {
                    warn!("Generated id '{}' is already used in the page", generated);
                }
                doc.set_id(heading, &generated);
                generated
            }
        };
        ids.push(id);
    }

    ids
}
