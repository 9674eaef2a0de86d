//! Tree construction.
//!
//! Turns the flat heading sequence into nested `<ul>`/`<li>` entries using a
//! stack of open ancestors. A heading becomes a child of the nearest open
//! entry with a strictly smaller level; level gaps are not filled in.

use log::debug;

use crate::config::TocClasses;
use crate::dom::{Document, NodeId};
use crate::toc::extract::heading_level;
use crate::toc::types::HeadingRecord;

/// An open ancestor entry
struct OpenEntry {
    level: u8,
    item: NodeId,
}

/// Build list entries for `headings` under `list`.
///
/// `ids` holds the identifier of each heading, as returned by
/// [`assign_heading_ids`](crate::toc::extract::assign_heading_ids).
/// Elements that are not `h1`..`h6` are skipped.
pub fn build_tree(
    doc: &mut Document,
    list: NodeId,
    headings: &[NodeId],
    ids: &[String],
    classes: &TocClasses,
) -> Vec<HeadingRecord> {
    let mut records = Vec::with_capacity(headings.len());
    let mut stack: Vec<OpenEntry> = Vec::new();

    for (&heading, id) in headings.iter().zip(ids) {
        let Some(level) = heading_level(doc, heading) else {
            debug!("Skipping non-heading element in TOC input");
            continue;
        };

        let (item, link) = create_entry(doc, heading, id, level, classes);

        while stack.last().is_some_and(|open| open.level >= level) {
            stack.pop();
        }

        match stack.last() {
            None => doc.append_child(list, item),
            Some(parent) => {
                let nested = nested_list(doc, parent.item, classes);
                doc.append_child(nested, item);
            }
        }

        stack.push(OpenEntry { level, item });
        records.push(HeadingRecord {
            id: id.clone(),
            level,
            element: heading,
            link,
        });
    }

    debug!("Built {} TOC entries", records.len());
    records
}

/// `<li class="toc-item toc-level-N"><a href="#id" data-heading-id="id">text</a></li>`
fn create_entry(
    doc: &mut Document,
    heading: NodeId,
    id: &str,
    level: u8,
    classes: &TocClasses,
) -> (NodeId, NodeId) {
    let item = doc.create_element("li");
    doc.add_class(item, &classes.item);
    doc.add_class(item, &classes.level(level));

    let link = doc.create_element("a");
    doc.set_attribute(link, "href", &format!("#{}", id));
    doc.set_dataset(link, "headingId", id);
    let label = doc.text_content(heading);
    doc.set_text_content(link, label.trim());

    doc.append_child(item, link);
    (item, link)
}

/// The nested list of an entry, created on first use
fn nested_list(doc: &mut Document, item: NodeId, classes: &TocClasses) -> NodeId {
    if let Some(existing) = doc.first_child_element(item, "ul") {
        return existing;
    }
    let nested = doc.create_element("ul");
    doc.add_class(nested, &classes.nested);
    doc.append_child(item, nested);
    nested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::toc::extract::{assign_heading_ids, collect_headings};

    fn build(html: &str) -> (Document, NodeId, Vec<HeadingRecord>) {
        let mut doc = parse_html(html);
        let list = doc.create_element("ul");
        let body = doc.body().unwrap();
        let headings = collect_headings(&doc, body, 2, 6);
        let ids = assign_heading_ids(&mut doc, &headings, "heading-");
        let records = build_tree(&mut doc, list, &headings, &ids, &TocClasses::default());
        (doc, list, records)
    }

    /// Depth of an entry's list item below the root list
    fn depth(doc: &Document, list: NodeId, record: &HeadingRecord) -> usize {
        let item = doc.parent(record.link).unwrap();
        doc.ancestors(item)
            .iter()
            .take_while(|&&n| n != list)
            .filter(|&&n| doc.tag_name(n) == Some("ul"))
            .count()
    }

    #[test]
    fn test_intro_background_methods() {
        let (doc, list, records) = build("<h2>Intro</h2><h3>Background</h3><h2>Methods</h2>");

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["heading-0", "heading-1", "heading-2"]);

        let top: Vec<NodeId> = doc.element_children(list);
        assert_eq!(top.len(), 2);
        assert_eq!(doc.text_content(top[0]), "IntroBackground");
        assert_eq!(doc.text_content(top[1]), "Methods");

        let nested = doc.first_child_element(top[0], "ul").unwrap();
        assert!(doc.has_class(nested, "toc-nested"));
        assert_eq!(doc.parent(doc.parent(records[1].link).unwrap()), Some(nested));

        assert_eq!(
            doc.outer_html(list),
            concat!(
                r##"<ul><li class="toc-item toc-level-2"><a href="#heading-0" data-heading-id="heading-0">Intro</a>"##,
                r##"<ul class="toc-nested"><li class="toc-item toc-level-3"><a href="#heading-1" data-heading-id="heading-1">Background</a></li></ul></li>"##,
                r##"<li class="toc-item toc-level-2"><a href="#heading-2" data-heading-id="heading-2">Methods</a></li></ul>"##
            )
        );
    }

    #[test]
    fn test_equal_levels_are_siblings() {
        let (doc, list, records) = build("<h3>a</h3><h3>b</h3><h3>c</h3>");
        assert_eq!(doc.element_children(list).len(), 3);
        assert!(records.iter().all(|r| depth(&doc, list, r) == 0));
    }

    #[test]
    fn test_level_gap_nests_one_deep() {
        let (doc, list, records) = build("<h2>a</h2><h4>b</h4><h3>c</h3><h5>d</h5><h2>e</h2>");
        let depths: Vec<usize> = records.iter().map(|r| depth(&doc, list, r)).collect();
        // h4 directly under h2, h3 is its sibling, h5 under h3
        assert_eq!(depths, vec![0, 1, 1, 2, 0]);

        let first = doc.element_children(list)[0];
        let nested = doc.first_child_element(first, "ul").unwrap();
        assert_eq!(doc.element_children(nested).len(), 2);
    }

    #[test]
    fn test_deeper_first_heading() {
        let (doc, list, records) = build("<h4>deep</h4><h2>top</h2><h3>child</h3>");
        let depths: Vec<usize> = records.iter().map(|r| depth(&doc, list, r)).collect();
        assert_eq!(depths, vec![0, 0, 1]);
    }

    #[test]
    fn test_children_have_greater_levels() {
        let (doc, list, records) = build(
            "<h2>a</h2><h3>b</h3><h4>c</h4><h3>d</h3><h6>e</h6><h5>f</h5><h2>g</h2><h4>h</h4>",
        );
        let mut nested_count = 0;
        for record in &records {
            let item = doc.parent(record.link).unwrap();
            let owner_list = doc.parent(item).unwrap();
            if owner_list == list {
                continue;
            }
            nested_count += 1;
            let parent_item = doc.parent(owner_list).unwrap();
            let parent = records
                .iter()
                .find(|r| doc.parent(r.link) == Some(parent_item))
                .unwrap();
            assert!(record.level > parent.level, "{} under {}", record.id, parent.id);
        }
        assert_eq!(nested_count, 6);
    }

    #[test]
    fn test_label_is_trimmed_text() {
        let (doc, _, records) = build("<h2>\n   Getting <em>started</em> &amp; more  \n</h2>");
        assert_eq!(doc.text_content(records[0].link), "Getting started & more");
        assert_eq!(doc.dataset(records[0].link, "headingId"), Some("heading-0"));
    }
}
