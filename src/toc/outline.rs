use crate::dom::{Document, NodeId};
use crate::toc::types::{HeadingRecord, TocEntry};
use crate::utils::error::BoxResult;

/// Read the generated list back into plain [`TocEntry`] data.
///
/// List items that were not generated for one of `records` are skipped
/// along with their subtrees.
pub fn build_outline(doc: &Document, list: NodeId, records: &[HeadingRecord]) -> Vec<TocEntry> {
    let mut entries = Vec::new();

    for item in doc.element_children(list) {
        if doc.tag_name(item) != Some("li") {
            continue;
        }
        let Some(link) = doc.first_child_element(item, "a") else {
            continue;
        };
        let Some(record) = records.iter().find(|r| r.link == link) else {
            continue;
        };

        let mut entry = TocEntry::new(&record.id, record.level, &doc.text_content(link));
        if let Some(nested) = doc.first_child_element(item, "ul") {
            entry.children = build_outline(doc, nested, records);
        }
        entries.push(entry);
    }

    entries
}

/// Pretty-printed JSON for an outline
pub fn outline_to_json(entries: &[TocEntry]) -> BoxResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TocClasses;
    use crate::dom::parse_html;
    use crate::toc::extract::{assign_heading_ids, collect_headings};
    use crate::toc::tree::build_tree;

    #[test]
    fn test_outline_mirrors_tree() {
        let mut doc = parse_html("<h2>Intro</h2><h3>Background</h3><h4>Detail</h4><h2>Methods</h2>");
        let list = doc.create_element("ul");
        let body = doc.body().unwrap();
        let foreign = doc.create_element("li");
        doc.append_child(list, foreign);

        let headings = collect_headings(&doc, body, 2, 6);
        let ids = assign_heading_ids(&mut doc, &headings, "heading-");
        let records = build_tree(&mut doc, list, &headings, &ids, &TocClasses::default());

        let outline = build_outline(&doc, list, &records);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].text, "Intro");
        assert_eq!(outline[0].count(), 3);
        assert_eq!(outline[0].children[0].children[0], TocEntry::new("heading-2", 4, "Detail"));
        assert_eq!(outline[1], TocEntry::new("heading-3", 2, "Methods"));
    }

    #[test]
    fn test_outline_json() {
        let mut intro = TocEntry::new("heading-0", 2, "Intro");
        intro.children.push(TocEntry::new("heading-1", 3, "Background"));
        let json = outline_to_json(&[intro.clone()]).unwrap();

        let parsed: Vec<TocEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![intro]);
        assert!(!json.contains("\"children\": []"));
    }
}
