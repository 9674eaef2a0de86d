use serde::{Deserialize, Serialize};

use crate::dom::NodeId;

/// One scanned heading and the TOC link generated for it
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingRecord {
    /// Identifier of the heading, pre-existing or assigned during extraction
    pub id: String,
    /// Heading level, 2 for `h2` through 6 for `h6` by default
    pub level: u8,
    /// The heading element in the page
    pub element: NodeId,
    /// The generated anchor pointing at the heading
    pub link: NodeId,
}

/// A TOC entry with its nested children, as plain data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub level: u8,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub fn new(id: &str, level: u8, text: &str) -> Self {
        Self {
            id: id.to_string(),
            level,
            text: text.to_string(),
            children: Vec::new(),
        }
    }

    /// Number of entries in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TocEntry::count).sum::<usize>()
    }
}

/// Result of initializing the TOC on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocStatus {
    /// Waiting for the document to finish parsing
    Pending,
    /// The panel or its list is missing from the page; nothing was done
    Disabled,
    /// The content has no headings; the panel was hidden
    Hidden,
    /// The list was built and scroll tracking is wired up
    Active,
}
