use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// CSS class names applied to generated and host markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocClasses {
    /// Class on every generated list item
    #[serde(default = "defaults::default_item_class")]
    pub item: String,

    /// Prefix of the per-level item class; the heading level is appended
    #[serde(default = "defaults::default_level_class_prefix")]
    pub level_prefix: String,

    /// Class on nested lists
    #[serde(default = "defaults::default_nested_class")]
    pub nested: String,

    /// Class marking the active link
    #[serde(default = "defaults::default_active_class")]
    pub active: String,

    /// Class put on the panel when the page has no headings
    #[serde(default = "defaults::default_hidden_class")]
    pub hidden: String,
}

impl Default for TocClasses {
    fn default() -> Self {
        Self {
            item: defaults::default_item_class(),
            level_prefix: defaults::default_level_class_prefix(),
            nested: defaults::default_nested_class(),
            active: defaults::default_active_class(),
            hidden: defaults::default_hidden_class(),
        }
    }
}

impl TocClasses {
    /// Class for a list item of the given heading level
    pub fn level(&self, level: u8) -> String {
        format!("{}{}", self.level_prefix, level)
    }
}

/// Floating table of contents configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocConfig {
    /// Id of the scrollable TOC panel
    #[serde(default = "defaults::default_container_id")]
    pub container_id: String,

    /// Id of the list inside the panel that receives entries
    #[serde(default = "defaults::default_list_id")]
    pub list_id: String,

    /// Content root candidates; the first selector with a match wins
    #[serde(default = "defaults::default_content_selectors")]
    pub content_selectors: Vec<String>,

    /// Shallowest heading level included
    #[serde(default = "defaults::default_min_level")]
    pub min_level: u8,

    /// Deepest heading level included
    #[serde(default = "defaults::default_max_level")]
    pub max_level: u8,

    /// Prefix for generated heading identifiers
    #[serde(default = "defaults::default_id_prefix")]
    pub id_prefix: String,

    /// Pixels below the viewport top at which a heading becomes active
    #[serde(default = "defaults::default_scroll_offset")]
    pub scroll_offset: f64,

    /// Pixels left above a heading when navigating to it
    #[serde(default = "defaults::default_click_offset")]
    pub click_offset: f64,

    #[serde(default)]
    pub classes: TocClasses,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            container_id: defaults::default_container_id(),
            list_id: defaults::default_list_id(),
            content_selectors: defaults::default_content_selectors(),
            min_level: defaults::default_min_level(),
            max_level: defaults::default_max_level(),
            id_prefix: defaults::default_id_prefix(),
            scroll_offset: defaults::default_scroll_offset(),
            click_offset: defaults::default_click_offset(),
            classes: TocClasses::default(),
        }
    }
}
