/// Default id of the floating TOC panel
pub fn default_container_id() -> String {
    "floatingTOC".to_string()
}

/// Default id of the list that receives generated entries
pub fn default_list_id() -> String {
    "tocList".to_string()
}

/// Shallowest heading level scanned
pub fn default_min_level() -> u8 {
    2
}

/// Deepest heading level scanned
pub fn default_max_level() -> u8 {
    6
}

/// Prefix for identifiers given to headings that have none
pub fn default_id_prefix() -> String {
    "heading-".to_string()
}

/// Lookahead below the viewport top at which a heading counts as reached
pub fn default_scroll_offset() -> f64 {
    100.0
}

/// Gap left above a heading after click-to-scroll, for fixed headers
pub fn default_click_offset() -> f64 {
    80.0
}

pub fn default_item_class() -> String {
    "toc-item".to_string()
}

pub fn default_level_class_prefix() -> String {
    "toc-level-".to_string()
}

pub fn default_nested_class() -> String {
    "toc-nested".to_string()
}

pub fn default_active_class() -> String {
    "active".to_string()
}

pub fn default_hidden_class() -> String {
    "hidden".to_string()
}
