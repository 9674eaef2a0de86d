pub mod values;

// Export the default values
pub use values::*;

/// Default content root selectors, tried in order
pub fn default_content_selectors() -> Vec<String> {
    vec![
        ".post-content".to_string(),
        "article".to_string(),
        "main".to_string(),
        "body".to_string(),
    ]
}
