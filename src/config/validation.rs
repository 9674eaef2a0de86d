use log::{debug, warn};

use crate::config::TocConfig;
use crate::dom::Selector;
use crate::utils::error::{BoxResult, TocError};

/// Validate the configuration
pub fn validate_config(config: &TocConfig) -> BoxResult<()> {
    // Validate heading level range
    validate_levels(config)?;

    // Validate ids, prefixes and class names
    validate_names(config)?;

    // Validate pixel offsets
    validate_offsets(config)?;

    // Validate content root selectors
    validate_content_selectors(config)?;

    debug!("Configuration is valid");
    Ok(())
}

fn validate_levels(config: &TocConfig) -> BoxResult<()> {
    for (name, level) in [("min_level", config.min_level), ("max_level", config.max_level)] {
        if !(1..=6).contains(&level) {
            return Err(TocError::Config(format!(
                "{} must be between 1 and 6, got {}", name, level
            )).into());
        }
    }

    if config.min_level > config.max_level {
        return Err(TocError::Config(format!(
            "min_level ({}) is greater than max_level ({})", config.min_level, config.max_level
        )).into());
    }

    if config.min_level == 1 {
        warn!("min_level 1 includes the page title in the table of contents");
    }

    Ok(())
}

fn validate_names(config: &TocConfig) -> BoxResult<()> {
    let classes = &config.classes;
    let names = [
        ("container_id", &config.container_id),
        ("list_id", &config.list_id),
        ("id_prefix", &config.id_prefix),
        ("classes.item", &classes.item),
        ("classes.level_prefix", &classes.level_prefix),
        ("classes.nested", &classes.nested),
        ("classes.active", &classes.active),
        ("classes.hidden", &classes.hidden),
    ];

    for (name, value) in names {
        if value.is_empty() {
            return Err(TocError::Config(format!("{} must not be empty", name)).into());
        }
        if value.chars().any(char::is_whitespace) {
            return Err(TocError::Config(format!(
                "{} must not contain whitespace: '{}'", name, value
            )).into());
        }
    }

    if config.container_id == config.list_id {
        return Err(TocError::Config(format!(
            "container_id and list_id must differ, both are '{}'", config.list_id
        )).into());
    }

    Ok(())
}

fn validate_offsets(config: &TocConfig) -> BoxResult<()> {
    for (name, offset) in [("scroll_offset", config.scroll_offset), ("click_offset", config.click_offset)] {
        if !offset.is_finite() {
            return Err(TocError::Config(format!("{} must be a finite number", name)).into());
        }
        if offset < 0.0 {
            warn!("{} is negative ({}), headings will be reached late", name, offset);
        }
    }
    Ok(())
}

fn validate_content_selectors(config: &TocConfig) -> BoxResult<()> {
    if config.content_selectors.is_empty() {
        return Err(TocError::Config("content_selectors must not be empty".to_string()).into());
    }

    for selector in &config.content_selectors {
        Selector::parse(selector).map_err(|e| {
            TocError::Config(format!("invalid content selector '{}': {}", selector, e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TocConfig::default()).is_ok());
    }

    #[test]
    fn test_level_range() {
        let mut config = TocConfig::default();
        config.max_level = 7;
        assert!(validate_config(&config).is_err());

        let mut config = TocConfig::default();
        config.min_level = 4;
        config.max_level = 3;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("greater than max_level"));

        let mut config = TocConfig::default();
        config.min_level = 1;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_names() {
        let mut config = TocConfig::default();
        config.classes.active = "is active".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = TocConfig::default();
        config.id_prefix = String::new();
        assert!(validate_config(&config).is_err());

        let mut config = TocConfig::default();
        config.list_id = config.container_id.clone();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_offsets_and_selectors() {
        let mut config = TocConfig::default();
        config.scroll_offset = f64::NAN;
        assert!(validate_config(&config).is_err());

        let mut config = TocConfig::default();
        config.content_selectors = vec![];
        assert!(validate_config(&config).is_err());

        let mut config = TocConfig::default();
        config.content_selectors = vec!["main article".to_string()];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("invalid content selector"));
    }
}
