use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::types::TocConfig;
use crate::config::validation;
use crate::utils::error::{BoxResult, TocError};

/// Site configuration file names to look for
const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Key of the TOC section inside a site configuration file
pub const CONFIG_SECTION: &str = "floating_toc";

impl TocConfig {
    /// Parse a YAML document holding the TOC settings at its top level
    pub fn from_yaml_str(content: &str) -> BoxResult<Self> {
        let config: TocConfig = serde_yaml::from_str(content)
            .map_err(|e| TocError::Config(format!("Failed to parse YAML configuration: {}", e)))?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Parse a TOML document holding the TOC settings at its top level
    pub fn from_toml_str(content: &str) -> BoxResult<Self> {
        let config: TocConfig = toml::from_str(content)
            .map_err(|e| TocError::Config(format!("Failed to parse TOML configuration: {}", e)))?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Parse a JSON document holding the TOC settings at its top level
    pub fn from_json_str(content: &str) -> BoxResult<Self> {
        let config: TocConfig = serde_json::from_str(content)
            .map_err(|e| TocError::Config(format!("Failed to parse JSON configuration: {}", e)))?;
        validation::validate_config(&config)?;
        Ok(config)
    }
}

/// Load the TOC configuration from site configuration files.
///
/// Each file contributes its `floating_toc` section; later files override
/// earlier ones. Without explicit files the usual `_config.*` names in
/// `source_dir` are used.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>,
) -> BoxResult<TocConfig> {
    // Start with default configuration
    let mut config = TocConfig::default();

    let config_paths = match config_files {
        Some(paths) => paths,
        None => find_default_config_files(&source_dir),
    };

    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in config_paths {
            debug!("Loading configuration from {}", path.display());
            if let Some(file_config) = read_config_file(&path)? {
                merge_configs(&mut config, &file_config);
            }
        }
    }

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Load a standalone TOC configuration file whose top level is the TOC
/// settings themselves
pub fn load_config_file<P: AsRef<Path>>(path: P) -> BoxResult<TocConfig> {
    let path = path.as_ref();
    let content = read_file(path)?;

    match extension_of(path).as_str() {
        "yml" | "yaml" | "" => TocConfig::from_yaml_str(&content),
        "toml" => TocConfig::from_toml_str(&content),
        "json" => TocConfig::from_json_str(&content),
        other => Err(TocError::Config(format!(
            "Unsupported configuration file format: {}", other
        )).into()),
    }
}

fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.exists())
        .collect()
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn read_file(path: &Path) -> BoxResult<String> {
    if !path.exists() {
        return Err(TocError::Config(format!(
            "Configuration file not found: {}", path.display()
        )).into());
    }

    fs::read_to_string(path).map_err(|e| {
        TocError::Config(format!(
            "Failed to read configuration file {}: {}", path.display(), e
        )).into()
    })
}

/// Read the TOC section of a site configuration file, `None` when the file
/// has no such section
fn read_config_file(path: &Path) -> BoxResult<Option<TocConfig>> {
    let content = read_file(path)?;

    // Parse based on file extension
    match extension_of(path).as_str() {
        "yml" | "yaml" | "" => parse_yaml_section(&content, path),
        "toml" => parse_toml_section(&content, path),
        "json" => parse_json_section(&content, path),
        other => Err(TocError::Config(format!(
            "Unsupported configuration file format: {}", other
        )).into()),
    }
}

fn parse_yaml_section(content: &str, path: &Path) -> BoxResult<Option<TocConfig>> {
    let value = serde_yaml::from_str::<serde_yaml::Value>(content).map_err(|e| {
        TocError::Config(format!(
            "Failed to parse YAML configuration ({}): {}", path.display(), e
        ))
    })?;

    let Some(section) = value.get(CONFIG_SECTION) else {
        debug!("No {} section in {}", CONFIG_SECTION, path.display());
        return Ok(None);
    };

    let config = serde_yaml::from_value(section.clone()).map_err(|e| {
        TocError::Config(format!(
            "Invalid {} section ({}): {}", CONFIG_SECTION, path.display(), e
        ))
    })?;
    Ok(Some(config))
}

fn parse_toml_section(content: &str, path: &Path) -> BoxResult<Option<TocConfig>> {
    let table = toml::from_str::<toml::Table>(content).map_err(|e| {
        TocError::Config(format!(
            "Failed to parse TOML configuration ({}): {}", path.display(), e
        ))
    })?;

    let Some(section) = table.get(CONFIG_SECTION) else {
        debug!("No {} section in {}", CONFIG_SECTION, path.display());
        return Ok(None);
    };

    let config = section.clone().try_into().map_err(|e| {
        TocError::Config(format!(
            "Invalid {} section ({}): {}", CONFIG_SECTION, path.display(), e
        ))
    })?;
    Ok(Some(config))
}

fn parse_json_section(content: &str, path: &Path) -> BoxResult<Option<TocConfig>> {
    let value = serde_json::from_str::<serde_json::Value>(content).map_err(|e| {
        TocError::Config(format!(
            "Failed to parse JSON configuration ({}): {}", path.display(), e
        ))
    })?;

    let Some(section) = value.get(CONFIG_SECTION) else {
        debug!("No {} section in {}", CONFIG_SECTION, path.display());
        return Ok(None);
    };

    let config = serde_json::from_value(section.clone()).map_err(|e| {
        TocError::Config(format!(
            "Invalid {} section ({}): {}", CONFIG_SECTION, path.display(), e
        ))
    })?;
    Ok(Some(config))
}

/// Merge two configurations: only non-default values of `source` override
fn merge_configs(target: &mut TocConfig, source: &TocConfig) {
    let defaults = TocConfig::default();

    if source.container_id != defaults.container_id {
        target.container_id = source.container_id.clone();
    }

    if source.list_id != defaults.list_id {
        target.list_id = source.list_id.clone();
    }

    if source.content_selectors != defaults.content_selectors {
        target.content_selectors = source.content_selectors.clone();
    }

    if source.min_level != defaults.min_level {
        target.min_level = source.min_level;
    }

    if source.max_level != defaults.max_level {
        target.max_level = source.max_level;
    }

    if source.id_prefix != defaults.id_prefix {
        target.id_prefix = source.id_prefix.clone();
    }

    if source.scroll_offset != defaults.scroll_offset {
        target.scroll_offset = source.scroll_offset;
    }

    if source.click_offset != defaults.click_offset {
        target.click_offset = source.click_offset;
    }

    // Class names merge one by one
    let (from, to) = (&source.classes, &mut target.classes);
    let default_classes = &defaults.classes;
    if from.item != default_classes.item {
        to.item = from.item.clone();
    }
    if from.level_prefix != default_classes.level_prefix {
        to.level_prefix = from.level_prefix.clone();
    }
    if from.nested != default_classes.nested {
        to.nested = from.nested.clone();
    }
    if from.active != default_classes.active {
        to.active = from.active.clone();
    }
    if from.hidden != default_classes.hidden {
        to.hidden = from.hidden.clone();
    }
}
