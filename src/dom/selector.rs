use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use super::{Document, NodeId};
use crate::utils::error::TocError;

lazy_static! {
    static ref COMPOUND_REGEX: Regex =
        Regex::new(r"^(\*|[A-Za-z][A-Za-z0-9-]*)?((?:[.#][A-Za-z_-][A-Za-z0-9_-]*)*)$").unwrap();

    static ref PART_REGEX: Regex = Regex::new(r"([.#])([A-Za-z_-][A-Za-z0-9_-]*)").unwrap();
}

/// One compound selector such as `h2`, `.post-content` or `div.note#intro`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl CompoundSelector {
    fn parse(source: &str) -> Result<Self, TocError> {
        let caps = COMPOUND_REGEX.captures(source).ok_or_else(|| {
            TocError::Selector(format!("unsupported selector '{}'", source))
        })?;

        let mut compound = CompoundSelector {
            tag: caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|t| *t != "*")
                .map(|t| t.to_ascii_lowercase()),
            ..Default::default()
        };

        for part in PART_REGEX.captures_iter(caps.get(2).map_or("", |m| m.as_str())) {
            let name = part[2].to_string();
            if &part[1] == "#" {
                if compound.id.is_some() {
                    return Err(TocError::Selector(format!(
                        "more than one id in '{}'", source
                    )));
                }
                compound.id = Some(name);
            } else {
                compound.classes.push(name);
            }
        }

        Ok(compound)
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag_name(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if doc.get_attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| doc.has_class(node, c))
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}", tag)?,
            None if self.id.is_none() && self.classes.is_empty() => write!(f, "*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}

/// A comma-separated list of compound selectors.
///
/// Combinators are not supported; matching is per element.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    alternatives: Vec<CompoundSelector>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, TocError> {
        let alternatives = source
            .split(',')
            .map(|part| CompoundSelector::parse(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        if alternatives.iter().any(|a| a == &CompoundSelector::default())
            && !source.split(',').any(|p| p.trim() == "*")
        {
            return Err(TocError::Selector(format!("empty selector in '{}'", source)));
        }

        Ok(Self { alternatives })
    }

    /// Selector matching any of the given tag names
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            alternatives: tags
                .into_iter()
                .map(|t| CompoundSelector {
                    tag: Some(t.as_ref().to_ascii_lowercase()),
                    ..Default::default()
                })
                .collect(),
        }
    }

    pub fn alternatives(&self) -> &[CompoundSelector] {
        &self.alternatives
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|a| a.matches(doc, node))
    }
}

impl FromStr for Selector {
    type Err = TocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.alternatives.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}
