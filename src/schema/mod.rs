//! Static page-element schema.
//!
//! Maps a page route to the named interactive elements on it. The editor
//! offers those names as options for `fill`/`click` steps; the executor side
//! resolves a name to its CSS selector.

use std::{collections::BTreeMap, fs, path::Path};

use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{KisanflowError, Result};

const EMBEDDED_SCHEMA: &str = include_str!("ui-schema.json");

/// Elements of a single page, name → CSS selector.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEntry {
    #[serde(default)]
    pub elements: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct SchemaDocument {
    pages: BTreeMap<String, PageEntry>,
}

/// Route → elements lookup with exact routes taking precedence over
/// glob routes such as `/grocery-marketplace/*`.
#[derive(Debug, Clone)]
pub struct PageSchema {
    pages: BTreeMap<String, PageEntry>,
    patterns: Vec<(GlobMatcher, String)>,
}

impl Default for PageSchema {
    fn default() -> Self {
        Self::embedded()
    }
}

impl PageSchema {
    /// The schema shipped with the crate.
    pub fn embedded() -> Self {
        // covered by test_embedded_schema_parses
        Self::from_json(EMBEDDED_SCHEMA).unwrap_or_else(|_| Self::empty())
    }

    pub fn empty() -> Self {
        Self {
            pages: BTreeMap::new(),
            patterns: Vec::new(),
        }
    }

    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        jsonschema::validate(&Self::json_schema(), &value).map_err(|e| KisanflowError::Validation(format!("invalid ui schema: {}", e)))?;

        let document: SchemaDocument = serde_json::from_value(value)?;
        let mut patterns = Vec::new();
        for route in document.pages.keys().filter(|r| is_pattern(r)) {
            patterns.push((Glob::new(route)?.compile_matcher(), route.clone()));
        }

        Ok(Self {
            pages: document.pages,
            patterns,
        })
    }

    fn json_schema() -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["pages"],
            "properties": {
                "pages": {
                    "type": "object",
                    "additionalProperties": {
                        "type": "object",
                        "required": ["elements"],
                        "properties": {
                            "elements": {
                                "type": "object",
                                "additionalProperties": { "type": "string" }
                            }
                        }
                    }
                }
            }
        })
    }

    /// Entry for `page`, exact route first, then the first matching pattern.
    pub fn page(
        &self,
        page: &str,
    ) -> Option<&PageEntry> {
        if let Some(entry) = self.pages.get(page) {
            return Some(entry);
        }
        self.patterns.iter().find(|(matcher, _)| matcher.is_match(page)).and_then(|(_, route)| self.pages.get(route))
    }

    /// Element names offered for `fill`/`click` on `page`, sorted.
    ///
    /// Unknown pages yield no options.
    pub fn options(
        &self,
        page: &str,
    ) -> Vec<String> {
        match self.page(page) {
            Some(entry) => entry.elements.keys().cloned().collect(),
            None => {
                debug!("no ui schema entry for page {}", page);
                Vec::new()
            }
        }
    }

    /// CSS selector of `element` on `page`.
    pub fn selector(
        &self,
        page: &str,
        element: &str,
    ) -> Option<String> {
        self.page(page).and_then(|entry| entry.elements.get(element).cloned())
    }

    /// All routes, exact and pattern, in sorted order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

fn is_pattern(route: &str) -> bool {
    route.contains(['*', '?', '[', '{'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_schema_parses() {
        let schema = PageSchema::from_json(EMBEDDED_SCHEMA).unwrap();
        assert!(schema.routes().any(|r| r == "/cold-storage"));
    }

    #[test]
    fn test_options_sorted() {
        let schema = PageSchema::embedded();
        let options = schema.options("/login");
        assert_eq!(options, vec!["email", "loginButton", "password"]);
    }

    #[test]
    fn test_unknown_page_has_no_options() {
        let schema = PageSchema::embedded();
        assert!(schema.options("/nowhere").is_empty());
        assert_eq!(schema.selector("/nowhere", "email"), None);
    }

    #[test]
    fn test_selector_lookup() {
        let schema = PageSchema::embedded();
        assert_eq!(schema.selector("/cold-storage", "farmSize").as_deref(), Some("#farmSize"));
        assert_eq!(schema.selector("/cold-storage", "nope"), None);
    }

    #[test]
    fn test_pattern_routes() {
        let schema = PageSchema::embedded();
        assert!(schema.options("/grocery-marketplace/product-12").contains(&"addToCartButton".to_string()));
        assert!(schema.options("/grocery-marketplace").is_empty());
    }

    #[test]
    fn test_exact_route_wins_over_pattern() {
        let schema = PageSchema::from_json(
            r##"{"pages": {
                "/shop/*": {"elements": {"generic": "#g"}},
                "/shop/special": {"elements": {"special": "#s"}}
            }}"##,
        )
        .unwrap();
        assert_eq!(schema.options("/shop/special"), vec!["special"]);
        assert_eq!(schema.options("/shop/other"), vec!["generic"]);
    }

    #[test]
    fn test_invalid_document_rejected() {
        assert!(matches!(PageSchema::from_json(r#"{"pages": {"/a": {"elements": {"x": 1}}}}"#), Err(KisanflowError::Validation(_))));
        assert!(matches!(PageSchema::from_json(r#"{"routes": {}}"#), Err(KisanflowError::Validation(_))));
        assert!(PageSchema::from_json("not json").is_err());
    }

    #[test]
    fn test_empty_elements_allowed() {
        let schema = PageSchema::from_json(r#"{"pages": {"/help": {"elements": {}}}}"#).unwrap();
        assert!(schema.options("/help").is_empty());
    }
}
