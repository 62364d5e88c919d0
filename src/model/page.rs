//! Page-level types.

use super::block::{concat_plain_text, InlineText};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Page metadata as returned by the store's page lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page identifier
    #[serde(default)]
    pub id: String,

    /// Page properties keyed by property name
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Page {
    /// Create a page with no properties.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Create a page whose title property holds `title`.
    pub fn titled(id: impl Into<String>, title: &str) -> Self {
        Self::new(id).with_property("title", PropertyValue::title(title))
    }

    /// Add a property.
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Resolve the page title from the property declared with type `title`.
    ///
    /// Returns `None` when no such property exists or its text is blank.
    pub fn title(&self) -> Option<String> {
        self.properties
            .values()
            .filter(|p| p.is_title())
            .map(|p| concat_plain_text(&p.title))
            .find(|t| !t.trim().is_empty())
    }
}

/// A single page property.
///
/// Only title properties carry text the exporter reads; every other
/// property type keeps its declared type name and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Declared property type (e.g. "title", "rich_text", "select")
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Title spans, present for title properties
    #[serde(default)]
    pub title: Vec<InlineText>,
}

impl PropertyValue {
    /// Create a title property.
    pub fn title(text: &str) -> Self {
        Self {
            kind: "title".to_string(),
            title: vec![InlineText::new(text)],
        }
    }

    /// Create a property of another type with no text.
    pub fn other(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: Vec::new(),
        }
    }

    /// Check if the property is declared as the page title.
    pub fn is_title(&self) -> bool {
        self.kind == "title"
    }
}

/// A child page discovered under a parent container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    /// Page identifier
    pub id: String,

    /// Resolved page title
    pub title: String,
}

impl PageRef {
    /// Create a page reference.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_title_from_property() {
        let page: Page = serde_json::from_value(json!({
            "object": "page",
            "id": "p1",
            "properties": {
                "Status": {"id": "a", "type": "select", "select": {"name": "Done"}},
                "Name": {"id": "title", "type": "title", "title": [
                    {"plain_text": "Módulo "}, {"plain_text": "Uno"}
                ]}
            }
        }))
        .unwrap();

        assert_eq!(page.id, "p1");
        assert_eq!(page.title(), Some("Módulo Uno".to_string()));
    }

    #[test]
    fn test_page_title_missing_or_empty() {
        let page = Page::new("p");
        assert_eq!(page.title(), None);

        let page = Page::new("p").with_property("Name", PropertyValue::title(""));
        assert_eq!(page.title(), None);

        let page = Page::new("p").with_property("Name", PropertyValue::title("   "));
        assert_eq!(page.title(), None);

        let page = Page::new("p").with_property("Tags", PropertyValue::other("multi_select"));
        assert_eq!(page.title(), None);
    }
}
