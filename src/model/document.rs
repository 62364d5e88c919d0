//! Document-level types.

use serde::{Deserialize, Serialize};

/// The Markdown artifact produced for one exported page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedDocument {
    /// Page title
    pub title: String,

    /// Title of the page this one was discovered under
    pub parent_title: String,

    /// Flattened Markdown body
    pub body: String,
}

impl ExportedDocument {
    /// Create a new document.
    pub fn new(
        title: impl Into<String>,
        parent_title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            parent_title: parent_title.into(),
            body: body.into(),
        }
    }

    /// Assemble the file contents: title heading, parent line, rule, body.
    pub fn to_markdown(&self, parent_label: &str) -> String {
        let mut output = String::with_capacity(self.body.len() + self.title.len() + 64);
        output.push_str("# ");
        output.push_str(&self.title);
        output.push_str("\n\n**");
        output.push_str(parent_label);
        output.push_str(":** ");
        output.push_str(&self.parent_title);
        output.push_str("\n\n---\n\n");
        output.push_str(&self.body);
        output
    }

    /// Check if the body has no content.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
