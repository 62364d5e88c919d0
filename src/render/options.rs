//! Rendering options and configuration.

/// Default placeholder for pages without a resolvable title.
pub const UNTITLED: &str = "untitled";

/// Options for rendering blocks and exported documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Line emitted in place of a table
    pub table_placeholder: String,

    /// Title used when neither the page nor its reference carries one
    pub untitled_placeholder: String,

    /// Label of the parent-reference line in the document header
    pub parent_label: String,

    /// Marker for a checked checklist item
    pub checked_marker: String,

    /// Marker for an unchecked checklist item
    pub unchecked_marker: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table placeholder text.
    pub fn with_table_placeholder(mut self, text: impl Into<String>) -> Self {
        self.table_placeholder = text.into();
        self
    }

    /// Set the untitled placeholder.
    pub fn with_untitled_placeholder(mut self, text: impl Into<String>) -> Self {
        self.untitled_placeholder = text.into();
        self
    }

    /// Set the parent-reference label.
    pub fn with_parent_label(mut self, label: impl Into<String>) -> Self {
        self.parent_label = label.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_placeholder: "[Table]".to_string(),
            untitled_placeholder: UNTITLED.to_string(),
            parent_label: "Parent page".to_string(),
            checked_marker: "[✓]".to_string(),
            unchecked_marker: "[☐]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_table_placeholder("[Tabla]")
            .with_untitled_placeholder("Sin título")
            .with_parent_label("Página padre");

        assert_eq!(options.table_placeholder, "[Tabla]");
        assert_eq!(options.untitled_placeholder, "Sin título");
        assert_eq!(options.parent_label, "Página padre");
        assert_eq!(options.checked_marker, "[✓]");
    }
}
