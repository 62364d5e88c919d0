//! # unnotion
//!
//! Export Notion page trees to Markdown files.
//!
//! Given a root page, the exporter lists its child pages and writes one
//! Markdown file per child. Each file holds the child's whole block tree,
//! flattened depth-first in the order the API returns it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unnotion::Unnotion;
//!
//! fn main() -> unnotion::Result<()> {
//!     let report = Unnotion::from_env()?
//!         .with_max_depth(16)
//!         .export("0123456789abcdef0123456789abcdef", "docs")?;
//!
//!     for warning in &report.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!     println!("{} pages written", report.files.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Paginated traversal**: follows `next_cursor` with a fixed pause between requests
//! - **Best-effort output**: API failures truncate a page instead of aborting the run
//! - **Pluggable store**: [`store::DocumentStore`] lets tests run against [`store::MemoryStore`]
//! - **Manifest generation**: list exported files as modules in a JSON manifest

pub mod error;
pub mod export;
pub mod manifest;
pub mod model;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    Discovery, ExportEvent, ExportOptions, ExportReport, ExportStats, Exporter, FetchOutcome,
    FetchWarning, WarningKind,
};
pub use manifest::{Manifest, ManifestSettings, ModuleEntry};
pub use model::{Block, BlockKind, BlockList, ExportedDocument, InlineText, Page, PageRef};
pub use render::{format_block, sanitize_filename, BlockFormatter, RenderOptions};
pub use store::{DocumentStore, MemoryStore, NotionClient, NotionConfig};

use std::path::Path;
use std::time::Duration;

/// Export the children of `root_id` using credentials from the environment.
///
/// # Example
///
/// ```no_run
/// let report = unnotion::export_tree("root-page-id", "out").unwrap();
/// println!("{} files", report.files.len());
/// ```
pub fn export_tree<P: AsRef<Path>>(root_id: &str, output_dir: P) -> Result<ExportReport> {
    Unnotion::from_env()?.export(root_id, output_dir)
}

/// Write a module manifest for the Markdown files in `dir`.
///
/// # Example
///
/// ```no_run
/// use unnotion::{generate_manifest, ManifestSettings};
///
/// let manifest = generate_manifest("out", "out/manifest.json", ManifestSettings::default()).unwrap();
/// println!("{} modules", manifest.len());
/// ```
pub fn generate_manifest<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    output: Q,
    settings: ManifestSettings,
) -> Result<Manifest> {
    let manifest = Manifest::scan(dir, settings)?;
    manifest.write_to(output)?;
    Ok(manifest)
}

/// Builder for exporting from the Notion API.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use unnotion::Unnotion;
///
/// let report = Unnotion::new("secret_token")
///     .with_request_delay(Duration::from_millis(500))
///     .with_untitled_placeholder("Sin título")
///     .export("root-page-id", "out")?;
/// # Ok::<(), unnotion::Error>(())
/// ```
pub struct Unnotion {
    config: NotionConfig,
    options: ExportOptions,
}

impl Unnotion {
    /// Create a builder for the given integration token.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_config(NotionConfig::new(token))
    }

    /// Create a builder from an explicit client configuration.
    pub fn with_config(config: NotionConfig) -> Self {
        Self {
            config,
            options: ExportOptions::default(),
        }
    }

    /// Create a builder reading `NOTION_TOKEN` and friends from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(NotionConfig::from_env()?))
    }

    /// Set the pause before continuation requests.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.options = self.options.with_request_delay(delay);
        self
    }

    /// Set the pause between page exports.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.options = self.options.with_page_delay(delay);
        self
    }

    /// Set the maximum block nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.with_max_depth(depth);
        self
    }

    /// Enable or disable inlining of nested child pages.
    pub fn with_inline_child_pages(mut self, inline: bool) -> Self {
        self.options = self.options.with_inline_child_pages(inline);
        self
    }

    /// Set the title used for pages without one.
    pub fn with_untitled_placeholder(mut self, text: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_untitled_placeholder(text);
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.options = self.options.with_render_options(render);
        self
    }

    /// Get the export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export the children of `root_id` into `output_dir`.
    pub fn export<P: AsRef<Path>>(self, root_id: &str, output_dir: P) -> Result<ExportReport> {
        let client = NotionClient::new(self.config)?;
        Exporter::new(&client, self.options).export_tree(root_id, output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = Unnotion::new("token");
        assert_eq!(builder.options().request_delay, export::DEFAULT_DELAY);
        assert_eq!(builder.options().max_depth, export::DEFAULT_MAX_DEPTH);
        assert_eq!(builder.options().render.untitled_placeholder, "untitled");
    }

    #[test]
    fn test_builder_chained() {
        let builder = Unnotion::new("token")
            .with_request_delay(Duration::from_millis(500))
            .with_page_delay(Duration::ZERO)
            .with_max_depth(8)
            .with_inline_child_pages(false)
            .with_untitled_placeholder("Sin título");

        let options = builder.options();
        assert_eq!(options.request_delay, Duration::from_millis(500));
        assert!(options.page_delay.is_zero());
        assert_eq!(options.max_depth, 8);
        assert!(!options.inline_child_pages);
        assert_eq!(options.render.untitled_placeholder, "Sin título");
    }

    #[test]
    fn test_generate_manifest_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modulo-uno.md"), "# Módulo Uno").unwrap();
        let output = dir.path().join("manifest.json");

        let manifest = generate_manifest(dir.path(), &output, ManifestSettings::default()).unwrap();
        assert_eq!(manifest.len(), 1);
        assert!(output.exists());
    }
}
