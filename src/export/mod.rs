//! Page tree export.
//!
//! [`Exporter`] walks a page's children through a [`DocumentStore`],
//! flattens each child page's block tree into Markdown and writes one file
//! per page.
//!
//! Store failures never abort a run: the affected container is truncated,
//! the failure is logged and recorded as a [`FetchWarning`], and traversal
//! continues with whatever comes next. Only filesystem errors propagate.
//!
//! # Example
//!
//! ```no_run
//! use unnotion::export::{ExportOptions, Exporter};
//! use unnotion::store::{NotionClient, NotionConfig};
//!
//! fn main() -> unnotion::Result<()> {
//!     let client = NotionClient::new(NotionConfig::from_env()?)?;
//!     let exporter = Exporter::new(&client, ExportOptions::default());
//!     let report = exporter.export_tree("root-page-id", "out")?;
//!     println!("{} files written", report.files.len());
//!     Ok(())
//! }
//! ```

mod options;
mod outcome;

pub use options::{ExportOptions, DEFAULT_DELAY, DEFAULT_MAX_DEPTH};
pub use outcome::{
    Discovery, ExportEvent, ExportReport, ExportStats, FetchOutcome, FetchWarning, PageExport,
    WarningKind,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{Block, BlockKind, ExportedDocument, PageRef};
use crate::render::{markdown_filename, BlockFormatter};
use crate::store::DocumentStore;

/// Exports pages from a document store to Markdown files.
///
/// Requests are issued strictly one at a time, in traversal order.
pub struct Exporter<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    options: ExportOptions,
    formatter: BlockFormatter,
}

impl<'a, S: DocumentStore + ?Sized> Exporter<'a, S> {
    /// Create an exporter reading from `store`.
    pub fn new(store: &'a S, options: ExportOptions) -> Self {
        let formatter = BlockFormatter::new(options.render.clone());
        Self {
            store,
            options,
            formatter,
        }
    }

    /// Get the export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Flatten a page or block's descendants into Markdown.
    ///
    /// Blocks are emitted depth-first in store order; a block's children
    /// follow its own line directly. If the store fails, the text gathered
    /// before the failure is kept and the failure is recorded as a warning.
    pub fn fetch_content(&self, container_id: &str) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();
        self.fetch_into(container_id, 0, &mut outcome);
        outcome
    }

    fn fetch_into(&self, container_id: &str, depth: usize, outcome: &mut FetchOutcome) {
        let result = self.paginate(container_id, |blocks| {
            for block in &blocks {
                outcome.text.push_str(&self.formatter.format(block));
                outcome.block_count += 1;

                if !self.should_descend(block) {
                    continue;
                }
                if depth + 1 > self.options.max_depth {
                    warn!(
                        "Skipping children of {}: nesting depth {} exceeds limit",
                        block.id,
                        depth + 1
                    );
                    outcome
                        .warnings
                        .push(FetchWarning::depth_limit(&block.id, depth + 1));
                    continue;
                }
                self.fetch_into(&block.id, depth + 1, outcome);
            }
        });

        if let Err(err) = result {
            warn!(
                "Failed to fetch content of {}{}: {}",
                container_id,
                rate_limit_note(&err),
                err
            );
            outcome.warnings.push(FetchWarning::store(container_id, err));
        }
    }

    fn should_descend(&self, block: &Block) -> bool {
        block.has_children && (self.options.inline_child_pages || !block.is_child_page())
    }

    /// List the child pages directly under `parent_id`, resolving titles.
    ///
    /// The title comes from the page's title property, then from the
    /// reference block, then from the untitled placeholder. A failed
    /// lookup only affects that page's title.
    pub fn list_child_pages(&self, parent_id: &str) -> Discovery {
        let mut discovery = Discovery::default();

        let result = self.paginate(parent_id, |blocks| {
            for block in blocks {
                if let BlockKind::ChildPage { title } = &block.kind {
                    let title = self.resolve_title(&block.id, title, &mut discovery.warnings);
                    debug!("Found child page {} ({})", block.id, title);
                    discovery.pages.push(PageRef::new(block.id, title));
                }
            }
        });

        if let Err(err) = result {
            warn!(
                "Failed to list child pages of {}{}: {}",
                parent_id,
                rate_limit_note(&err),
                err
            );
            discovery.warnings.push(FetchWarning::store(parent_id, err));
        }

        discovery
    }

    fn resolve_title(
        &self,
        page_id: &str,
        inline_title: &str,
        warnings: &mut Vec<FetchWarning>,
    ) -> String {
        match self.store.get_page(page_id) {
            Ok(page) => {
                if let Some(title) = page.title() {
                    return title;
                }
            }
            Err(err) => {
                warn!("Failed to resolve title of {}: {}", page_id, err);
                warnings.push(FetchWarning::title(page_id, err));
            }
        }

        if inline_title.trim().is_empty() {
            self.options.render.untitled_placeholder.clone()
        } else {
            inline_title.to_string()
        }
    }

    /// Export one page to `<output_dir>/<sanitized-title>.md`.
    ///
    /// An existing file with the same name is overwritten.
    pub fn export_page(
        &self,
        page: &PageRef,
        parent_title: &str,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        Ok(self.export_page_detailed(page, parent_title, output_dir)?.path)
    }

    /// Export one page and return the traversal outcome alongside the path.
    pub fn export_page_detailed(
        &self,
        page: &PageRef,
        parent_title: &str,
        output_dir: impl AsRef<Path>,
    ) -> Result<PageExport> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let outcome = self.fetch_content(&page.id);
        let document = ExportedDocument::new(&page.title, parent_title, outcome.text.as_str());
        if document.is_empty() {
            debug!("Page {} has no content", page.id);
        }
        let markdown = document.to_markdown(&self.options.render.parent_label);

        let path = output_dir.join(markdown_filename(&page.title));
        fs::write(&path, &markdown)?;
        info!("Wrote {} ({} blocks)", path.display(), outcome.block_count);

        Ok(PageExport { path, outcome })
    }

    /// Export every child page of `root_id` into `output_dir`.
    pub fn export_tree(&self, root_id: &str, output_dir: impl AsRef<Path>) -> Result<ExportReport> {
        self.export_tree_with(root_id, output_dir, |_| {})
    }

    /// Export every child page of `root_id`, reporting progress to `on_event`.
    ///
    /// Pages are exported one after another with
    /// [`ExportOptions::page_delay`] between them. The first filesystem
    /// error ends the run.
    pub fn export_tree_with<F>(
        &self,
        root_id: &str,
        output_dir: impl AsRef<Path>,
        mut on_event: F,
    ) -> Result<ExportReport>
    where
        F: FnMut(ExportEvent<'_>),
    {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let mut warnings = Vec::new();
        let root_title = self.resolve_title(root_id, "", &mut warnings);
        let mut report = ExportReport {
            root_title,
            warnings,
            ..Default::default()
        };

        let discovery = self.list_child_pages(root_id);
        if !discovery.is_complete() {
            warn!(
                "Child page listing of {} finished with {} warnings",
                root_id,
                discovery.warnings.len()
            );
        }
        report.warnings.extend(discovery.warnings);
        info!(
            "Exporting {} pages under \"{}\"",
            discovery.pages.len(),
            report.root_title
        );
        on_event(ExportEvent::Discovered {
            count: discovery.pages.len(),
        });

        for (index, page) in discovery.pages.iter().enumerate() {
            if index > 0 {
                pause(self.options.page_delay);
            }
            on_event(ExportEvent::PageStarted { index, page });

            let export = self.export_page_detailed(page, &report.root_title, output_dir)?;
            report
                .stats
                .add_page(export.outcome.block_count, export.outcome.text.len());
            report.warnings.extend(export.outcome.warnings);

            on_event(ExportEvent::PageWritten {
                index,
                path: &export.path,
            });
            report.files.push(export.path);
        }

        Ok(report)
    }

    /// Run `visit` over every response page of a container's children.
    ///
    /// Each page is handed to `visit` before the next one is requested.
    /// A continuation cursor equal to the one just sent ends the loop with
    /// an error.
    fn paginate<F>(&self, container_id: &str, mut visit: F) -> Result<()>
    where
        F: FnMut(Vec<Block>),
    {
        let mut cursor: Option<String> = None;
        loop {
            if cursor.is_some() {
                pause(self.options.request_delay);
            }
            let list = self.store.list_children(container_id, cursor.as_deref())?;
            let next = list.continuation().map(str::to_string);
            visit(list.results);

            match next {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    return Err(Error::Other(format!("pagination cursor {} repeated", next)));
                }
                Some(next) => cursor = Some(next),
                None => return Ok(()),
            }
        }
    }
}

fn rate_limit_note(err: &Error) -> &'static str {
    if err.is_rate_limited() {
        " (rate limited)"
    } else {
        ""
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::model::{BlockList, InlineText, Page};
    use crate::store::{MemoryStore, StoreRequest};

    /// Answers every listing with `has_more` and the same cursor.
    struct StuckStore {
        calls: Cell<usize>,
    }

    impl DocumentStore for StuckStore {
        fn list_children(&self, _container_id: &str, _cursor: Option<&str>) -> Result<BlockList> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            Ok(BlockList {
                results: vec![Block::paragraph(format!("b{}", n), "again")],
                has_more: true,
                next_cursor: Some("same".to_string()),
            })
        }

        fn get_page(&self, page_id: &str) -> Result<Page> {
            Ok(Page::new(page_id))
        }
    }

    fn exporter(store: &MemoryStore) -> Exporter<'_, MemoryStore> {
        Exporter::new(store, ExportOptions::new().without_delays())
    }

    #[test]
    fn test_empty_container() {
        let store = MemoryStore::new();
        let outcome = exporter(&store).fetch_content("empty");
        assert_eq!(outcome.text, "");
        assert_eq!(outcome.block_count, 0);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_single_heading() {
        let store = MemoryStore::new().with_children("page", vec![Block::heading("h", "Intro", 1)]);
        let outcome = exporter(&store).fetch_content("page");
        assert_eq!(outcome.text, "# Intro\n");
    }

    #[test]
    fn test_children_follow_parent() {
        let store = MemoryStore::new()
            .with_children(
                "page",
                vec![
                    Block::new("t", BlockKind::Toggle(vec![InlineText::new("More")]))
                        .with_children(),
                    Block::paragraph("after", "After"),
                ],
            )
            .with_children(
                "t",
                vec![
                    Block::paragraph("n1", "Nested one"),
                    Block::paragraph("n2", "Nested two"),
                ],
            );

        let outcome = exporter(&store).fetch_content("page");
        assert_eq!(outcome.text, "▶ More\nNested one\nNested two\nAfter\n");
        assert_eq!(outcome.block_count, 4);
    }

    #[test]
    fn test_first_request_has_no_cursor() {
        let store = MemoryStore::new().with_paged_children(
            "page",
            vec![
                vec![Block::paragraph("a", "a")],
                vec![Block::paragraph("b", "b")],
            ],
        );
        exporter(&store).fetch_content("page");

        assert_eq!(
            store.requests(),
            vec![
                StoreRequest::ListChildren {
                    container: "page".to_string(),
                    cursor: None
                },
                StoreRequest::ListChildren {
                    container: "page".to_string(),
                    cursor: Some("1".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_depth_limit() {
        let store = MemoryStore::new()
            .with_children("page", vec![Block::paragraph("l1", "one").with_children()])
            .with_children("l1", vec![Block::paragraph("l2", "two").with_children()])
            .with_children("l2", vec![Block::paragraph("l3", "three")]);

        let options = ExportOptions::new().without_delays().with_max_depth(1);
        let outcome = Exporter::new(&store, options).fetch_content("page");

        assert_eq!(outcome.text, "one\ntwo\n");
        assert_eq!(outcome.warnings, vec![FetchWarning::depth_limit("l2", 2)]);
    }

    #[test]
    fn test_child_pages_not_inlined_when_disabled() {
        let store = MemoryStore::new()
            .with_children(
                "page",
                vec![
                    Block::paragraph("p", "top"),
                    Block::child_page("sub", "Sub").with_children(),
                ],
            )
            .with_children("sub", vec![Block::paragraph("s", "inside")]);

        let inlined = exporter(&store).fetch_content("page");
        assert_eq!(inlined.text, "top\ninside\n");

        let options = ExportOptions::new()
            .without_delays()
            .with_inline_child_pages(false);
        let flat = Exporter::new(&store, options).fetch_content("page");
        assert_eq!(flat.text, "top\n");
    }

    #[test]
    fn test_title_resolution_order() {
        let store = MemoryStore::new()
            .with_children(
                "root",
                vec![
                    Block::child_page("a", "Inline A"),
                    Block::paragraph("x", "not a page"),
                    Block::child_page("b", "Inline B"),
                    Block::child_page("c", ""),
                ],
            )
            .with_page(Page::titled("a", "Property A"))
            .with_page(Page::new("b"));

        let discovery = exporter(&store).list_child_pages("root");
        assert_eq!(
            discovery.pages,
            vec![
                PageRef::new("a", "Property A"),
                PageRef::new("b", "Inline B"),
                PageRef::new("c", "untitled"),
            ]
        );
        // "c" has no metadata registered, so its lookup fails
        assert_eq!(discovery.warnings.len(), 1);
        assert_eq!(discovery.warnings[0].container_id, "c");
    }

    #[test]
    fn test_repeated_cursor_stops_pagination() {
        let store = StuckStore {
            calls: Cell::new(0),
        };
        let options = ExportOptions::new().without_delays();
        let outcome = Exporter::new(&store, options).fetch_content("page");

        assert_eq!(store.calls.get(), 2);
        assert_eq!(outcome.text, "again\nagain\n");
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].container_id, "page");
        assert!(matches!(
            &outcome.warnings[0].kind,
            WarningKind::Store(detail) if detail.contains("repeated")
        ));
    }

    #[test]
    fn test_rate_limit_note() {
        assert_eq!(rate_limit_note(&Error::api(429, "rate_limited", "slow")), " (rate limited)");
        assert_eq!(rate_limit_note(&Error::api(404, "object_not_found", "x")), "");
    }
}
