//! Traversal results that keep partial output and the reasons it is partial.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::model::PageRef;

/// Why part of a traversal was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum WarningKind {
    /// The store failed while listing children; later pages were dropped
    Store(String),
    /// Children were not fetched because the nesting cap was reached
    DepthLimit(usize),
    /// Page metadata lookup failed; a fallback title was used
    Title(String),
}

/// A non-fatal problem encountered for one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchWarning {
    /// Page or block the problem belongs to
    pub container_id: String,

    /// What went wrong
    pub kind: WarningKind,
}

impl FetchWarning {
    /// A store failure during listing.
    pub fn store(container_id: &str, detail: impl fmt::Display) -> Self {
        Self {
            container_id: container_id.to_string(),
            kind: WarningKind::Store(detail.to_string()),
        }
    }

    /// A depth cap hit.
    pub fn depth_limit(container_id: &str, depth: usize) -> Self {
        Self {
            container_id: container_id.to_string(),
            kind: WarningKind::DepthLimit(depth),
        }
    }

    /// A title lookup failure.
    pub fn title(container_id: &str, detail: impl fmt::Display) -> Self {
        Self {
            container_id: container_id.to_string(),
            kind: WarningKind::Title(detail.to_string()),
        }
    }
}

impl fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::Store(detail) => {
                write!(f, "{}: listing stopped early: {}", self.container_id, detail)
            }
            WarningKind::DepthLimit(depth) => write!(
                f,
                "{}: children skipped at nesting depth {}",
                self.container_id, depth
            ),
            WarningKind::Title(detail) => {
                write!(f, "{}: title lookup failed: {}", self.container_id, detail)
            }
        }
    }
}

/// Flattened text of a container plus any problems met on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Concatenated Markdown of every block reached
    pub text: String,

    /// Number of blocks formatted
    pub block_count: usize,

    /// Problems that truncated the traversal
    pub warnings: Vec<FetchWarning>,
}

impl FetchOutcome {
    /// Check whether the whole tree was read.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Child pages found under a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Pages in store order
    pub pages: Vec<PageRef>,

    /// Listing failures and title fallbacks
    pub warnings: Vec<FetchWarning>,
}

impl Discovery {
    /// Check whether listing and every title lookup succeeded.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Result of exporting a single page.
#[derive(Debug, Clone)]
pub struct PageExport {
    /// File that was written
    pub path: PathBuf,

    /// Body traversal result
    pub outcome: FetchOutcome,
}

/// Progress notifications emitted during a tree export.
#[derive(Debug, Clone)]
pub enum ExportEvent<'a> {
    /// Child pages of the root were listed
    Discovered {
        /// Number of pages to export
        count: usize,
    },
    /// A page export is starting
    PageStarted {
        /// Zero-based position
        index: usize,
        /// Page being exported
        page: &'a PageRef,
    },
    /// A page file was written
    PageWritten {
        /// Zero-based position
        index: usize,
        /// Output path
        path: &'a PathBuf,
    },
}

/// Counters collected over a tree export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Files written
    pub pages_exported: u32,

    /// Blocks formatted across all pages
    pub blocks_rendered: u64,

    /// Bytes of Markdown written
    pub bytes_written: u64,
}

impl ExportStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one written page.
    pub fn add_page(&mut self, blocks: usize, bytes: usize) {
        self.pages_exported = self.pages_exported.saturating_add(1);
        self.blocks_rendered = self
            .blocks_rendered
            .saturating_add(u64::try_from(blocks).unwrap_or(u64::MAX));
        self.bytes_written = self
            .bytes_written
            .saturating_add(u64::try_from(bytes).unwrap_or(u64::MAX));
    }
}

/// Summary of a tree export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportReport {
    /// Title resolved for the root page
    pub root_title: String,

    /// Files written, in export order
    pub files: Vec<PathBuf>,

    /// Every non-fatal problem met during the run
    pub warnings: Vec<FetchWarning>,

    /// Counters
    pub stats: ExportStats,
}

impl ExportReport {
    /// Check whether the run finished without warnings.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = FetchWarning::store("abc", "API error 502 (bad_gateway): boom");
        assert_eq!(
            w.to_string(),
            "abc: listing stopped early: API error 502 (bad_gateway): boom"
        );
        assert_eq!(
            FetchWarning::depth_limit("b", 3).to_string(),
            "b: children skipped at nesting depth 3"
        );
    }

    #[test]
    fn test_outcome_completeness() {
        let mut outcome = FetchOutcome::default();
        assert!(outcome.is_complete());
        outcome.warnings.push(FetchWarning::title("p", "gone"));
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_stats_add_page() {
        let mut stats = ExportStats::new();
        stats.add_page(3, 120);
        stats.add_page(2, 80);
        assert_eq!(stats.pages_exported, 2);
        assert_eq!(stats.blocks_rendered, 5);
        assert_eq!(stats.bytes_written, 200);
    }

    #[test]
    fn test_stats_saturate() {
        let mut stats = ExportStats::new();
        stats.add_page(usize::MAX, usize::MAX);
        stats.add_page(usize::MAX, 1);
        assert_eq!(stats.blocks_rendered, u64::MAX);
        assert_eq!(stats.bytes_written, u64::MAX);
        assert_eq!(stats.pages_exported, 2);
    }
}
