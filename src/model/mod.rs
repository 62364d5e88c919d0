//! Document model types for Notion content.
//!
//! These types mirror the parts of the Notion API payloads the exporter
//! reads. Anything the Markdown output does not need (annotations, colors,
//! timestamps) is dropped during decoding.

mod block;
mod document;
mod list;
mod page;

pub use block::{concat_plain_text, Block, BlockKind, InlineText};
pub use document::ExportedDocument;
pub use list::BlockList;
pub use page::{Page, PageRef, PropertyValue};
