//! Document store abstraction.
//!
//! The exporter only ever reads from the store through [`DocumentStore`],
//! so the HTTP client and the in-memory store are interchangeable.
//!
//! # Example
//!
//! ```no_run
//! use unnotion::store::{DocumentStore, NotionClient, NotionConfig};
//!
//! fn main() -> unnotion::Result<()> {
//!     let client = NotionClient::new(NotionConfig::from_env()?)?;
//!     let first = client.list_children("root-page-id", None)?;
//!     println!("{} blocks, more: {}", first.results.len(), first.has_more);
//!     Ok(())
//! }
//! ```

mod http;
mod memory;

pub use http::{NotionClient, NotionConfig, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION};
pub use memory::{MemoryStore, StoreRequest};

use crate::error::Result;
use crate::model::{BlockList, Page};

/// Read access to a tree of pages and blocks.
pub trait DocumentStore {
    /// List the immediate children of a page or block.
    ///
    /// `cursor` is the `next_cursor` of the previous response, or `None`
    /// for the first page.
    fn list_children(&self, container_id: &str, cursor: Option<&str>) -> Result<BlockList>;

    /// Retrieve page metadata (properties).
    fn get_page(&self, page_id: &str) -> Result<Page>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn list_children(&self, container_id: &str, cursor: Option<&str>) -> Result<BlockList> {
        (**self).list_children(container_id, cursor)
    }

    fn get_page(&self, page_id: &str) -> Result<Page> {
        (**self).get_page(page_id)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn list_children(&self, container_id: &str, cursor: Option<&str>) -> Result<BlockList> {
        (**self).list_children(container_id, cursor)
    }

    fn get_page(&self, page_id: &str) -> Result<Page> {
        (**self).get_page(page_id)
    }
}
