//! In-memory document store with scripted responses.

use std::cell::RefCell;
use std::collections::HashMap;

use super::DocumentStore;
use crate::error::{Error, Result};
use crate::model::{Block, BlockList, Page};

/// A request observed by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    /// `list_children(container, cursor)`
    ListChildren {
        /// Container identifier
        container: String,
        /// Cursor passed by the caller
        cursor: Option<String>,
    },
    /// `get_page(page)`
    GetPage {
        /// Page identifier
        page: String,
    },
}

/// A [`DocumentStore`] answering from pre-loaded data.
///
/// Children are stored as a sequence of response pages per container; the
/// cursor handed out for page `n` is the string `"n"`. Any page or lookup
/// can be scripted to fail. Every request is recorded in call order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    children: HashMap<String, Vec<std::result::Result<Vec<Block>, String>>>,
    pages: HashMap<String, std::result::Result<Page, String>>,
    requests: RefCell<Vec<StoreRequest>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a container's children as a single response.
    pub fn with_children(self, container: impl Into<String>, blocks: Vec<Block>) -> Self {
        self.with_paged_children(container, vec![blocks])
    }

    /// Set a container's children split across several responses.
    pub fn with_paged_children(
        mut self,
        container: impl Into<String>,
        pages: Vec<Vec<Block>>,
    ) -> Self {
        self.children
            .insert(container.into(), pages.into_iter().map(Ok).collect());
        self
    }

    /// Make response `index` (0-based) for a container fail.
    ///
    /// Appends empty responses as needed so the failing index exists.
    pub fn fail_children_at(
        mut self,
        container: impl Into<String>,
        index: usize,
        message: impl Into<String>,
    ) -> Self {
        let responses = self.children.entry(container.into()).or_default();
        while responses.len() <= index {
            responses.push(Ok(Vec::new()));
        }
        responses[index] = Err(message.into());
        self
    }

    /// Register page metadata.
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert(page.id.clone(), Ok(page));
        self
    }

    /// Make the metadata lookup for a page fail.
    pub fn fail_page(mut self, page_id: impl Into<String>, message: impl Into<String>) -> Self {
        self.pages.insert(page_id.into(), Err(message.into()));
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.requests.borrow().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn record(&self, request: StoreRequest) {
        self.requests.borrow_mut().push(request);
    }
}

impl DocumentStore for MemoryStore {
    fn list_children(&self, container_id: &str, cursor: Option<&str>) -> Result<BlockList> {
        self.record(StoreRequest::ListChildren {
            container: container_id.to_string(),
            cursor: cursor.map(str::to_string),
        });

        let Some(responses) = self.children.get(container_id) else {
            return Ok(BlockList::default());
        };

        let index = match cursor {
            None => 0,
            Some(c) => c
                .parse::<usize>()
                .map_err(|_| Error::api(400, "validation_error", format!("bad cursor: {}", c)))?,
        };

        match responses.get(index) {
            None => Err(Error::api(400, "validation_error", "cursor out of range")),
            Some(Err(message)) => Err(Error::api(502, "bad_gateway", message.clone())),
            Some(Ok(blocks)) if index + 1 < responses.len() => {
                Ok(BlockList::continued(blocks.clone(), (index + 1).to_string()))
            }
            Some(Ok(blocks)) => Ok(BlockList::last(blocks.clone())),
        }
    }

    fn get_page(&self, page_id: &str) -> Result<Page> {
        self.record(StoreRequest::GetPage {
            page: page_id.to_string(),
        });

        match self.pages.get(page_id) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(message)) => Err(Error::api(502, "bad_gateway", message.clone())),
            None => Err(Error::api(
                404,
                "object_not_found",
                format!("Could not find page with ID: {}", page_id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_children_cursors() {
        let store = MemoryStore::new().with_paged_children(
            "root",
            vec![
                vec![Block::paragraph("a", "one")],
                vec![Block::paragraph("b", "two")],
            ],
        );

        let first = store.list_children("root", None).unwrap();
        assert_eq!(first.continuation(), Some("1"));

        let second = store.list_children("root", Some("1")).unwrap();
        assert!(!second.has_more);
        assert_eq!(second.results[0].id, "b");
        assert_eq!(store.request_count(), 2);
    }

    #[test]
    fn test_unknown_container_is_empty() {
        let store = MemoryStore::new();
        let list = store.list_children("nowhere", None).unwrap();
        assert!(list.results.is_empty());
        assert!(!list.has_more);
    }

    #[test]
    fn test_scripted_failures() {
        let store = MemoryStore::new()
            .fail_children_at("root", 1, "boom")
            .fail_page("p", "down");

        assert!(store.list_children("root", None).is_ok());
        assert!(matches!(
            store.list_children("root", Some("1")),
            Err(Error::Api { status: 502, .. })
        ));
        assert!(store.get_page("p").is_err());
        assert!(matches!(
            store.get_page("missing"),
            Err(Error::Api { status: 404, .. })
        ));
    }
}
