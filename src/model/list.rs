//! Paginated listing responses.

use super::Block;
use serde::Deserialize;

/// One page of a container's immediate children.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockList {
    /// Blocks in store order
    #[serde(default)]
    pub results: Vec<Block>,

    /// Whether another page follows
    #[serde(default)]
    pub has_more: bool,

    /// Cursor to pass for the next page
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl BlockList {
    /// Create a final (non-continued) page.
    pub fn last(results: Vec<Block>) -> Self {
        Self {
            results,
            has_more: false,
            next_cursor: None,
        }
    }

    /// Create a page that is followed by another one.
    pub fn continued(results: Vec<Block>, cursor: impl Into<String>) -> Self {
        Self {
            results,
            has_more: true,
            next_cursor: Some(cursor.into()),
        }
    }

    /// Cursor for the next request, if the store reports one.
    ///
    /// A `has_more` flag without a cursor is treated as the end of the list.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_list() {
        let list: BlockList = serde_json::from_value(json!({
            "object": "list",
            "results": [
                {"id": "a", "type": "divider", "has_children": false, "divider": {}}
            ],
            "next_cursor": "cursor-2",
            "has_more": true,
            "type": "block",
            "block": {}
        }))
        .unwrap();

        assert_eq!(list.results.len(), 1);
        assert_eq!(list.continuation(), Some("cursor-2"));
    }

    #[test]
    fn test_continuation_requires_flag() {
        let list = BlockList {
            results: Vec::new(),
            has_more: false,
            next_cursor: Some("stale".to_string()),
        };
        assert_eq!(list.continuation(), None);

        let list = BlockList {
            results: Vec::new(),
            has_more: true,
            next_cursor: None,
        };
        assert_eq!(list.continuation(), None);
    }
}
