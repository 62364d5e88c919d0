//! Integration tests for decoding API payloads and formatting them.

use serde_json::json;
use unnotion::model::BlockList;
use unnotion::render::{format_block, sanitize_filename};

fn listing() -> BlockList {
    serde_json::from_value(json!({
        "object": "list",
        "results": [
            {
                "object": "block", "id": "1", "type": "heading_1", "has_children": false,
                "heading_1": {"rich_text": [{"type": "text", "plain_text": "Intro"}], "is_toggleable": false}
            },
            {
                "object": "block", "id": "2", "type": "to_do", "has_children": false,
                "to_do": {"rich_text": [{"plain_text": "Buy "}, {"plain_text": "milk"}], "checked": true}
            },
            {
                "object": "block", "id": "3", "type": "code", "has_children": false,
                "code": {"rich_text": [{"plain_text": "print(1)"}], "language": "python", "caption": []}
            },
            {
                "object": "block", "id": "4", "type": "callout", "has_children": false,
                "callout": {"rich_text": [{"plain_text": "Heads up"}], "icon": {"emoji": "💡"}}
            },
            {
                "object": "block", "id": "5", "type": "table", "has_children": true,
                "table": {"table_width": 2, "has_column_header": true, "has_row_header": false}
            },
            {
                "object": "block", "id": "6", "type": "child_page", "has_children": true,
                "child_page": {"title": "Módulo Uno"}
            },
            {
                "object": "block", "id": "7", "type": "image", "has_children": false,
                "image": {"type": "external", "external": {"url": "https://example.com/x.png"}}
            }
        ],
        "next_cursor": null,
        "has_more": false
    }))
    .unwrap()
}

#[test]
fn test_format_decoded_listing() {
    let list = listing();
    let text: Vec<String> = list.results.iter().map(format_block).collect();

    assert_eq!(
        text,
        vec![
            "# Intro\n",
            "- [✓] Buy milk\n",
            "```python\nprint(1)\n```\n",
            "> Heads up\n",
            "[Table]\n",
            "",
            "",
        ]
    );
    assert_eq!(list.continuation(), None);
}

#[test]
fn test_format_is_pure() {
    let list = listing();
    for block in &list.results {
        assert_eq!(format_block(block), format_block(block));
    }
}

#[test]
fn test_child_page_title_sanitizes() {
    assert_eq!(sanitize_filename("Módulo Uno"), "modulo-uno");
}
