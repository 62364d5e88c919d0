//! Block-level types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A run of plain text taken from a rich-text span.
///
/// Annotations, links and colors are dropped on decode; only `plain_text`
/// survives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineText {
    /// The unstyled text of the span
    #[serde(default)]
    pub plain_text: String,
}

impl InlineText {
    /// Create a span from text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
        }
    }
}

/// Concatenate spans by their plain text.
pub fn concat_plain_text(spans: &[InlineText]) -> String {
    spans.iter().map(|s| s.plain_text.as_str()).collect()
}

/// A single content unit returned by the document store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    /// Stable block identifier
    pub id: String,

    /// Whether the block owns nested blocks (fetched separately)
    pub has_children: bool,

    /// Type-specific content
    pub kind: BlockKind,
}

impl Block {
    /// Create a block without children.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            has_children: false,
            kind,
        }
    }

    /// Mark the block as owning nested blocks.
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    /// Shorthand for a paragraph block.
    pub fn paragraph(id: impl Into<String>, text: &str) -> Self {
        Self::new(id, BlockKind::Paragraph(vec![InlineText::new(text)]))
    }

    /// Shorthand for a heading block. Levels outside 1..=3 clamp.
    pub fn heading(id: impl Into<String>, text: &str, level: u8) -> Self {
        let spans = vec![InlineText::new(text)];
        let kind = match level {
            0 | 1 => BlockKind::Heading1(spans),
            2 => BlockKind::Heading2(spans),
            _ => BlockKind::Heading3(spans),
        };
        Self::new(id, kind)
    }

    /// Shorthand for a child page reference.
    pub fn child_page(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockKind::ChildPage {
                title: title.into(),
            },
        )
    }

    /// Check if this block references a nested page.
    pub fn is_child_page(&self) -> bool {
        matches!(self.kind, BlockKind::ChildPage { .. })
    }

    /// Get the type name as the store spells it.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// Recognized block types and their payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// Plain paragraph
    Paragraph(Vec<InlineText>),
    /// Level 1 heading
    Heading1(Vec<InlineText>),
    /// Level 2 heading
    Heading2(Vec<InlineText>),
    /// Level 3 heading
    Heading3(Vec<InlineText>),
    /// Unordered list item
    BulletedListItem(Vec<InlineText>),
    /// Ordered list item
    NumberedListItem(Vec<InlineText>),
    /// Checklist item
    ToDo {
        /// Item text
        text: Vec<InlineText>,
        /// Checked state
        checked: bool,
    },
    /// Code listing
    Code {
        /// Source text
        text: Vec<InlineText>,
        /// Language tag, possibly empty
        language: String,
    },
    /// Block quote
    Quote(Vec<InlineText>),
    /// Callout box
    Callout(Vec<InlineText>),
    /// Horizontal divider
    Divider,
    /// Table (rows are child blocks)
    Table,
    /// Collapsible toggle
    Toggle(Vec<InlineText>),
    /// Reference to a nested page
    ChildPage {
        /// Title embedded in the reference
        title: String,
    },
    /// Any type outside the recognized set
    Unsupported(String),
}

impl BlockKind {
    /// Get the store's type string for this kind.
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Heading1(_) => "heading_1",
            BlockKind::Heading2(_) => "heading_2",
            BlockKind::Heading3(_) => "heading_3",
            BlockKind::BulletedListItem(_) => "bulleted_list_item",
            BlockKind::NumberedListItem(_) => "numbered_list_item",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::Code { .. } => "code",
            BlockKind::Quote(_) => "quote",
            BlockKind::Callout(_) => "callout",
            BlockKind::Divider => "divider",
            BlockKind::Table => "table",
            BlockKind::Toggle(_) => "toggle",
            BlockKind::ChildPage { .. } => "child_page",
            BlockKind::Unsupported(name) => name,
        }
    }
}

/// Wire shape of a block: the payload lives under a key named after the type.
#[derive(Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// Union of the payload fields the formatter consumes.
#[derive(Deserialize, Default)]
struct Payload {
    #[serde(default)]
    rich_text: Vec<InlineText>,
    #[serde(default)]
    checked: bool,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl TryFrom<RawBlock> for Block {
    type Error = serde_json::Error;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let payload = match raw.rest.get(&raw.block_type) {
            Some(value) if value.is_object() => Payload::deserialize(value)?,
            _ => Payload::default(),
        };

        let Payload {
            rich_text,
            checked,
            language,
            title,
        } = payload;

        let kind = match raw.block_type.as_str() {
            "paragraph" => BlockKind::Paragraph(rich_text),
            "heading_1" => BlockKind::Heading1(rich_text),
            "heading_2" => BlockKind::Heading2(rich_text),
            "heading_3" => BlockKind::Heading3(rich_text),
            "bulleted_list_item" => BlockKind::BulletedListItem(rich_text),
            "numbered_list_item" => BlockKind::NumberedListItem(rich_text),
            "to_do" => BlockKind::ToDo {
                text: rich_text,
                checked,
            },
            "code" => BlockKind::Code {
                text: rich_text,
                language: language.unwrap_or_default(),
            },
            "quote" => BlockKind::Quote(rich_text),
            "callout" => BlockKind::Callout(rich_text),
            "divider" => BlockKind::Divider,
            "table" => BlockKind::Table,
            "toggle" => BlockKind::Toggle(rich_text),
            "child_page" => BlockKind::ChildPage {
                title: title.unwrap_or_default(),
            },
            other => BlockKind::Unsupported(other.to_string()),
        };

        Ok(Block {
            id: raw.id,
            has_children: raw.has_children,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_heading() {
        let block: Block = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "heading_1",
            "has_children": false,
            "heading_1": {
                "rich_text": [
                    {"type": "text", "plain_text": "Intro", "annotations": {"bold": true}}
                ],
                "color": "default"
            }
        }))
        .unwrap();

        assert_eq!(block.id, "b1");
        assert!(!block.has_children);
        assert_eq!(block.kind, BlockKind::Heading1(vec![InlineText::new("Intro")]));
    }

    #[test]
    fn test_decode_to_do_and_code() {
        let todo: Block = serde_json::from_value(json!({
            "id": "t",
            "type": "to_do",
            "to_do": {"rich_text": [{"plain_text": "Buy milk"}], "checked": true}
        }))
        .unwrap();
        assert_eq!(
            todo.kind,
            BlockKind::ToDo {
                text: vec![InlineText::new("Buy milk")],
                checked: true
            }
        );

        let code: Block = serde_json::from_value(json!({
            "id": "c",
            "type": "code",
            "has_children": false,
            "code": {"rich_text": [{"plain_text": "fn main() {}"}]}
        }))
        .unwrap();
        assert_eq!(
            code.kind,
            BlockKind::Code {
                text: vec![InlineText::new("fn main() {}")],
                language: String::new()
            }
        );
    }

    #[test]
    fn test_decode_child_page() {
        let block: Block = serde_json::from_value(json!({
            "id": "p",
            "type": "child_page",
            "has_children": true,
            "child_page": {"title": "Módulo Uno"}
        }))
        .unwrap();
        assert!(block.is_child_page());
        assert!(block.has_children);
        assert_eq!(block.type_name(), "child_page");
    }

    #[test]
    fn test_decode_unknown_type() {
        let block: Block = serde_json::from_value(json!({
            "id": "x",
            "type": "synced_block",
            "synced_block": {"synced_from": null}
        }))
        .unwrap();
        assert_eq!(block.kind, BlockKind::Unsupported("synced_block".to_string()));
        assert_eq!(block.type_name(), "synced_block");
    }

    #[test]
    fn test_concat_plain_text() {
        let spans = vec![InlineText::new("Hello, "), InlineText::new("world")];
        assert_eq!(concat_plain_text(&spans), "Hello, world");
        assert_eq!(concat_plain_text(&[]), "");
    }
}
