//! Markdown rendering for single blocks.

use crate::model::{concat_plain_text, Block, BlockKind, InlineText};

use super::RenderOptions;

/// Format one block with default options.
pub fn format_block(block: &Block) -> String {
    BlockFormatter::default().format(block)
}

/// Per-type Markdown formatter.
///
/// Output depends only on the block's type and payload. Children are not
/// visited here; the exporter splices them in after the parent's line.
#[derive(Debug, Clone, Default)]
pub struct BlockFormatter {
    options: RenderOptions,
}

impl BlockFormatter {
    /// Create a formatter.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Get the formatter's options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Format a block. Child page references and unsupported types yield "".
    pub fn format(&self, block: &Block) -> String {
        let mut output = String::new();
        self.render_block(&mut output, block);
        output
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match &block.kind {
            BlockKind::Paragraph(spans) => line(output, "", spans),
            BlockKind::Heading1(spans) => line(output, "# ", spans),
            BlockKind::Heading2(spans) => line(output, "## ", spans),
            BlockKind::Heading3(spans) => line(output, "### ", spans),
            BlockKind::BulletedListItem(spans) => line(output, "- ", spans),
            // Ordinals stay flat; Markdown renderers renumber on display.
            BlockKind::NumberedListItem(spans) => line(output, "1. ", spans),
            BlockKind::ToDo { text, checked } => {
                let marker = if *checked {
                    &self.options.checked_marker
                } else {
                    &self.options.unchecked_marker
                };
                output.push_str("- ");
                output.push_str(marker);
                output.push(' ');
                push_spans(output, text);
                output.push('\n');
            }
            BlockKind::Code { text, language } => {
                output.push_str("```");
                output.push_str(language);
                output.push('\n');
                push_spans(output, text);
                output.push_str("\n```\n");
            }
            BlockKind::Quote(spans) | BlockKind::Callout(spans) => line(output, "> ", spans),
            BlockKind::Divider => output.push_str("---\n"),
            BlockKind::Table => {
                output.push_str(&self.options.table_placeholder);
                output.push('\n');
            }
            BlockKind::Toggle(spans) => line(output, "▶ ", spans),
            BlockKind::ChildPage { .. } | BlockKind::Unsupported(_) => {}
        }
    }
}

fn line(output: &mut String, prefix: &str, spans: &[InlineText]) {
    output.push_str(prefix);
    push_spans(output, spans);
    output.push('\n');
}

fn push_spans(output: &mut String, spans: &[InlineText]) {
    output.push_str(&concat_plain_text(spans));
}
