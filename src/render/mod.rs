//! Rendering module for turning store blocks into Markdown.

mod filename;
mod markdown;
mod options;

pub use filename::{markdown_filename, sanitize_filename};
pub use markdown::{format_block, BlockFormatter};
pub use options::{RenderOptions, UNTITLED};
