//! Export options and configuration.

use std::time::Duration;

use crate::render::RenderOptions;

/// Pause before each continuation request and between page exports.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(350);

/// Nesting depth past which child blocks are not fetched.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Options controlling traversal and pacing.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Delay before every continuation request of a listing
    pub request_delay: Duration,

    /// Delay between consecutive page exports in a tree export
    pub page_delay: Duration,

    /// Maximum block nesting depth to descend into
    pub max_depth: usize,

    /// Splice the content of nested child pages into their parent's body
    pub inline_child_pages: bool,

    /// Block and document rendering options
    pub render: RenderOptions,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the continuation request delay.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Set the delay between page exports.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Disable all pacing (for in-memory stores).
    pub fn without_delays(self) -> Self {
        self.with_request_delay(Duration::ZERO)
            .with_page_delay(Duration::ZERO)
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable or disable inlining of nested child pages.
    pub fn with_inline_child_pages(mut self, inline: bool) -> Self {
        self.inline_child_pages = inline;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_DELAY,
            page_delay: DEFAULT_DELAY,
            max_depth: DEFAULT_MAX_DEPTH,
            inline_child_pages: true,
            render: RenderOptions::default(),
        }
    }
}
