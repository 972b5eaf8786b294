pub mod blocks;
pub mod model;

#[cfg(test)]
mod tests;

pub use model::TextBlock;

use tracing::debug;

use crate::fetcher::PageResponse;

/// Which markup the extractor reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Also read `<button>` labels (the interactive variant).
    pub include_buttons: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_buttons: true,
        }
    }
}

/// Pull text blocks out of raw markup.
///
/// Malformed markup is repaired by the HTML5 parser; a page with no matching
/// elements yields an empty list rather than an error.
pub fn extract_blocks(html: &str, options: &ExtractOptions) -> Vec<TextBlock> {
    let blocks = blocks::select_blocks(html, options.include_buttons);
    debug!(blocks = blocks.len(), "extracted text blocks");
    blocks
}

pub fn extract(page: &PageResponse, options: &ExtractOptions) -> Vec<TextBlock> {
    extract_blocks(&page.body_utf8, options)
}
