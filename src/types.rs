//! Core types produced by the splitter.

use serde::{Deserialize, Serialize};

use crate::headers::Headers;

/// One contiguous, token-bounded slice of a source document plus its
/// structural metadata.
///
/// Chunks are value objects with no identity beyond their position in the
/// output sequence. Media references in [`content`](Self::content) are
/// replaced by positional placeholders (`{{$img0}}`, `{{$url0}}`, ...) whose
/// indices point into [`images`](Self::images) and [`urls`](Self::urls).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text with image and link URLs replaced by placeholders.
    pub content: String,
    /// Token count of the raw slice under the configured encoding.
    pub token_count: usize,
    /// Heading hierarchy active at this chunk, snapshotted at emission time.
    pub headers: Headers,
    /// Link URLs, order-aligned with the `{{$urlN}}` placeholder indices.
    pub urls: Vec<String>,
    /// Image URLs, order-aligned with the `{{$imgN}}` placeholder indices.
    pub images: Vec<String>,
}
