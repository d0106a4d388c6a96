//! Token-bounded markdown chunking.
//!
//! `mdchunk` splits long-form markdown into chunks that respect a maximum
//! token budget while preserving document structure. Each chunk carries a
//! snapshot of the heading hierarchy active at its position, and inline
//! image/link URLs are replaced by positional placeholders with the original
//! targets collected into index-aligned lists. Chunk boundaries are found by
//! an estimate-then-refine search against a real tokenizer, then snapped to
//! nearby line breaks when that keeps the chunk within budget.
//!
//! The crate is a pure, synchronous transformation over in-memory text.
//! Persisting and embedding chunks is left to downstream collaborators,
//! which consume the [`Chunk`] value objects this crate produces.
//!
//! # Example
//!
//! ```rust
//! use mdchunk::{SplitConfig, Splitter};
//!
//! let config = SplitConfig::builder().limit(400).build();
//! let splitter = Splitter::new(&config);
//!
//! let chunks = splitter.split("# Title\nSome text with a [link](https://example.com).")?;
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].headers.get(1), Some(&["Title".to_string()][..]));
//! assert_eq!(chunks[0].urls, vec!["https://example.com"]);
//! # Ok::<(), mdchunk::SplitError>(())
//! ```

mod boundary;
pub mod config;
pub mod error;
pub mod headers;
mod references;
pub mod splitter;
pub mod tokenizer;
pub mod types;

pub use config::{DEFAULT_MODEL, DEFAULT_TOKEN_LIMIT, SplitConfig, SplitConfigBuilder};
pub use error::{Result, SplitError};
pub use headers::Headers;
pub use splitter::Splitter;
pub use tokenizer::TokenCounter;
pub use types::Chunk;

/// Splits `text` into token-bounded chunks using `model_name`'s encoding.
///
/// Convenience wrapper that builds a one-shot [`Splitter`]; construct a
/// [`Splitter`] directly to reuse the initialized tokenizer across
/// documents. Model names without a known encoding fall back to
/// `cl100k_base`.
///
/// # Errors
///
/// Fails before any text is processed when `limit` does not exceed the
/// conversational framing overhead, or when the tokenizer encoder cannot be
/// built.
pub fn split(text: &str, model_name: &str, limit: usize) -> Result<Vec<Chunk>> {
    let config = SplitConfig::builder()
        .model_name(model_name)
        .limit(limit)
        .build();
    Splitter::new(&config).split(text)
}
