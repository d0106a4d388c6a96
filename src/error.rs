//! Error types for document splitting.

use thiserror::Error;

/// Errors that can occur while splitting a document.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The tokenizer encoder for the configured model could not be built.
    #[error("tokenizer initialization failed: {0}")]
    TokenizerInit(#[source] anyhow::Error),

    /// The token budget cannot fit any content once the framing overhead is
    /// added, so no chunk could ever satisfy it.
    #[error("token limit {limit} does not exceed framing overhead {overhead}")]
    LimitTooSmall {
        /// Requested per-chunk token budget.
        limit: usize,
        /// Fixed token cost of the conversational framing.
        overhead: usize,
    },
}

/// Result type alias for splitting operations.
pub type Result<T> = std::result::Result<T, SplitError>;
