//! Token counting for chunk budgeting.
//!
//! Wraps a `tiktoken` byte-pair encoder behind a lazily-initialized handle.
//! The handle resolves its model name to an encoding up front, builds the
//! encoder on first use, and counts as a pure function of the input text
//! afterwards, so it can be shared freely across threads and documents.

use std::fmt;
use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

use crate::error::{Result, SplitError};

/// Tokenizer encodings the splitter can count with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Encoding {
    Cl100k,
    P50k,
    R50k,
}

impl Encoding {
    /// Resolves a model name to its encoding.
    ///
    /// Unmapped names fall back to [`Encoding::Cl100k`]. The fallback is
    /// fixed: it decides every downstream token count, so it must not vary
    /// per call.
    fn for_model(model_name: &str) -> Self {
        match model_name {
            "gpt-4o" | "gpt-4" | "gpt-3.5-turbo" | "gpt-3.5-turbo-16k"
            | "text-embedding-ada-002" => Self::Cl100k,
            "text-davinci-003" | "text-davinci-002" => Self::P50k,
            "text-davinci-001" | "text-curie-001" | "text-babbage-001" | "text-ada-001"
            | "davinci" | "curie" | "babbage" | "ada" => Self::R50k,
            _ => Self::Cl100k,
        }
    }

    fn build(self) -> anyhow::Result<CoreBPE> {
        match self {
            Self::Cl100k => tiktoken_rs::cl100k_base(),
            Self::P50k => tiktoken_rs::p50k_base(),
            Self::R50k => tiktoken_rs::r50k_base(),
        }
    }
}

/// Wraps text in the conversational framing it will be consumed under
/// downstream: start/end markers around a user turn plus an empty assistant
/// turn.
pub(crate) fn wrap_for_completion(text: &str) -> String {
    format!("<|im_start|>user\n{text}<|im_end|>\n<|im_start|>assistant<|im_end|>")
}

/// Lazily-initialized token counter for one model's encoding.
///
/// Construct one handle per encoding and pass it to the assembler; several
/// handles with different encodings can coexist in one process. The encoder
/// is built at most once per handle, guarded by a [`OnceLock`].
pub struct TokenCounter {
    encoding: Encoding,
    bpe: OnceLock<CoreBPE>,
    overhead: OnceLock<usize>,
}

impl TokenCounter {
    /// Creates a counter for the given model name.
    ///
    /// Model names without a known encoding silently fall back to
    /// `cl100k_base`, mirroring how the text will be tokenized downstream
    /// when the consumer does not recognize the model either.
    #[must_use]
    pub fn for_model(model_name: &str) -> Self {
        Self {
            encoding: Encoding::for_model(model_name),
            bpe: OnceLock::new(),
            overhead: OnceLock::new(),
        }
    }

    fn bpe(&self) -> Result<&CoreBPE> {
        if let Some(bpe) = self.bpe.get() {
            return Ok(bpe);
        }
        let built = self.encoding.build().map_err(SplitError::TokenizerInit)?;
        Ok(self.bpe.get_or_init(|| built))
    }

    /// Counts the tokens of `text` under the configured encoding.
    ///
    /// Deterministic; the only side effect is the one-time encoder build on
    /// first use.
    pub fn count(&self, text: &str) -> Result<usize> {
        Ok(self.bpe()?.encode_ordinary(text).len())
    }

    /// Fixed token cost of the conversational framing around chunk content.
    ///
    /// Computed once per handle as `count(wrap("")) - count("")` and cached.
    pub fn framing_overhead(&self) -> Result<usize> {
        if let Some(overhead) = self.overhead.get() {
            return Ok(*overhead);
        }
        let overhead = self.count(&wrap_for_completion(""))? - self.count("")?;
        Ok(*self.overhead.get_or_init(|| overhead))
    }
}

impl fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoding", &self.encoding)
            .field("initialized", &self.bpe.get().is_some())
            .finish()
    }
}
