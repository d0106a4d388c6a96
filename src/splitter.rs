//! Document splitting driver.
//!
//! [`Splitter`] walks the document with a cursor, asking the boundary search
//! for each chunk's end offset, folding the slice's headings into the
//! carried hierarchy, and rewriting media references before the chunk is
//! emitted. The produced sequence is ordered, non-overlapping, and
//! contiguous over the whole input.

use tracing::debug;

use crate::boundary::find_chunk_end;
use crate::config::SplitConfig;
use crate::error::{Result, SplitError};
use crate::headers::Headers;
use crate::references::extract_references;
use crate::tokenizer::TokenCounter;
use crate::types::Chunk;

/// Splits markdown text into token-bounded chunks.
///
/// A splitter owns one lazily-initialized [`TokenCounter`] and can be reused
/// across many documents. Construct one splitter per encoding; different
/// encodings coexist in one process as separate handles.
#[derive(Debug)]
pub struct Splitter {
    counter: TokenCounter,
    limit: usize,
}

impl Splitter {
    /// Creates a splitter from a configuration.
    #[must_use]
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            counter: TokenCounter::for_model(&config.model_name),
            limit: config.limit,
        }
    }

    /// Creates a splitter around a counter handle constructed up front.
    #[must_use]
    pub const fn with_counter(counter: TokenCounter, limit: usize) -> Self {
        Self { counter, limit }
    }

    /// The configured per-chunk token budget.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Splits `text` into ordered, contiguous, token-bounded chunks.
    ///
    /// Every chunk satisfies `token_count + framing overhead <= limit`
    /// (unless the budget is so tight that a single character already
    /// exceeds it), and each chunk's header snapshot reflects all headings
    /// seen up to and including its own slice. Empty input produces an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Fails fast with [`SplitError::LimitTooSmall`] when the limit cannot
    /// fit any content once the framing overhead is added, and with
    /// [`SplitError::TokenizerInit`] when the encoder cannot be built. The
    /// operation is all-or-nothing: no partial output on error.
    pub fn split(&self, text: &str) -> Result<Vec<Chunk>> {
        let overhead = self.counter.framing_overhead()?;
        if self.limit <= overhead {
            return Err(SplitError::LimitTooSmall {
                limit: self.limit,
                overhead,
            });
        }

        let mut chunks = Vec::new();
        let mut headers = Headers::new();
        let mut cursor = 0;

        while cursor < text.len() {
            let end = find_chunk_end(&self.counter, text, cursor, self.limit)?;
            let slice = &text[cursor..end];
            let token_count = self.counter.count(slice)?;

            headers.fold(Headers::extract(slice));
            let refs = extract_references(slice);

            debug!(cursor, end, token_count, "emitting chunk");
            chunks.push(Chunk {
                content: refs.content,
                token_count,
                headers: headers.clone(),
                urls: refs.urls,
                images: refs.images,
            });
            cursor = end;
        }

        debug!(count = chunks.len(), "split complete");
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(limit: usize) -> Splitter {
        Splitter::new(&SplitConfig::builder().limit(limit).build())
    }

    /// A multi-line body with no markdown syntax, for boundary-only tests.
    fn filler(lines: usize, seed: &str) -> String {
        (0..lines)
            .map(|index| format!("{seed} line {index} with a few extra words of padding"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunks = splitter(500).split("").unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn small_document_is_a_single_chunk() {
        let text = "# Title\nSome text.";
        let chunks = splitter(500).split(text).unwrap();

        assert_eq!(chunks.len(), 1);
        let chunk = &chunks[0];
        assert_eq!(chunk.content, text);
        assert_eq!(chunk.headers.get(1), Some(&["Title".to_string()][..]));
        assert!(chunk.urls.is_empty());
        assert!(chunk.images.is_empty());
    }

    #[test]
    fn media_references_are_harvested_in_order() {
        let text = "intro ![first](img-a.png) middle ![second](img-b.png) \
                    and [a link](https://example.com) outro";
        let chunks = splitter(500).split(text).unwrap();

        assert_eq!(chunks.len(), 1);
        let chunk = &chunks[0];
        assert_eq!(chunk.images, vec!["img-a.png", "img-b.png"]);
        assert_eq!(chunk.urls, vec!["https://example.com"]);
        assert_eq!(
            chunk.content,
            "intro ![first]({{$img0}}) middle ![second]({{$img1}}) \
             and [a link]({{$url0}}) outro"
        );
    }

    #[test]
    fn long_document_chunks_are_contiguous_and_bounded() {
        let counter = TokenCounter::for_model("gpt-4o");
        let overhead = counter.framing_overhead().unwrap();
        let limit = overhead + 40;
        let text = filler(120, "body");

        let chunks = splitter(limit).split(&text).unwrap();
        assert!(chunks.len() >= 3);

        for chunk in &chunks {
            assert!(chunk.token_count + overhead <= limit);
            assert_eq!(chunk.token_count, counter.count(&chunk.content).unwrap());
        }

        // No references in the input, so contents are the raw slices and
        // concatenating them must reproduce the document exactly.
        let rejoined: String = chunks.iter().map(|chunk| chunk.content.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn multibyte_documents_split_without_gaps() {
        let counter = TokenCounter::for_model("gpt-4o");
        let overhead = counter.framing_overhead().unwrap();
        let text = "これは日本語の行です 🌍 mixed with English\n".repeat(60);

        let chunks = splitter(overhead + 25).split(&text).unwrap();
        assert!(chunks.len() > 1);

        let rejoined: String = chunks.iter().map(|chunk| chunk.content.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn headingless_chunks_inherit_the_open_hierarchy() {
        let counter = TokenCounter::for_model("gpt-4o");
        let overhead = counter.framing_overhead().unwrap();
        let budget = 150;

        // Enough heading-free body to need several chunks after the opener.
        let mut text = String::from("# Alpha\n");
        let mut index = 0;
        while counter.count(&text).unwrap() <= budget * 3 {
            text.push_str(&format!("body line {index} with a few extra words of padding\n"));
            index += 1;
        }

        let chunks = splitter(overhead + budget).split(&text).unwrap();
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert_eq!(chunk.headers.get(1), Some(&["Alpha".to_string()][..]));
        }
    }

    #[test]
    fn shallower_heading_resets_deeper_context_across_chunks() {
        let counter = TokenCounter::for_model("gpt-4o");
        let overhead = counter.framing_overhead().unwrap();
        let budget = 200;

        // Grow the opening section past the budget so the first boundary
        // always falls inside it, well before the closing section.
        let mut opening = String::from("# Alpha\n## Beta\n");
        let mut index = 0;
        while counter.count(&opening).unwrap() <= budget + 20 {
            opening.push_str(&format!("opening line {index} with a few extra words of padding\n"));
            index += 1;
        }
        let text = format!("{opening}# Omega\nclosing words after the reset\n");

        let chunks = splitter(overhead + budget).split(&text).unwrap();
        assert_eq!(chunks.len(), 2);

        // The first chunk's snapshot keeps the nested pair it saw.
        assert_eq!(chunks[0].headers.get(1), Some(&["Alpha".to_string()][..]));
        assert_eq!(chunks[0].headers.get(2), Some(&["Beta".to_string()][..]));

        // Once "# Omega" folds in, the level-2 entry is gone.
        assert_eq!(chunks[1].headers.get(1), Some(&["Omega".to_string()][..]));
        assert_eq!(chunks[1].headers.get(2), None);
    }

    #[test]
    fn limit_at_or_below_overhead_fails_fast() {
        let counter = TokenCounter::for_model("gpt-4o");
        let overhead = counter.framing_overhead().unwrap();

        let result = splitter(overhead).split("some text");
        assert!(matches!(
            result,
            Err(SplitError::LimitTooSmall { limit, overhead: reported })
                if limit == overhead && reported == overhead
        ));
    }

    #[test]
    fn splitter_is_reusable_across_documents() {
        let splitter = splitter(500);
        let first = splitter.split("# One\nbody").unwrap();
        let second = splitter.split("# Two\nbody").unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].headers.get(1), Some(&["Two".to_string()][..]));
    }

    #[test]
    fn chunk_serializes_to_the_documented_shape() {
        let chunks = splitter(500)
            .split("# Title\nSee ![pic](p.png) and [ref](https://example.com).")
            .unwrap();
        let value = serde_json::to_value(&chunks[0]).unwrap();

        assert!(value["content"].as_str().unwrap().contains("{{$img0}}"));
        assert!(value["token_count"].as_u64().unwrap() > 0);
        assert_eq!(value["headers"], serde_json::json!({ "h1": ["Title"] }));
        assert_eq!(value["urls"], serde_json::json!(["https://example.com"]));
        assert_eq!(value["images"], serde_json::json!(["p.png"]));
    }
}
