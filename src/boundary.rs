//! Chunk boundary search.
//!
//! Finds the end offset of the next chunk by estimating from average token
//! density, then refining geometrically: while the slice exceeds the budget,
//! the candidate end shrinks by a tenth of the slice. The refined offset is
//! finally snapped to a nearby newline when that keeps the chunk within
//! budget and at least 80% full. The shrink is geometric, not a binary
//! search; callers rely on the resulting chunk-size distribution. All
//! offsets are byte offsets kept on `char` boundaries so
//! slicing never panics on multi-byte input.

use tracing::debug;

use crate::error::Result;
use crate::tokenizer::TokenCounter;

/// Fraction of the budget a snapped chunk must still reach, in tenths.
const MIN_FILL_TENTHS: usize = 8;

/// Returns the end offset of the chunk starting at `start`.
///
/// Returns `start` itself once the cursor has reached the end of the text;
/// otherwise the returned offset is strictly greater than `start`, advancing
/// by at least one character even when a single character already exceeds
/// the budget.
pub(crate) fn find_chunk_end(
    counter: &TokenCounter,
    text: &str,
    start: usize,
    limit: usize,
) -> Result<usize> {
    if start >= text.len() {
        return Ok(start);
    }

    let overhead = counter.framing_overhead()?;
    let remaining = &text[start..];
    let total_tokens = counter.count(remaining)?;
    if total_tokens == 0 {
        return Ok(text.len());
    }

    // First guess assumes uniform token density over the remainder.
    let estimated = start + remaining.len().saturating_mul(limit) / total_tokens;
    let min_end = start + first_char_len(text, start);
    let mut end = floor_char_boundary(text, estimated.min(text.len())).max(min_end);

    let mut tokens = counter.count(&text[start..end])?;
    while tokens + overhead > limit && end > min_end {
        let step = ((end - start) / 10).max(1);
        end = floor_char_boundary(text, end - step).max(min_end);
        tokens = counter.count(&text[start..end])?;
        debug!(start, end, tokens, "shrinking chunk candidate");
    }

    snap_to_newline(counter, text, start, end, limit, overhead)
}

/// Moves `end` to just past a nearby newline when the result stays within
/// the budget and does not fall far under it.
fn snap_to_newline(
    counter: &TokenCounter,
    text: &str,
    start: usize,
    end: usize,
    limit: usize,
    overhead: usize,
) -> Result<usize> {
    let min_tokens = limit.saturating_mul(MIN_FILL_TENTHS) / 10;

    // Prefer growing to the next line break.
    if let Some(pos) = text[end..].find('\n') {
        let extended = end + pos + 1;
        let tokens = counter.count(&text[start..extended])? + overhead;
        if tokens <= limit && tokens >= min_tokens {
            debug!(start, end = extended, tokens, "extended chunk to next newline");
            return Ok(extended);
        }
    }

    // Otherwise fall back to the previous one, staying strictly inside the slice.
    if let Some(pos) = text[start..end].rfind('\n') {
        if pos > 0 {
            let reduced = start + pos + 1;
            let tokens = counter.count(&text[start..reduced])? + overhead;
            if tokens <= limit && tokens >= min_tokens {
                debug!(start, end = reduced, tokens, "receded chunk to previous newline");
                return Ok(reduced);
            }
        }
    }

    Ok(end)
}

/// Largest `char` boundary at or below `pos`.
fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Byte length of the character starting at `start`.
fn first_char_len(text: &str, start: usize) -> usize {
    text[start..].chars().next().map_or(1, char::len_utf8)
}
