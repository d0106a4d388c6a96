//! Inline image and link extraction.
//!
//! URLs are pulled out of a chunk's text and replaced by positional
//! placeholders so the stored content stays compact while the original
//! targets remain addressable by index: the n-th `{{$imgN}}` placeholder
//! corresponds to the n-th entry of the image list, and likewise for
//! `{{$urlN}}` and the URL list. Images are rewritten strictly before links;
//! the link pass skips anything introduced by a `!` so an image's
//! bracket/paren structure is never misread as a plain link.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern is valid"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

/// A chunk's text after placeholder rewriting, with the harvested targets.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ExtractedRefs {
    /// Text with every media URL replaced by an indexed placeholder.
    pub content: String,
    /// Link URLs in placeholder order.
    pub urls: Vec<String>,
    /// Image URLs in placeholder order.
    pub images: Vec<String>,
}

/// Replaces media references in `text` with indexed placeholders.
pub(crate) fn extract_references(text: &str) -> ExtractedRefs {
    let mut images = Vec::new();
    let mut urls = Vec::new();

    let image_pass = IMAGE.replace_all(text, |caps: &Captures<'_>| {
        let placeholder = format!("![{}]({{{{$img{}}}}})", &caps[1], images.len());
        images.push(caps[2].to_string());
        placeholder
    });

    let bytes = image_pass.as_bytes();
    let link_pass = LINK.replace_all(&image_pass, |caps: &Captures<'_>| {
        // A leading `!` means this bracket pair is an already-rewritten image.
        let start = caps.get(0).map_or(0, |m| m.start());
        if start > 0 && bytes[start - 1] == b'!' {
            return caps[0].to_string();
        }
        let placeholder = format!("[{}]({{{{$url{}}}}})", &caps[1], urls.len());
        urls.push(caps[2].to_string());
        placeholder
    });

    ExtractedRefs {
        content: link_pass.into_owned(),
        urls,
        images,
    }
}
