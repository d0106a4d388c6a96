//! Markdown heading tracking across chunk boundaries.
//!
//! ATX headings found in each chunk slice are folded into a carried
//! hierarchy: recording a heading at level `L` drops every entry deeper than
//! `L`, so a chunk's snapshot only shows the ancestors still open at its
//! position in the document. Levels with no new heading keep their titles,
//! which is how a chunk with no heading of its own inherits context.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.*)").expect("heading pattern is valid"));

/// Ordered mapping from heading level (1..=6) to the titles most recently
/// seen at that level.
///
/// Serializes as an object keyed `"h1"` through `"h6"`, the shape storage
/// and indexing collaborators consume.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers {
    levels: BTreeMap<u8, Vec<String>>,
}

impl Headers {
    /// Creates an empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the ATX headings present in `slice`, keyed by level.
    ///
    /// Titles at the same level accumulate in document order; folding into
    /// the carried hierarchy decides what survives.
    #[must_use]
    pub fn extract(slice: &str) -> Self {
        let mut levels: BTreeMap<u8, Vec<String>> = BTreeMap::new();
        for captures in HEADING.captures_iter(slice) {
            let level = captures[1].len() as u8;
            let title = captures[2].trim().to_string();
            levels.entry(level).or_default().push(title);
        }
        Self { levels }
    }

    /// Folds headings extracted from a chunk slice into the carried state.
    ///
    /// Each extracted level, shallowest first, overwrites the titles at that
    /// level and clears every strictly deeper level. Levels absent from
    /// `extracted` are left untouched so ancestor context survives into
    /// chunks that contain no heading of their own.
    pub fn fold(&mut self, extracted: Self) {
        for (level, titles) in extracted.levels {
            self.levels.insert(level, titles);
            self.levels.split_off(&(level + 1));
        }
    }

    /// Titles currently active at `level`, if any.
    #[must_use]
    pub fn get(&self, level: u8) -> Option<&[String]> {
        self.levels.get(&level).map(Vec::as_slice)
    }

    /// True when no heading has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of levels with at least one recorded title.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.levels.len()))?;
        for (level, titles) in &self.levels {
            map.serialize_entry(&format!("h{level}"), titles)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut levels = BTreeMap::new();
        for (key, titles) in raw {
            let level = key
                .strip_prefix('h')
                .and_then(|digits| digits.parse::<u8>().ok())
                .filter(|level| (1..=6).contains(level))
                .ok_or_else(|| de::Error::custom(format!("invalid heading level key `{key}`")))?;
            levels.insert(level, titles);
        }
        Ok(Self { levels })
    }
}
