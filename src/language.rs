//! Language bitmask pre-filter index.
//!
//! Each distinct language code gets a bit position in first-seen order; the
//! 64th and later distinct codes all collapse onto bit 63. A per-entry mask
//! is the OR of its languages' bits, so "no shared bit" can be checked in
//! one AND before any vector math.
//!
//! The mask is only ever a pre-filter. Because aliased codes share bit 63,
//! two masks can overlap without any real shared language (a false "might
//! overlap"); the eligibility filter re-checks the exact set intersection.
//! The converse can never happen: identical codes always map to the same
//! bit, so a zero AND proves the exact intersection is empty. That one-way
//! guarantee is what makes skipping on a zero AND safe.

use std::collections::HashMap;

use crate::catalog::CatalogEntry;

/// Bit reserved for every distinct language beyond the first 63.
const OVERFLOW_BIT: u64 = 1 << 63;

/// Per-corpus-entry language bitmasks.
///
/// # Examples
///
/// ```
/// use semejar::catalog::CatalogEntry;
/// use semejar::language::LanguageIndex;
///
/// let entries = vec![
///     CatalogEntry::new("a").with_language("en"),
///     CatalogEntry::new("b").with_language("en").with_language("fr"),
///     CatalogEntry::new("c").with_language("de"),
/// ];
/// let index = LanguageIndex::build(&entries);
/// assert!(index.mask(0) & index.mask(1) != 0);
/// assert_eq!(index.mask(0) & index.mask(2), 0);
/// ```
#[derive(Debug, Clone)]
pub struct LanguageIndex {
    masks: Vec<u64>,
}

impl LanguageIndex {
    /// Single pass over the corpus entries: assign bits in first-seen
    /// order, then OR each entry's language bits into its mask.
    #[must_use]
    pub fn build(entries: &[CatalogEntry]) -> Self {
        Self::from_language_sets(
            entries
                .iter()
                .map(|e| e.available_translated_languages.as_slice()),
        )
    }

    /// Build from raw language lists; the corpus-independent core of
    /// [`build`](Self::build).
    pub fn from_language_sets<'a, I>(sets: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
        I::IntoIter: Clone,
    {
        let sets = sets.into_iter();
        let mut bits: HashMap<&str, u64> = HashMap::new();
        let mut next_bit = 0u32;
        for languages in sets.clone() {
            for language in languages {
                bits.entry(language.as_str()).or_insert_with(|| {
                    if next_bit < 63 {
                        let bit = 1u64 << next_bit;
                        next_bit += 1;
                        bit
                    } else {
                        OVERFLOW_BIT
                    }
                });
            }
        }

        let masks = sets
            .map(|languages| {
                languages
                    .iter()
                    .filter_map(|l| bits.get(l.as_str()))
                    .fold(0u64, |mask, bit| mask | bit)
            })
            .collect();
        Self { masks }
    }

    /// Mask for the corpus entry at `index`.
    #[must_use]
    pub fn mask(&self, index: usize) -> u64 {
        self.masks[index]
    }

    /// Whether the pair can be skipped before scoring: the source has at
    /// least one language and shares no mask bit with the target. A source
    /// with no languages never skips, matching the eligibility rule that
    /// waives the language check for it.
    #[must_use]
    pub fn can_skip(&self, source: usize, target: usize) -> bool {
        let source_mask = self.masks[source];
        source_mask != 0 && source_mask & self.masks[target] == 0
    }

    /// Number of masks (same as the corpus length).
    #[must_use]
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
