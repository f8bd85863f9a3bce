//! Corpus construction: catalog entries to index-aligned text columns.
//!
//! Entries missing a title or description for the working language are
//! skipped, not errored; everything downstream (vectors, norms, masks)
//! is indexed by the dense corpus position assigned here.

use tracing::debug;

use crate::catalog::CatalogEntry;
use crate::text::{normalize_description, normalize_tag, normalize_title};

/// The filtered catalog plus its normalized text columns.
///
/// All four columns are index-aligned: position `i` in `entries` owns
/// `tag_texts[i]`, `desc_texts[i]`, and `desc_word_counts[i]`. Ordering is
/// input ordering minus skipped entries.
///
/// # Examples
///
/// ```
/// use semejar::catalog::CatalogEntry;
/// use semejar::corpus::Corpus;
///
/// let catalog = vec![
///     CatalogEntry::new("kept")
///         .with_title("en", "A Title")
///         .with_description("en", "A description."),
///     CatalogEntry::new("skipped").with_title("en", "No description"),
/// ];
/// let corpus = Corpus::build(catalog, "en");
/// assert_eq!(corpus.len(), 1);
/// assert_eq!(corpus.entries[0].id, "kept");
/// ```
#[derive(Debug, Default)]
pub struct Corpus {
    /// Catalog entries that passed the title/description presence check.
    pub entries: Vec<CatalogEntry>,
    /// Space-joined normalized tag names per entry.
    pub tag_texts: Vec<String>,
    /// Normalized title + alt-titles + description per entry.
    pub desc_texts: Vec<String>,
    /// Naive space-split token count of `desc_texts`, used by the
    /// minimum-length gate.
    pub desc_word_counts: Vec<usize>,
}

impl Corpus {
    /// Filter the catalog and build the text columns.
    ///
    /// `language` is the working language key ("en" by default upstream);
    /// title and description must both be present under that key for the
    /// entry to enter the corpus.
    #[must_use]
    pub fn build(catalog: Vec<CatalogEntry>, language: &str) -> Self {
        let capacity = catalog.len();
        let mut corpus = Corpus {
            entries: Vec::with_capacity(capacity),
            tag_texts: Vec::with_capacity(capacity),
            desc_texts: Vec::with_capacity(capacity),
            desc_word_counts: Vec::with_capacity(capacity),
        };

        let mut skipped = 0usize;
        for entry in catalog {
            let (Some(title), Some(description)) =
                (entry.title_in(language), entry.description_in(language))
            else {
                skipped += 1;
                continue;
            };

            let tag_text = entry
                .tags
                .iter()
                .filter_map(|tag| tag.name.get(language))
                .map(|name| normalize_tag(name))
                .collect::<Vec<_>>()
                .join(" ");

            let mut desc_parts = vec![normalize_title(title)];
            for alt_title in &entry.alt_titles {
                if let Some(alt) = alt_title.get(language) {
                    let cleaned = normalize_title(alt);
                    if !cleaned.is_empty() {
                        desc_parts.push(cleaned);
                    }
                }
            }
            desc_parts.push(normalize_description(description));
            let desc_text = desc_parts.join(" ");

            // Counts empty segments too; "a b " is three, not two. The
            // minimum-length gate was tuned against this counting rule.
            let word_count = desc_text.split(' ').count();

            corpus.tag_texts.push(tag_text);
            corpus.desc_texts.push(desc_text);
            corpus.desc_word_counts.push(word_count);
            corpus.entries.push(entry);
        }

        debug!(
            kept = corpus.entries.len(),
            skipped, "corpus built from catalog"
        );
        corpus
    }

    /// Number of corpus entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
