//! Deterministic text normalization.
//!
//! Everything the similarity engine vectorizes passes through this module
//! first: titles, alt-titles, descriptions, and tag names. The transforms
//! are pure `&str -> String` functions with no shared state, and their exact
//! output is fixture-tested — changing a rule here changes every vector in
//! the corpus.

pub mod normalize;
pub mod stem;
pub mod stopwords;

pub use normalize::{normalize_description, normalize_tag, normalize_title};
pub use stem::PorterStemmer;
pub use stopwords::{StopWordsFilter, ENGLISH_STOP_WORDS};
