//! Stop-word filtering for the description vector space.
//!
//! The tag space keeps every term; only the description space filters stop
//! words. Because description tokens arrive already stemmed, the filter has
//! to be built from a stemmed copy of the list ([`StopWordsFilter::stemmed_english`]),
//! prepared once per run and passed into the vectorizer as a plain value.

use std::collections::HashSet;

use crate::text::stem::PorterStemmer;

/// Default English stop words.
///
/// Articles, pronouns, question words, prepositions, conjunctions, auxiliary
/// verbs, and a handful of near-content-free common verbs, in the spirit of
/// the NLTK/sklearn lists.
///
/// # Examples
///
/// ```
/// use semejar::text::ENGLISH_STOP_WORDS;
///
/// assert!(ENGLISH_STOP_WORDS.contains(&"the"));
/// assert!(!ENGLISH_STOP_WORDS.contains(&"voyage"));
/// ```
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // pronouns
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    // question words
    "what", "which", "who", "whom", "whose", "why", "when", "where", "how",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "down", "during", "for",
    "from", "in", "inside", "into", "near", "of", "off", "on", "onto", "out", "outside", "over",
    "through", "throughout", "to", "toward", "under", "underneath", "until", "up", "upon",
    "with", "within", "without",
    // conjunctions
    "and", "as", "because", "but", "if", "or", "since", "so", "than", "that", "though",
    "unless", "while",
    // auxiliary verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "would", "should", "could", "ought", "can", "may", "might",
    "must", "will", "shall",
    // quantifiers and demonstratives
    "all", "any", "both", "each", "every", "few", "more", "most", "much", "neither", "no",
    "none", "not", "one", "other", "same", "several", "some", "such", "very", "too", "only",
    "own", "then", "there", "these", "this", "those", "just", "now", "here",
    // common near-content-free verbs
    "again", "also", "another", "back", "even", "ever", "get", "give", "go", "got", "made",
    "make", "say", "see", "take", "way",
];

/// Stop-word membership filter.
///
/// Words are stored lowercase; lookups are case-insensitive.
///
/// # Examples
///
/// ```
/// use semejar::text::StopWordsFilter;
///
/// let filter = StopWordsFilter::english();
/// assert!(filter.is_stop_word("the"));
/// assert!(filter.is_stop_word("THE"));
/// assert!(!filter.is_stop_word("voyage"));
/// ```
#[derive(Debug, Clone)]
pub struct StopWordsFilter {
    stop_words: HashSet<String>,
}

impl StopWordsFilter {
    /// Create a filter from custom stop words (lowercased on the way in).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();
        Self { stop_words }
    }

    /// Filter over the raw English list.
    #[must_use]
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    /// Filter over the English list with each word stemmed.
    ///
    /// This is the form the description vectorizer needs, because the tokens
    /// it sees have already been through the stemmer ("because" arrives as
    /// "becaus").
    #[must_use]
    pub fn stemmed_english(stemmer: &PorterStemmer) -> Self {
        Self::new(ENGLISH_STOP_WORDS.iter().map(|w| stemmer.stem(w)))
    }

    /// Check membership (case-insensitive).
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Number of distinct stop words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Whether the filter holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_contains_common_words() {
        let filter = StopWordsFilter::english();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("and"));
        assert!(filter.is_stop_word("because"));
        assert!(!filter.is_stop_word("pirate"));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = StopWordsFilter::english();
        assert!(filter.is_stop_word("The"));
        assert!(filter.is_stop_word("BECAUSE"));
    }

    #[test]
    fn test_custom_words() {
        let filter = StopWordsFilter::new(["foo", "Bar"]);
        assert!(filter.is_stop_word("foo"));
        assert!(filter.is_stop_word("bar"));
        assert!(!filter.is_stop_word("baz"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_stemmed_english_matches_stemmed_tokens() {
        let stemmer = PorterStemmer::new();
        let filter = StopWordsFilter::stemmed_english(&stemmer);
        // "because" stems to "becaus"; the stemmed filter must catch the
        // stemmed form, the raw filter must not.
        assert!(filter.is_stop_word("becaus"));
        assert!(!StopWordsFilter::english().is_stop_word("becaus"));
        // Short words survive stemming untouched.
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("is"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopWordsFilter::new(Vec::<String>::new());
        assert!(filter.is_empty());
        assert!(!filter.is_stop_word("anything"));
    }
}
