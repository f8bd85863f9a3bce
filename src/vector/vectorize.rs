//! Bag-of-words vectorizers producing sparse corpus columns.
//!
//! [`CountVectorizer`] fits a vocabulary over whitespace tokens and emits
//! raw term counts; [`TfidfVectorizer`] layers smoothed inverse-document-
//! frequency weighting on top of it. [`TagWeightTable`] is the tag space's
//! post-fit override: every nonzero count is overwritten with a fixed
//! per-tag weight, so presence rather than frequency drives the tag score.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{Result, SemejarError};
use crate::text::StopWordsFilter;
use crate::vector::SparseVector;

/// Bag-of-words count vectorizer over whitespace-delimited tokens.
///
/// Tokens are lowercased by default; an optional stop-word filter drops
/// tokens before counting. The vocabulary maps each term to a dimension
/// index, assigned in lexicographic term order so fits are deterministic.
///
/// # Examples
///
/// ```
/// use semejar::vector::CountVectorizer;
///
/// let docs = ["action drama", "drama horror"];
/// let mut vectorizer = CountVectorizer::new("tag");
/// let vectors = vectorizer.fit_transform(&docs).expect("fit should succeed");
/// assert_eq!(vectors.len(), 2);
/// assert_eq!(vectorizer.vocabulary_size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    space: &'static str,
    vocabulary: HashMap<String, usize>,
    lowercase: bool,
    stop_words: Option<StopWordsFilter>,
    fitted: bool,
}

impl CountVectorizer {
    /// Create a vectorizer. `space` names the vector space in diagnostics
    /// ("tag" or "description").
    #[must_use]
    pub fn new(space: &'static str) -> Self {
        Self {
            space,
            vocabulary: HashMap::new(),
            lowercase: true,
            stop_words: None,
            fitted: false,
        }
    }

    /// Set whether tokens are lowercased before counting.
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Drop stop words before counting.
    #[must_use]
    pub fn with_stop_words(mut self, filter: StopWordsFilter) -> Self {
        self.stop_words = Some(filter);
        self
    }

    fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split_whitespace()
            .map(move |t| {
                if self.lowercase {
                    t.to_lowercase()
                } else {
                    t.to_string()
                }
            })
            .filter(move |t| {
                self.stop_words
                    .as_ref()
                    .map_or(true, |sw| !sw.is_stop_word(t))
            })
    }

    /// Learn the vocabulary from the documents.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` when `documents` is empty. An empty vocabulary (all
    /// documents blank or fully stop-worded) is not an error: it fits a
    /// zero-dimensional space in which every vector has norm zero.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(SemejarError::EmptyCorpus {
                space: self.space.to_string(),
            });
        }

        let mut terms = BTreeSet::new();
        for doc in documents {
            terms.extend(self.tokens(doc.as_ref()));
        }
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        self.fitted = true;
        Ok(())
    }

    /// Transform documents into sparse count vectors over the learned
    /// vocabulary. Terms outside the vocabulary are ignored.
    ///
    /// # Errors
    ///
    /// `EmptyVocabulary` when called before [`fit`](Self::fit).
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        if !self.fitted {
            return Err(SemejarError::EmptyVocabulary {
                space: self.space.to_string(),
            });
        }

        Ok(documents
            .iter()
            .map(|doc| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in self.tokens(doc.as_ref()) {
                    if let Some(&dim) = self.vocabulary.get(&token) {
                        *counts.entry(dim).or_insert(0.0) += 1.0;
                    }
                }
                SparseVector::from_pairs(counts.into_iter().collect())
            })
            .collect())
    }

    /// Fit on the documents, then transform them.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// The learned term-to-dimension mapping.
    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Number of dimensions in the fitted space.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Dimension-to-term lookup table, inverse of [`vocabulary`](Self::vocabulary).
    #[must_use]
    pub fn terms_by_dimension(&self) -> Vec<&str> {
        let mut terms = vec![""; self.vocabulary.len()];
        for (term, &dim) in &self.vocabulary {
            terms[dim] = term.as_str();
        }
        terms
    }
}

/// Tf-idf vectorizer over whitespace tokens with smoothed idf.
///
/// `idf(t) = ln((1 + N) / (1 + df(t))) + 1`, so every idf value is strictly
/// positive and a term present in every document still contributes.
///
/// # Examples
///
/// ```
/// use semejar::vector::TfidfVectorizer;
///
/// let docs = ["the pirate ship", "the ghost ship"];
/// let mut vectorizer = TfidfVectorizer::new("description");
/// let vectors = vectorizer.fit_transform(&docs).expect("fit should succeed");
/// assert_eq!(vectors.len(), 2);
/// // "pirate" is rarer than "ship", so it carries more weight.
/// assert!(vectors[0].norm() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    count: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Create a tf-idf vectorizer for the named space.
    #[must_use]
    pub fn new(space: &'static str) -> Self {
        Self {
            count: CountVectorizer::new(space),
            idf: Vec::new(),
        }
    }

    /// Drop stop words before counting.
    #[must_use]
    pub fn with_stop_words(mut self, filter: StopWordsFilter) -> Self {
        self.count = self.count.with_stop_words(filter);
        self
    }

    /// Learn vocabulary and idf values from the documents.
    ///
    /// # Errors
    ///
    /// `EmptyCorpus` when `documents` is empty.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        self.count.fit(documents)?;

        let n_docs = documents.len() as f64;
        let mut doc_freq = vec![0usize; self.count.vocabulary_size()];
        for doc in documents {
            let seen: HashSet<usize> = self
                .count
                .tokens(doc.as_ref())
                .filter_map(|t| self.count.vocabulary.get(&t).copied())
                .collect();
            for dim in seen {
                doc_freq[dim] += 1;
            }
        }
        self.idf = doc_freq
            .into_iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        Ok(())
    }

    /// Transform documents into tf-idf weighted sparse vectors.
    ///
    /// # Errors
    ///
    /// `EmptyVocabulary` when called before [`fit`](Self::fit).
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        let mut vectors = self.count.transform(documents)?;
        for vector in &mut vectors {
            vector.remap_weights(|dim, count| count * self.idf[dim]);
        }
        Ok(vectors)
    }

    /// Fit on the documents, then transform them.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// The learned term-to-dimension mapping.
    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        self.count.vocabulary()
    }
}

/// Fixed per-tag weights applied after the tag space is fit.
///
/// Every nonzero count is overwritten (never multiplied), so repeated tag
/// tokens cannot inflate a weight. High-salience tags carry more weight
/// than the 0.70 default.
///
/// # Examples
///
/// ```
/// use semejar::vector::TagWeightTable;
///
/// let table = TagWeightTable::default();
/// assert_eq!(table.weight("gore"), 1.0);
/// assert_eq!(table.weight("isekai"), 0.9);
/// assert_eq!(table.weight("romance"), 0.7);
/// ```
#[derive(Debug, Clone)]
pub struct TagWeightTable {
    overrides: HashMap<&'static str, f64>,
    default_weight: f64,
}

impl Default for TagWeightTable {
    fn default() -> Self {
        let overrides = HashMap::from([
            ("sexualviolence", 1.0),
            ("gore", 1.0),
            ("4koma", 1.0),
            ("wuxia", 1.0),
            ("isekai", 0.9),
            ("villainess", 0.9),
            ("historical", 0.8),
            ("horror", 0.8),
        ]);
        Self {
            overrides,
            default_weight: 0.70,
        }
    }
}

impl TagWeightTable {
    /// Weight for a (lowercased, normalized) tag term.
    #[must_use]
    pub fn weight(&self, term: &str) -> f64 {
        self.overrides
            .get(term)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Overwrite every nonzero cell of the fitted tag vectors with the
    /// term's fixed weight. `terms` is the dimension-to-term table from
    /// [`CountVectorizer::terms_by_dimension`].
    pub fn apply(&self, vectors: &mut [SparseVector], terms: &[&str]) {
        let weights: Vec<f64> = terms.iter().map(|t| self.weight(t)).collect();
        for vector in vectors {
            vector.remap_weights(|dim, _| weights[dim]);
        }
    }
}
