//! Engine configuration, index construction, and the parallel scheduler.
//!
//! [`SimilarityEngine::build_index`] turns a raw catalog into a read-only
//! [`SimilarityIndex`]: filtered entries, weighted tag vectors, tf-idf
//! description vectors, and the language bitmask table. [`SimilarityEngine::run`]
//! then fans the per-source scoring out over a rayon pool and streams each
//! result into a [`SimilaritySink`].

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{error, info};

use crate::catalog::CatalogEntry;
use crate::corpus::Corpus;
use crate::error::{Result, SemejarError};
use crate::language::LanguageIndex;
use crate::scoring::{Scorer, TOP_K};
use crate::sink::SimilaritySink;
use crate::text::{PorterStemmer, StopWordsFilter};
use crate::vector::{CountVectorizer, SparseVector, TagWeightTable, TfidfVectorizer};

/// Callback invoked after each processed source with `(done, total)`.
pub type ProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Engine configuration, built with `with_*` methods.
///
/// # Examples
///
/// ```
/// use semejar::engine::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_language("en")
///     .with_top_k(10)
///     .with_threads(4);
/// assert_eq!(config.top_k(), 10);
/// ```
#[derive(Clone)]
pub struct EngineConfig {
    language: String,
    top_k: usize,
    threads: usize,
    only_ids: Option<HashSet<String>>,
    progress: Option<ProgressFn>,
}

impl EngineConfig {
    /// Defaults: language `"en"`, top-K of [`TOP_K`], thread count chosen
    /// by the pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: "en".to_string(),
            top_k: TOP_K,
            threads: 0,
            only_ids: None,
            progress: None,
        }
    }

    /// Set the catalog language used for titles, descriptions, and tag names.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the number of matches retained per source entry.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the worker thread count. Zero lets the pool pick.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Restrict scoring to the given source entry ids. The sink is not
    /// cleared when a restriction is set, so existing results for other
    /// entries survive the run.
    #[must_use]
    pub fn with_only_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Register a progress callback, invoked after each processed source.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Catalog language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Matches retained per source entry.
    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Worker thread count, zero meaning pool default.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("language", &self.language)
            .field("top_k", &self.top_k)
            .field("threads", &self.threads)
            .field("only_ids", &self.only_ids)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Read-only scoring state shared by every worker.
///
/// All columns are aligned by corpus position: `entries[i]`,
/// `tag_vectors[i]`, `desc_vectors[i]`, and `desc_word_counts[i]` describe
/// the same entry, and `languages` maps position `i` to its bitmask.
#[derive(Debug)]
pub struct SimilarityIndex {
    pub(crate) entries: Vec<CatalogEntry>,
    pub(crate) tag_vectors: Vec<SparseVector>,
    pub(crate) desc_vectors: Vec<SparseVector>,
    pub(crate) desc_word_counts: Vec<usize>,
    pub(crate) languages: LanguageIndex,
}

impl SimilarityIndex {
    /// Entries that survived corpus filtering, in corpus order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Batch similarity engine over an in-memory catalog.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    config: EngineConfig,
}

impl SimilarityEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the read-only scoring index from a raw catalog.
    ///
    /// Filters the catalog into a corpus, fits the weighted tag space and
    /// the tf-idf description space over it, and derives the language
    /// bitmask table.
    ///
    /// # Errors
    ///
    /// Returns [`SemejarError::EmptyCorpus`] when no catalog entry has a
    /// title and description in the configured language.
    pub fn build_index(&self, catalog: Vec<CatalogEntry>) -> Result<SimilarityIndex> {
        let corpus = Corpus::build(catalog, &self.config.language);
        info!(entries = corpus.len(), "corpus built");

        let mut tag_space = CountVectorizer::new("tag");
        let mut tag_vectors = tag_space.fit_transform(&corpus.tag_texts)?;
        let terms = tag_space.terms_by_dimension();
        TagWeightTable::default().apply(&mut tag_vectors, &terms);
        info!(dimensions = tag_space.vocabulary_size(), "tag space fitted");

        let stop_words = StopWordsFilter::stemmed_english(&PorterStemmer::new());
        let mut desc_space = TfidfVectorizer::new("description").with_stop_words(stop_words);
        let desc_vectors = desc_space.fit_transform(&corpus.desc_texts)?;
        info!(
            dimensions = desc_space.vocabulary().len(),
            "description space fitted"
        );

        let languages = LanguageIndex::build(&corpus.entries);

        Ok(SimilarityIndex {
            entries: corpus.entries,
            tag_vectors,
            desc_vectors,
            desc_word_counts: corpus.desc_word_counts,
            languages,
        })
    }

    /// Score every indexed entry against the rest of the index, storing
    /// one result per source that produces matches.
    ///
    /// The sink is cleared once before scoring unless the configuration
    /// restricts the run to specific ids. Panics inside a single source's
    /// scoring are caught and logged; sink failures abort the run.
    ///
    /// # Errors
    ///
    /// Returns the first sink error, or [`SemejarError::Other`] when the
    /// worker pool cannot be built.
    pub fn run(&self, index: &SimilarityIndex, sink: &dyn SimilaritySink) -> Result<()> {
        if self.config.only_ids.is_none() {
            sink.clear_all()?;
        }

        let sources: Vec<usize> = (0..index.len())
            .filter(|&i| match &self.config.only_ids {
                Some(ids) => ids.contains(&index.entries[i].id),
                None => true,
            })
            .collect();
        let total = sources.len();
        info!(total, threads = self.config.threads, "similarity run started");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| SemejarError::Other(format!("worker pool: {e}")))?;

        let scorer = Scorer::new(index, &self.config);
        let done = AtomicUsize::new(0);
        pool.install(|| {
            sources.into_par_iter().try_for_each(|source| {
                match catch_unwind(AssertUnwindSafe(|| scorer.similar_for(source))) {
                    Ok(Some(result)) => sink.store(&result)?,
                    Ok(None) => {}
                    Err(_) => {
                        error!(id = %index.entries[source].id, "scoring panicked, entry skipped");
                    }
                }
                let processed = done.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(progress) = &self.config.progress {
                    progress(processed, total);
                }
                Ok::<(), SemejarError>(())
            })
        })?;

        info!(processed = done.load(Ordering::Relaxed), "similarity run finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentRating;
    use crate::sink::MemorySink;

    fn long_description(seed: &str) -> String {
        format!(
            "{seed} a wandering swordsman crosses a frozen frontier in search of \
             the shrine that once sealed away the mountain king and his army"
        )
    }

    fn entry(id: &str, title: &str, description: &str) -> CatalogEntry {
        CatalogEntry::new(id)
            .with_title("en", title)
            .with_description("en", description)
            .with_language("en")
            .with_rating(ContentRating::Safe)
    }

    fn small_catalog() -> Vec<CatalogEntry> {
        vec![
            entry("a", "Frozen Frontier", &long_description("first")),
            entry("b", "Mountain King", &long_description("second")),
            entry("c", "Shrine of the Seal", &long_description("third")),
        ]
    }

    #[test]
    fn test_build_index_filters_incomplete_entries() {
        let mut catalog = small_catalog();
        catalog.push(CatalogEntry::new("no-description").with_title("en", "Untranslated"));
        let engine = SimilarityEngine::new(EngineConfig::new());
        let index = engine.build_index(catalog).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.entries().iter().all(|e| e.id != "no-description"));
    }

    #[test]
    fn test_build_index_empty_catalog_errors() {
        let engine = SimilarityEngine::new(EngineConfig::new());
        let err = engine.build_index(Vec::new()).unwrap_err();
        assert!(matches!(err, SemejarError::EmptyCorpus { .. }));
    }

    #[test]
    fn test_run_stores_result_per_source() {
        let engine = SimilarityEngine::new(EngineConfig::new().with_threads(1));
        let index = engine.build_index(small_catalog()).unwrap();
        let sink = MemorySink::new();
        engine.run(&index, &sink).unwrap();
        assert_eq!(sink.len(), 3);
        let results = sink.into_results();
        for result in &results {
            assert!(!result.matches.is_empty());
            for m in &result.matches {
                assert!(m.score > 0.0 && m.score <= 1.0);
            }
        }
    }

    #[test]
    fn test_run_skips_sources_below_word_minimum() {
        let mut catalog = small_catalog();
        catalog.push(entry("short", "Terse", "the mountain king waits"));
        let engine = SimilarityEngine::new(EngineConfig::new().with_threads(1));
        let index = engine.build_index(catalog).unwrap();
        assert_eq!(index.len(), 4);
        let sink = MemorySink::new();
        engine.run(&index, &sink).unwrap();
        let results = sink.into_results();
        assert!(results.iter().all(|r| r.id != "short"));
        // The short entry still appears as a match target for the others.
        assert!(results
            .iter()
            .any(|r| r.matches.iter().any(|m| m.id == "short")));
    }

    #[test]
    fn test_run_with_only_ids_scores_only_those_sources() {
        let engine =
            SimilarityEngine::new(EngineConfig::new().with_threads(1).with_only_ids(["b"]));
        let index = engine.build_index(small_catalog()).unwrap();
        let sink = MemorySink::new();
        engine.run(&index, &sink).unwrap();
        let results = sink.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[test]
    fn test_run_reports_progress() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        let config = EngineConfig::new()
            .with_threads(1)
            .with_progress(Arc::new(move |done, total| {
                assert!(done <= total);
                seen.fetch_add(1, Ordering::Relaxed);
            }));
        let engine = SimilarityEngine::new(config);
        let index = engine.build_index(small_catalog()).unwrap();
        engine.run(&index, &MemorySink::new()).unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_matches_are_in_ascending_score_order() {
        let engine = SimilarityEngine::new(EngineConfig::new().with_threads(1));
        let index = engine.build_index(small_catalog()).unwrap();
        let sink = MemorySink::new();
        engine.run(&index, &sink).unwrap();
        for result in sink.into_results() {
            let scores: Vec<f32> = result.matches.iter().map(|m| m.score).collect();
            let mut sorted = scores.clone();
            sorted.sort_by(f32::total_cmp);
            assert_eq!(scores, sorted);
        }
    }
}
