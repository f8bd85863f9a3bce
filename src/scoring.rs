//! Pairwise scoring and bounded top-K selection.
//!
//! For one source entry, [`Scorer::similar_for`] scans every other corpus
//! position: bitmask pre-filter, cosine similarity in both vector spaces,
//! threshold clamping, the high-confidence description override, the
//! eligibility rules, and a bounded min-heap of the best K survivors.
//!
//! Draining the min-heap yields ascending score order, so the published
//! match list runs lowest surviving score first. Downstream consumers index
//! against that order; it is contractual (see [`crate::sink::SimilarityResult`]).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::eligibility::skip_reason;
use crate::engine::{EngineConfig, SimilarityIndex};
use crate::sink::{ScoredMatch, SimilarityResult};

/// Matches retained per source entry.
pub const TOP_K: usize = 20;

/// Weight of the tag-space score in the combined score.
pub const TAG_SCORE_RATIO: f64 = 0.40;

/// A description similarity above this forces the tag score to 1: a strong
/// textual match overrides a weak or absent tag signal.
pub const ACCEPT_DESC_SCORE_OVER: f64 = 0.45;

/// Entries with fewer description words than this produce no result at
/// all; the description vector is too thin to mean anything.
pub const MIN_DESCRIPTION_WORDS: usize = 15;

/// Similarities below this are clamped to zero.
pub const SIMILARITY_THRESHOLD: f64 = 1e-4;

/// A candidate pairing: target corpus position plus its scores.
///
/// Heap ordering is reversed on the combined score so that
/// `BinaryHeap<Match>` behaves as a min-heap: the peek element is the
/// worst retained match, the one a better candidate evicts.
#[derive(Debug, Clone, Copy)]
pub struct Match {
    /// Target corpus position.
    pub target: usize,
    /// Combined score, `TAG_SCORE_RATIO * tag + desc`.
    pub score: f64,
    /// Tag-space cosine after clamping and the description override.
    pub tag_score: f64,
    /// Description-space cosine after clamping.
    pub desc_score: f64,
}

impl PartialEq for Match {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for Match {}

impl PartialOrd for Match {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Match {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the heap's "greatest" element is the lowest score.
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
    }
}

/// Bounded min-heap keeping the K best matches seen so far.
#[derive(Debug)]
pub struct TopK {
    heap: BinaryHeap<Match>,
    capacity: usize,
}

impl TopK {
    /// Create an empty selector holding at most `capacity` matches.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Whether a candidate with this score could enter the heap. Used to
    /// avoid running the eligibility rules on candidates that would be
    /// rejected on score alone.
    #[must_use]
    pub fn would_accept(&self, score: f64) -> bool {
        self.heap.len() < self.capacity || self.heap.peek().is_some_and(|worst| score > worst.score)
    }

    /// Insert a match, evicting the current minimum when full.
    pub fn insert(&mut self, m: Match) {
        if self.heap.len() < self.capacity {
            self.heap.push(m);
        } else if self.heap.peek().is_some_and(|worst| m.score > worst.score) {
            self.heap.pop();
            self.heap.push(m);
        }
    }

    /// Number of retained matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain the heap. Popping a min-heap yields ascending score order,
    /// which is exactly the published order.
    #[must_use]
    pub fn into_ascending(mut self) -> Vec<Match> {
        let mut matches = Vec::with_capacity(self.heap.len());
        while let Some(m) = self.heap.pop() {
            matches.push(m);
        }
        matches
    }
}

/// Per-source scorer over a prebuilt read-only index.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    index: &'a SimilarityIndex,
    config: &'a EngineConfig,
}

impl<'a> Scorer<'a> {
    /// Create a scorer borrowing the shared index and configuration.
    #[must_use]
    pub fn new(index: &'a SimilarityIndex, config: &'a EngineConfig) -> Self {
        Self { index, config }
    }

    /// Compute the top-K similar entries for one corpus position.
    ///
    /// Returns `None` when the entry's description is below the minimum
    /// word count or when no candidate survives scoring and eligibility.
    #[must_use]
    pub fn similar_for(&self, source: usize) -> Option<SimilarityResult> {
        if self.index.desc_word_counts[source] < MIN_DESCRIPTION_WORDS {
            return None;
        }

        let entries = &self.index.entries;
        let source_entry = &entries[source];
        let tag_vector = &self.index.tag_vectors[source];
        let desc_vector = &self.index.desc_vectors[source];
        let language = self.config.language();

        let mut top = TopK::new(self.config.top_k());
        for target in 0..entries.len() {
            if target == source {
                continue;
            }
            if self.index.languages.can_skip(source, target) {
                continue;
            }

            let mut tag_score = tag_vector.cosine(&self.index.tag_vectors[target]);
            let mut desc_score = desc_vector.cosine(&self.index.desc_vectors[target]);
            if tag_score.is_nan() || tag_score < SIMILARITY_THRESHOLD {
                tag_score = 0.0;
            }
            if desc_score.is_nan() || desc_score < SIMILARITY_THRESHOLD {
                desc_score = 0.0;
            }
            if desc_score > ACCEPT_DESC_SCORE_OVER {
                tag_score = 1.0;
            }

            let score = TAG_SCORE_RATIO * tag_score + desc_score;
            if score <= 0.0 {
                continue;
            }
            if !top.would_accept(score) {
                continue;
            }
            if let Some(reason) =
                skip_reason(source, source_entry, target, &entries[target], score, language)
            {
                debug!(
                    source = %source_entry.id,
                    target = %entries[target].id,
                    %reason,
                    score,
                    "candidate skipped"
                );
                continue;
            }
            top.insert(Match {
                target,
                score,
                tag_score,
                desc_score,
            });
        }

        if top.is_empty() {
            return None;
        }
        Some(self.build_result(source_entry, top))
    }

    fn build_result(
        &self,
        source_entry: &crate::catalog::CatalogEntry,
        top: TopK,
    ) -> SimilarityResult {
        let matches = top
            .into_ascending()
            .into_iter()
            .map(|m| {
                let target = &self.index.entries[m.target];
                ScoredMatch {
                    id: target.id.clone(),
                    title: target.title.clone().unwrap_or_default(),
                    content_rating: target.content_rating,
                    score: normalize_score(m.score),
                    languages: target.available_translated_languages.clone(),
                }
            })
            .collect();

        SimilarityResult {
            id: source_entry.id.clone(),
            title: source_entry.title.clone().unwrap_or_default(),
            content_rating: source_entry.content_rating,
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            matches,
        }
    }
}

/// Map a combined score into `[0, 1]` for publication. The combined score
/// maxes out at `TAG_SCORE_RATIO * 1 + 1`.
#[must_use]
pub fn normalize_score(combined: f64) -> f32 {
    (combined / (TAG_SCORE_RATIO + 1.0)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(target: usize, score: f64) -> Match {
        Match {
            target,
            score,
            tag_score: 0.0,
            desc_score: score,
        }
    }

    #[test]
    fn test_topk_under_capacity_accepts_everything() {
        let mut top = TopK::new(3);
        assert!(top.would_accept(0.01));
        top.insert(m(0, 0.5));
        top.insert(m(1, 0.1));
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_topk_bounded_at_capacity() {
        let mut top = TopK::new(3);
        for i in 0..10 {
            top.insert(m(i, f64::from(u32::try_from(i).unwrap()) / 10.0 + 0.1));
        }
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn test_topk_keeps_best_scores() {
        let mut top = TopK::new(2);
        top.insert(m(0, 0.2));
        top.insert(m(1, 0.9));
        top.insert(m(2, 0.5));
        let scores: Vec<f64> = top.into_ascending().iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.5, 0.9]);
    }

    #[test]
    fn test_topk_rejects_scores_at_or_below_min_when_full() {
        let mut top = TopK::new(2);
        top.insert(m(0, 0.4));
        top.insert(m(1, 0.6));
        assert!(!top.would_accept(0.4));
        assert!(!top.would_accept(0.3));
        assert!(top.would_accept(0.5));
        // Inserting a rejected score is a no-op.
        top.insert(m(2, 0.3));
        let scores: Vec<f64> = top.into_ascending().iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.4, 0.6]);
    }

    #[test]
    fn test_drain_is_ascending() {
        let mut top = TopK::new(5);
        for (i, score) in [0.7, 0.2, 0.9, 0.4, 0.5].into_iter().enumerate() {
            top.insert(m(i, score));
        }
        let scores: Vec<f64> = top.into_ascending().iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![0.2, 0.4, 0.5, 0.7, 0.9]);
    }

    #[test]
    fn test_normalize_score_bounds() {
        assert!((normalize_score(0.0) - 0.0).abs() < f32::EPSILON);
        assert!((normalize_score(1.4) - 1.0).abs() < f32::EPSILON);
        let mid = normalize_score(0.7);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_max_combined_score_normalizes_to_one() {
        // tag forced to 1 by the description override, desc at its maximum
        let combined = TAG_SCORE_RATIO * 1.0 + 1.0;
        assert!((normalize_score(combined) - 1.0).abs() < f32::EPSILON);
    }
}
