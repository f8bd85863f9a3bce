//! Similarity results and the persistence sink abstraction.
//!
//! The engine does not know where results go. It hands each finished
//! [`SimilarityResult`] to a [`SimilaritySink`], whose implementation is
//! expected to serialize concurrent writes internally (the reference sink
//! is a single serialized database connection). A sink failure is fatal
//! for the run: a half-persisted result set is a corrupted run state, so
//! there is no retry.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::catalog::ContentRating;
use crate::error::{Result, SemejarError};

/// One retained match inside a [`SimilarityResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub title: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<ContentRating>,
    /// Normalized combined score in `[0, 1]`.
    pub score: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

/// The similar-items list for one source entry.
///
/// `matches` is ordered ascending by score — lowest surviving score first.
/// That is the min-heap drain order of the scorer and the order downstream
/// consumers index against; do not reverse it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub title: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<ContentRating>,
    /// RFC 3339 timestamp of when the result was computed.
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<ScoredMatch>,
}

/// Destination for finished results.
///
/// `clear_all` runs once at the start of a full run; `store` runs once per
/// eligible source entry, concurrently from worker threads. Implementations
/// must serialize writes themselves.
pub trait SimilaritySink: Send + Sync {
    /// Drop all previously persisted results. A full run recomputes the
    /// whole catalog, so stale rows must not survive.
    fn clear_all(&self) -> Result<()>;

    /// Persist one result. An error here aborts the run.
    fn store(&self, result: &SimilarityResult) -> Result<()>;
}

/// In-memory sink for tests and embedding.
///
/// # Examples
///
/// ```
/// use semejar::sink::{MemorySink, SimilaritySink, SimilarityResult};
///
/// let sink = MemorySink::new();
/// sink.clear_all().expect("clear should succeed");
/// assert!(sink.into_results().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    results: Mutex<Vec<SimilarityResult>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the sink holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the sink and return the stored results, in arrival order.
    #[must_use]
    pub fn into_results(self) -> Vec<SimilarityResult> {
        self.results.into_inner().unwrap_or_default()
    }
}

impl SimilaritySink for MemorySink {
    fn clear_all(&self) -> Result<()> {
        self.results
            .lock()
            .map_err(|e| SemejarError::sink(format!("results lock poisoned: {e}")))?
            .clear();
        Ok(())
    }

    fn store(&self, result: &SimilarityResult) -> Result<()> {
        self.results
            .lock()
            .map_err(|e| SemejarError::sink(format!("results lock poisoned: {e}")))?
            .push(result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str) -> SimilarityResult {
        SimilarityResult {
            id: id.to_string(),
            title: HashMap::from([("en".to_string(), format!("Title {id}"))]),
            content_rating: Some(ContentRating::Safe),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            matches: vec![ScoredMatch {
                id: "other".to_string(),
                title: HashMap::new(),
                content_rating: Some(ContentRating::Safe),
                score: 0.5,
                languages: vec!["en".to_string()],
            }],
        }
    }

    #[test]
    fn test_memory_sink_stores_and_clears() {
        let sink = MemorySink::new();
        sink.store(&result("a")).expect("store");
        sink.store(&result("b")).expect("store");
        assert_eq!(sink.len(), 2);
        sink.clear_all().expect("clear");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_into_results_preserves_arrival_order() {
        let sink = MemorySink::new();
        sink.store(&result("a")).expect("store");
        sink.store(&result("b")).expect("store");
        let results = sink.into_results();
        assert_eq!(results[0].id, "a");
        assert_eq!(results[1].id, "b");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_string(&result("a")).expect("serialize");
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"contentRating\":\"safe\""));
        assert!(json.contains("\"matches\""));
    }

    #[test]
    fn test_empty_collections_omitted() {
        let mut r = result("a");
        r.matches.clear();
        r.title.clear();
        r.content_rating = None;
        let json = serde_json::to_string(&r).expect("serialize");
        assert!(!json.contains("matches"));
        assert!(!json.contains("title"));
        assert!(!json.contains("contentRating"));
    }

    #[test]
    fn test_round_trip() {
        let json = serde_json::to_string(&result("a")).expect("serialize");
        let back: SimilarityResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.id, "a");
        assert_eq!(back.matches.len(), 1);
        assert!((back.matches[0].score - 0.5).abs() < f32::EPSILON);
    }
}
