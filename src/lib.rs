//! Semejar: content-based "similar items" engine for serialized-work catalogs.
//!
//! Semejar ranks every entry of an in-memory catalog against every other
//! entry by a blended textual/tag similarity score and keeps the top matches
//! that pass a set of domain eligibility rules. It is a batch engine: each
//! run recomputes the full catalog from scratch and hands one result per
//! eligible source entry to a persistence sink.
//!
//! # Quick Start
//!
//! ```
//! use semejar::catalog::{CatalogEntry, ContentRating};
//! use semejar::engine::{EngineConfig, SimilarityEngine};
//! use semejar::sink::MemorySink;
//!
//! let catalog = vec![
//!     CatalogEntry::new("a")
//!         .with_title("en", "The Long Voyage")
//!         .with_description(
//!             "en",
//!             "A crew of explorers sails beyond the edge of the map and discovers \
//!              an archipelago of drifting islands ruled by storm spirits.",
//!         )
//!         .with_language("en")
//!         .with_rating(ContentRating::Safe),
//!     CatalogEntry::new("b")
//!         .with_title("en", "Voyage of the Storm")
//!         .with_description(
//!             "en",
//!             "Explorers sail beyond the edge of the map and discover drifting \
//!              islands where storm spirits rule an endless archipelago.",
//!         )
//!         .with_language("en")
//!         .with_rating(ContentRating::Safe),
//! ];
//!
//! let engine = SimilarityEngine::new(EngineConfig::new());
//! let index = engine.build_index(catalog).expect("index should build");
//! let sink = MemorySink::new();
//! engine.run(&index, &sink).expect("run should succeed");
//!
//! let results = sink.into_results();
//! assert_eq!(results.len(), 2);
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Input data model (entries, tags, rating/demographic enums)
//! - [`text`]: Deterministic text normalization (stemming, stop words, cleanup)
//! - [`corpus`]: Catalog filtering into index-aligned corpus columns
//! - [`vector`]: Sparse vectors and the tag/description vector space builders
//! - [`language`]: 64-bit language bitmask pre-filter index
//! - [`eligibility`]: Domain rules that veto otherwise high-scoring pairings
//! - [`scoring`]: Pairwise cosine scoring and bounded top-K selection
//! - [`engine`]: Configuration and the parallel full-catalog scheduler
//! - [`sink`]: Result model and the persistence sink abstraction

pub mod catalog;
pub mod corpus;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod language;
pub mod scoring;
pub mod sink;
pub mod text;
pub mod vector;

pub use error::{Result, SemejarError};
