//! Sparse vectors and the corpus vector spaces.
//!
//! Two independent bag-of-words spaces are fit per run: an unweighted count
//! space over tag tokens (then overwritten with fixed per-tag weights) and a
//! tf-idf space over description tokens. Both emit one [`SparseVector`] per
//! corpus position with its Euclidean norm precomputed, because the O(N²)
//! scorer cannot afford to recompute norms per pair.

pub mod sparse;
pub mod vectorize;

pub use sparse::SparseVector;
pub use vectorize::{CountVectorizer, TagWeightTable, TfidfVectorizer};
