//! Sparse vector storage and the sorted-merge dot product.

/// A sparse vector: `(dimension, weight)` pairs sorted ascending by
/// dimension, plus the precomputed Euclidean norm.
///
/// Vectors are column-indexed by corpus position. A vector with norm zero
/// contributes zero similarity in every pairing.
///
/// # Examples
///
/// ```
/// use semejar::vector::SparseVector;
///
/// let a = SparseVector::from_pairs(vec![(0, 1.0), (2, 2.0)]);
/// let b = SparseVector::from_pairs(vec![(2, 3.0), (5, 1.0)]);
/// assert_eq!(a.dot(&b), 6.0);
/// assert!((a.norm() - 5.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pairs: Vec<(usize, f64)>,
    norm: f64,
}

impl SparseVector {
    /// Build from `(dimension, weight)` pairs. Pairs are sorted by
    /// dimension, zero weights are dropped, and the norm is computed once
    /// here.
    #[must_use]
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.retain(|(_, w)| *w != 0.0);
        pairs.sort_unstable_by_key(|(dim, _)| *dim);
        let norm = pairs.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { pairs, norm }
    }

    /// The all-zero vector.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Precomputed Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Number of nonzero dimensions.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the vector has no nonzero dimensions.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The sorted `(dimension, weight)` pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(usize, f64)] {
        &self.pairs
    }

    /// Rewrite every stored weight through `f(dimension, weight)` and
    /// recompute the norm. Used by the tag space to overwrite raw counts
    /// with fixed per-tag weights.
    pub fn remap_weights(&mut self, mut f: impl FnMut(usize, f64) -> f64) {
        for (dim, weight) in &mut self.pairs {
            *weight = f(*dim, *weight);
        }
        self.pairs.retain(|(_, w)| *w != 0.0);
        self.norm = self.pairs.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    }

    /// Dot product by merging the two sorted index lists; O(nnz_a + nnz_b).
    #[must_use]
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.pairs, &other.pairs);
        let mut dot = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let (dim_a, w_a) = a[i];
            let (dim_b, w_b) = b[j];
            match dim_a.cmp(&dim_b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += w_a * w_b;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    /// Cosine similarity against `other` using the precomputed norms.
    /// Returns 0 when either norm is zero.
    #[must_use]
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        self.dot(other) / (self.norm * other.norm)
    }
}
