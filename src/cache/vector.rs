//! Embedding Vector Module
//!
//! Fixed-dimension float vector with cosine similarity.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Embedding Vector ==
/// An embedding produced by the external model.
///
/// Value type: compared by content, never mutated after construction.
/// Serializes as a bare JSON array of floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    // == Constructor ==
    /// Wraps raw components.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Read-only view of the components.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// L2 norm, accumulated in f64.
    pub fn norm(&self) -> f64 {
        self.0
            .iter()
            .map(|x| f64::from(*x) * f64::from(*x))
            .sum::<f64>()
            .sqrt()
    }

    /// True when every component is zero (or the vector is empty).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }

    /// True when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }

    /// Fails with `DimensionMismatch` unless the vector has `expected` components.
    pub fn ensure_dimension(&self, expected: usize) -> Result<()> {
        if self.dimension() == expected {
            Ok(())
        } else {
            Err(CacheError::DimensionMismatch {
                expected,
                actual: self.dimension(),
            })
        }
    }

    // == Dot Product ==
    /// Dot product, rejecting vectors of different dimension.
    pub fn dot(&self, other: &EmbeddingVector) -> Result<f64> {
        other.ensure_dimension(self.dimension())?;

        Ok(self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| f64::from(*a) * f64::from(*b))
            .sum())
    }

    // == Similarity ==
    /// Cosine similarity in `[-1, 1]`.
    ///
    /// Inputs need not be normalized. If either vector has zero norm the
    /// result is the sentinel `0.0`. Vectors of different dimension are
    /// rejected with `DimensionMismatch`.
    pub fn similarity(&self, other: &EmbeddingVector) -> Result<f32> {
        let dot = self.dot(other)?;
        let norms = self.norm() * other.norm();

        if norms == 0.0 {
            return Ok(0.0);
        }

        Ok((dot / norms).clamp(-1.0, 1.0) as f32)
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

/// Cosine similarity between two embeddings.
pub fn similarity(a: &EmbeddingVector, b: &EmbeddingVector) -> Result<f32> {
    a.similarity(b)
}
