use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
    pub fn new(vec: Vec<f32>) -> Self {
        Self(vec)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Squared Euclidean distance to `other`. Callers are expected to have
    /// checked dimensions; mismatched inputs compare over the shorter prefix.
    pub fn squared_distance(&self, other: &Embedding) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(vec: Vec<f32>) -> Self {
        Self(vec)
    }
}

impl AsRef<[f32]> for Embedding {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// One embedding per posting, index-aligned with dataset row order.
/// Uniform dimensionality is enforced at construction; a ragged set of
/// vectors never becomes a matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingMatrix {
    dimension: usize,
    vectors: Vec<Embedding>,
}

impl EmbeddingMatrix {
    pub fn from_vectors(vectors: Vec<Embedding>) -> Result<Self> {
        let dimension = vectors.first().map(Embedding::dimension).unwrap_or(0);
        if let Some(bad) = vectors.iter().position(|v| v.dimension() != dimension) {
            return Err(DomainError::dimension_mismatch(format!(
                "vector at row {bad} has dimension {}, expected {dimension}",
                vectors[bad].dimension()
            )));
        }
        Ok(Self { dimension, vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, row: usize) -> Option<&Embedding> {
        self.vectors.get(row)
    }

    pub fn vectors(&self) -> &[Embedding] {
        &self.vectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance() {
        let a = Embedding::new(vec![1.0, 2.0, 3.0]);
        let b = Embedding::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.squared_distance(&b), 0.0);

        let c = Embedding::new(vec![4.0, 2.0, 3.0]);
        assert_eq!(a.squared_distance(&c), 9.0);
    }

    #[test]
    fn test_matrix_rejects_ragged_vectors() {
        let vectors = vec![
            Embedding::new(vec![1.0, 2.0]),
            Embedding::new(vec![1.0, 2.0, 3.0]),
        ];
        let err = EmbeddingMatrix::from_vectors(vectors).unwrap_err();
        assert!(matches!(err, DomainError::DimensionMismatch(_)));
    }

    #[test]
    fn test_matrix_from_uniform_vectors() {
        let vectors = vec![
            Embedding::new(vec![1.0, 0.0]),
            Embedding::new(vec![0.0, 1.0]),
        ];
        let matrix = EmbeddingMatrix::from_vectors(vectors).unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.dimension(), 2);
        assert_eq!(matrix.get(1).unwrap().as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = EmbeddingMatrix::from_vectors(Vec::new()).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.dimension(), 0);
    }
}
