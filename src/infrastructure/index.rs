use crate::domain::{DomainError, Embedding, EmbeddingMatrix, Result};

/// Exact nearest-neighbor index over the embedding matrix. A flat scan under
/// squared Euclidean distance is exact and fast enough at this dataset scale
/// (thousands of rows). Immutable once built; a new matrix means a new build.
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Embedding>,
}

impl FlatIndex {
    pub fn build(matrix: &EmbeddingMatrix) -> Result<Self> {
        // Ragged rows must never reach the scan.
        let dimension = matrix.dimension();
        if let Some(bad) = matrix
            .vectors()
            .iter()
            .position(|v| v.dimension() != dimension)
        {
            return Err(DomainError::dimension_mismatch(format!(
                "row {bad} has dimension {}, index expects {dimension}",
                matrix.vectors()[bad].dimension()
            )));
        }

        Ok(Self {
            dimension,
            vectors: matrix.vectors().to_vec(),
        })
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

    /// Returns the `k` nearest rows to `query`, ascending by distance. `k` is
    /// clamped to the index size; an empty index yields an empty result.
    /// Distance ties keep dataset row order (the scan sort is stable).
    pub fn search(&self, query: &Embedding, k: usize) -> Result<Vec<(usize, f32)>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.dimension() != self.dimension {
            return Err(DomainError::dimension_mismatch(format!(
                "query has dimension {}, index expects {}",
                query.dimension(),
                self.dimension
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(row, vector)| (row, query.squared_distance(vector)))
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k.min(self.vectors.len()));
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f32]]) -> EmbeddingMatrix {
        EmbeddingMatrix::from_vectors(rows.iter().map(|r| Embedding::new(r.to_vec())).collect())
            .unwrap()
    }

    #[test]
    fn test_search_orders_by_ascending_distance() {
        let index = FlatIndex::build(&matrix(&[
            &[10.0, 0.0],
            &[1.0, 0.0],
            &[5.0, 0.0],
        ]))
        .unwrap();

        let hits = index.search(&Embedding::new(vec![0.0, 0.0]), 3).unwrap();
        assert_eq!(hits.iter().map(|h| h.0).collect::<Vec<_>>(), vec![1, 2, 0]);
        assert!(hits.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn test_k_clamped_to_index_size() {
        let index = FlatIndex::build(&matrix(&[&[1.0], &[2.0]])).unwrap();
        let hits = index.search(&Embedding::new(vec![0.0]), 10).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_empty_index_returns_empty_result() {
        let index = FlatIndex::build(&EmbeddingMatrix::from_vectors(Vec::new()).unwrap()).unwrap();
        let hits = index.search(&Embedding::new(vec![1.0, 2.0]), 3).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_wrong_query_dimension_is_rejected() {
        let index = FlatIndex::build(&matrix(&[&[1.0, 0.0]])).unwrap();
        let err = index.search(&Embedding::new(vec![1.0]), 1).unwrap_err();
        assert!(matches!(err, DomainError::DimensionMismatch(_)));
    }

    #[test]
    fn test_distance_ties_keep_row_order() {
        let index = FlatIndex::build(&matrix(&[&[1.0], &[-1.0], &[1.0]])).unwrap();
        let hits = index.search(&Embedding::new(vec![0.0]), 3).unwrap();
        assert_eq!(hits.iter().map(|h| h.0).collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
