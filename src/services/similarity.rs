use super::vectorizer::SparseVector;

/// Dense, symmetric matrix of pairwise similarities between item vectors
///
/// Entries are dot products of L2-normalized vectors, i.e. cosine similarities.
/// A zero vector scores 0 against every item, itself included.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes `X · Xᵀ` for the given vectors
    ///
    /// Pairs are accumulated through per-dimension posting lists, so only items
    /// that share a term do any work. The upper triangle is mirrored into the lower.
    pub fn build(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0; size * size];

        let dims = vectors
            .iter()
            .flat_map(|v| v.entries().iter().map(|&(dim, _)| dim + 1))
            .max()
            .unwrap_or(0);

        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); dims];
        for (item, vector) in vectors.iter().enumerate() {
            for &(dim, weight) in vector.entries() {
                postings[dim].push((item, weight));
            }
        }

        for (i, vector) in vectors.iter().enumerate() {
            let row = &mut values[i * size..(i + 1) * size];
            for &(dim, weight) in vector.entries() {
                // postings are in ascending item order; only j >= i is needed
                let posting = &postings[dim];
                let start = posting.partition_point(|&(j, _)| j < i);
                for &(j, other) in &posting[start..] {
                    row[j] += weight * other;
                }
            }
        }

        for i in 0..size {
            for j in i..size {
                let v = values[i * size + j].clamp(-1.0, 1.0);
                values[i * size + j] = v;
                values[j * size + i] = v;
            }
        }

        tracing::debug!(items = size, dimensions = dims, "Similarity matrix built");

        Self { size, values }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.size..(i + 1) * self.size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vectorizer::VectorSpace;

    const EPS: f64 = 1e-9;

    fn matrix_for(docs: &[&str]) -> SimilarityMatrix {
        let (_, vectors) = VectorSpace::fit_transform(docs).unwrap();
        SimilarityMatrix::build(&vectors)
    }

    #[test]
    fn test_matches_pairwise_dot_products() {
        let docs = ["space opera drama", "space documentary", "heist drama comedy"];
        let (_, vectors) = VectorSpace::fit_transform(&docs).unwrap();
        let matrix = SimilarityMatrix::build(&vectors);

        for i in 0..docs.len() {
            for j in 0..docs.len() {
                assert!((matrix.get(i, j) - vectors[i].dot(&vectors[j])).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let matrix = matrix_for(&["kids cartoon", "cartoon adventure", "crime thriller"]);
        assert_eq!(matrix.len(), 3);

        for i in 0..3 {
            assert!((matrix.get(i, i) - 1.0).abs() < EPS);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!((0.0..=1.0).contains(&matrix.get(i, j)));
            }
        }
    }

    #[test]
    fn test_zero_vector_row_is_all_zero() {
        let matrix = matrix_for(&["", "romance", "romance drama"]);
        assert_eq!(matrix.row(0), &[0.0, 0.0, 0.0]);
        assert_eq!(matrix.get(0, 0), 0.0);
    }

    #[test]
    fn test_disjoint_items_score_zero() {
        let matrix = matrix_for(&["anime", "western"]);
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn test_empty_input() {
        let matrix = SimilarityMatrix::build(&[]);
        assert!(matrix.is_empty());
    }
}
