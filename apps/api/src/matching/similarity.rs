//! Similarity Scorer: cosine similarity over fixed-length embeddings.

use serde::{Deserialize, Serialize};

use crate::matching::MatchError;

/// Output width of `all-MiniLM-L6-v2`.
pub const EMBEDDING_DIM: usize = 384;

/// A vector guaranteed to have `EMBEDDING_DIM` components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Embedding(Vec<f32>);

impl Embedding {
    /// Placeholder for empty input.
    pub fn zeros() -> Self {
        Self(vec![0.0; EMBEDDING_DIM])
    }

    /// Only for vectors built locally at the right width.
    pub(crate) fn from_fixed(values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), EMBEDDING_DIM);
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|x| *x == 0.0)
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

/// Rejects anything but `EMBEDDING_DIM` components, returning the actual length.
impl TryFrom<Vec<f32>> for Embedding {
    type Error = usize;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        if values.len() == EMBEDDING_DIM {
            Ok(Self(values))
        } else {
            Err(values.len())
        }
    }
}

impl From<Embedding> for Vec<f32> {
    fn from(embedding: Embedding) -> Self {
        embedding.0
    }
}

/// Dot product over the product of L2 norms, in [-1, 1].
///
/// A zero-magnitude side gives 0.0. Unequal lengths are a `DimensionMismatch`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return Ok(0.0);
    }
    Ok((dot / denom).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_vectors() {
        let v = vec![0.3, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]).unwrap();
        assert!(sim.abs() < 1e-12);
    }

    #[test]
    fn test_opposite_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_is_zero_similarity() {
        let zero = Embedding::zeros();
        let other = vec![0.7_f32; EMBEDDING_DIM];
        assert_eq!(cosine_similarity(zero.as_slice(), &other).unwrap(), 0.0);
        assert_eq!(
            cosine_similarity(zero.as_slice(), zero.as_slice()).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let err = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            MatchError::DimensionMismatch { left: 3, right: 2 }
        ));
    }

    #[test]
    fn test_embedding_rejects_wrong_length() {
        assert_eq!(Embedding::try_from(vec![1.0; 5]).unwrap_err(), 5);
        assert!(Embedding::try_from(vec![1.0; EMBEDDING_DIM]).is_ok());
    }

    #[test]
    fn test_embedding_deserialize_checks_length() {
        assert!(serde_json::from_str::<Embedding>("[1.0, 2.0]").is_err());
        let json = serde_json::to_string(&vec![0.0_f32; EMBEDDING_DIM]).unwrap();
        assert!(serde_json::from_str::<Embedding>(&json).unwrap().is_zero());
    }

    proptest! {
        #[test]
        fn test_self_similarity_is_one(v in prop::collection::vec(-100.0_f32..100.0, 1..64)) {
            prop_assume!(v.iter().any(|x| *x != 0.0));
            let sim = cosine_similarity(&v, &v).unwrap();
            prop_assert!((sim - 1.0).abs() < 1e-6, "sim = {}", sim);
        }

        #[test]
        fn test_similarity_bounded(
            pair in (1usize..32).prop_flat_map(|n| (
                prop::collection::vec(-10.0_f32..10.0, n),
                prop::collection::vec(-10.0_f32..10.0, n),
            ))
        ) {
            let sim = cosine_similarity(&pair.0, &pair.1).unwrap();
            prop_assert!((-1.0..=1.0).contains(&sim));
        }
    }
}
