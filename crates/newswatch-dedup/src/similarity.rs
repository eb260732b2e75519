//! Cosine and Jaccard similarity.

use std::collections::BTreeSet;

/// Cosine similarity between two embedding vectors.
///
/// Returns the dot product over the product of L2 norms, accumulated in
/// `f64`. A zero-norm vector (or a dimension mismatch, which only a broken
/// provider can produce) yields `0.0` so it can never classify anything as
/// a duplicate.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Jaccard similarity of two string sets: |intersection| / |union|.
///
/// Two empty sets have nothing in common to corroborate, so the result is
/// `0.0`, not `1.0`.
#[must_use]
pub fn jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let similarity = a.intersection(b).count() as f64 / union as f64;
    similarity
}
