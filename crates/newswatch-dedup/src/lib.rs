//! Cross-source article deduplication.
//!
//! Decides which articles in a multi-source batch cover the same underlying
//! story: semantic comparison over embeddings with an ambiguous-zone
//! entity/keyword corroboration step, degrading to lexical title comparison
//! whenever the embedding provider is unavailable.

pub mod engine;
pub mod error;
pub mod provider;
pub mod similarity;

pub use engine::{deduplicate, DedupConfig, DedupMethod, DedupOutcome, RemovedArticle};
pub use error::DedupError;
pub use provider::{EmbeddingProvider, HttpEmbeddingClient};
pub use similarity::{cosine_similarity, jaccard_similarity};
