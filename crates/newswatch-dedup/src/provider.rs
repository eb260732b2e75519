//! Embedding provider abstraction and HTTP client implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DedupError;

/// Maximum number of texts per embed request.
const BATCH_SIZE: usize = 64;

/// A service turning a batch of texts into one embedding vector per text,
/// in input order.
///
/// Implementations may fail or return the wrong number of vectors; the
/// dedup engine treats either as "provider unavailable" and degrades to
/// its lexical fallback rather than propagating the error.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DedupError>;
}

/// HTTP embedding client speaking the TEI-style `POST /embed` protocol:
/// `{"inputs": [...]}` in, `[[f32, ...], ...]` out.
pub struct HttpEmbeddingClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl HttpEmbeddingClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, DedupError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/embed", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingClient {
    /// Embed texts in batches of [`BATCH_SIZE`] per request.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::Embed`] on a non-success status, an unparseable
    /// body, or a batch whose response length does not match its input
    /// length; [`DedupError::Http`] on transport failure.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DedupError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let inputs: Vec<&str> = chunk.iter().map(String::as_str).collect();
            let request = EmbedRequest { inputs: &inputs };
            let response = self.client.post(&self.url).json(&request).send().await?;

            if !response.status().is_success() {
                return Err(DedupError::Embed(format!(
                    "embedding service returned status {}",
                    response.status()
                )));
            }

            let embeddings: Vec<Vec<f32>> = response
                .json()
                .await
                .map_err(|e| DedupError::Embed(format!("response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(DedupError::Embed(format!(
                    "embedding service returned {} vectors for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }
}
