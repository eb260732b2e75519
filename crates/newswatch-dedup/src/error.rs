use thiserror::Error;

#[derive(Debug, Error)]
pub enum DedupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding provider error: {0}")]
    Embed(String),
}
