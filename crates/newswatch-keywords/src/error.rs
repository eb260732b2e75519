use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("store error: {0}")]
    Store(String),

    #[error("keyword '{keyword}' already exists in category '{category}'")]
    DuplicateKeyword { keyword: String, category: String },

    #[error("keyword '{keyword}' not found in category '{category}'")]
    NotFound { keyword: String, category: String },
}
