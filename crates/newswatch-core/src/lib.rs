//! Shared data model and text utilities for newswatch.
//!
//! Holds the `Article` and `KeywordRecord` types, the taxonomy configuration
//! (category relevance lists, canonical keyword forms, source reliability
//! tiers) and the normalization/extraction helpers used by both the
//! deduplication engine and the keyword lifecycle manager.

pub mod article;
pub mod config;
pub mod error;
pub mod keyword;
pub mod taxonomy;
pub mod text;

pub use article::Article;
pub use config::{load_app_config, load_app_config_from_env, AppConfig};
pub use error::ConfigError;
pub use keyword::{
    keyword_type_for_score, EntityType, KeywordRecord, KeywordSource, KeywordStatus, KeywordType,
    ACTIVE_SCORE_THRESHOLD,
};
pub use taxonomy::Taxonomy;
