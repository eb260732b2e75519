//! Keyword lifecycle management.
//!
//! Extracts scored keyword candidates from a category's recent articles,
//! merges them into a persistent store, and ages store entries through the
//! pending/active/watchlist/rejected state machine. Anchor keywords are
//! manually curated and immune to automatic demotion and decay.

pub mod decay;
pub mod error;
pub mod extract;
pub mod gather;
pub mod merge;
pub mod store;

pub use decay::{decay_keywords, DecayPolicy, DecayReport};
pub use error::KeywordError;
pub use extract::{extract_candidates, KeywordCandidate, MAX_CANDIDATES, MIN_OCCURRENCES};
pub use gather::gather_articles;
pub use merge::{merge_candidates, MergeReport};
pub use store::{KeywordStore, MemoryStore};
