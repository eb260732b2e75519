use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news article as delivered by an upstream collector.
///
/// Articles are transient: constructed per request by the fetch layer,
/// consumed by the deduplication engine or the keyword extractor, and
/// discarded. Only `title` is required to be non-empty; `summary` is often
/// blank for headline-only feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    /// Outlet name as reported by the collector (e.g. "Reuters", "Yonhap").
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Category hint used for persistence tagging only, never for
    /// comparison logic.
    #[serde(default)]
    pub category: Option<String>,
}

impl Article {
    /// Title and summary joined for text analysis.
    #[must_use]
    pub fn full_text(&self) -> String {
        if self.summary.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.summary)
        }
    }
}
