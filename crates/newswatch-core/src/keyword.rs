use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Total-score threshold at or above which a non-anchor keyword is `Active`.
pub const ACTIVE_SCORE_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Country,
    Organization,
    Company,
    Person,
    Concept,
    Trigger,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityType::Country => "country",
            EntityType::Organization => "organization",
            EntityType::Company => "company",
            EntityType::Person => "person",
            EntityType::Concept => "concept",
            EntityType::Trigger => "trigger",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for KeywordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            KeywordStatus::Pending => "pending",
            KeywordStatus::Approved => "approved",
            KeywordStatus::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordType {
    /// Manually curated; exempt from demotion and decay.
    Anchor,
    Active,
    Watchlist,
}

impl std::fmt::Display for KeywordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            KeywordType::Anchor => "anchor",
            KeywordType::Active => "active",
            KeywordType::Watchlist => "watchlist",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    Manual,
    ArticleExtraction,
    TrendFeed,
}

/// Keyword type implied by a total score, for non-anchor records.
#[must_use]
pub fn keyword_type_for_score(total_score: u8) -> KeywordType {
    if total_score >= ACTIVE_SCORE_THRESHOLD {
        KeywordType::Active
    } else {
        KeywordType::Watchlist
    }
}

/// A persistent search keyword and its lifecycle state.
///
/// `(keyword, category)` is unique within a store. Scores are 0-100;
/// `total_score` is the rounded mean of the three component scores for a
/// fresh extraction, or a blend with the prior total on re-observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    /// Canonical, normalized form.
    pub keyword: String,
    #[serde(default)]
    pub keyword_localized: Option<String>,
    pub category: String,
    pub entity_type: EntityType,
    pub status: KeywordStatus,
    pub keyword_type: KeywordType,
    pub frequency_score: u8,
    pub reliability_score: u8,
    pub domain_score: u8,
    pub total_score: u8,
    pub last_seen_at: DateTime<Utc>,
    pub consecutive_low_days: u32,
    pub source: KeywordSource,
}

impl KeywordRecord {
    /// Build a manually-added anchor keyword.
    ///
    /// Anchors start pending like extracted keywords but are never
    /// auto-demoted or auto-rejected afterwards.
    #[must_use]
    pub fn manual_anchor(keyword: &str, category: &str, now: DateTime<Utc>) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            keyword_localized: None,
            category: category.to_string(),
            entity_type: EntityType::Concept,
            status: KeywordStatus::Pending,
            keyword_type: KeywordType::Anchor,
            frequency_score: 0,
            reliability_score: 0,
            domain_score: 0,
            total_score: 0,
            last_seen_at: now,
            consecutive_low_days: 0,
            source: KeywordSource::Manual,
        }
    }

    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.keyword_type == KeywordType::Anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(keyword_type_for_score(70), KeywordType::Active);
        assert_eq!(keyword_type_for_score(69), KeywordType::Watchlist);
        assert_eq!(keyword_type_for_score(100), KeywordType::Active);
        assert_eq!(keyword_type_for_score(0), KeywordType::Watchlist);
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&KeywordSource::ArticleExtraction).unwrap(),
            r#""article_extraction""#
        );
        assert_eq!(
            serde_json::to_string(&KeywordType::Watchlist).unwrap(),
            r#""watchlist""#
        );
    }

    #[test]
    fn manual_anchor_starts_pending() {
        let record = KeywordRecord::manual_anchor("Chip Export Controls", "trade", Utc::now());
        assert_eq!(record.keyword, "chip export controls");
        assert_eq!(record.status, KeywordStatus::Pending);
        assert!(record.is_anchor());
        assert_eq!(record.source, KeywordSource::Manual);
    }
}
