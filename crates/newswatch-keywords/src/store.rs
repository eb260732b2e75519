//! Keyword persistence boundary.
//!
//! The lifecycle manager only ever talks to [`KeywordStore`]; what backs it
//! (Postgres, a JSON snapshot, a test fixture) is the surrounding system's
//! choice. `(keyword, category)` is the unique key everywhere.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use newswatch_core::{KeywordRecord, KeywordType};

use crate::error::KeywordError;

#[async_trait]
pub trait KeywordStore: Send + Sync {
    /// Look up a record by its unique key.
    async fn find_by_keyword_and_category(
        &self,
        keyword: &str,
        category: &str,
    ) -> Result<Option<KeywordRecord>, KeywordError>;

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::DuplicateKeyword`] if the key already exists.
    async fn insert(&self, record: KeywordRecord) -> Result<(), KeywordError>;

    /// Replace an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::NotFound`] if the key does not exist.
    async fn update(&self, record: KeywordRecord) -> Result<(), KeywordError>;

    /// Records of one type whose `last_seen_at` is strictly older than the
    /// cutoff.
    async fn list_by_type_and_age(
        &self,
        keyword_type: KeywordType,
        older_than: DateTime<Utc>,
    ) -> Result<Vec<KeywordRecord>, KeywordError>;

    async fn list_all(&self) -> Result<Vec<KeywordRecord>, KeywordError>;
}

/// In-memory store for tests and one-shot CLI runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<(String, String), KeywordRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from existing records; later duplicates of a key win,
    /// matching snapshot-replay semantics.
    #[must_use]
    pub fn with_records(records: Vec<KeywordRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| ((r.keyword.clone(), r.category.clone()), r))
            .collect();
        Self {
            records: Mutex::new(map),
        }
    }
}

#[async_trait]
impl KeywordStore for MemoryStore {
    async fn find_by_keyword_and_category(
        &self,
        keyword: &str,
        category: &str,
    ) -> Result<Option<KeywordRecord>, KeywordError> {
        let records = self
            .records
            .lock()
            .map_err(|e| KeywordError::Store(e.to_string()))?;
        Ok(records
            .get(&(keyword.to_string(), category.to_string()))
            .cloned())
    }

    async fn insert(&self, record: KeywordRecord) -> Result<(), KeywordError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| KeywordError::Store(e.to_string()))?;
        let key = (record.keyword.clone(), record.category.clone());
        if records.contains_key(&key) {
            return Err(KeywordError::DuplicateKeyword {
                keyword: record.keyword,
                category: record.category,
            });
        }
        records.insert(key, record);
        Ok(())
    }

    async fn update(&self, record: KeywordRecord) -> Result<(), KeywordError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| KeywordError::Store(e.to_string()))?;
        let key = (record.keyword.clone(), record.category.clone());
        if !records.contains_key(&key) {
            return Err(KeywordError::NotFound {
                keyword: record.keyword,
                category: record.category,
            });
        }
        records.insert(key, record);
        Ok(())
    }

    async fn list_by_type_and_age(
        &self,
        keyword_type: KeywordType,
        older_than: DateTime<Utc>,
    ) -> Result<Vec<KeywordRecord>, KeywordError> {
        let records = self
            .records
            .lock()
            .map_err(|e| KeywordError::Store(e.to_string()))?;
        Ok(records
            .values()
            .filter(|r| r.keyword_type == keyword_type && r.last_seen_at < older_than)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<KeywordRecord>, KeywordError> {
        let records = self
            .records
            .lock()
            .map_err(|e| KeywordError::Store(e.to_string()))?;
        let mut all: Vec<KeywordRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use newswatch_core::KeywordRecord;

    fn record(keyword: &str, category: &str, keyword_type: KeywordType) -> KeywordRecord {
        let mut r = KeywordRecord::manual_anchor(keyword, category, Utc::now());
        r.keyword_type = keyword_type;
        r
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let store = MemoryStore::new();
        store
            .insert(record("tariff", "trade", KeywordType::Active))
            .await
            .expect("insert should succeed");

        let found = store
            .find_by_keyword_and_category("tariff", "trade")
            .await
            .expect("find should succeed")
            .expect("record should exist");
        assert_eq!(found.keyword, "tariff");

        let missing = store
            .find_by_keyword_and_category("tariff", "economy")
            .await
            .expect("find should succeed");
        assert!(missing.is_none(), "category is part of the key");
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        store
            .insert(record("tariff", "trade", KeywordType::Active))
            .await
            .expect("first insert");
        let err = store
            .insert(record("tariff", "trade", KeywordType::Watchlist))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, KeywordError::DuplicateKeyword { .. }));
    }

    #[tokio::test]
    async fn update_of_missing_record_is_rejected() {
        let store = MemoryStore::new();
        let err = store
            .update(record("ghost", "trade", KeywordType::Active))
            .await
            .expect_err("missing must fail");
        assert!(matches!(err, KeywordError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_by_type_and_age_filters_both() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let mut stale_active = record("stale", "trade", KeywordType::Active);
        stale_active.last_seen_at = now - Duration::days(5);
        let mut fresh_active = record("fresh", "trade", KeywordType::Active);
        fresh_active.last_seen_at = now;
        let mut stale_watchlist = record("watch", "trade", KeywordType::Watchlist);
        stale_watchlist.last_seen_at = now - Duration::days(5);

        store.insert(stale_active).await.unwrap();
        store.insert(fresh_active).await.unwrap();
        store.insert(stale_watchlist).await.unwrap();

        let stale = store
            .list_by_type_and_age(KeywordType::Active, now - Duration::days(3))
            .await
            .expect("list should succeed");
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].keyword, "stale");
    }
}
