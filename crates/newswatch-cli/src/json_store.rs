//! JSON-snapshot keyword store for CLI runs.
//!
//! Loads the whole record set into a [`MemoryStore`], lets a command mutate
//! it, and writes the sorted snapshot back. Good enough for one-shot runs;
//! concurrent writers get last-writer-wins, which the score arithmetic
//! tolerates.

use std::path::Path;

use anyhow::Context;
use newswatch_core::KeywordRecord;
use newswatch_keywords::{KeywordStore, MemoryStore};

/// Load a store snapshot, creating an empty store if the file is missing.
pub fn load(path: &Path) -> anyhow::Result<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading store file {}", path.display()))?;
    let records: Vec<KeywordRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing store file {}", path.display()))?;
    Ok(MemoryStore::with_records(records))
}

/// Write the store back as a pretty-printed JSON array.
pub async fn save(store: &MemoryStore, path: &Path) -> anyhow::Result<()> {
    let records = store
        .list_all()
        .await
        .context("listing store records for save")?;
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(path, json).with_context(|| format!("writing store file {}", path.display()))?;
    Ok(())
}
