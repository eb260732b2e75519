//! Merging extracted candidates into the keyword store.
//!
//! One read-then-write per candidate, best effort: a failure on one record
//! is logged and the rest of the batch continues. Races between concurrent
//! runs resolve last-writer-wins, which the smoothed/maxed score arithmetic
//! tolerates.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use newswatch_core::{
    keyword_type_for_score, KeywordRecord, KeywordSource, KeywordStatus,
};

use crate::extract::KeywordCandidate;
use crate::store::KeywordStore;

/// Partial-success accounting for one merge run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MergeReport {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Keywords actually written, in processing order.
    pub updated_keywords: Vec<String>,
}

/// Merge scored candidates into the store.
///
/// New keywords are inserted pending with their type from the score
/// threshold. Re-observed anchors only ever gain score (`max` blend) and
/// keep their status and type. Re-observed non-anchors take the new
/// component scores, blend `total_score` by simple average with the prior
/// value, and get their type recomputed from the result.
pub async fn merge_candidates(
    store: &dyn KeywordStore,
    candidates: &[KeywordCandidate],
    now: DateTime<Utc>,
) -> MergeReport {
    let mut report = MergeReport::default();

    for candidate in candidates {
        if candidate.keyword.trim().is_empty() {
            warn!(category = %candidate.category, "skipping candidate with empty keyword");
            report.skipped += 1;
            continue;
        }

        let existing = match store
            .find_by_keyword_and_category(&candidate.keyword, &candidate.category)
            .await
        {
            Ok(existing) => existing,
            Err(e) => {
                warn!(keyword = %candidate.keyword, error = %e, "store lookup failed");
                report.failed += 1;
                continue;
            }
        };

        let result = match existing {
            None => {
                let record = new_record(candidate, now);
                store.insert(record).await.map(|()| {
                    report.inserted += 1;
                })
            }
            Some(mut record) => {
                apply_reobservation(&mut record, candidate, now);
                store.update(record).await.map(|()| {
                    report.updated += 1;
                })
            }
        };

        match result {
            Ok(()) => report.updated_keywords.push(candidate.keyword.clone()),
            Err(e) => {
                warn!(keyword = %candidate.keyword, error = %e, "store write failed");
                report.failed += 1;
            }
        }
    }

    debug!(
        inserted = report.inserted,
        updated = report.updated,
        skipped = report.skipped,
        failed = report.failed,
        "merge run complete"
    );

    report
}

fn new_record(candidate: &KeywordCandidate, now: DateTime<Utc>) -> KeywordRecord {
    KeywordRecord {
        keyword: candidate.keyword.clone(),
        keyword_localized: None,
        category: candidate.category.clone(),
        entity_type: candidate.entity_type,
        status: KeywordStatus::Pending,
        keyword_type: keyword_type_for_score(candidate.total_score),
        frequency_score: candidate.frequency_score,
        reliability_score: candidate.reliability_score,
        domain_score: candidate.domain_score,
        total_score: candidate.total_score,
        last_seen_at: now,
        consecutive_low_days: 0,
        source: KeywordSource::ArticleExtraction,
    }
}

fn apply_reobservation(record: &mut KeywordRecord, candidate: &KeywordCandidate, now: DateTime<Utc>) {
    if record.is_anchor() {
        // Anchors never lose score to a weak re-observation, and their
        // status and type are untouchable.
        record.frequency_score = candidate.frequency_score;
        record.total_score = record.total_score.max(candidate.total_score);
    } else {
        record.frequency_score = candidate.frequency_score;
        record.reliability_score = candidate.reliability_score;
        record.domain_score = candidate.domain_score;
        record.total_score = blend(record.total_score, candidate.total_score);
        record.keyword_type = keyword_type_for_score(record.total_score);
    }
    record.last_seen_at = now;
    record.consecutive_low_days = 0;
}

/// Simple average with the prior total, rounded. Stability over single-run
/// noise.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(previous: u8, observed: u8) -> u8 {
    ((f64::from(previous) + f64::from(observed)) / 2.0).round() as u8
}
