//! Time-driven keyword decay.
//!
//! Ages out records that stopped appearing in extraction runs: stale actives
//! drop to the watchlist, stale watchlist entries get rejected. Nothing is
//! ever hard-deleted here, and anchors are exempt unconditionally.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use newswatch_core::{KeywordStatus, KeywordType};

use crate::error::KeywordError;
use crate::store::KeywordStore;

/// Staleness windows for the decay pass.
#[derive(Debug, Clone, Copy)]
pub struct DecayPolicy {
    /// Days of silence after which an active keyword drops to watchlist.
    pub active_demote_after_days: i64,
    /// Days of silence after which a watchlist keyword is rejected.
    pub watchlist_reject_after_days: i64,
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self {
            active_demote_after_days: 3,
            watchlist_reject_after_days: 7,
        }
    }
}

/// Counts from one decay pass.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DecayReport {
    pub demoted: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Run one decay pass over the store.
///
/// Both staleness lists are read up front, so a record demoted in this pass
/// is first eligible for rejection on a later one. Per-record write
/// failures are logged and counted, never fatal.
///
/// # Errors
///
/// Returns an error only if the staleness listings themselves fail; with a
/// readable store the pass always completes with a (possibly partial)
/// report.
pub async fn decay_keywords(
    store: &dyn KeywordStore,
    now: DateTime<Utc>,
    policy: &DecayPolicy,
) -> Result<DecayReport, KeywordError> {
    let demote_cutoff = now - Duration::days(policy.active_demote_after_days);
    let reject_cutoff = now - Duration::days(policy.watchlist_reject_after_days);

    let stale_watchlist = store
        .list_by_type_and_age(KeywordType::Watchlist, reject_cutoff)
        .await?;
    let stale_active = store
        .list_by_type_and_age(KeywordType::Active, demote_cutoff)
        .await?;

    let mut report = DecayReport::default();

    for mut record in stale_watchlist {
        // Rejection overrides a prior approval when staleness persists.
        record.status = KeywordStatus::Rejected;
        let keyword = record.keyword.clone();
        match store.update(record).await {
            Ok(()) => report.rejected += 1,
            Err(e) => {
                warn!(keyword = %keyword, error = %e, "reject transition failed");
                report.failed += 1;
            }
        }
    }

    for mut record in stale_active {
        record.keyword_type = KeywordType::Watchlist;
        record.consecutive_low_days += 1;
        let keyword = record.keyword.clone();
        match store.update(record).await {
            Ok(()) => report.demoted += 1,
            Err(e) => {
                warn!(keyword = %keyword, error = %e, "demote transition failed");
                report.failed += 1;
            }
        }
    }

    debug!(
        demoted = report.demoted,
        rejected = report.rejected,
        failed = report.failed,
        "decay pass complete"
    );

    Ok(report)
}
