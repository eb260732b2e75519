//! End-to-end keyword lifecycle: extract from a batch, merge into a store,
//! re-observe, decay.

use chrono::{Duration, Utc};
use newswatch_core::{Article, KeywordStatus, KeywordType, Taxonomy};
use newswatch_keywords::{
    decay_keywords, extract_candidates, merge_candidates, DecayPolicy, KeywordStore, MemoryStore,
};

fn article(title: &str, summary: &str, source: &str) -> Article {
    Article {
        title: title.to_string(),
        summary: summary.to_string(),
        url: String::new(),
        source: source.to_string(),
        published_at: None,
        category: Some("automotive".to_string()),
    }
}

fn batch() -> Vec<Article> {
    vec![
        article(
            "Tesla announced an EV price cut",
            "Tesla slashed electric vehicle prices across Europe",
            "Reuters",
        ),
        article(
            "Tesla price move pressures rivals",
            "Hyundai and Kia weigh their own electric vehicle discounts",
            "Bloomberg",
        ),
        article(
            "Hyundai doubles down on hydrogen",
            "Hyundai unveiled a hydrogen truck line",
            "Yonhap",
        ),
    ]
}

#[tokio::test]
async fn extraction_then_merge_populates_the_store() {
    let taxonomy = Taxonomy::default();
    let candidates = extract_candidates(&batch(), "automotive", &taxonomy);

    // "tesla" (3x), "hyundai" (3x), "electric vehicle" (3x incl. "EV") all
    // clear the two-occurrence floor.
    assert!(candidates.iter().any(|c| c.keyword == "tesla"));
    assert!(candidates.iter().any(|c| c.keyword == "hyundai"));
    assert!(candidates.iter().any(|c| c.keyword == "electric vehicle"));

    let store = MemoryStore::new();
    let now = Utc::now();
    let report = merge_candidates(&store, &candidates, now).await;
    assert_eq!(report.inserted, candidates.len());
    assert_eq!(report.failed, 0);

    let tesla = store
        .find_by_keyword_and_category("tesla", "automotive")
        .await
        .unwrap()
        .expect("tesla should be stored");
    assert_eq!(tesla.status, KeywordStatus::Pending);
    // Curated for automotive, so domain score is maximal.
    assert_eq!(tesla.domain_score, 100);
}

#[tokio::test]
async fn reobservation_blends_and_decay_ages_out() {
    let taxonomy = Taxonomy::default();
    let store = MemoryStore::new();

    let first_run = Utc::now() - Duration::days(10);
    let candidates = extract_candidates(&batch(), "automotive", &taxonomy);
    merge_candidates(&store, &candidates, first_run).await;

    // Re-observe only the hydrogen story four days ago; Tesla goes quiet.
    let second_run = Utc::now() - Duration::days(4);
    let hydrogen_batch = vec![
        article("Hydrogen truck orders grow", "Hyundai hydrogen", "Yonhap"),
        article("Hyundai hydrogen push widens", "hydrogen stations", "Reuters"),
    ];
    let second = extract_candidates(&hydrogen_batch, "automotive", &taxonomy);
    let report = merge_candidates(&store, &second, second_run).await;
    assert!(report.updated > 0, "hyundai and hydrogen are re-observed");

    let decay = decay_keywords(&store, Utc::now(), &DecayPolicy::default())
        .await
        .expect("decay pass should run");

    // Everything seen only in the first run is at least 10 days stale:
    // actives demote, watchlist entries reject. Records touched 4 days ago
    // may demote (active window is 3 days) but cannot reject (7 days).
    assert!(decay.demoted + decay.rejected > 0);

    let all = store.list_all().await.unwrap();
    for record in all {
        if record.last_seen_at <= first_run {
            assert_ne!(
                record.keyword_type,
                KeywordType::Active,
                "stale record '{}' must not stay active",
                record.keyword
            );
        }
    }
}
