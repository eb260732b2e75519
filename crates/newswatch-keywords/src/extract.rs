//! Keyword candidate extraction and scoring.
//!
//! A pure function of an article batch: scan every article's text with the
//! taxonomy vocabularies, accumulate occurrence counts and source
//! reliability, and score the surviving terms. Which keywords matter is
//! entirely data-driven — the taxonomy is injected, never global.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use newswatch_core::text::TermExtractor;
use newswatch_core::{Article, EntityType, Taxonomy};

/// Keywords observed fewer times than this in a batch are discarded.
pub const MIN_OCCURRENCES: u32 = 2;
/// Candidate list cap per extraction run.
pub const MAX_CANDIDATES: usize = 50;

/// A scored keyword extracted from one article batch, not yet merged into
/// the store.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordCandidate {
    pub keyword: String,
    pub category: String,
    pub entity_type: EntityType,
    pub occurrences: u32,
    pub frequency_score: u8,
    pub reliability_score: u8,
    pub domain_score: u8,
    pub total_score: u8,
}

struct Accumulator {
    entity_type: EntityType,
    count: u32,
    reliability_sum: u32,
}

/// Extract scored keyword candidates for a category from a batch of
/// articles.
///
/// Zero usable articles yield zero candidates; this never fails. Results
/// are sorted by `total_score` descending (keyword ascending on ties) and
/// capped at [`MAX_CANDIDATES`].
#[must_use]
pub fn extract_candidates(
    articles: &[Article],
    category: &str,
    taxonomy: &Taxonomy,
) -> Vec<KeywordCandidate> {
    if articles.is_empty() {
        return Vec::new();
    }

    let extractor = TermExtractor::new(taxonomy);
    let mut accumulators: HashMap<String, Accumulator> = HashMap::new();

    for article in articles {
        let tier = u32::from(taxonomy.reliability_tier(&article.source));
        for (keyword, entity_type) in extractor.typed_occurrences(&article.full_text()) {
            accumulators
                .entry(keyword)
                .and_modify(|acc| {
                    acc.count += 1;
                    acc.reliability_sum += tier;
                })
                .or_insert(Accumulator {
                    entity_type,
                    count: 1,
                    reliability_sum: tier,
                });
        }
    }

    let mut candidates: Vec<KeywordCandidate> = accumulators
        .into_iter()
        .filter(|(_, acc)| acc.count >= MIN_OCCURRENCES)
        .map(|(keyword, acc)| {
            let frequency_score = score_frequency(acc.count);
            let reliability_score = score_reliability(acc.reliability_sum, acc.count);
            let domain_score = score_domain(taxonomy, category, &keyword, acc.entity_type);
            let total_score = rounded_mean3(frequency_score, reliability_score, domain_score);
            KeywordCandidate {
                keyword,
                category: category.to_string(),
                entity_type: acc.entity_type,
                occurrences: acc.count,
                frequency_score,
                reliability_score,
                domain_score,
                total_score,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    candidates.truncate(MAX_CANDIDATES);

    debug!(
        category,
        articles = articles.len(),
        candidates = candidates.len(),
        "extraction run complete"
    );

    candidates
}

fn score_frequency(count: u32) -> u8 {
    u8::try_from((count * 10).min(100)).unwrap_or(100)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score_reliability(reliability_sum: u32, count: u32) -> u8 {
    (f64::from(reliability_sum) / f64::from(count)).round() as u8
}

/// Domain relevance: maximum for curated terms, otherwise a flat value per
/// entity class.
fn score_domain(taxonomy: &Taxonomy, category: &str, keyword: &str, entity_type: EntityType) -> u8 {
    if taxonomy.is_curated(category, keyword) {
        return 100;
    }
    match entity_type {
        EntityType::Trigger => 70,
        EntityType::Concept => 60,
        EntityType::Company | EntityType::Organization => 50,
        EntityType::Country | EntityType::Person => 30,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_mean3(a: u8, b: u8, c: u8) -> u8 {
    ((f64::from(a) + f64::from(b) + f64::from(c)) / 3.0).round() as u8
}
