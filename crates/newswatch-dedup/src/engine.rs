//! The deduplication pass.
//!
//! Articles are processed in input order against a growing kept list, so the
//! first-seen representative of every story survives. A high-confidence
//! cosine match short-circuits; the ambiguous band below it is corroborated
//! with entity/keyword overlap before an article is folded away. When the
//! embedding provider fails (or returns the wrong number of vectors) the
//! whole pass degrades to lexical title comparison and says so in the
//! outcome.

use serde::Serialize;
use tracing::{debug, warn};

use newswatch_core::text::{normalize_for_embedding, title_token_set, TermExtractor};
use newswatch_core::{Article, Taxonomy};

use crate::provider::EmbeddingProvider;
use crate::similarity::{cosine_similarity, jaccard_similarity};

/// Similarity thresholds for the dedup pass.
///
/// The defaults are empirical: paraphrase coverage of one event tends to
/// land above 0.92, while related-but-distinct events share the band down
/// to 0.82 and need entity/keyword corroboration to separate.
#[derive(Debug, Clone, Copy)]
pub struct DedupConfig {
    /// Cosine similarity at or above which an article is a duplicate
    /// outright.
    pub high_similarity: f64,
    /// Lower edge of the ambiguous band; below this nothing is a duplicate.
    pub ambiguous_similarity: f64,
    /// Entity-set Jaccard needed to corroborate an ambiguous match.
    pub entity_jaccard: f64,
    /// Keyword-set Jaccard needed to corroborate an ambiguous match.
    pub keyword_jaccard: f64,
    /// Title-token Jaccard threshold for the lexical fallback.
    pub fallback_jaccard: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            high_similarity: 0.92,
            ambiguous_similarity: 0.82,
            entity_jaccard: 0.7,
            keyword_jaccard: 0.6,
            fallback_jaccard: 0.6,
        }
    }
}

/// Which comparison method produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupMethod {
    Embedding,
    Fallback,
}

impl std::fmt::Display for DedupMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DedupMethod::Embedding => write!(f, "embedding"),
            DedupMethod::Fallback => write!(f, "fallback"),
        }
    }
}

/// An article folded into an earlier one, with the evidence.
#[derive(Debug, Clone, Serialize)]
pub struct RemovedArticle {
    pub article: Article,
    /// Title of the kept article this one duplicates.
    pub duplicate_of_title: String,
    /// The similarity score that triggered the decision.
    pub similarity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DedupOutcome {
    pub kept: Vec<Article>,
    pub removed: Vec<RemovedArticle>,
    pub method: DedupMethod,
}

enum SimilarityBand {
    High,
    Ambiguous,
    Low,
}

fn similarity_band(similarity: f64, config: &DedupConfig) -> SimilarityBand {
    if similarity >= config.high_similarity {
        SimilarityBand::High
    } else if similarity >= config.ambiguous_similarity {
        SimilarityBand::Ambiguous
    } else {
        SimilarityBand::Low
    }
}

/// Deduplicate a batch of articles.
///
/// Requests one batched embedding call for the whole input; if the provider
/// is absent, errors out, or returns a result set of the wrong length, the
/// pass switches to lexical title comparison. Provider failure never
/// surfaces to the caller.
pub async fn deduplicate(
    articles: Vec<Article>,
    provider: Option<&dyn EmbeddingProvider>,
    taxonomy: &Taxonomy,
    config: &DedupConfig,
) -> DedupOutcome {
    if articles.is_empty() {
        return DedupOutcome {
            kept: Vec::new(),
            removed: Vec::new(),
            method: DedupMethod::Embedding,
        };
    }

    let embeddings = match provider {
        Some(provider) => {
            let texts: Vec<String> = articles.iter().map(normalize_for_embedding).collect();
            match provider.embed(&texts).await {
                Ok(vectors) if vectors.len() == articles.len() => Some(vectors),
                Ok(vectors) => {
                    warn!(
                        expected = articles.len(),
                        got = vectors.len(),
                        "embedding provider returned wrong vector count, using lexical fallback"
                    );
                    None
                }
                Err(e) => {
                    warn!(error = %e, "embedding provider failed, using lexical fallback");
                    None
                }
            }
        }
        None => None,
    };

    match embeddings {
        Some(embeddings) => deduplicate_semantic(articles, &embeddings, taxonomy, config),
        None => deduplicate_lexical(articles, config),
    }
}

fn deduplicate_semantic(
    articles: Vec<Article>,
    embeddings: &[Vec<f32>],
    taxonomy: &Taxonomy,
    config: &DedupConfig,
) -> DedupOutcome {
    let extractor = TermExtractor::new(taxonomy);

    let mut kept: Vec<Article> = Vec::new();
    let mut kept_embeddings: Vec<&Vec<f32>> = Vec::new();
    let mut removed: Vec<RemovedArticle> = Vec::new();

    for (article, embedding) in articles.into_iter().zip(embeddings) {
        let mut duplicate_of: Option<(usize, f64)> = None;
        let mut best: Option<(usize, f64)> = None;

        for (idx, kept_embedding) in kept_embeddings.iter().enumerate() {
            let similarity = cosine_similarity(embedding, kept_embedding);
            if best.is_none_or(|(_, s)| similarity > s) {
                best = Some((idx, similarity));
            }
            if matches!(similarity_band(similarity, config), SimilarityBand::High) {
                duplicate_of = Some((idx, similarity));
                break;
            }
        }

        // Ambiguous band: corroborate the strongest match with entity and
        // keyword overlap before folding the article away.
        if duplicate_of.is_none() {
            if let Some((idx, similarity)) = best {
                if matches!(similarity_band(similarity, config), SimilarityBand::Ambiguous) {
                    let candidate = extractor.corroboration_terms(&article.full_text());
                    let existing = extractor.corroboration_terms(&kept[idx].full_text());
                    let entity_overlap =
                        jaccard_similarity(&candidate.entities, &existing.entities);
                    let keyword_overlap =
                        jaccard_similarity(&candidate.keywords, &existing.keywords);
                    debug!(
                        title = %article.title,
                        similarity,
                        entity_overlap,
                        keyword_overlap,
                        "corroborating ambiguous match"
                    );
                    if entity_overlap >= config.entity_jaccard
                        || keyword_overlap >= config.keyword_jaccard
                    {
                        duplicate_of = Some((idx, similarity));
                    }
                }
            }
        }

        match duplicate_of {
            Some((idx, similarity)) => removed.push(RemovedArticle {
                duplicate_of_title: kept[idx].title.clone(),
                similarity,
                article,
            }),
            None => {
                kept.push(article);
                kept_embeddings.push(embedding);
            }
        }
    }

    debug!(
        kept = kept.len(),
        removed = removed.len(),
        "semantic dedup pass complete"
    );

    DedupOutcome {
        kept,
        removed,
        method: DedupMethod::Embedding,
    }
}

fn deduplicate_lexical(articles: Vec<Article>, config: &DedupConfig) -> DedupOutcome {
    let mut kept: Vec<Article> = Vec::new();
    let mut kept_tokens = Vec::new();
    let mut removed: Vec<RemovedArticle> = Vec::new();

    for article in articles {
        let tokens = title_token_set(&article.title);

        let best = kept_tokens
            .iter()
            .enumerate()
            .map(|(idx, existing)| (idx, jaccard_similarity(&tokens, existing)))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        match best {
            Some((idx, similarity)) if similarity >= config.fallback_jaccard => {
                removed.push(RemovedArticle {
                    duplicate_of_title: kept[idx].title.clone(),
                    similarity,
                    article,
                });
            }
            _ => {
                kept.push(article);
                kept_tokens.push(tokens);
            }
        }
    }

    debug!(
        kept = kept.len(),
        removed = removed.len(),
        "lexical dedup pass complete"
    );

    DedupOutcome {
        kept,
        removed,
        method: DedupMethod::Fallback,
    }
}
