//! Concurrent article gathering across source fetchers.
//!
//! Fetches are awaited jointly; one source failing is that source
//! contributing zero articles, never a cancelled sibling or a fatal error.

use std::collections::HashSet;
use std::future::Future;

use futures::future::join_all;
use tracing::{debug, warn};

use newswatch_core::Article;

/// Await a set of wrapped source fetches and concatenate their articles.
///
/// Each element pairs a source label (for logging) with its fetch future.
/// Cross-source URL collisions are dropped before returning, keeping the
/// first occurrence; articles without a URL are always kept.
pub async fn gather_articles<F, E>(fetches: Vec<(String, F)>) -> Vec<Article>
where
    F: Future<Output = Result<Vec<Article>, E>>,
    E: std::fmt::Display,
{
    let (labels, futures): (Vec<String>, Vec<F>) = fetches.into_iter().unzip();

    let mut articles = Vec::new();
    for (label, result) in labels.into_iter().zip(join_all(futures).await) {
        match result {
            Ok(batch) => {
                debug!(source = %label, count = batch.len(), "collected articles");
                articles.extend(batch);
            }
            Err(e) => {
                warn!(source = %label, error = %e, "source fetch failed, treating as empty");
            }
        }
    }

    let mut seen_urls: HashSet<String> = HashSet::new();
    articles.retain(|article| article.url.is_empty() || seen_urls.insert(article.url.clone()));

    articles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, url: &str) -> Article {
        Article {
            title: title.to_string(),
            summary: String::new(),
            url: url.to_string(),
            source: String::new(),
            published_at: None,
            category: None,
        }
    }

    fn fetch(
        articles: Vec<Article>,
    ) -> impl Future<Output = Result<Vec<Article>, String>> {
        async move { Ok(articles) }
    }

    fn failing_fetch() -> impl Future<Output = Result<Vec<Article>, String>> {
        async move { Err("connection refused".to_string()) }
    }

    #[tokio::test]
    async fn one_failed_source_does_not_drop_the_others() {
        let gathered = gather_articles(vec![
            (
                "newsapi".to_string(),
                Box::pin(fetch(vec![article("a", "https://x.test/a")]))
                    as std::pin::Pin<Box<dyn Future<Output = Result<Vec<Article>, String>>>>,
            ),
            ("google_news".to_string(), Box::pin(failing_fetch())),
            (
                "regional".to_string(),
                Box::pin(fetch(vec![article("b", "https://x.test/b")])),
            ),
        ])
        .await;

        assert_eq!(gathered.len(), 2);
        assert_eq!(gathered[0].title, "a");
        assert_eq!(gathered[1].title, "b");
    }

    #[tokio::test]
    async fn all_sources_failing_yields_empty_not_error() {
        let gathered = gather_articles(vec![
            ("one".to_string(), failing_fetch()),
            ("two".to_string(), failing_fetch()),
        ])
        .await;
        assert!(gathered.is_empty());
    }

    #[tokio::test]
    async fn cross_source_url_collisions_keep_first_occurrence() {
        let shared = "https://x.test/story";
        let gathered = gather_articles(vec![
            ("one".to_string(), fetch(vec![article("first", shared)])),
            ("two".to_string(), fetch(vec![article("second", shared)])),
        ])
        .await;

        assert_eq!(gathered.len(), 1);
        assert_eq!(gathered[0].title, "first");
    }

    #[tokio::test]
    async fn articles_without_urls_are_never_collapsed() {
        let gathered = gather_articles(vec![
            ("one".to_string(), fetch(vec![article("first", "")])),
            ("two".to_string(), fetch(vec![article("second", "")])),
        ])
        .await;
        assert_eq!(gathered.len(), 2);
    }
}
