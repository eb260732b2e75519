mod json_store;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use newswatch_core::taxonomy::load_taxonomy;
use newswatch_core::{load_app_config, Article, Taxonomy};
use newswatch_dedup::{deduplicate, DedupConfig, EmbeddingProvider, HttpEmbeddingClient};
use newswatch_keywords::{decay_keywords, extract_candidates, merge_candidates, DecayPolicy};

#[derive(Debug, Parser)]
#[command(name = "newswatch")]
#[command(about = "Article deduplication and keyword lifecycle tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Deduplicate a JSON article batch and print the outcome.
    Dedup {
        /// JSON file containing an array of articles.
        #[arg(long)]
        input: PathBuf,
        /// Skip the embedding service and use lexical title comparison.
        #[arg(long)]
        no_embeddings: bool,
    },
    /// Extract scored keyword candidates from a JSON article batch.
    Extract {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        category: String,
    },
    /// Extract candidates and merge them into a JSON store file.
    Ingest {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        category: String,
        #[arg(long)]
        store: PathBuf,
    },
    /// Run a decay pass over a JSON store file.
    Decay {
        #[arg(long)]
        store: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let taxonomy = match &config.taxonomy_path {
        Some(path) => load_taxonomy(path)?,
        None => Taxonomy::default(),
    };

    let cli = Cli::parse();
    match cli.command {
        Commands::Dedup {
            input,
            no_embeddings,
        } => {
            let articles = read_articles(&input)?;
            let client = match (&config.embed_url, no_embeddings) {
                (Some(url), false) => Some(HttpEmbeddingClient::new(
                    url,
                    config.embed_timeout_secs,
                )?),
                _ => None,
            };
            let provider = client.as_ref().map(|c| c as &dyn EmbeddingProvider);
            let outcome =
                deduplicate(articles, provider, &taxonomy, &DedupConfig::default()).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Extract { input, category } => {
            let articles = read_articles(&input)?;
            let candidates = extract_candidates(&articles, &category, &taxonomy);
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        }
        Commands::Ingest {
            input,
            category,
            store,
        } => {
            let articles = read_articles(&input)?;
            let candidates = extract_candidates(&articles, &category, &taxonomy);
            let keyword_store = json_store::load(&store)?;
            let report = merge_candidates(&keyword_store, &candidates, chrono::Utc::now()).await;
            json_store::save(&keyword_store, &store).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Decay { store } => {
            let keyword_store = json_store::load(&store)?;
            let report =
                decay_keywords(&keyword_store, chrono::Utc::now(), &DecayPolicy::default())
                    .await?;
            json_store::save(&keyword_store, &store).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn read_articles(path: &Path) -> anyhow::Result<Vec<Article>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading article file {}", path.display()))?;
    let articles: Vec<Article> = serde_json::from_str(&content)
        .with_context(|| format!("parsing article file {}", path.display()))?;
    Ok(articles)
}
