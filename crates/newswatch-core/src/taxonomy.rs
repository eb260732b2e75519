//! Domain taxonomy: category list, curated relevance terms, canonical
//! keyword forms, entity vocabularies, and source reliability tiers.
//!
//! The original tables ship compiled-in via [`Taxonomy::default`]; deployments
//! override them with a YAML file (`config/taxonomy.yaml`) loaded through
//! [`load_taxonomy`]. Everything downstream takes a `&Taxonomy` argument, so
//! tests can inject a trimmed one.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reliability score for wire services and major financial press.
pub const TOP_TIER_SCORE: u8 = 100;
/// Reliability score for major broadcasters and magazines.
pub const SECOND_TIER_SCORE: u8 = 80;
/// Reliability score for everything else.
pub const DEFAULT_TIER_SCORE: u8 = 50;

/// Vocabulary lists used by the regex term extractor, one per entity class.
/// Entries are lowercase and may be multi-word phrases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityTables {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Fixed category set, e.g. `geopolitics`, `economy`, `automotive`.
    pub categories: Vec<String>,
    /// Per-category curated relevance lists; a keyword on its category's
    /// list gets the maximum domain score.
    #[serde(default)]
    pub curated: HashMap<String, Vec<String>>,
    /// Surface variant -> canonical form (nationality adjective to country
    /// noun, abbreviation expansion).
    #[serde(default)]
    pub canonical: HashMap<String, String>,
    #[serde(default)]
    pub entities: EntityTables,
    /// Substring-matched outlet names scored [`TOP_TIER_SCORE`].
    #[serde(default)]
    pub top_tier_sources: Vec<String>,
    /// Substring-matched outlet names scored [`SECOND_TIER_SCORE`].
    #[serde(default)]
    pub second_tier_sources: Vec<String>,
}

impl Taxonomy {
    /// Reliability tier for an outlet name, matched case-insensitively by
    /// substring so "Reuters" and "reuters.com" land in the same tier.
    #[must_use]
    pub fn reliability_tier(&self, source: &str) -> u8 {
        let needle = source.to_lowercase();
        if self
            .top_tier_sources
            .iter()
            .any(|s| needle.contains(s.as_str()))
        {
            TOP_TIER_SCORE
        } else if self
            .second_tier_sources
            .iter()
            .any(|s| needle.contains(s.as_str()))
        {
            SECOND_TIER_SCORE
        } else {
            DEFAULT_TIER_SCORE
        }
    }

    /// Canonical form of a surface term (already lowercase). Unknown terms
    /// pass through unchanged.
    #[must_use]
    pub fn canonicalize<'a>(&'a self, term: &'a str) -> &'a str {
        self.canonical.get(term).map_or(term, String::as_str)
    }

    /// Whether a canonical keyword is on the curated relevance list for a
    /// category.
    #[must_use]
    pub fn is_curated(&self, category: &str, keyword: &str) -> bool {
        self.curated
            .get(category)
            .is_some_and(|list| list.iter().any(|k| k == keyword))
    }
}

/// Load and validate a taxonomy from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let taxonomy: Taxonomy = serde_yaml::from_str(&content)?;
    validate_taxonomy(&taxonomy)?;
    Ok(taxonomy)
}

fn validate_taxonomy(taxonomy: &Taxonomy) -> Result<(), ConfigError> {
    if taxonomy.categories.is_empty() {
        return Err(ConfigError::Validation(
            "taxonomy must declare at least one category".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &taxonomy.categories {
        if category.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category names must be non-empty".to_string(),
            ));
        }
        if !seen.insert(category.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{category}'"
            )));
        }
    }

    for key in taxonomy.curated.keys() {
        if !seen.contains(&key.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "curated list references unknown category: '{key}'"
            )));
        }
    }

    Ok(())
}

fn vec_of(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Taxonomy {
    fn default() -> Self {
        let categories = vec_of(&["geopolitics", "economy", "automotive", "ai-tech", "trade"]);

        let mut curated = HashMap::new();
        curated.insert(
            "geopolitics".to_string(),
            vec_of(&[
                "sanctions",
                "nato",
                "united nations",
                "north korea",
                "ukraine",
                "taiwan",
                "missile",
                "nuclear",
                "summit",
                "election",
            ]),
        );
        curated.insert(
            "economy".to_string(),
            vec_of(&[
                "inflation",
                "interest rate",
                "federal reserve",
                "gdp",
                "recession",
                "bond yield",
                "stock market",
                "exchange rate",
                "stimulus",
                "unemployment",
            ]),
        );
        curated.insert(
            "automotive".to_string(),
            vec_of(&[
                "electric vehicle",
                "battery",
                "hydrogen",
                "autonomous driving",
                "recall",
                "tesla",
                "hyundai",
                "toyota",
                "charging",
                "lithium",
            ]),
        );
        curated.insert(
            "ai-tech".to_string(),
            vec_of(&[
                "artificial intelligence",
                "semiconductor",
                "chip",
                "data center",
                "machine learning",
                "cloud computing",
                "robotics",
                "nvidia",
                "openai",
                "gpu",
            ]),
        );
        curated.insert(
            "trade".to_string(),
            vec_of(&[
                "tariff",
                "exports",
                "imports",
                "trade deal",
                "free trade agreement",
                "wto",
                "supply chain",
                "subsidy",
                "export controls",
                "customs",
            ]),
        );

        let canonical = [
            // Nationality adjectives to country nouns.
            ("american", "united states"),
            ("u.s.", "united states"),
            ("usa", "united states"),
            ("chinese", "china"),
            ("japanese", "japan"),
            ("korean", "south korea"),
            ("german", "germany"),
            ("french", "france"),
            ("british", "united kingdom"),
            ("uk", "united kingdom"),
            ("indian", "india"),
            ("russian", "russia"),
            ("ukrainian", "ukraine"),
            ("taiwanese", "taiwan"),
            ("mexican", "mexico"),
            ("canadian", "canada"),
            ("brazilian", "brazil"),
            ("australian", "australia"),
            ("saudi", "saudi arabia"),
            ("iranian", "iran"),
            ("israeli", "israel"),
            ("italian", "italy"),
            ("dutch", "netherlands"),
            ("turkish", "turkey"),
            ("indonesian", "indonesia"),
            ("vietnamese", "vietnam"),
            // Common abbreviations.
            ("ev", "electric vehicle"),
            ("evs", "electric vehicle"),
            ("ai", "artificial intelligence"),
            ("fed", "federal reserve"),
            ("ecb", "european central bank"),
            ("boj", "bank of japan"),
            ("bok", "bank of korea"),
            ("eu", "european union"),
            ("un", "united nations"),
            ("gm", "general motors"),
            ("vw", "volkswagen"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let entities = EntityTables {
            countries: vec_of(&[
                "united states",
                "china",
                "japan",
                "south korea",
                "north korea",
                "germany",
                "france",
                "united kingdom",
                "india",
                "russia",
                "ukraine",
                "taiwan",
                "vietnam",
                "mexico",
                "canada",
                "brazil",
                "australia",
                "saudi arabia",
                "iran",
                "israel",
                "italy",
                "spain",
                "netherlands",
                "poland",
                "turkey",
                "indonesia",
                "thailand",
                "singapore",
                "argentina",
                "egypt",
            ]),
            organizations: vec_of(&[
                "federal reserve",
                "european union",
                "european central bank",
                "european commission",
                "bank of japan",
                "bank of korea",
                "imf",
                "world bank",
                "wto",
                "opec",
                "nato",
                "united nations",
                "white house",
                "congress",
                "sec",
                "ftc",
                "g7",
                "g20",
                "asean",
                "fomc",
            ]),
            companies: vec_of(&[
                "tesla",
                "toyota",
                "hyundai",
                "kia",
                "volkswagen",
                "bmw",
                "mercedes-benz",
                "ford",
                "general motors",
                "byd",
                "nio",
                "rivian",
                "samsung",
                "sk hynix",
                "lg",
                "posco",
                "nvidia",
                "intel",
                "amd",
                "tsmc",
                "qualcomm",
                "arm",
                "apple",
                "google",
                "microsoft",
                "amazon",
                "meta",
                "openai",
                "softbank",
                "alibaba",
                "tencent",
                "baidu",
                "huawei",
                "foxconn",
                "boeing",
                "airbus",
                "exxon",
                "shell",
                "saudi aramco",
            ]),
            persons: vec_of(&[
                "elon musk",
                "jerome powell",
                "donald trump",
                "xi jinping",
                "vladimir putin",
                "kim jong un",
                "sam altman",
                "jensen huang",
                "mary barra",
                "akio toyoda",
                "christine lagarde",
                "tim cook",
                "mark zuckerberg",
                "satya nadella",
                "warren buffett",
            ]),
            concepts: vec_of(&[
                "electric vehicle",
                "hydrogen",
                "battery",
                "semiconductor",
                "chip",
                "artificial intelligence",
                "machine learning",
                "tariff",
                "trade deal",
                "supply chain",
                "inflation",
                "interest rate",
                "gdp",
                "recession",
                "exports",
                "imports",
                "sanctions",
                "subsidy",
                "regulation",
                "antitrust",
                "ipo",
                "earnings",
                "data center",
                "cloud computing",
                "autonomous driving",
                "robotics",
                "lithium",
                "rare earth",
                "oil price",
                "exchange rate",
                "stimulus",
                "free trade agreement",
                "export controls",
                "cryptocurrency",
                "stock market",
                "bond yield",
                "gpu",
                "customs",
                "unemployment",
                "missile",
                "nuclear",
                "summit",
                "election",
                "charging",
            ]),
            triggers: vec_of(&[
                "announce",
                "announced",
                "launch",
                "launched",
                "unveil",
                "unveiled",
                "ban",
                "banned",
                "recall",
                "recalled",
                "merger",
                "acquisition",
                "acquire",
                "acquired",
                "rate cut",
                "rate hike",
                "invest",
                "investment",
                "expansion",
                "layoff",
                "layoffs",
                "bankruptcy",
                "sanction",
                "sanctioned",
                "approve",
                "approved",
                "reject",
                "rejected",
                "lawsuit",
                "fine",
                "fined",
                "partnership",
                "agreement",
                "strike",
                "halt",
                "halted",
                "surge",
                "plunge",
                "slash",
                "slashed",
                "breach",
                "outage",
            ]),
        };

        let top_tier_sources = vec_of(&[
            "reuters",
            "bloomberg",
            "associated press",
            "afp",
            "yonhap",
            "financial times",
            "wall street journal",
            "nikkei",
        ]);

        let second_tier_sources = vec_of(&[
            "bbc",
            "cnn",
            "cnbc",
            "economist",
            "forbes",
            "guardian",
            "washington post",
            "new york times",
            "fortune",
        ]);

        Self {
            categories,
            curated,
            canonical,
            entities,
            top_tier_sources,
            second_tier_sources,
        }
    }
}
