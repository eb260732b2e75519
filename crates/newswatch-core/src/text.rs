//! Text normalization and regex-driven term extraction.
//!
//! Heuristic by design: entity recognition is a vocabulary scan over the
//! taxonomy tables, not an NER model. Both the dedup engine (corroboration
//! sets) and the keyword extractor (typed occurrences) run on top of these
//! helpers.

use std::collections::BTreeSet;

use regex::Regex;

use crate::article::Article;
use crate::keyword::EntityType;
use crate::taxonomy::Taxonomy;

/// Maximum length of embedding input, in characters.
pub const EMBED_INPUT_MAX_CHARS: usize = 500;

/// Strip HTML tags from a string, returning plain text.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result.trim().to_string()
}

/// Build the normalized embedding input for an article: lowercased,
/// HTML-stripped title+summary with punctuation and whitespace collapsed,
/// truncated to [`EMBED_INPUT_MAX_CHARS`].
#[must_use]
pub fn normalize_for_embedding(article: &Article) -> String {
    let stripped = strip_html(&article.full_text());
    let mut out = String::with_capacity(stripped.len());
    let mut last_was_space = true;
    for ch in stripped.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    let trimmed = out.trim_end();
    trimmed.chars().take(EMBED_INPUT_MAX_CHARS).collect()
}

/// Lowercase title tokens longer than 3 characters, as a set.
///
/// This is the comparison unit for the lexical dedup fallback.
#[must_use]
pub fn title_token_set(title: &str) -> BTreeSet<String> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 3)
        .map(str::to_lowercase)
        .collect()
}

/// Term sets used to corroborate an ambiguous similarity score.
#[derive(Debug, Default, Clone)]
pub struct ExtractedTerms {
    /// Countries, companies, persons.
    pub entities: BTreeSet<String>,
    /// Concepts, event triggers, numeric/monetary tokens.
    pub keywords: BTreeSet<String>,
}

/// Compiled vocabulary matcher over one taxonomy.
///
/// Compile once per pass; each class regex is an alternation of the table
/// phrases plus the canonical surface variants that map into that class.
pub struct TermExtractor {
    countries: Option<Regex>,
    organizations: Option<Regex>,
    companies: Option<Regex>,
    persons: Option<Regex>,
    concepts: Option<Regex>,
    triggers: Option<Regex>,
    money: Regex,
    taxonomy: Taxonomy,
}

impl TermExtractor {
    #[must_use]
    pub fn new(taxonomy: &Taxonomy) -> Self {
        let surfaces_for = |table: &[String]| -> Vec<String> {
            let mut phrases: Vec<String> = table.to_vec();
            for (surface, canon) in &taxonomy.canonical {
                if table.iter().any(|t| t == canon) {
                    phrases.push(surface.clone());
                }
            }
            phrases
        };

        let money = Regex::new(
            r"(?ix)
            \$\s?\d+(?:[.,]\d+)?\s*(?:billion|million|trillion)?
            | \b\d+(?:[.,]\d+)?\s*(?:%|percent|billion|million|trillion|won|yen|dollars|euros)",
        )
        .expect("valid money regex");

        Self {
            countries: build_class_regex(&surfaces_for(&taxonomy.entities.countries)),
            organizations: build_class_regex(&surfaces_for(&taxonomy.entities.organizations)),
            companies: build_class_regex(&surfaces_for(&taxonomy.entities.companies)),
            persons: build_class_regex(&surfaces_for(&taxonomy.entities.persons)),
            concepts: build_class_regex(&surfaces_for(&taxonomy.entities.concepts)),
            triggers: build_class_regex(&surfaces_for(&taxonomy.entities.triggers)),
            money,
            taxonomy: taxonomy.clone(),
        }
    }

    /// Every vocabulary occurrence in `text`, canonicalized, with repeats.
    ///
    /// Repeats matter: the keyword extractor counts occurrences across a
    /// batch to compute frequency scores.
    #[must_use]
    pub fn typed_occurrences(&self, text: &str) -> Vec<(String, EntityType)> {
        let classes: [(&Option<Regex>, EntityType); 6] = [
            (&self.countries, EntityType::Country),
            (&self.organizations, EntityType::Organization),
            (&self.companies, EntityType::Company),
            (&self.persons, EntityType::Person),
            (&self.concepts, EntityType::Concept),
            (&self.triggers, EntityType::Trigger),
        ];

        let mut occurrences = Vec::new();
        for (pattern, entity_type) in classes {
            let Some(re) = pattern else { continue };
            for m in re.find_iter(text) {
                let surface = m.as_str().to_lowercase();
                let canon = self.taxonomy.canonicalize(&surface).to_string();
                occurrences.push((canon, entity_type));
            }
        }
        occurrences
    }

    /// Entity and keyword sets for dedup corroboration.
    ///
    /// Entities are countries/companies/persons; keywords are concepts,
    /// triggers, and numeric/monetary tokens.
    #[must_use]
    pub fn corroboration_terms(&self, text: &str) -> ExtractedTerms {
        let mut terms = ExtractedTerms::default();
        for (canon, entity_type) in self.typed_occurrences(text) {
            match entity_type {
                EntityType::Country | EntityType::Company | EntityType::Person => {
                    terms.entities.insert(canon);
                }
                EntityType::Concept | EntityType::Trigger => {
                    terms.keywords.insert(canon);
                }
                EntityType::Organization => {}
            }
        }
        for m in self.money.find_iter(text) {
            let token: String = m.as_str().to_lowercase().split_whitespace().collect();
            terms.keywords.insert(token);
        }
        terms
    }
}

/// Compile an alternation over escaped phrases with word boundaries where
/// the phrase edges are word characters ("u.s." must not demand a boundary
/// after its trailing dot). Longest phrases first so "north korea" wins
/// over any shorter overlapping surface.
fn build_class_regex(phrases: &[String]) -> Option<Regex> {
    if phrases.is_empty() {
        return None;
    }
    let mut sorted: Vec<&String> = phrases.iter().collect();
    sorted.sort_by_key(|p| std::cmp::Reverse(p.len()));

    let alternation = sorted
        .iter()
        .map(|phrase| {
            let escaped = regex::escape(phrase);
            let lead = if phrase.starts_with(|c: char| c.is_alphanumeric()) {
                r"\b"
            } else {
                ""
            };
            let trail = if phrase.ends_with(|c: char| c.is_alphanumeric()) {
                r"\b"
            } else {
                ""
            };
            format!("{lead}{escaped}{trail}")
        })
        .collect::<Vec<_>>()
        .join("|");

    Some(Regex::new(&format!("(?i)(?:{alternation})")).expect("valid vocabulary regex"))
}
