//! Search index trait and factory.
//!
//! The product catalog is owned by an external search index; this module
//! defines the seam the service talks to, plus an in-memory implementation.
//!
//! # Backends
//!
//! - `TantivyIndex`: on-disk Tantivy indexes (requires `tantivy-index` feature)
//! - `MemoryIndex`: linear scan over a loaded catalog
//!
//! # Example
//!
//! ```rust,ignore
//! use lustre_search::{create_search_index, QueryBuilder, SearchConfig, SearchQuery};
//!
//! let config = SearchConfig::default();
//! let index = create_search_index(&config).await?;
//!
//! let query = SearchQuery::parse(Some("diamond"))?;
//! let request = QueryBuilder::new(&config).search(&query);
//! let products = index.search_products(&request).await?;
//! ```

use std::cmp::Ordering;
use std::path::Path;

use async_trait::async_trait;
use lustre_core::{expand_path, Error, Result};

use crate::document::{Catalog, CategoryTerm, ProductDocument};
use crate::request::{
    AutocompleteClause, Clause, FuzzyOptions, IndexRequest, SearchOperator, TextClause,
    TokenOrder,
};
use crate::types::SearchConfig;

/// Abstract search index.
///
/// Implementations execute [`IndexRequest`]s and expose the canonical
/// category vocabulary. Every call is a single attempt; failures surface
/// as errors and are never retried here.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Execute a product request.
    ///
    /// Returns documents ordered by relevance (highest first), projected
    /// according to `request.projection`.
    async fn search_products(&self, request: &IndexRequest) -> Result<Vec<ProductDocument>>;

    /// Fetch every canonical category term.
    async fn category_terms(&self) -> Result<Vec<CategoryTerm>>;

    /// Get the backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Create a search index based on configuration.
///
/// Selection logic:
/// 1. `"tantivy"` with the feature enabled and an index on disk → `TantivyIndex`
/// 2. `"tantivy"` without a usable index → `MemoryIndex` over the catalog file
///    (or empty), with a warning
/// 3. `"memory"` → `MemoryIndex` over the catalog file (or empty)
///
/// # Errors
///
/// Returns an error for an unknown backend name or an unreadable catalog.
pub async fn create_search_index(config: &SearchConfig) -> Result<Box<dyn SearchIndex>> {
    match config.backend.as_str() {
        "tantivy" => {
            #[cfg(feature = "tantivy-index")]
            {
                if let Some(index) = open_tantivy(config) {
                    return Ok(Box::new(index));
                }
            }
            Ok(Box::new(MemoryIndex::from_config(config)?))
        }
        "memory" => Ok(Box::new(MemoryIndex::from_config(config)?)),
        other => Err(Error::config(format!("Unknown search backend '{other}'"))),
    }
}

#[cfg(feature = "tantivy-index")]
fn open_tantivy(config: &SearchConfig) -> Option<crate::tantivy_index::TantivyIndex> {
    use crate::tantivy_index::TantivyIndex;

    let Some(ref index_path) = config.index_path else {
        log::warn!("No index_path configured, falling back to memory index");
        return None;
    };
    let path = expand_path(index_path);
    if !TantivyIndex::exists(&path) {
        log::warn!(
            "No Tantivy index at {}, falling back to memory index",
            path.display()
        );
        return None;
    }
    match TantivyIndex::open(&path) {
        Ok(index) => Some(index),
        Err(e) => {
            log::warn!("Failed to open Tantivy index: {e}, falling back to memory index");
            None
        }
    }
}

// ============================================================================
// MemoryIndex
// ============================================================================

/// In-memory linear-scan index.
///
/// Evaluates the same request shape as the Tantivy backend using Levenshtein
/// distance over name prefixes. Suitable for small catalogs and tests.
///
/// # Limitations
///
/// - O(n) per request
/// - Scores are match-quality heuristics, not BM25
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    catalog: Catalog,
}

impl MemoryIndex {
    /// Create an index over a catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Load the catalog named by `config.catalog_path`, or start empty.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        match config.catalog_path {
            Some(ref path) => Ok(Self::new(Catalog::from_path(&expand_path(path))?)),
            None => Ok(Self::default()),
        }
    }

    /// Load a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(Catalog::from_path(path)?))
    }

    fn score(&self, request: &IndexRequest, doc: &ProductDocument) -> Option<f32> {
        let doc_tokens = name_tokens(&doc.name);
        match &request.operator {
            SearchOperator::Autocomplete(clause) => score_autocomplete(clause, &doc_tokens),
            SearchOperator::Compound(compound) => {
                let scores: Vec<f32> = compound
                    .should
                    .iter()
                    .filter_map(|clause| match clause {
                        Clause::Autocomplete(ac) => score_autocomplete(ac, &doc_tokens),
                        Clause::Text(text) => score_text(text, &doc_tokens),
                    })
                    .collect();
                (!scores.is_empty()).then(|| scores.iter().sum())
            }
        }
    }
}

#[async_trait]
impl SearchIndex for MemoryIndex {
    async fn search_products(&self, request: &IndexRequest) -> Result<Vec<ProductDocument>> {
        let mut scored: Vec<(f32, &ProductDocument)> = self
            .catalog
            .products
            .iter()
            .filter_map(|doc| self.score(request, doc).map(|score| (score, doc)))
            .collect();

        // Stable sort keeps catalog order between equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        log::debug!(
            "MemoryIndex: {} of {} products matched",
            scored.len(),
            self.catalog.products.len()
        );

        Ok(scored
            .into_iter()
            .take(request.limit)
            .map(|(_, doc)| request.projection.apply(doc))
            .collect())
    }

    async fn category_terms(&self) -> Result<Vec<CategoryTerm>> {
        Ok(self.catalog.categories.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Split a name the way the index tokenizer does: lowercase runs of
/// alphanumeric characters.
pub fn name_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Edit distance between `query_token` and the closest prefix of
/// `doc_token`, if within tolerance.
fn prefix_distance(query_token: &str, doc_token: &str, fuzzy: Option<FuzzyOptions>) -> Option<usize> {
    let Some(fuzzy) = fuzzy else {
        return doc_token.starts_with(query_token).then_some(0);
    };

    let query: Vec<char> = query_token.chars().collect();
    let doc: Vec<char> = doc_token.chars().collect();

    let guard = fuzzy.prefix_length.min(query.len());
    if doc.len() < guard || query[..guard] != doc[..guard] {
        return None;
    }

    let max_edits = usize::from(fuzzy.max_edits);
    let shortest = query.len().saturating_sub(max_edits);
    let longest = (query.len() + max_edits).min(doc.len());

    (shortest..=longest)
        .filter_map(|len| {
            let prefix: String = doc[..len].iter().collect();
            let distance = strsim::levenshtein(query_token, &prefix);
            (distance <= max_edits).then_some(distance)
        })
        .min()
}

fn token_score(distance: usize) -> f32 {
    1.0 / (1.0 + distance as f32)
}

fn score_autocomplete(clause: &AutocompleteClause, doc_tokens: &[String]) -> Option<f32> {
    let query_tokens = name_tokens(&clause.query);
    if query_tokens.is_empty() {
        return None;
    }

    match clause.token_order.unwrap_or(TokenOrder::Any) {
        TokenOrder::Sequential => {
            let mut position = 0;
            let mut score = 0.0;
            for query_token in &query_tokens {
                let (index, distance) = doc_tokens
                    .iter()
                    .enumerate()
                    .skip(position)
                    .find_map(|(i, doc_token)| {
                        prefix_distance(query_token, doc_token, clause.fuzzy).map(|d| (i, d))
                    })?;
                score += token_score(distance);
                position = index + 1;
            }
            Some(score)
        }
        TokenOrder::Any => {
            let score: f32 = query_tokens
                .iter()
                .filter_map(|query_token| {
                    doc_tokens
                        .iter()
                        .filter_map(|doc_token| {
                            prefix_distance(query_token, doc_token, clause.fuzzy)
                        })
                        .min()
                        .map(token_score)
                })
                .sum();
            (score > 0.0).then_some(score)
        }
    }
}

fn score_text(clause: &TextClause, doc_tokens: &[String]) -> Option<f32> {
    let query_tokens = name_tokens(&clause.query);
    let matched = query_tokens
        .iter()
        .filter(|token| doc_tokens.contains(token))
        .count();
    (matched > 0).then(|| clause.boost * matched as f32 / query_tokens.len() as f32)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryBuilder, SearchQuery};
    use crate::request::Projection;

    fn catalog() -> Catalog {
        Catalog {
            products: vec![
                ProductDocument::new("1", "14K White Gold Diamond Ring (PS231)")
                    .with_image("https://cdn/1.jpg")
                    .with_price("1299"),
                ProductDocument::new("2", "Dial Face Pendant"),
                ProductDocument::new("3", "Blue Sapphire Halo Earrings"),
                ProductDocument::new("4", "Diamond"),
            ],
            categories: vec![CategoryTerm::new(Some("Diamond"), Some("Rings"))],
        }
    }

    fn request(kind: &str, q: &str) -> IndexRequest {
        let builder = QueryBuilder::new(&SearchConfig::default());
        let query = SearchQuery::parse(Some(q)).unwrap();
        match kind {
            "search" => builder.search(&query),
            _ => builder.suggestion(&query),
        }
    }

    fn ids(docs: &[ProductDocument]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    // ------------------------------------------------------------------------
    // Matching primitives
    // ------------------------------------------------------------------------

    #[test]
    fn test_name_tokens() {
        assert_eq!(
            name_tokens("Ring (PS231) 14MM"),
            vec!["ring", "ps231", "14mm"]
        );
    }

    #[test]
    fn test_prefix_distance_exact_prefix() {
        assert_eq!(prefix_distance("dia", "diamond", None), Some(0));
        assert_eq!(prefix_distance("dim", "diamond", None), None);
    }

    #[test]
    fn test_prefix_distance_fuzzy() {
        let fuzzy = Some(FuzzyOptions {
            max_edits: 2,
            prefix_length: 1,
        });
        assert_eq!(prefix_distance("dimond", "diamond", fuzzy), Some(1));
        assert_eq!(prefix_distance("saphire", "sapphire", fuzzy), Some(1));
        // First character must match exactly
        assert_eq!(prefix_distance("liamond", "diamond", fuzzy), None);
        assert_eq!(prefix_distance("emerald", "diamond", fuzzy), None);
    }

    // ------------------------------------------------------------------------
    // MemoryIndex
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_search_exact_outranks_fuzzy() {
        let index = MemoryIndex::new(catalog());
        let docs = index.search_products(&request("search", "diamond")).await.unwrap();
        // Equal scores keep catalog order
        assert_eq!(ids(&docs), vec!["1", "4"]);
        assert_eq!(docs[0].image, None);
    }

    #[tokio::test]
    async fn test_search_tolerates_typos() {
        let index = MemoryIndex::new(catalog());
        let docs = index.search_products(&request("search", "dimond rng")).await.unwrap();
        assert_eq!(ids(&docs), vec!["1"]);
    }

    #[tokio::test]
    async fn test_sequential_order_required_for_autocomplete_clause() {
        let index = MemoryIndex::new(catalog());
        // Out of order: autocomplete clause fails, text clause still matches
        let docs = index.search_products(&request("search", "ring diamond")).await.unwrap();
        assert_eq!(ids(&docs), vec!["1", "4"]);

        let docs = index.search_products(&request("search", "rng dimond")).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_suggestion_projects_summary() {
        let index = MemoryIndex::new(catalog());
        let docs = index.search_products(&request("suggestion", "dia")).await.unwrap();
        assert!(ids(&docs).contains(&"1"));
        assert!(ids(&docs).contains(&"2"));
        let ring = docs.iter().find(|d| d.id == "1").unwrap();
        assert_eq!(ring.price.as_deref(), Some("1299"));
        assert_eq!(request("suggestion", "dia").projection, Projection::Summary);
    }

    #[tokio::test]
    async fn test_limit_applied() {
        let index = MemoryIndex::new(catalog());
        let mut req = request("suggestion", "d");
        req.limit = 1;
        let docs = index.search_products(&req).await.unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[tokio::test]
    async fn test_category_terms() {
        let index = MemoryIndex::new(catalog());
        let terms = index.category_terms().await.unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(index.name(), "memory");
    }

    // ------------------------------------------------------------------------
    // Factory
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_memory_index_from_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&catalog()).unwrap()).unwrap();

        let config = SearchConfig {
            backend: "memory".to_string(),
            catalog_path: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        };
        let index = create_search_index(&config).await.unwrap();
        assert_eq!(index.name(), "memory");
        assert_eq!(index.category_terms().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_tantivy_without_index_falls_back() {
        let config = SearchConfig {
            index_path: Some("/nonexistent/lustre-index".to_string()),
            ..Default::default()
        };
        let index = create_search_index(&config).await.unwrap();
        assert_eq!(index.name(), "memory");
    }

    #[tokio::test]
    async fn test_create_unknown_backend() {
        let config = SearchConfig {
            backend: "elastic".to_string(),
            ..Default::default()
        };
        assert!(create_search_index(&config).await.is_err());
    }
}
