//! Tantivy search index implementation.
//!
//! Provides `TantivyIndex`, which reads the product and category indexes
//! written by [`IndexBuilder`](crate::builder::IndexBuilder).
//! This module is only available with the `tantivy-index` feature.
//!
//! Autocomplete clauses become one sub-query per query token: a Levenshtein
//! prefix automaton intersected with an exact-prefix regex that pins the
//! first `prefix_length` characters. Sequential token order is approximated
//! by requiring every token; positions are not checked.

use std::path::Path;

use async_trait::async_trait;
use lustre_core::{Error, Result};
use tantivy::collector::{DocSetCollector, TopDocs};
use tantivy::query::{
    AllQuery, BooleanQuery, BoostQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery,
};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::{DocAddress, Index, IndexReader, ReloadPolicy, TantivyDocument, Term};

use crate::backend::{name_tokens, SearchIndex};
use crate::builder::IndexBuilder;
use crate::document::{CategoryTerm, ProductDocument};
use crate::request::{AutocompleteClause, Clause, IndexRequest, SearchOperator, TextClause, TokenOrder};
use crate::schema::{CategorySchema, ProductSchema};

/// Largest edit distance the Levenshtein automaton supports.
const MAX_SUPPORTED_EDITS: u8 = 2;

/// Tantivy-backed search index.
pub struct TantivyIndex {
    products: IndexReader,
    categories: IndexReader,
    product_schema: ProductSchema,
    category_schema: CategorySchema,
}

impl TantivyIndex {
    /// Open the indexes under `index_root`.
    pub fn open(index_root: &Path) -> Result<Self> {
        let products = Index::open_in_dir(IndexBuilder::products_path(index_root))
            .map_err(|e| tantivy_error("Failed to open product index", e))?;
        let categories = Index::open_in_dir(IndexBuilder::categories_path(index_root))
            .map_err(|e| tantivy_error("Failed to open category index", e))?;
        log::info!("Opened Tantivy index at {}", index_root.display());
        Self::from_indexes(products, categories)
    }

    /// Wrap already-open indexes.
    pub fn from_indexes(products: Index, categories: Index) -> Result<Self> {
        ProductSchema::register_tokenizers(&products);
        Ok(Self {
            products: reader(&products)?,
            categories: reader(&categories)?,
            product_schema: ProductSchema::build(),
            category_schema: CategorySchema::build(),
        })
    }

    /// Check if both indexes exist under `index_root`.
    pub fn exists(index_root: &Path) -> bool {
        IndexBuilder::products_path(index_root).join("meta.json").exists()
            && IndexBuilder::categories_path(index_root).join("meta.json").exists()
    }

    /// Pick up commits made since the index was opened.
    pub fn reload(&self) -> Result<()> {
        self.products
            .reload()
            .map_err(|e| tantivy_error("Failed to reload product index", e))?;
        self.categories
            .reload()
            .map_err(|e| tantivy_error("Failed to reload category index", e))
    }

    fn build_query(&self, request: &IndexRequest) -> Result<Box<dyn Query>> {
        match &request.operator {
            SearchOperator::Autocomplete(clause) => self.autocomplete_query(clause),
            SearchOperator::Compound(compound) => {
                let mut should = Vec::with_capacity(compound.should.len());
                for clause in &compound.should {
                    let query = match clause {
                        Clause::Autocomplete(ac) => self.autocomplete_query(ac)?,
                        Clause::Text(text) => self.text_query(text),
                    };
                    should.push((Occur::Should, query));
                }
                Ok(Box::new(BooleanQuery::new(should)))
            }
        }
    }

    fn autocomplete_query(&self, clause: &AutocompleteClause) -> Result<Box<dyn Query>> {
        let field = self.product_schema.name;
        let occur = match clause.token_order {
            Some(TokenOrder::Sequential) => Occur::Must,
            Some(TokenOrder::Any) | None => Occur::Should,
        };

        let mut token_queries = Vec::new();
        for token in name_tokens(&clause.query) {
            token_queries.push((occur, token_prefix_query(field, &token, clause)?));
        }
        Ok(Box::new(BooleanQuery::new(token_queries)))
    }

    fn text_query(&self, clause: &TextClause) -> Box<dyn Query> {
        let field = self.product_schema.name;
        let terms: Vec<(Occur, Box<dyn Query>)> = name_tokens(&clause.query)
            .into_iter()
            .map(|token| {
                let query: Box<dyn Query> = Box::new(TermQuery::new(
                    Term::from_field_text(field, &token),
                    IndexRecordOption::WithFreqs,
                ));
                (Occur::Should, query)
            })
            .collect();
        Box::new(BoostQuery::new(Box::new(BooleanQuery::new(terms)), clause.boost))
    }
}

fn token_prefix_query(field: Field, token: &str, clause: &AutocompleteClause) -> Result<Box<dyn Query>> {
    let Some(fuzzy) = clause.fuzzy else {
        let pattern = format!("{}.*", regex::escape(token));
        return Ok(Box::new(regex_query(&pattern, field)?));
    };

    let distance = fuzzy.max_edits.min(MAX_SUPPORTED_EDITS);
    if distance < fuzzy.max_edits {
        log::debug!("Clamping max_edits {} to {distance}", fuzzy.max_edits);
    }

    let fuzzy_query: Box<dyn Query> = Box::new(FuzzyTermQuery::new_prefix(
        Term::from_field_text(field, token),
        distance,
        true,
    ));

    let guard: String = token.chars().take(fuzzy.prefix_length).collect();
    if guard.is_empty() {
        return Ok(fuzzy_query);
    }
    let pattern = format!("{}.*", regex::escape(&guard));
    let guard_query: Box<dyn Query> = Box::new(regex_query(&pattern, field)?);

    Ok(Box::new(BooleanQuery::new(vec![
        (Occur::Must, fuzzy_query),
        (Occur::Must, guard_query),
    ])))
}

fn regex_query(pattern: &str, field: Field) -> Result<RegexQuery> {
    RegexQuery::from_pattern(pattern, field)
        .map_err(|e| tantivy_error("Failed to build prefix query", e))
}

fn reader(index: &Index) -> Result<IndexReader> {
    index
        .reader_builder()
        .reload_policy(ReloadPolicy::OnCommitWithDelay)
        .try_into()
        .map_err(|e| tantivy_error("Failed to open index reader", e))
}

fn tantivy_error(message: &str, e: tantivy::TantivyError) -> Error {
    Error::upstream_with_source(message, e)
}

#[async_trait]
impl SearchIndex for TantivyIndex {
    async fn search_products(&self, request: &IndexRequest) -> Result<Vec<ProductDocument>> {
        if request.limit == 0 {
            return Ok(Vec::new());
        }

        let query = self.build_query(request)?;
        let searcher = self.products.searcher();
        let top_docs = searcher
            .search(query.as_ref(), &TopDocs::with_limit(request.limit))
            .map_err(|e| tantivy_error("Product search failed", e))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| tantivy_error("Failed to load product", e))?;
            let product = self.product_schema.from_document(&doc);
            results.push(request.projection.apply(&product));
        }

        log::debug!("TantivyIndex: {} products matched", results.len());
        Ok(results)
    }

    async fn category_terms(&self) -> Result<Vec<CategoryTerm>> {
        let searcher = self.categories.searcher();
        let addresses = searcher
            .search(&AllQuery, &DocSetCollector)
            .map_err(|e| tantivy_error("Category scan failed", e))?;

        let mut addresses: Vec<DocAddress> = addresses.into_iter().collect();
        addresses.sort();

        let mut terms = Vec::with_capacity(addresses.len());
        for address in addresses {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| tantivy_error("Failed to load category", e))?;
            terms.push(self.category_schema.from_document(&doc));
        }
        Ok(terms)
    }

    fn name(&self) -> &str {
        "tantivy"
    }
}

impl std::fmt::Debug for TantivyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyIndex")
            .field("products", &self.products.searcher().num_docs())
            .field("categories", &self.categories.searcher().num_docs())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Catalog;
    use crate::query::{QueryBuilder, SearchQuery};
    use crate::types::SearchConfig;

    fn catalog() -> Catalog {
        Catalog {
            products: vec![
                ProductDocument::new("1", "14K White Gold Diamond Ring")
                    .with_image("https://cdn/1.jpg")
                    .with_price("1299"),
                ProductDocument::new("2", "Dial Face Pendant"),
                ProductDocument::new("3", "Blue Sapphire Halo Earrings"),
            ],
            categories: vec![
                CategoryTerm::new(Some("Diamond"), Some("Rings")),
                CategoryTerm::new(Some("Sapphire"), Some("Earrings")),
            ],
        }
    }

    fn built_index() -> (tempfile::TempDir, TantivyIndex) {
        let dir = tempfile::tempdir().unwrap();
        IndexBuilder::new().build(&catalog(), dir.path()).unwrap();
        let index = TantivyIndex::open(dir.path()).unwrap();
        (dir, index)
    }

    fn builder() -> QueryBuilder {
        QueryBuilder::new(&SearchConfig::default())
    }

    fn ids(docs: &[ProductDocument]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!TantivyIndex::exists(dir.path()));
        IndexBuilder::new().build(&catalog(), dir.path()).unwrap();
        assert!(TantivyIndex::exists(dir.path()));
    }

    #[tokio::test]
    async fn test_search_exact_name() {
        let (_dir, index) = built_index();
        let query = SearchQuery::parse(Some("diamond ring")).unwrap();
        let docs = index.search_products(&builder().search(&query)).await.unwrap();
        assert_eq!(ids(&docs), vec!["1"]);
        // Search projects id and name only
        assert_eq!(docs[0].image, None);
    }

    #[tokio::test]
    async fn test_search_with_typo() {
        let (_dir, index) = built_index();
        let query = SearchQuery::parse(Some("saphire")).unwrap();
        let docs = index.search_products(&builder().search(&query)).await.unwrap();
        assert_eq!(ids(&docs), vec!["3"]);
    }

    #[tokio::test]
    async fn test_prefix_guard_rejects_first_letter_change() {
        let (_dir, index) = built_index();
        let query = SearchQuery::parse(Some("xapphire")).unwrap();
        let docs = index.search_products(&builder().search(&query)).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_suggestion_prefix() {
        let (_dir, index) = built_index();
        let query = SearchQuery::parse(Some("dia")).unwrap();
        let docs = index
            .search_products(&builder().suggestion(&query))
            .await
            .unwrap();
        let found = ids(&docs);
        assert!(found.contains(&"1"));
        assert!(found.contains(&"2"));
        let ring = docs.iter().find(|d| d.id == "1").unwrap();
        assert_eq!(ring.price.as_deref(), Some("1299"));
    }

    #[tokio::test]
    async fn test_category_terms() {
        let (_dir, index) = built_index();
        let terms = index.category_terms().await.unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].gemstone_name.as_deref(), Some("Diamond"));
        assert_eq!(index.name(), "tantivy");
    }

    #[tokio::test]
    async fn test_zero_limit() {
        let (_dir, index) = built_index();
        let query = SearchQuery::parse(Some("dia")).unwrap();
        let mut request = builder().suggestion(&query);
        request.limit = 0;
        assert!(index.search_products(&request).await.unwrap().is_empty());
    }
}
