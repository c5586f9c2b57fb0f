//! Search and suggestion orchestration.
//!
//! `SearchService` validates the caller's query, issues index requests and
//! shapes the results. Every call is independent: the vocabulary and
//! filtered lists are built per request and dropped with the response.

use std::sync::Arc;

use lustre_core::Result;
use serde::Serialize;

use crate::backend::SearchIndex;
use crate::document::ProductDocument;
use crate::query::{QueryBuilder, SearchQuery};
use crate::request::IndexRequest;
use crate::stopwords::StopwordFilter;
use crate::suggest::{SuggestionComposer, SuggestionResponse};
use crate::types::{SearchConfig, SuggestionMode};
use crate::vocabulary::Vocabulary;

/// Ranked product search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<ProductDocument>,
}

/// Search and suggestion entry point.
#[derive(Clone)]
pub struct SearchService {
    index: Arc<dyn SearchIndex>,
    queries: QueryBuilder,
    stopwords: Arc<StopwordFilter>,
    composer: SuggestionComposer,
}

impl SearchService {
    pub fn new(index: Arc<dyn SearchIndex>, config: &SearchConfig) -> Self {
        Self {
            index,
            queries: QueryBuilder::new(config),
            stopwords: Arc::new(match config.suggestion_mode {
                SuggestionMode::Catalog => StopwordFilter::disabled(),
                SuggestionMode::Legacy => StopwordFilter::new(config),
            }),
            composer: SuggestionComposer::new(config.suggestion_mode),
        }
    }

    /// Name of the backing index.
    pub fn backend_name(&self) -> &str {
        self.index.name()
    }

    /// Run a ranked product search.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a missing or blank query (no index call is made);
    /// otherwise whatever the index returns.
    pub async fn search(&self, raw_query: Option<&str>) -> Result<SearchResults> {
        let query = SearchQuery::parse(raw_query)?;
        let request = self.queries.search(&query);
        log_request(&request);

        let data = self.index.search_products(&request).await?;
        log::debug!("search '{query}': {} hits", data.len());

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    /// Build typeahead suggestions.
    ///
    /// In catalog mode the category vocabulary is fetched first, then the
    /// product matches, and every product token is a candidate. Legacy mode
    /// skips the categories and drops stopwords. A failure in either lookup
    /// aborts the whole response.
    pub async fn suggest(&self, raw_query: Option<&str>) -> Result<SuggestionResponse> {
        let query = SearchQuery::parse(raw_query)?;

        let terms = match self.composer.mode() {
            SuggestionMode::Catalog => self.index.category_terms().await?,
            SuggestionMode::Legacy => Vec::new(),
        };

        let request = self.queries.suggestion(&query);
        log_request(&request);
        let products = self.index.search_products(&request).await?;

        let vocabulary = Vocabulary::build(&terms, &products, &self.stopwords);
        let response = self.composer.compose(&query, &vocabulary, &products);

        log::debug!(
            "suggest '{query}': {} candidates, {} suggested, {} products",
            vocabulary.len(),
            response.words().len(),
            products.len()
        );
        Ok(response)
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("index", &self.index.name())
            .field("mode", &self.composer.mode())
            .finish()
    }
}

fn log_request(request: &IndexRequest) {
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(request) {
            Ok(json) => log::debug!("index request: {json}"),
            Err(e) => log::debug!("index request not serializable: {e}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
