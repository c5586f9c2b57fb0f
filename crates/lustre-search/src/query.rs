//! Query validation and request building.
//!
//! [`SearchQuery`] is the only caller input; constructing one rejects empty
//! queries before any index call can happen. [`QueryBuilder`] turns a valid
//! query into the two request shapes the service issues.

use lustre_core::{Error, Result};

use crate::request::{
    AutocompleteClause, Clause, CompoundQuery, FuzzyOptions, IndexRequest, Projection,
    SearchOperator, TextClause, TokenOrder, PRODUCT_NAME_PATH,
};
use crate::types::SearchConfig;

/// Message returned to callers that omit the query.
pub const QUERY_REQUIRED: &str = "Query is required";

/// A validated, non-blank search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validate raw caller input.
    ///
    /// Absent, empty, and whitespace-only input is an `InvalidInput` error.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(q) if !q.trim().is_empty() => Ok(Self(q.to_string())),
            _ => Err(Error::invalid_input(QUERY_REQUIRED)),
        }
    }

    /// The query exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for prefix filtering.
    pub fn lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds index requests from configuration.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    index: String,
    fuzzy: FuzzyOptions,
    exact_boost: f32,
    limit: usize,
}

impl QueryBuilder {
    /// Create a builder from search configuration.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            index: config.index_name.clone(),
            fuzzy: FuzzyOptions {
                max_edits: config.max_edits,
                prefix_length: config.prefix_length,
            },
            exact_boost: config.exact_boost,
            limit: config.max_results,
        }
    }

    /// Ranked product search.
    ///
    /// Two should-clauses over the name field: sequential fuzzy autocomplete
    /// (weight 1) and an exact text match boosted so exact hits outrank
    /// fuzzy-only ones. Projects id and name.
    pub fn search(&self, query: &SearchQuery) -> IndexRequest {
        IndexRequest {
            index: self.index.clone(),
            operator: SearchOperator::Compound(CompoundQuery {
                should: vec![
                    Clause::Autocomplete(self.autocomplete(query, Some(TokenOrder::Sequential))),
                    Clause::Text(TextClause {
                        query: query.as_str().to_string(),
                        path: PRODUCT_NAME_PATH.to_string(),
                        boost: self.exact_boost,
                    }),
                ],
            }),
            projection: Projection::IdName,
            limit: self.limit,
        }
    }

    /// Fuzzy autocomplete lookup used to harvest suggestion vocabulary and
    /// related products.
    pub fn suggestion(&self, query: &SearchQuery) -> IndexRequest {
        IndexRequest {
            index: self.index.clone(),
            operator: SearchOperator::Autocomplete(self.autocomplete(query, None)),
            projection: Projection::Summary,
            limit: self.limit,
        }
    }

    fn autocomplete(&self, query: &SearchQuery, order: Option<TokenOrder>) -> AutocompleteClause {
        AutocompleteClause {
            query: query.as_str().to_string(),
            path: PRODUCT_NAME_PATH.to_string(),
            token_order: order,
            fuzzy: Some(self.fuzzy),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
