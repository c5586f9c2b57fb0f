//! Typed index request shapes.
//!
//! An [`IndexRequest`] describes what the search index is asked to do,
//! independent of the backend that executes it. It serializes to the same
//! nested form a managed search stage uses:
//!
//! ```json
//! {"index": "ringSearch",
//!  "operator": {"compound": {"should": [
//!     {"autocomplete": {"query": "dia", "path": "name", "tokenOrder": "sequential",
//!                       "fuzzy": {"maxEdits": 2, "prefixLength": 1}}},
//!     {"text": {"query": "dia", "path": "name", "boost": 5.0}}]}},
//!  "projection": "idName", "limit": 100}
//! ```

use serde::{Deserialize, Serialize};

use crate::document::ProductDocument;

/// Document field holding the product display name.
pub const PRODUCT_NAME_PATH: &str = "name";

/// A complete request against the product index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRequest {
    /// Name of the search index.
    pub index: String,
    /// Matching operator.
    pub operator: SearchOperator,
    /// Which document fields to return.
    pub projection: Projection,
    /// Maximum documents to return.
    pub limit: usize,
}

impl IndexRequest {
    /// All leaf clauses, in declaration order.
    pub fn clauses(&self) -> Vec<Clause> {
        match &self.operator {
            SearchOperator::Compound(compound) => compound.should.clone(),
            SearchOperator::Autocomplete(clause) => vec![Clause::Autocomplete(clause.clone())],
        }
    }

    /// Whether this is the ranked compound search (autocomplete + boosted text).
    pub fn is_compound(&self) -> bool {
        matches!(self.operator, SearchOperator::Compound(_))
    }
}

/// Top-level matching operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchOperator {
    /// Several clauses combined; a document matches if any clause matches
    /// and its score is the sum of the matching clauses.
    Compound(CompoundQuery),
    /// A single autocomplete clause.
    Autocomplete(AutocompleteClause),
}

/// Should-combined clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundQuery {
    /// Clauses that contribute to the score when they match.
    pub should: Vec<Clause>,
}

/// A single matching clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Clause {
    /// Prefix/partial token match, optionally fuzzy.
    Autocomplete(AutocompleteClause),
    /// Full-token text match with a score boost.
    Text(TextClause),
}

/// Autocomplete match against one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteClause {
    /// Raw query text.
    pub query: String,
    /// Field to match.
    pub path: String,
    /// Token order constraint; `None` means any order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_order: Option<TokenOrder>,
    /// Fuzzy tolerance; `None` means exact prefixes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyOptions>,
}

/// How query tokens must line up with document tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenOrder {
    /// Any token may match on its own.
    Any,
    /// Every query token must match, in query order.
    Sequential,
}

/// Fuzzy-matching tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyOptions {
    /// Maximum Levenshtein edits between query token and indexed token.
    pub max_edits: u8,
    /// Leading characters that must match exactly.
    pub prefix_length: usize,
}

/// Exact-token text match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextClause {
    /// Raw query text.
    pub query: String,
    /// Field to match.
    pub path: String,
    /// Score multiplier relative to an unboosted clause (weight 1).
    pub boost: f32,
}

/// Fields returned per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Projection {
    /// `id` and `name` only.
    IdName,
    /// `id`, `name`, and `image`/`price` when present.
    Summary,
}

impl Projection {
    /// Copy the projected fields of `doc`.
    pub fn apply(self, doc: &ProductDocument) -> ProductDocument {
        match self {
            Projection::IdName => ProductDocument::new(doc.id.clone(), doc.name.clone()),
            Projection::Summary => doc.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
