//! Product search and typeahead suggestions for the lustre catalog.
//!
//! # Features
//!
//! - `tantivy-index`: Enable the on-disk Tantivy index (default)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     lustre-search                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchService (search + suggest orchestration)             │
//! │  QueryBuilder  (typed IndexRequest shapes)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  normalize → StopwordFilter → Vocabulary → SuggestionComposer│
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchIndex trait                                          │
//! │  ├── MemoryIndex (linear scan, strsim)                      │
//! │  └── TantivyIndex (fuzzy prefix automata)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Catalog (JSON) → IndexBuilder → Indexer                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lustre_search::{create_search_index, SearchConfig, SearchService};
//!
//! let config = SearchConfig::default();
//! let index = create_search_index(&config).await?;
//! let service = SearchService::new(Arc::from(index), &config);
//!
//! let results = service.search(Some("diamond ring")).await?;
//! let suggestions = service.suggest(Some("dia")).await?;
//! ```

// Core modules (always available)
pub mod backend;
pub mod document;
pub mod normalize;
pub mod query;
pub mod request;
pub mod service;
pub mod stopwords;
pub mod suggest;
pub mod types;
pub mod vocabulary;

// Feature-gated Tantivy modules
#[cfg(feature = "tantivy-index")]
pub mod builder;

#[cfg(feature = "tantivy-index")]
pub mod indexer;

#[cfg(feature = "tantivy-index")]
pub mod schema;

#[cfg(feature = "tantivy-index")]
pub mod tantivy_index;

// Re-exports
pub use backend::{create_search_index, MemoryIndex, SearchIndex};
pub use document::{Catalog, CategoryTerm, ProductDocument};
pub use normalize::normalize;
pub use query::{QueryBuilder, SearchQuery, QUERY_REQUIRED};
pub use request::{
    AutocompleteClause, Clause, CompoundQuery, FuzzyOptions, IndexRequest, Projection,
    SearchOperator, TextClause, TokenOrder,
};
pub use service::{SearchResults, SearchService};
pub use stopwords::StopwordFilter;
pub use suggest::{RelatedProduct, SuggestionComposer, SuggestionResponse};
pub use types::{SearchConfig, SuggestionMode};
pub use vocabulary::Vocabulary;

#[cfg(feature = "tantivy-index")]
pub use builder::{IndexBuilder, IndexStats};

#[cfg(feature = "tantivy-index")]
pub use indexer::Indexer;

#[cfg(feature = "tantivy-index")]
pub use schema::{CategorySchema, ProductSchema};

#[cfg(feature = "tantivy-index")]
pub use tantivy_index::TantivyIndex;
