//! Stopword filtering for product-derived vocabulary.
//!
//! Product names are full of material, setting, and shape words ("14K",
//! "WHITE", "GOLD", "SETTING") that make poor typeahead suggestions. The
//! filter starts from [`CATALOG_STOPWORDS`] and supports:
//!
//! - Custom stopwords: additional words to filter
//! - Allowlist: words to preserve even if they are stopwords
//! - The generic English list from the `stop-words` crate (opt-in)
//!
//! # Example
//!
//! ```rust
//! use lustre_search::stopwords::StopwordFilter;
//! use lustre_search::SearchConfig;
//!
//! let config = SearchConfig {
//!     allowlist: vec!["rose".to_string()],
//!     ..Default::default()
//! };
//! let filter = StopwordFilter::new(&config);
//!
//! assert!(filter.is_stopword("gold"));
//! assert!(!filter.is_stopword("rose"));
//! assert!(!filter.is_stopword("sapphire"));
//! ```

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use crate::SearchConfig;

/// Words that appear in most product names and carry no category meaning.
pub const CATALOG_STOPWORDS: &[&str] = &[
    "14K", "WHITE", "GOLD", "AND", "SEMI", "MOUNT", "RS", "MM", "ROUND", "WITH", "IN", "PUSH",
    "BACKS", "YELLOW", "SETTING", "STONE", "CARAT", "OVAL", "XMM", "DUAL", "ROSE", "HALO",
    "EARRINGS", "PENDANT",
];

/// Stopword filter for vocabulary tokens.
pub struct StopwordFilter {
    stopwords: HashSet<String>,
    allowlist: HashSet<String>,
    enabled: bool,
}

impl StopwordFilter {
    /// Create a new stopword filter from configuration.
    pub fn new(config: &SearchConfig) -> Self {
        let mut stopwords: HashSet<String> =
            CATALOG_STOPWORDS.iter().map(|s| s.to_lowercase()).collect();

        if config.english_stopwords {
            stopwords.extend(get(LANGUAGE::English).iter().map(|s| s.to_lowercase()));
        }

        for word in &config.custom_stopwords {
            stopwords.insert(word.to_lowercase());
        }

        let allowlist: HashSet<String> =
            config.allowlist.iter().map(|s| s.to_lowercase()).collect();

        Self {
            stopwords,
            allowlist,
            enabled: config.stopwords_enabled,
        }
    }

    /// Create a disabled filter (passes all words through).
    pub fn disabled() -> Self {
        Self {
            stopwords: HashSet::new(),
            allowlist: HashSet::new(),
            enabled: false,
        }
    }

    /// Check if a word is a stopword (case-insensitive).
    ///
    /// Always `false` when the filter is disabled or the word is allowlisted.
    pub fn is_stopword(&self, word: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let lower = word.to_lowercase();
        !self.allowlist.contains(&lower) && self.stopwords.contains(&lower)
    }

    /// Keep only the tokens that are not stopwords, preserving order.
    pub fn retain_content_words(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.is_stopword(token))
            .collect()
    }

    /// Get the number of stopwords in the filter.
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if filtering is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl std::fmt::Debug for StopwordFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordFilter")
            .field("enabled", &self.enabled)
            .field("stopword_count", &self.stopwords.len())
            .field("allowlist_count", &self.allowlist.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
