//! Configuration types for the search crate.
//!
//! These types are always available regardless of feature flags.

use serde::{Deserialize, Serialize};

/// Which suggestion algorithm `/suggestion` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMode {
    /// Canonical category vocabulary plus every product token; each prefix
    /// match is returned together with the related products.
    #[default]
    Catalog,
    /// Product tokens only, stopword-filtered; returns the single best match.
    Legacy,
}

/// Search configuration.
///
/// Loaded as the `[search]` section of the application config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Backend type: "tantivy" or "memory".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Name reported on index requests (the managed search index name).
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Directory holding the Tantivy indexes.
    pub index_path: Option<String>,

    /// JSON catalog used by `lustre index` and by the memory backend.
    pub catalog_path: Option<String>,

    /// Suggestion algorithm.
    #[serde(default)]
    pub suggestion_mode: SuggestionMode,

    /// Maximum Levenshtein distance for autocomplete matches.
    #[serde(default = "default_max_edits")]
    pub max_edits: u8,

    /// Leading characters that must match exactly before fuzzing applies.
    #[serde(default = "default_prefix_length")]
    pub prefix_length: usize,

    /// Weight of the exact-text clause relative to autocomplete (weight 1).
    #[serde(default = "default_exact_boost")]
    pub exact_boost: f32,

    /// Upper bound on documents returned per index request.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Enable stopword filtering of product-derived tokens in legacy mode.
    #[serde(default = "default_true")]
    pub stopwords_enabled: bool,

    /// Also treat the generic English stopword list as stopwords.
    #[serde(default)]
    pub english_stopwords: bool,

    /// Custom stopwords to add.
    #[serde(default)]
    pub custom_stopwords: Vec<String>,

    /// Words to preserve (not filter as stopwords).
    #[serde(default)]
    pub allowlist: Vec<String>,
}

fn default_backend() -> String {
    "tantivy".to_string()
}

fn default_index_name() -> String {
    "ringSearch".to_string()
}

fn default_max_edits() -> u8 {
    2
}

fn default_prefix_length() -> usize {
    1
}

fn default_exact_boost() -> f32 {
    5.0
}

fn default_max_results() -> usize {
    100
}

fn default_true() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            index_name: default_index_name(),
            index_path: None,
            catalog_path: None,
            suggestion_mode: SuggestionMode::default(),
            max_edits: default_max_edits(),
            prefix_length: default_prefix_length(),
            exact_boost: default_exact_boost(),
            max_results: default_max_results(),
            stopwords_enabled: default_true(),
            english_stopwords: false,
            custom_stopwords: Vec::new(),
            allowlist: Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_mode_default() {
        assert_eq!(SuggestionMode::default(), SuggestionMode::Catalog);
    }

    #[test]
    fn test_suggestion_mode_deserialization() {
        let mode: SuggestionMode = serde_json::from_str("\"legacy\"").unwrap();
        assert_eq!(mode, SuggestionMode::Legacy);
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.backend, "tantivy");
        assert_eq!(config.index_name, "ringSearch");
        assert_eq!(config.max_edits, 2);
        assert_eq!(config.prefix_length, 1);
        assert_eq!(config.exact_boost, 5.0);
        assert_eq!(config.max_results, 100);
        assert!(config.stopwords_enabled);
        assert!(!config.english_stopwords);
        assert!(config.index_path.is_none());
    }

    #[test]
    fn test_search_config_deserialization_with_defaults() {
        let json = r#"{"backend": "memory", "suggestion_mode": "legacy"}"#;
        let config: SearchConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.backend, "memory");
        assert_eq!(config.suggestion_mode, SuggestionMode::Legacy);
        assert_eq!(config.max_edits, 2);
        assert_eq!(config.max_results, 100);
    }
}
