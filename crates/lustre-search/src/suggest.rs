//! Suggestion composition.
//!
//! Turns a candidate [`Vocabulary`] and the raw autocomplete hits into the
//! payload returned by the suggestion endpoint.

use serde::Serialize;

use crate::document::ProductDocument;
use crate::query::SearchQuery;
use crate::types::SuggestionMode;
use crate::vocabulary::Vocabulary;

/// Shortest candidate length (exclusive) offered as a suggestion.
const MIN_CANDIDATE_LEN: usize = 2;

/// A product listed alongside category suggestions.
///
/// Missing image and price serialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedProduct {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
}

impl From<&ProductDocument> for RelatedProduct {
    fn from(doc: &ProductDocument) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.name.clone(),
            image: doc.image.clone().unwrap_or_default(),
            price: doc.price.clone().unwrap_or_default(),
        }
    }
}

/// Suggestion payload, shaped by [`SuggestionMode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SuggestionResponse {
    /// Every matching category word plus related products.
    #[serde(rename_all = "camelCase")]
    Catalog {
        categories: Vec<String>,
        related_products: Vec<RelatedProduct>,
    },
    /// At most one best-matching word.
    Legacy { suggestions: Vec<String> },
}

impl SuggestionResponse {
    /// Suggested words, regardless of mode.
    pub fn words(&self) -> &[String] {
        match self {
            SuggestionResponse::Catalog { categories, .. } => categories,
            SuggestionResponse::Legacy { suggestions } => suggestions,
        }
    }
}

/// Assembles suggestion responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionComposer {
    mode: SuggestionMode,
}

impl SuggestionComposer {
    pub fn new(mode: SuggestionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SuggestionMode {
        self.mode
    }

    /// Build the response for `query`.
    pub fn compose(
        &self,
        query: &SearchQuery,
        vocabulary: &Vocabulary,
        products: &[ProductDocument],
    ) -> SuggestionResponse {
        let prefix = query.lowercase();
        let mut matches = matching_candidates(vocabulary, &prefix).map(display_case);

        match self.mode {
            SuggestionMode::Catalog => SuggestionResponse::Catalog {
                categories: matches.collect(),
                related_products: related_products(products),
            },
            SuggestionMode::Legacy => SuggestionResponse::Legacy {
                suggestions: matches.next().into_iter().collect(),
            },
        }
    }
}

/// Whether a vocabulary word may be offered for `prefix`.
///
/// `prefix` must already be lowercase.
pub fn is_candidate(word: &str, prefix: &str) -> bool {
    word.len() > MIN_CANDIDATE_LEN
        && word.chars().all(|c| c.is_ascii_alphabetic())
        && word.starts_with(prefix)
}

/// Candidates from `vocabulary` that pass [`is_candidate`], in discovery order.
pub fn matching_candidates<'a>(
    vocabulary: &'a Vocabulary,
    prefix: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    vocabulary.iter().filter(move |word| is_candidate(word, prefix))
}

/// Uppercase the first character and lowercase the rest.
pub fn display_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Products with a non-empty name, in result order.
pub fn related_products(products: &[ProductDocument]) -> Vec<RelatedProduct> {
    products
        .iter()
        .filter(|doc| !doc.name.is_empty())
        .map(RelatedProduct::from)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
