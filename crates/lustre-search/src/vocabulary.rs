//! Candidate vocabulary for typeahead suggestions.
//!
//! Merges two independent sources into one case-folded, deduplicated set:
//!
//! - canonical category terms (gemstone and sub-category names), added whole
//!   after trimming and lowercasing;
//! - tokens normalized out of matched product names, optionally minus
//!   stopwords.
//!
//! Entries are stored lowercase in an `IndexSet`: two entries never differ
//! only by case, and iteration follows discovery order. Category terms come
//! first, then product tokens in the index's ranking order, so the first
//! match belongs to the best-ranked product.

use indexmap::IndexSet;

use crate::document::{CategoryTerm, ProductDocument};
use crate::normalize::normalize;
use crate::stopwords::StopwordFilter;

/// A request-scoped set of lowercase candidate words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: IndexSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the vocabulary from both sources.
    pub fn build(
        terms: &[CategoryTerm],
        products: &[ProductDocument],
        stopwords: &StopwordFilter,
    ) -> Self {
        let mut vocabulary = Self::new();
        vocabulary.add_category_terms(terms);
        vocabulary.add_product_names(products.iter().map(|p| p.name.as_str()), stopwords);
        vocabulary
    }

    /// Insert a word in its trimmed, lowercased form.
    ///
    /// Returns `true` if the word was not already present. Blank words are
    /// ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return false;
        }
        self.words.insert(word)
    }

    /// Add the gemstone and sub-category names of every term.
    pub fn add_category_terms(&mut self, terms: &[CategoryTerm]) {
        for term in terms {
            for name in [&term.gemstone_name, &term.sub_category_name]
                .into_iter()
                .flatten()
            {
                self.insert(name);
            }
        }
    }

    /// Normalize each product name and add its tokens in order.
    ///
    /// Pass [`StopwordFilter::disabled`] to keep every token.
    pub fn add_product_names<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
        stopwords: &StopwordFilter,
    ) {
        for name in names {
            for token in stopwords.retain_content_words(normalize(name)) {
                self.words.insert(token);
            }
        }
    }

    /// Check whether a word (any case) is present.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_lowercase())
    }

    /// Iterate candidates in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
