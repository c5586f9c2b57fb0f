//! Tantivy schemas for the product and category indexes.
//!
//! # Products
//!
//! - `id`: Product identifier (STRING | STORED)
//! - `name`: Product name (TEXT with the `name_lower` tokenizer, positions, STORED)
//! - `image`: Image URL (STORED only)
//! - `price`: Display price (STORED only)
//!
//! # Categories
//!
//! - `gemstone_name`, `sub_category_name`: canonical category words (STORED only)
//!
//! # Tokenizer
//!
//! `name_lower` is `SimpleTokenizer → LowerCaser` with no stemming, so fuzzy
//! prefix matching operates on the words exactly as customers type them.

use tantivy::schema::{
    Field, IndexRecordOption, Schema, SchemaBuilder, TextFieldIndexing, TextOptions, Value,
    STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::{Index, TantivyDocument};

use crate::document::{CategoryTerm, ProductDocument};

/// Name of the tokenizer registered for product names.
pub const NAME_TOKENIZER: &str = "name_lower";

/// Product index schema with typed field handles.
#[derive(Clone)]
pub struct ProductSchema {
    schema: Schema,
    /// Product identifier.
    pub id: Field,
    /// Searchable product name.
    pub name: Field,
    /// Image URL.
    pub image: Field,
    /// Display price.
    pub price: Field,
}

impl ProductSchema {
    /// Build the product schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        let name_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(NAME_TOKENIZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();

        let id = builder.add_text_field("id", STRING | STORED);
        let name = builder.add_text_field("name", name_options);
        let image = builder.add_text_field("image", STORED);
        let price = builder.add_text_field("price", STORED);

        Self {
            schema: builder.build(),
            id,
            name,
            image,
            price,
        }
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register the name tokenizer with an index.
    ///
    /// Must be called after creating or opening the index.
    pub fn register_tokenizers(index: &Index) {
        let name_lower = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .build();
        index.tokenizers().register(NAME_TOKENIZER, name_lower);
    }

    /// Convert a product into a Tantivy document.
    pub fn to_document(&self, product: &ProductDocument) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(self.id, &product.id);
        doc.add_text(self.name, &product.name);
        if let Some(ref image) = product.image {
            doc.add_text(self.image, image);
        }
        if let Some(ref price) = product.price {
            doc.add_text(self.price, price);
        }
        doc
    }

    /// Read a stored Tantivy document back into a product.
    pub fn from_document(&self, doc: &TantivyDocument) -> ProductDocument {
        ProductDocument {
            id: stored_text(doc, self.id).unwrap_or_default(),
            name: stored_text(doc, self.name).unwrap_or_default(),
            image: stored_text(doc, self.image),
            price: stored_text(doc, self.price),
        }
    }
}

impl std::fmt::Debug for ProductSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductSchema").field("field_count", &4).finish()
    }
}

/// Category index schema.
#[derive(Clone)]
pub struct CategorySchema {
    schema: Schema,
    /// Gemstone word.
    pub gemstone_name: Field,
    /// Sub-category word.
    pub sub_category_name: Field,
}

impl CategorySchema {
    /// Build the category schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();
        let gemstone_name = builder.add_text_field("gemstone_name", STORED);
        let sub_category_name = builder.add_text_field("sub_category_name", STORED);
        Self {
            schema: builder.build(),
            gemstone_name,
            sub_category_name,
        }
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Convert a category term into a Tantivy document.
    pub fn to_document(&self, term: &CategoryTerm) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        if let Some(ref gemstone) = term.gemstone_name {
            doc.add_text(self.gemstone_name, gemstone);
        }
        if let Some(ref sub_category) = term.sub_category_name {
            doc.add_text(self.sub_category_name, sub_category);
        }
        doc
    }

    /// Read a stored Tantivy document back into a category term.
    pub fn from_document(&self, doc: &TantivyDocument) -> CategoryTerm {
        CategoryTerm {
            gemstone_name: stored_text(doc, self.gemstone_name),
            sub_category_name: stored_text(doc, self.sub_category_name),
        }
    }
}

impl std::fmt::Debug for CategorySchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategorySchema").field("field_count", &2).finish()
    }
}

fn stored_text(doc: &TantivyDocument, field: Field) -> Option<String> {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================
