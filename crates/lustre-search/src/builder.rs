//! Batch indexing of a catalog file.
//!
//! This module is only available with the `tantivy-index` feature.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lustre_search::{Catalog, IndexBuilder};
//!
//! let catalog = Catalog::from_path(&catalog_path)?;
//! let stats = IndexBuilder::new().build(&catalog, &index_path)?;
//! println!("Indexed {} products", stats.products_indexed);
//! ```

use std::path::{Path, PathBuf};

use lustre_core::Result;

use crate::document::Catalog;
use crate::indexer::Indexer;
use crate::schema::{CategorySchema, ProductSchema};

/// Sub-directory holding the product index.
pub const PRODUCTS_DIR: &str = "products";

/// Sub-directory holding the category index.
pub const CATEGORIES_DIR: &str = "categories";

/// Statistics about an indexing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Products written to the index.
    pub products_indexed: usize,
    /// Products skipped for a missing id or name.
    pub products_skipped: usize,
    /// Category terms written to the index.
    pub categories_indexed: usize,
}

/// Rebuilds the product and category indexes from a catalog.
///
/// Each build replaces the previous contents; there is no incremental mode.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    batch_size: usize,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexBuilder {
    /// Create a builder with the default batch size.
    pub fn new() -> Self {
        Self { batch_size: 1000 }
    }

    /// Set the number of documents per commit.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Product index location under an index root.
    pub fn products_path(root: &Path) -> PathBuf {
        root.join(PRODUCTS_DIR)
    }

    /// Category index location under an index root.
    pub fn categories_path(root: &Path) -> PathBuf {
        root.join(CATEGORIES_DIR)
    }

    /// Write `catalog` into the indexes under `index_root`.
    pub fn build(&self, catalog: &Catalog, index_root: &Path) -> Result<IndexStats> {
        let products_schema = ProductSchema::build();
        let categories_schema = CategorySchema::build();

        let mut products =
            Indexer::open_or_create(&Self::products_path(index_root), products_schema.schema())?;
        let mut categories = Indexer::open_or_create(
            &Self::categories_path(index_root),
            categories_schema.schema(),
        )?;

        let stats = self.write(catalog, &mut products, &mut categories)?;

        log::info!(
            "Indexed {} products ({} skipped) and {} category terms into {}",
            stats.products_indexed,
            stats.products_skipped,
            stats.categories_indexed,
            index_root.display()
        );

        Ok(stats)
    }

    /// Write `catalog` into already-open indexers.
    pub fn write(
        &self,
        catalog: &Catalog,
        products: &mut Indexer,
        categories: &mut Indexer,
    ) -> Result<IndexStats> {
        let products_schema = ProductSchema::build();
        let categories_schema = CategorySchema::build();
        let mut stats = IndexStats::default();

        products.clear()?;
        for product in &catalog.products {
            if product.id.trim().is_empty() || product.name.trim().is_empty() {
                log::debug!("Skipping product without id or name: {:?}", product.id);
                stats.products_skipped += 1;
                continue;
            }
            products.add(products_schema.to_document(product))?;
            stats.products_indexed += 1;
            if stats.products_indexed % self.batch_size == 0 {
                products.commit()?;
            }
        }
        products.commit()?;

        categories.clear()?;
        for term in &catalog.categories {
            categories.add(categories_schema.to_document(term))?;
            stats.categories_indexed += 1;
        }
        categories.commit()?;

        Ok(stats)
    }
}

// ============================================================================
// Tests
// ============================================================================
