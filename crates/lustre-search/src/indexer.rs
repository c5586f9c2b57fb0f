//! Tantivy index writer wrapper.
//!
//! `Indexer` owns an index and its writer, and handles the create-or-open
//! lifecycle shared by the product and category indexes.

use std::path::Path;

use lustre_core::{Error, Result};
use tantivy::schema::Schema;
use tantivy::{Index, IndexWriter, TantivyDocument};

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// Tantivy index writer wrapper.
pub struct Indexer {
    index: Index,
    writer: IndexWriter,
}

impl Indexer {
    /// Create or open a Tantivy index at the given path.
    pub fn open_or_create(index_path: &Path, schema: &Schema) -> Result<Self> {
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(|e| Error::io_with_path(e, index_path))?;
        }

        let index = if index_path.join("meta.json").exists() {
            Index::open_in_dir(index_path)
                .map_err(|e| Error::operation(format!("Failed to open index: {e}")))?
        } else {
            Index::create_in_dir(index_path, schema.clone())
                .map_err(|e| Error::operation(format!("Failed to create index: {e}")))?
        };

        Self::from_index(index)
    }

    /// Create an in-memory index (for testing).
    pub fn in_memory(schema: &Schema) -> Result<Self> {
        Self::from_index(Index::create_in_ram(schema.clone()))
    }

    fn from_index(index: Index) -> Result<Self> {
        crate::schema::ProductSchema::register_tokenizers(&index);
        let writer = index
            .writer(WRITER_BUFFER_SIZE)
            .map_err(|e| Error::operation(format!("Failed to create index writer: {e}")))?;
        Ok(Self { index, writer })
    }

    /// Stage a document. Not searchable until `commit()`.
    pub fn add(&mut self, doc: TantivyDocument) -> Result<()> {
        self.writer
            .add_document(doc)
            .map_err(|e| Error::operation(format!("Failed to add document: {e}")))?;
        Ok(())
    }

    /// Commit staged changes.
    pub fn commit(&mut self) -> Result<()> {
        self.writer
            .commit()
            .map_err(|e| Error::operation(format!("Failed to commit index: {e}")))?;
        Ok(())
    }

    /// Delete every document and commit.
    pub fn clear(&mut self) -> Result<()> {
        self.writer
            .delete_all_documents()
            .map_err(|e| Error::operation(format!("Failed to clear index: {e}")))?;
        self.commit()
    }

    /// Get the underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("index", &"<tantivy::Index>")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ProductDocument;
    use crate::schema::ProductSchema;

    fn num_docs(indexer: &Indexer) -> u64 {
        indexer.index().reader().unwrap().searcher().num_docs()
    }

    #[test]
    fn test_indexer_add_and_commit() {
        let schema = ProductSchema::build();
        let mut indexer = Indexer::in_memory(schema.schema()).unwrap();
        indexer
            .add(schema.to_document(&ProductDocument::new("1", "Opal Ring")))
            .unwrap();
        indexer.commit().unwrap();
        assert_eq!(num_docs(&indexer), 1);
    }

    #[test]
    fn test_indexer_clear() {
        let schema = ProductSchema::build();
        let mut indexer = Indexer::in_memory(schema.schema()).unwrap();
        indexer
            .add(schema.to_document(&ProductDocument::new("1", "Opal Ring")))
            .unwrap();
        indexer.commit().unwrap();
        indexer.clear().unwrap();
        assert_eq!(num_docs(&indexer), 0);
    }

    #[test]
    fn test_indexer_on_disk_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products");
        let schema = ProductSchema::build();

        let mut indexer = Indexer::open_or_create(&path, schema.schema()).unwrap();
        indexer
            .add(schema.to_document(&ProductDocument::new("1", "Opal Ring")))
            .unwrap();
        indexer.commit().unwrap();
        drop(indexer);

        assert!(path.join("meta.json").exists());
        let reopened = Indexer::open_or_create(&path, schema.schema()).unwrap();
        assert_eq!(num_docs(&reopened), 1);
    }
}
