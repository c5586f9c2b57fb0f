//! Catalog entities read by the search core.
//!
//! `ProductDocument` and `CategoryTerm` are owned by the catalog store and are
//! read-only here. `Catalog` is the JSON ingestion format used to populate an
//! index.
//!
//! ```rust
//! use lustre_search::Catalog;
//!
//! let catalog = Catalog::from_json_str(r#"{
//!     "products": [{"id": "p1", "name": "14K Gold Ring", "price": 1299}],
//!     "categories": [{"gemstoneName": "Diamond", "subCategoryName": "Rings"}]
//! }"#).unwrap();
//!
//! assert_eq!(catalog.products[0].price.as_deref(), Some("1299"));
//! ```

use std::path::Path;

use lustre_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// A product as stored in the search index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    /// Opaque identifier.
    pub id: String,
    /// Free-form display name, may embed size/code tokens like "(PS231)".
    pub name: String,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Display price. Numbers in the catalog are kept as their decimal text.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "price_from_json"
    )]
    pub price: Option<String>,
}

impl ProductDocument {
    /// Create a product with only id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the display price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }
}

/// A canonical (gemstone, sub-category) pair from the category catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTerm {
    /// Gemstone name, e.g. "Sapphire".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemstone_name: Option<String>,
    /// Sub-category name, e.g. "Rings".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_name: Option<String>,
}

impl CategoryTerm {
    /// Create a term from optional gemstone and sub-category names.
    pub fn new(gemstone: Option<&str>, sub_category: Option<&str>) -> Self {
        Self {
            gemstone_name: gemstone.map(str::to_string),
            sub_category_name: sub_category.map(str::to_string),
        }
    }
}

/// The catalog ingestion format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Searchable products.
    #[serde(default)]
    pub products: Vec<ProductDocument>,
    /// Canonical category vocabulary.
    #[serde(default)]
    pub categories: Vec<CategoryTerm>,
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::operation(format!("Failed to parse catalog: {e}")))
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let catalog = Self::from_json_str(&content)?;
        log::info!(
            "Loaded catalog from {}: {} products, {} category terms",
            path.display(),
            catalog.products.len(),
            catalog.categories.len()
        );
        Ok(catalog)
    }
}

fn price_from_json<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let p = ProductDocument::new("p1", "Halo Ring")
            .with_image("https://cdn/p1.jpg")
            .with_price("199.00");
        assert_eq!(p.id, "p1");
        assert_eq!(p.image.as_deref(), Some("https://cdn/p1.jpg"));
        assert_eq!(p.price.as_deref(), Some("199.00"));
    }

    #[test]
    fn test_product_serialization_skips_missing_fields() {
        let json = serde_json::to_string(&ProductDocument::new("p1", "Ring")).unwrap();
        assert_eq!(json, r#"{"id":"p1","name":"Ring"}"#);
    }

    #[test]
    fn test_price_accepts_number_and_string() {
        let a: ProductDocument =
            serde_json::from_str(r#"{"id":"a","name":"A","price":12.5}"#).unwrap();
        let b: ProductDocument =
            serde_json::from_str(r#"{"id":"b","name":"B","price":"12.50"}"#).unwrap();
        let c: ProductDocument =
            serde_json::from_str(r#"{"id":"c","name":"C","price":null}"#).unwrap();
        assert_eq!(a.price.as_deref(), Some("12.5"));
        assert_eq!(b.price.as_deref(), Some("12.50"));
        assert!(c.price.is_none());
    }

    #[test]
    fn test_category_term_camel_case() {
        let term: CategoryTerm =
            serde_json::from_str(r#"{"gemstoneName":"Ruby","subCategoryName":"Studs"}"#).unwrap();
        assert_eq!(term, CategoryTerm::new(Some("Ruby"), Some("Studs")));
    }

    #[test]
    fn test_catalog_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"products":[{"id":"1","name":"Dial Face Pendant"}],"categories":[{}]}"#,
        )
        .unwrap();

        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.categories.len(), 1);
        assert!(catalog.categories[0].gemstone_name.is_none());
    }

    #[test]
    fn test_catalog_from_missing_path() {
        let err = Catalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_catalog_invalid_json() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, Error::Operation(_)));
    }
}
