//! Product catalog collaborator.
//!
//! The view-models only need "fetch everything" and "search by text". The
//! remote HTTP client lives outside this crate; what ships here is an
//! in-memory catalog and one that reads the listing response from disk.

use serde::Deserialize;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;
use crate::domain::Product;

/// Fetch failures carry a human-readable description only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0}")]
    Unavailable(String),

    #[error("request cancelled")]
    Cancelled,
}

impl CatalogError {
    pub fn unavailable(msg: impl Into<String>) -> Self { Self::Unavailable(msg.into()) }
}

/// Source of product records.
///
/// Implementations must be `Send + Sync`; fetches run on the tokio runtime
/// and only their results come back to the view-model's context.
pub trait ProductCatalogService: Send + Sync + 'static {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Blank text may return an empty list without doing any work.
    fn search(&self, text: &str) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// Case-insensitive match on title, description and category.
pub fn matches_text(product: &Product, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [Some(product.title.as_str()), product.description.as_deref(), product.category.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn search_in(products: Vec<Product>, text: &str) -> Vec<Product> {
    let trimmed = text.trim();
    if trimmed.is_empty() { return Vec::new(); }
    products.into_iter().filter(|p| matches_text(p, trimmed)).collect()
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self { Self { products } }
    pub fn products(&self) -> &[Product] { &self.products }
}

impl ProductCatalogService for StaticCatalog {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let products = self.products.clone();
        async move { Ok(products) }
    }

    fn search(&self, text: &str) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let found = search_in(self.products.clone(), text);
        async move { Ok(found) }
    }
}

#[derive(Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

/// Reads a `{ "products": [...] }` listing response from disk on each call.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    async fn read(path: PathBuf) -> Result<Vec<Product>, CatalogError> {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| CatalogError::unavailable(format!("{}: {e}", path.display())))?;
        let response: ProductsResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::unavailable(format!("bad catalog response: {e}")))?;
        Ok(response.products)
    }
}

impl ProductCatalogService for JsonFileCatalog {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        Self::read(self.path.clone())
    }

    fn search(&self, text: &str) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let path = self.path.clone();
        let text = text.to_string();
        async move {
            if text.trim().is_empty() { return Ok(Vec::new()); }
            Ok(search_in(Self::read(path).await?, &text))
        }
    }
}
