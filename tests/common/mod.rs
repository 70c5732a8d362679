// tests/common/mod.rs
#![allow(dead_code)]

use rust_decimal::Decimal;
use shopfront_core::catalog::{CatalogError, ProductCatalogService};
use shopfront_core::storage::{KeyValueStore, MemoryKeyValueStore, StorageError};
use shopfront_core::{BasketStore, FavoritesStore, Product};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::sync::Mutex;
use tokio::sync::oneshot;

pub type Reply = Result<Vec<Product>, CatalogError>;

pub fn product(id: u64, title: &str, price: i64, category: &str) -> Product {
    Product::new(id, title, Decimal::new(price, 0)).with_category(category)
}

pub fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Mascara", 10, "beauty"),
        product(2, "Sofa", 2500, "furniture").with_discount(Decimal::new(20, 0)),
        product(3, "Apple", 2, "groceries"),
        product(4, "Lipstick", 13, "beauty"),
    ]
}

/// Catalog whose responses are released by the test, per request text.
///
/// `fetch_all` is keyed by the empty string.
#[derive(Default)]
pub struct GatedCatalog {
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl GatedCatalog {
    /// Register a pending response for `text` and return its release handle.
    pub fn gate(&self, text: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(text.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }

    fn wait(&self, text: &str) -> impl Future<Output = Reply> + Send {
        self.calls.lock().unwrap().push(text.to_string());
        let rx = self.gates.lock().unwrap().remove(text);
        async move {
            match rx {
                Some(rx) => rx.await.unwrap_or(Err(CatalogError::Cancelled)),
                None => Err(CatalogError::unavailable("no response scripted")),
            }
        }
    }
}

impl ProductCatalogService for GatedCatalog {
    fn fetch_all(&self) -> impl Future<Output = Reply> + Send { self.wait("") }
    fn search(&self, text: &str) -> impl Future<Output = Reply> + Send { self.wait(text) }
}

/// Storage whose writes always fail; reads delegate to an inner store.
#[derive(Default)]
pub struct ReadOnlyStorage {
    pub inner: MemoryKeyValueStore,
}

impl KeyValueStore for ReadOnlyStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> { self.inner.get(key) }
    fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::Backend("read-only".into()))
    }
}

pub fn memory_stores() -> (Rc<dyn KeyValueStore>, Rc<BasketStore>, Rc<FavoritesStore>) {
    let kv: Rc<dyn KeyValueStore> = Rc::new(MemoryKeyValueStore::new());
    let basket = Rc::new(BasketStore::open(Rc::clone(&kv)));
    let favorites = Rc::new(FavoritesStore::open(Rc::clone(&kv)));
    (kv, basket, favorites)
}
