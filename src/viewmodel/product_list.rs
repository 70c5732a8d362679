//! Product list: search, category filter and price sort over the fetched catalog.

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::catalog::{CatalogError, ProductCatalogService};
use crate::domain::Product;
use super::latest::{FetchResult, LatestRequest};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// Keep fetch order.
    #[default]
    None,
    PriceAscending,
    PriceDescending,
}

impl SortOption {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Recommended",
            Self::PriceAscending => "Price: low to high",
            Self::PriceDescending => "Price: high to low",
        }
    }
}

/// Filter by category, then stable-sort by price.
pub fn derive_displayed(all: &[Product], category: Option<&str>, sort: SortOption) -> Vec<Product> {
    let mut shown: Vec<Product> = all
        .iter()
        .filter(|p| category.map_or(true, |c| p.category_name() == Some(c)))
        .cloned()
        .collect();
    match sort {
        SortOption::None => {}
        SortOption::PriceAscending => shown.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDescending => shown.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    shown
}

/// Sorted, distinct, non-blank categories.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .filter_map(Product::category_name)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub struct ProductListViewModel<S> {
    service: Arc<S>,
    request: LatestRequest,
    all_products: Vec<Product>,
    displayed: Vec<Product>,
    available_categories: Vec<String>,
    query: String,
    selected_category: Option<String>,
    selected_sort: SortOption,
    error_message: Option<String>,
}

impl<S: ProductCatalogService> ProductListViewModel<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            request: LatestRequest::default(),
            all_products: Vec::new(),
            displayed: Vec::new(),
            available_categories: Vec::new(),
            query: String::new(),
            selected_category: None,
            selected_sort: SortOption::None,
            error_message: None,
        }
    }

    pub fn all_products(&self) -> &[Product] { &self.all_products }
    pub fn displayed_products(&self) -> &[Product] { &self.displayed }
    pub fn available_categories(&self) -> &[String] { &self.available_categories }
    pub fn query(&self) -> &str { &self.query }
    pub fn selected_category(&self) -> Option<&str> { self.selected_category.as_deref() }
    pub fn selected_sort(&self) -> SortOption { self.selected_sort }
    pub fn is_loading(&self) -> bool { self.request.is_pending() }
    pub fn error_message(&self) -> Option<&str> { self.error_message.as_deref() }

    /// Reset the query and fetch the whole catalog.
    pub fn load_initial(&mut self) {
        self.query.clear();
        self.fetch();
    }

    /// Set the search text and fetch; supersedes any fetch still running.
    pub fn update_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.fetch();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.selected_category = category.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        self.rederive();
    }

    pub fn set_sort(&mut self, option: SortOption) {
        self.selected_sort = option;
        self.rederive();
    }

    pub fn dismiss_error(&mut self) { self.error_message = None; }

    /// Wait for the latest fetch and apply its result. Returns `false` if
    /// nothing was in flight.
    pub async fn settle(&mut self) -> bool {
        match self.request.settle().await {
            Some((generation, result)) => {
                self.apply(generation, result);
                true
            }
            None => false,
        }
    }

    fn fetch(&mut self) {
        self.error_message = None;

        let text = self.query.trim().to_string();
        let service = Arc::clone(&self.service);
        let generation = self.request.issue(async move {
            if text.is_empty() { service.fetch_all().await } else { service.search(&text).await }
        });
        debug!(generation, query = %self.query, "Catalog fetch issued");
    }

    fn apply(&mut self, generation: u64, result: FetchResult) {
        match result {
            Ok(products) => {
                info!(generation, count = products.len(), "Catalog fetch landed");
                self.available_categories = distinct_categories(&products);
                self.all_products = products;
                let still_present = self
                    .selected_category
                    .as_ref()
                    .map_or(true, |c| self.available_categories.contains(c));
                if !still_present { self.selected_category = None; }
                self.rederive();
            }
            Err(CatalogError::Cancelled) => debug!(generation, "Catalog fetch cancelled"),
            Err(e) => {
                warn!(generation, error = %e, "Catalog fetch failed");
                self.error_message = Some(format!("Could not load products: {e}"));
            }
        }
    }

    fn rederive(&mut self) {
        self.displayed = derive_displayed(&self.all_products, self.selected_category.as_deref(), self.selected_sort);
    }
}
