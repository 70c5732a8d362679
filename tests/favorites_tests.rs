mod common;

use common::{memory_stores, product, sample_catalog, GatedCatalog};
use rust_decimal::Decimal;
use shopfront_core::catalog::{CatalogError, StaticCatalog};
use shopfront_core::viewmodel::favorites::{LOADING_FAVORITES_TEXT, NO_FAVORITES_TEXT};
use shopfront_core::viewmodel::FavoritesViewModel;
use std::sync::Arc;

#[tokio::test]
async fn empty_cache_and_no_ids_says_no_favorites() {
    let (_, basket, favorites) = memory_stores();
    let catalog = Arc::new(GatedCatalog::default());
    let _pending = catalog.gate("");
    let mut vm = FavoritesViewModel::new(favorites, basket, catalog);
    vm.load();
    assert_eq!(vm.empty_text().as_deref(), Some(NO_FAVORITES_TEXT));
    assert!(vm.items().is_empty());
}

#[tokio::test]
async fn empty_cache_with_ids_says_loading_until_catalog_lands() {
    let (_, basket, favorites) = memory_stores();
    favorites.set_favorite(true, "3").unwrap();
    let catalog = Arc::new(GatedCatalog::default());
    let reply = catalog.gate("");
    let mut vm = FavoritesViewModel::new(favorites, basket, catalog);

    vm.load();
    assert_eq!(vm.empty_text().as_deref(), Some(LOADING_FAVORITES_TEXT));

    reply.send(Ok(sample_catalog())).unwrap();
    assert!(vm.settle().await);
    assert!(vm.empty_text().is_none());
    assert_eq!(vm.items().iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
}

#[tokio::test]
async fn ids_matching_nothing_say_no_favorites() {
    let (_, basket, favorites) = memory_stores();
    favorites.set_favorite(true, "999").unwrap();
    let mut vm = FavoritesViewModel::new(favorites, basket, Arc::new(StaticCatalog::new(sample_catalog())));
    vm.load();
    vm.settle().await;
    assert_eq!(vm.catalog_len(), 4);
    assert_eq!(vm.empty_text().as_deref(), Some(NO_FAVORITES_TEXT));
}

#[tokio::test]
async fn failed_catalog_fetch_still_shows_empty_state() {
    let (_, basket, favorites) = memory_stores();
    favorites.set_favorite(true, "1").unwrap();
    let catalog = Arc::new(GatedCatalog::default());
    let reply = catalog.gate("");
    let mut vm = FavoritesViewModel::new(favorites, basket, catalog);
    vm.load();
    reply.send(Err(CatalogError::unavailable("timeout"))).unwrap();
    vm.settle().await;
    assert_eq!(vm.empty_text().as_deref(), Some(LOADING_FAVORITES_TEXT));
}

#[tokio::test]
async fn remove_and_add_to_basket_go_through_stores() {
    let (_, basket, favorites) = memory_stores();
    favorites.set_favorite(true, "2").unwrap();
    favorites.set_favorite(true, "4").unwrap();
    let mut vm = FavoritesViewModel::new(favorites.clone(), basket.clone(), Arc::new(StaticCatalog::new(sample_catalog())));
    vm.load();
    vm.settle().await;
    assert_eq!(vm.items().len(), 2);

    vm.remove_favorite("4");
    assert!(!favorites.is_favorite("4"));
    assert_eq!(vm.items().iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);

    let sofa = vm.items()[0].clone();
    vm.add_to_basket(&sofa);
    let line = &basket.current_basket()[0];
    assert_eq!(line.product.price.amount(), Decimal::new(2500, 0));
    assert_eq!(line.product.old_price.unwrap().amount(), Decimal::new(3125, 0));
    assert_eq!(line.quantity.value(), 1);
}

#[test]
fn catalog_order_is_preserved() {
    let (_, basket, favorites) = memory_stores();
    for id in ["4", "1"] { favorites.set_favorite(true, id).unwrap(); }
    let vm = FavoritesViewModel::new(favorites, basket, Arc::new(StaticCatalog::default()));
    vm.set_catalog(vec![product(4, "d", 1, "c"), product(2, "b", 1, "c"), product(1, "a", 1, "c")]);
    assert_eq!(vm.items().iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 1]);
}
