//! Shopfront - command-line driver for the basket, favorites and checkout state

use anyhow::Result;
use shopfront_core::catalog::JsonFileCatalog;
use shopfront_core::storage::{FileKeyValueStore, KeyValueStore};
use shopfront_core::viewmodel::{
    BasketViewModel, CheckoutViewModel, FavoritesViewModel, ProductDetailViewModel, ProductListViewModel, SortOption,
};
use shopfront_core::{telemetry, AppConfig, BasketStore, FavoritesStore, ShopError};
use std::rc::Rc;
use std::sync::Arc;

/// Process-wide singletons, created once and shared with every view-model.
struct App {
    basket: Rc<BasketStore>,
    favorites: Rc<FavoritesStore>,
    catalog: Arc<JsonFileCatalog>,
}

const USAGE: &str = "usage: shopfront <list [query] [--sort asc|desc] [--category NAME] | show ID | add ID [QTY] | \
inc ID | dec ID | rm ID | basket | fav ID | favorites | checkout NAME EMAIL PHONE>";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init(&config.log_filter);

    let storage: Rc<dyn KeyValueStore> = Rc::new(FileKeyValueStore::open(&config.data_dir)?);
    let app = App {
        basket: Rc::new(BasketStore::open(Rc::clone(&storage))),
        favorites: Rc::new(FavoritesStore::open(storage)),
        catalog: Arc::new(JsonFileCatalog::new(&config.catalog_path)),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match run(&app, &args).await {
        Ok(()) => Ok(()),
        Err(ShopError::Validation(e)) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(app: &App, args: &[&str]) -> shopfront_core::Result<()> {
    match args {
        ["list", rest @ ..] => list(app, rest).await,
        ["show", id] => show(app, id).await,
        ["add", id] => add(app, id, 1).await,
        ["add", id, qty] => match parse_quantity(qty) {
            Some(qty) => add(app, id, qty).await,
            None => {
                eprintln!("{USAGE}");
                Ok(())
            }
        },
        ["inc", id] => { BasketViewModel::new(Rc::clone(&app.basket)).increase(id); print_basket(app); Ok(()) }
        ["dec", id] => { BasketViewModel::new(Rc::clone(&app.basket)).decrease(id); print_basket(app); Ok(()) }
        ["rm", id] => { BasketViewModel::new(Rc::clone(&app.basket)).remove(id); print_basket(app); Ok(()) }
        ["basket"] => { print_basket(app); Ok(()) }
        ["fav", id] => {
            let now = app.favorites.toggle_favorite(id)?;
            println!("{id}: {}", if now { "added to favorites" } else { "removed from favorites" });
            Ok(())
        }
        ["favorites"] => favorites(app).await,
        ["checkout", name, email, phone] => checkout(app, name, email, phone),
        _ => {
            eprintln!("{USAGE}");
            Ok(())
        }
    }
}

/// Quantity argument of `add`; anything that is not an integer is rejected.
fn parse_quantity(arg: &str) -> Option<i64> {
    arg.trim().parse().ok()
}

async fn list(app: &App, args: &[&str]) -> shopfront_core::Result<()> {
    let mut vm = ProductListViewModel::new(Arc::clone(&app.catalog));
    let mut query = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match *arg {
            "--sort" => vm.set_sort(match iter.next().copied() {
                Some("asc") => SortOption::PriceAscending,
                Some("desc") => SortOption::PriceDescending,
                _ => SortOption::None,
            }),
            "--category" => vm.set_category(iter.next().map(|c| c.to_string())),
            text => query = Some(text.to_string()),
        }
    }
    match query {
        Some(q) => vm.update_query(q),
        None => vm.load_initial(),
    }
    vm.settle().await;

    if let Some(msg) = vm.error_message() {
        eprintln!("{msg}");
        return Ok(());
    }
    println!("categories: {}", vm.available_categories().join(", "));
    println!("sort: {}", vm.selected_sort().label());
    for p in vm.displayed_products() {
        let fav = if app.favorites.is_favorite(&p.key()) { "*" } else { " " };
        match p.old_price_text() {
            Some(old) => println!("{fav} {:>4}  {}  {} (was {old})", p.id, p.title, p.price_text()),
            None => println!("{fav} {:>4}  {}  {}", p.id, p.title, p.price_text()),
        }
    }
    Ok(())
}

async fn find_product(app: &App, id: &str) -> shopfront_core::Result<Option<shopfront_core::Product>> {
    let mut vm = ProductListViewModel::new(Arc::clone(&app.catalog));
    vm.load_initial();
    vm.settle().await;
    if let Some(msg) = vm.error_message() {
        return Err(shopfront_core::CatalogError::unavailable(msg).into());
    }
    Ok(vm.all_products().iter().find(|p| p.key() == id).cloned())
}

async fn show(app: &App, id: &str) -> shopfront_core::Result<()> {
    let Some(product) = find_product(app, id).await? else {
        eprintln!("no product with id {id}");
        return Ok(());
    };
    let vm = ProductDetailViewModel::new(product, Rc::clone(&app.favorites), Rc::clone(&app.basket));
    println!("{}", vm.title());
    if let Some(sub) = vm.subtitle() { println!("{sub}"); }
    match vm.old_price_text() {
        Some(old) => println!("{} (was {old})", vm.price_text()),
        None => println!("{}", vm.price_text()),
    }
    println!("images: {}  favorite: {}", vm.image_urls().len(), vm.is_favorite());
    Ok(())
}

async fn add(app: &App, id: &str, qty: i64) -> shopfront_core::Result<()> {
    let Some(product) = find_product(app, id).await? else {
        eprintln!("no product with id {id}");
        return Ok(());
    };
    ProductDetailViewModel::new(product, Rc::clone(&app.favorites), Rc::clone(&app.basket)).add_to_basket(qty);
    print_basket(app);
    Ok(())
}

fn print_basket(app: &App) {
    let vm = BasketViewModel::new(Rc::clone(&app.basket));
    if vm.is_empty() {
        println!("basket is empty");
        return;
    }
    for line in vm.lines() {
        println!("{:>3} x {}  {}", line.quantity.value(), line.product.title, line.charged_total());
    }
    println!("price: {}\ndiscount: {}\ntotal: {}", vm.price_text(), vm.discount_text(), vm.total_text());
}

async fn favorites(app: &App) -> shopfront_core::Result<()> {
    let mut vm = FavoritesViewModel::new(Rc::clone(&app.favorites), Rc::clone(&app.basket), Arc::clone(&app.catalog));
    vm.load();
    vm.settle().await;
    if let Some(text) = vm.empty_text() { println!("{text}"); }
    for p in vm.items() {
        println!("{:>4}  {}  {}", p.id, p.title, p.price_text());
    }
    Ok(())
}

fn checkout(app: &App, name: &str, email: &str, phone: &str) -> shopfront_core::Result<()> {
    let mut vm = CheckoutViewModel::new(Rc::clone(&app.basket));
    vm.set_name(name);
    vm.set_email(email);
    vm.set_phone(phone);
    vm.pay_tapped()?;
    if let Some(receipt) = vm.last_receipt() {
        println!("payment succeeded: {} items, {} (receipt {})", receipt.item_count(), receipt.total(), receipt.id());
    }
    Ok(())
}
