//! View-models derived from the stores and the catalog.
//!
//! All of them live on the UI context. Catalog fetches run on tokio tasks and
//! are applied when the owner awaits `settle`.

pub mod basket;
pub mod checkout;
pub mod favorites;
mod latest;
pub mod product_detail;
pub mod product_list;

pub use basket::{BasketView, BasketViewModel};
pub use checkout::{CheckoutViewModel, ContactDetails, ValidationError};
pub use favorites::FavoritesViewModel;
pub use product_detail::ProductDetailViewModel;
pub use product_list::{ProductListViewModel, SortOption};
