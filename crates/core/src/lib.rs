pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod order;
pub mod page;
pub mod surface;

pub use catalog::Catalog;
pub use domain::item::{ChaiKind, ItemRecord};
pub use errors::{ApplicationError, CatalogError, ElementRole, FilterError};
pub use filter::{matches_term, CatalogFilter, ElementBindings, FilterOutcome};
pub use order::{
    confirmation_message, OrderConfirmation, OrderNotifier, Presenter, WriterPresenter,
};
pub use page::render_catalog;
pub use surface::{CatalogSurface, Display, ElementHandle, MemorySurface};
