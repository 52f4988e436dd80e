use chaiwala_core::config::{AppConfig, LoadOptions};
use chaiwala_core::ApplicationError;
use serde::Serialize;

use crate::commands::{load_catalog, CommandResult};

#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    name: &'a str,
    kind: Option<&'static str>,
    code: Option<&'static str>,
    price: String,
    description: &'a str,
}

pub fn run() -> CommandResult {
    let catalog = match AppConfig::load(LoadOptions::default())
        .map_err(ApplicationError::from)
        .and_then(|config| load_catalog(&config).map_err(ApplicationError::from))
    {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error("catalog", &error),
    };

    let entries: Vec<_> = catalog
        .items()
        .iter()
        .map(|item| CatalogEntry {
            name: &item.name,
            kind: item.kind.map(|kind| kind.label()),
            code: item.kind.map(|kind| kind.code()),
            price: item.price.to_string(),
            description: &item.description,
        })
        .collect();

    CommandResult::success_with("catalog", format!("{} items in catalog", entries.len()), &entries)
}
