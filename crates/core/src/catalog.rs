use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::domain::item::{ChaiKind, ItemRecord};
use crate::errors::CatalogError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<ItemRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<ItemRecord>,
}

impl Catalog {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self { items }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let file = toml::from_str::<CatalogFile>(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;

        debug!(
            event_name = "catalog.loaded",
            path = %path.display(),
            item_count = file.items.len(),
            "catalog file loaded"
        );
        Ok(Self::new(file.items))
    }

    /// Demo catalog used when no catalog file is configured.
    pub fn builtin() -> Self {
        let entries = [
            ("Masala Chai", ChaiKind::Masala, "Black tea simmered with warming spices.", 40),
            ("Ginger Chai", ChaiKind::Ginger, "Strong brew with fresh crushed ginger.", 35),
            ("Kiwi Chai", ChaiKind::Kiwi, "A tangy twist on the classic cup.", 50),
            ("Plain Chai", ChaiKind::Plain, "Milk, tea leaves, sugar. Nothing else.", 25),
            ("Elachi Chai", ChaiKind::Elachi, "Fragrant green cardamom chai.", 45),
        ];
        let added_on = NaiveDate::from_ymd_opt(2024, 1, 1);

        let mut items: Vec<ItemRecord> = entries
            .into_iter()
            .map(|(name, kind, description, price)| ItemRecord {
                name: name.to_string(),
                kind: Some(kind),
                description: description.to_string(),
                price: Decimal::from(price),
                added_on,
            })
            .collect();
        items.push(ItemRecord {
            description: "Light and grassy, served without milk.".to_string(),
            price: Decimal::from(30),
            added_on,
            ..ItemRecord::named("Green Tea")
        });

        Self::new(items)
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ItemRecord> {
        let wanted = name.to_lowercase();
        self.items.iter().find(|item| item.name.to_lowercase() == wanted)
    }
}
