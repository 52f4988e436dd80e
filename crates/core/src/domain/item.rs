use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaiKind {
    Masala,
    Ginger,
    Kiwi,
    Plain,
    Elachi,
}

impl ChaiKind {
    pub const ALL: [ChaiKind; 5] =
        [Self::Masala, Self::Ginger, Self::Kiwi, Self::Plain, Self::Elachi];

    /// Two-letter catalog code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Masala => "ML",
            Self::Ginger => "GR",
            Self::Kiwi => "KL",
            Self::Plain => "PL",
            Self::Elachi => "EL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Masala => "MASALA",
            Self::Ginger => "GINGER",
            Self::Kiwi => "KIWI",
            Self::Plain => "PLAIN",
            Self::Elachi => "ELACHI",
        }
    }
}

/// A product entry as rendered on the catalog page.
///
/// Only `name` takes part in search matching; the remaining fields are shown on
/// the card and never change while the page is live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    #[serde(default)]
    pub kind: Option<ChaiKind>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub added_on: Option<NaiveDate>,
}

impl ItemRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            description: String::new(),
            price: Decimal::ZERO,
            added_on: None,
        }
    }
}

impl fmt::Display for ItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
