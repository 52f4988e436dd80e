use serde::Serialize;
use tracing::debug;

use crate::errors::{ElementRole, FilterError};
use crate::surface::{CatalogSurface, Display, ElementHandle};

/// Identifiers the catalog filter resolves on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementBindings {
    pub search_input_id: String,
    pub item_class: String,
    pub name_attribute: String,
    pub no_results_id: String,
    pub grid_id: String,
}

impl Default for ElementBindings {
    fn default() -> Self {
        Self {
            search_input_id: "searchInput".to_string(),
            item_class: "chai-card".to_string(),
            name_attribute: "data-name".to_string(),
            no_results_id: "noResults".to_string(),
            grid_id: "chaiGrid".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub term: String,
    pub visible: Vec<String>,
    pub hidden: Vec<String>,
    pub no_results_shown: bool,
    pub grid_display: Display,
}

impl FilterOutcome {
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}

#[derive(Clone, Debug)]
struct BoundCard {
    handle: ElementHandle,
    name: String,
}

/// Search-as-you-type filter over the item cards of one page.
///
/// All element handles are resolved by [`CatalogFilter::attach`]. Item records
/// are never added or removed by the filter, so card names are read once.
#[derive(Clone, Debug)]
pub struct CatalogFilter {
    search_input: ElementHandle,
    no_results: ElementHandle,
    grid: ElementHandle,
    cards: Vec<BoundCard>,
}

impl CatalogFilter {
    pub fn attach<S>(surface: &S, bindings: &ElementBindings) -> Result<Self, FilterError>
    where
        S: CatalogSurface + ?Sized,
    {
        let search_input =
            require(surface, ElementRole::SearchInput, &bindings.search_input_id)?;
        let no_results =
            require(surface, ElementRole::NoResultsIndicator, &bindings.no_results_id)?;
        let grid = require(surface, ElementRole::Grid, &bindings.grid_id)?;

        let cards = surface
            .elements_by_class(&bindings.item_class)
            .into_iter()
            .enumerate()
            .map(|(index, handle)| -> Result<BoundCard, FilterError> {
                let name = surface.attribute(handle, &bindings.name_attribute).ok_or_else(
                    || FilterError::MissingAttribute {
                        index,
                        class: bindings.item_class.clone(),
                        attribute: bindings.name_attribute.clone(),
                    },
                )?;
                Ok(BoundCard { handle, name: name.to_owned() })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            event_name = "catalog.filter.attached",
            card_count = cards.len(),
            search_input_id = %bindings.search_input_id,
            "catalog filter attached to page"
        );

        Ok(Self { search_input, no_results, grid, cards })
    }

    pub fn search_input(&self) -> ElementHandle {
        self.search_input
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Handles an input-changed event by reading the bound search input.
    pub fn on_input<S>(&self, surface: &mut S) -> FilterOutcome
    where
        S: CatalogSurface + ?Sized,
    {
        let term = surface.value(self.search_input).unwrap_or_default().to_owned();
        self.on_search_changed(surface, &term)
    }

    pub fn on_search_changed<S>(&self, surface: &mut S, term: &str) -> FilterOutcome
    where
        S: CatalogSurface + ?Sized,
    {
        let mut visible = Vec::new();
        let mut hidden = Vec::new();

        for card in &self.cards {
            if matches_term(&card.name, term) {
                surface.set_hidden(card.handle, false);
                visible.push(card.name.clone());
            } else {
                surface.set_hidden(card.handle, true);
                hidden.push(card.name.clone());
            }
        }

        // An empty catalog has no visible cards either, so it shows the indicator.
        let no_results_shown = visible.is_empty();
        let grid_display = if no_results_shown { Display::None } else { Display::Grid };
        surface.set_hidden(self.no_results, !no_results_shown);
        surface.set_display(self.grid, grid_display);

        debug!(
            event_name = "catalog.filter.applied",
            term = %term,
            visible_count = visible.len(),
            hidden_count = hidden.len(),
            no_results_shown,
            "catalog filter applied"
        );

        FilterOutcome { term: term.to_owned(), visible, hidden, no_results_shown, grid_display }
    }
}

/// Case-insensitive substring test deciding whether an item is visible.
pub fn matches_term(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

fn require<S>(surface: &S, role: ElementRole, id: &str) -> Result<ElementHandle, FilterError>
where
    S: CatalogSurface + ?Sized,
{
    surface
        .element_by_id(id)
        .ok_or_else(|| FilterError::MissingElement { role, id: id.to_owned() })
}
