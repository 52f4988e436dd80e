use crate::catalog::Catalog;
use crate::filter::ElementBindings;
use crate::surface::{Element, MemorySurface};

/// Builds the catalog page the way the template layer lays it out: search box,
/// grid of item cards, and a no-results indicator that starts hidden.
pub fn render_catalog(catalog: &Catalog, bindings: &ElementBindings) -> MemorySurface {
    let mut surface = MemorySurface::new();

    surface.push(Element::with_id(&bindings.search_input_id).input());
    surface.push(Element::with_id(&bindings.grid_id));
    for item in catalog.items() {
        surface.push(
            Element::with_class(&bindings.item_class).attr(&bindings.name_attribute, &item.name),
        );
    }
    surface.push(Element::with_id(&bindings.no_results_id).hidden());

    surface
}
