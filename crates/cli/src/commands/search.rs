use crate::commands::{CommandResult, Storefront};

pub fn run(term: &str) -> CommandResult {
    let mut storefront = match Storefront::open() {
        Ok(storefront) => storefront,
        Err(error) => return CommandResult::from_error("search", &error),
    };

    let outcome = storefront.filter.on_search_changed(&mut storefront.surface, term);
    let message = if outcome.no_results_shown {
        format!("no items match `{term}`")
    } else {
        format!("{} of {} items match `{term}`", outcome.visible_count(), storefront.catalog.len())
    };

    CommandResult::success_with("search", message, &outcome)
}
