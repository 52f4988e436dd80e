use std::io::{self, Write};

use chaiwala_core::{OrderNotifier, WriterPresenter};
use tracing::warn;

use crate::commands::{CommandResult, Storefront};

pub fn run(item_name: &str) -> CommandResult {
    run_with(item_name, io::stderr())
}

/// Presents the confirmation on `display` and reports it in the envelope.
pub fn run_with<W: Write>(item_name: &str, display: W) -> CommandResult {
    let storefront = match Storefront::open() {
        Ok(storefront) => storefront,
        Err(error) => return CommandResult::from_error("order", &error),
    };

    if storefront.catalog.find_by_name(item_name).is_none() {
        warn!(
            event_name = "catalog.order.unknown_item",
            item_name = %item_name,
            "order requested for an item that is not in the catalog"
        );
    }

    let mut notifier = OrderNotifier::new(WriterPresenter::new(display));
    let confirmation = notifier.notify_order(item_name);

    CommandResult::success_with(
        "order",
        format!("order confirmation presented for `{item_name}`"),
        &confirmation,
    )
}
