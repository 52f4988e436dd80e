use std::borrow::Cow;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chaiwala_core::{
    CatalogSurface, FilterOutcome, OrderConfirmation, OrderNotifier, Presenter, WriterPresenter,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::commands::{CommandResult, Storefront};

const ORDER_PREFIX: &str = "/order ";
const QUIT: &str = "/quit";

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum SessionEvent<'a> {
    Input { outcome: &'a FilterOutcome },
    Order { confirmation: &'a OrderConfirmation },
}

pub fn run() -> CommandResult {
    let mut storefront = match Storefront::open() {
        Ok(storefront) => storefront,
        Err(error) => return CommandResult::from_error("browse", &error),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let presenter = WriterPresenter::new(io::stderr());
    match run_session(&mut storefront, stdin.lock(), stdout.lock(), presenter) {
        Ok(events) => {
            CommandResult::success("browse", format!("session ended after {events} events"))
        }
        Err(error) => CommandResult::failure(
            "browse",
            "session_io",
            format!("session aborted: {error:#}"),
            5,
        ),
    }
}

/// Delivers one event per input line until end of input or `/quit`.
///
/// A line `/order <name>` requests an order and its confirmation goes to
/// `presenter`; any other line becomes the new value of the search box. Bytes
/// that are not valid UTF-8 are replaced rather than ending the session.
/// Returns the number of events handled.
pub fn run_session<R, W, P>(
    storefront: &mut Storefront,
    mut reader: R,
    mut writer: W,
    presenter: P,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    P: Presenter,
{
    let mut notifier = OrderNotifier::new(presenter);
    let mut handled = 0;
    let mut buffer = Vec::new();

    info!(
        event_name = "catalog.session.started",
        item_count = storefront.catalog.len(),
        "browse session started"
    );

    loop {
        buffer.clear();
        let read =
            reader.read_until(b'\n', &mut buffer).context("failed to read session input")?;
        if read == 0 {
            break;
        }
        let line = decode_line(&buffer);
        if line == QUIT {
            break;
        }

        let rendered = if let Some(item_name) = line.strip_prefix(ORDER_PREFIX) {
            let confirmation = notifier.notify_order(item_name);
            to_json(&SessionEvent::Order { confirmation: &confirmation })?
        } else {
            let search_input = storefront.filter.search_input();
            storefront.surface.set_value(search_input, &line);
            let outcome = storefront.filter.on_input(&mut storefront.surface);
            to_json(&SessionEvent::Input { outcome: &outcome })?
        };

        writeln!(writer, "{rendered}").context("failed to write session event")?;
        handled += 1;
    }

    writer.flush().context("failed to flush session output")?;
    info!(event_name = "catalog.session.ended", events = handled, "browse session ended");
    Ok(handled)
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    let line = String::from_utf8_lossy(raw);
    if let Cow::Owned(_) = line {
        warn!(
            event_name = "catalog.session.invalid_utf8",
            "session input line was not valid UTF-8; invalid bytes were replaced"
        );
    }
    line.into_owned()
}

fn to_json(event: &SessionEvent<'_>) -> Result<String> {
    serde_json::to_string(event).context("failed to encode session event")
}
