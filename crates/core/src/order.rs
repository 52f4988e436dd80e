use std::io::Write;

use serde::Serialize;
use tracing::{info, warn};

/// Something that can show a blocking acknowledgement to the shopper.
pub trait Presenter {
    fn present(&mut self, message: &str);
}

impl Presenter for Vec<String> {
    fn present(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

/// Writes each message to a stream, followed by a blank line, and flushes it
/// right away so the acknowledgement is visible before the next event.
#[derive(Debug)]
pub struct WriterPresenter<W> {
    writer: W,
}

impl<W: Write> WriterPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for WriterPresenter<W> {
    fn present(&mut self, message: &str) {
        let written = writeln!(self.writer, "{message}\n").and_then(|()| self.writer.flush());
        if let Err(error) = written {
            warn!(
                event_name = "catalog.order.present_failed",
                error = %error,
                "order confirmation could not be written"
            );
        }
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, message: &str) {
        (**self).present(message);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub item_name: String,
    pub message: String,
}

/// Acknowledges order requests. There is no backend: nothing is recorded and the
/// item name is not checked against the catalog.
#[derive(Debug)]
pub struct OrderNotifier<P> {
    presenter: P,
}

impl<P: Presenter> OrderNotifier<P> {
    pub fn new(presenter: P) -> Self {
        Self { presenter }
    }

    pub fn notify_order(&mut self, item_name: &str) -> OrderConfirmation {
        let message = confirmation_message(item_name);
        self.presenter.present(&message);

        info!(
            event_name = "catalog.order.notified",
            item_name = %item_name,
            "order confirmation presented"
        );

        OrderConfirmation { item_name: item_name.to_owned(), message }
    }

    pub fn into_inner(self) -> P {
        self.presenter
    }
}

pub fn confirmation_message(item_name: &str) -> String {
    format!(
        "Thank you for ordering {item_name}! 🍵\n\nYour order has been placed successfully.\nEnjoy your chai with some code! 💻"
    )
}

#[cfg(test)]
mod tests {
    use super::{confirmation_message, OrderNotifier, WriterPresenter};

    #[test]
    fn notify_presents_message_once() {
        let mut notifier = OrderNotifier::new(Vec::new());

        let confirmation = notifier.notify_order("Masala Chai");
        let presented = notifier.into_inner();

        assert_eq!(presented.len(), 1);
        assert!(presented[0].contains("Masala Chai"));
        assert_eq!(presented[0], confirmation.message);
    }

    #[test]
    fn each_call_presents_again() {
        let mut shown = Vec::new();
        {
            let mut notifier = OrderNotifier::new(&mut shown);
            notifier.notify_order("Ginger Chai");
            notifier.notify_order("Ginger Chai");
        }

        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0], shown[1]);
    }

    #[test]
    fn writer_presenter_writes_each_message_once() {
        let mut notifier = OrderNotifier::new(WriterPresenter::new(Vec::new()));

        notifier.notify_order("Elachi Chai");
        let written = notifier.into_inner().into_inner();
        let written = String::from_utf8(written).expect("utf-8 output");

        assert_eq!(written.matches("Thank you for ordering Elachi Chai!").count(), 1);
        assert!(written.ends_with("some code! 💻\n\n"));
    }

    #[test]
    fn message_follows_fixed_template() {
        assert_eq!(
            confirmation_message("Kiwi Chai"),
            "Thank you for ordering Kiwi Chai! 🍵\n\nYour order has been placed successfully.\nEnjoy your chai with some code! 💻"
        );
    }

    #[test]
    fn names_are_interpolated_verbatim() {
        let message = confirmation_message("<b>Chai & \"Co\"</b>");

        assert!(message.contains("<b>Chai & \"Co\"</b>"));
    }
}
