//! Plain-text carousel output.

use std::io::Write;

use storefront_featured::{CarouselCard, Renderer};

/// Prints each presented card as a short block of lines.
///
/// Write errors are logged and otherwise ignored; a closed stdout must not
/// take the carousel down.
pub struct TerminalRenderer<W> {
    out: W,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("failed to write carousel output: {}", err);
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, card: &CarouselCard) {
        let text = format!(
            "[{}] {}\n    {}  Delivery: {}\n    {}\n    {}\n",
            card.index + 1,
            card.title,
            card.price,
            card.delivery,
            card.image,
            card.link
        );
        self.emit(&text);
    }

    fn show_message(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }

    fn set_paused(&mut self, paused: bool) {
        self.emit(if paused { "(paused)\n" } else { "(playing)\n" });
    }
}
