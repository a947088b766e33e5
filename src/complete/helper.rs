use rustyline::highlight::Highlighter;
use rustyline::hint::HistoryHinter;
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow::{self, Borrowed, Owned};

/// Line editor helper that hints from history and highlights the prompt.
#[derive(Completer, Helper, Hinter, Validator)]
pub struct MyshHelper {
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    color: bool,
}

impl MyshHelper {
    pub fn new(hinter: HistoryHinter, color: bool) -> Self {
        Self { hinter, color }
    }
}

impl Highlighter for MyshHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Borrowed(prompt)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if self.color {
            Owned(format!("\x1b[2m{hint}\x1b[m"))
        } else {
            Borrowed(hint)
        }
    }
}
