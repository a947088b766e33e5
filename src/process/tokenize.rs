//! Splitting of a command line into word tokens.

use std::fmt;
use std::str::Split;

/// Characters that separate words on a command line.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Trailing word that detaches a command from the interpreter.
pub const BACKGROUND: &str = "&";

/// Operators that change how the standard streams of a command are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Pipe,
    RedirectOut,
    RedirectIn,
}

impl Operator {
    /// Classify a token, returning `None` for ordinary words.
    pub fn classify(token: &str) -> Option<Self> {
        match token {
            "|" => Some(Operator::Pipe),
            ">" => Some(Operator::RedirectOut),
            "<" => Some(Operator::RedirectIn),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Pipe => "|",
            Operator::RedirectOut => ">",
            Operator::RedirectIn => "<",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Lazy iterator over the words of a command line.
///
/// Runs of delimiters never yield empty tokens. Nothing is escaped or quoted, so
/// operator characters come through as ordinary tokens for the builder to classify.
pub struct Tokens<'a> {
    inner: Split<'a, [char; 5]>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.by_ref().find(|token| !token.is_empty())
    }
}

/// Tokenize a command line on [`DELIMITERS`].
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens {
        inner: line.split(DELIMITERS),
    }
}
