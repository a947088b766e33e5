//! Grouping of tokens into the argument vectors of one command line.

use super::tokenize::{BACKGROUND, Operator};
use thiserror::Error;

/// How the standard streams of a command line are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plain,
    Pipe,
    RedirectOut,
    RedirectIn,
}

impl From<Operator> for Mode {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Pipe => Mode::Pipe,
            Operator::RedirectOut => Mode::RedirectOut,
            Operator::RedirectIn => Mode::RedirectIn,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to run. Callers treat this as a no-op.
    #[error("empty command")]
    EmptyCommand,
    #[error("only one of '|', '>' or '<' is supported per line, found '{first}' and '{second}'")]
    AmbiguousOperators { first: Operator, second: Operator },
    #[error("missing operand after '{0}'")]
    MissingOperand(Operator),
    #[error("'{operator}' expects a single path, found {count} words")]
    RedirectArity { operator: Operator, count: usize },
}

/// The parsed shape of one command line, borrowing its words from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor<'a> {
    primary: Vec<&'a str>,
    secondary: Option<Vec<&'a str>>,
    mode: Mode,
    background: bool,
}

impl<'a> CommandDescriptor<'a> {
    /// Program name and arguments of the left-hand (or only) command.
    pub fn primary(&self) -> &[&'a str] {
        &self.primary
    }

    /// Right-hand command of a pipe, or the single path of a redirection.
    pub fn secondary(&self) -> Option<&[&'a str]> {
        self.secondary.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_background(&self) -> bool {
        self.background
    }

    pub fn program(&self) -> &'a str {
        self.primary[0]
    }
}

/// Consume a token sequence once and build its descriptor.
///
/// A second operator on the same line is rejected rather than guessed at.
pub fn build<'a, I>(tokens: I) -> Result<CommandDescriptor<'a>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut primary = Vec::new();
    let mut secondary = Vec::new();
    let mut operator: Option<Operator> = None;

    for token in tokens {
        match (Operator::classify(token), operator) {
            (Some(second), Some(first)) => {
                return Err(ParseError::AmbiguousOperators { first, second });
            }
            (Some(found), None) => operator = Some(found),
            (None, Some(_)) => secondary.push(token),
            (None, None) => primary.push(token),
        }
    }

    let last = if secondary.is_empty() {
        &mut primary
    } else {
        &mut secondary
    };
    let background = last.last() == Some(&BACKGROUND);
    if background {
        last.pop();
    }

    if primary.is_empty() {
        return Err(ParseError::EmptyCommand);
    }

    let Some(operator) = operator else {
        return Ok(CommandDescriptor {
            primary,
            secondary: None,
            mode: Mode::Plain,
            background,
        });
    };

    if secondary.is_empty() {
        return Err(ParseError::MissingOperand(operator));
    }
    if operator != Operator::Pipe && secondary.len() != 1 {
        return Err(ParseError::RedirectArity {
            operator,
            count: secondary.len(),
        });
    }

    Ok(CommandDescriptor {
        primary,
        secondary: Some(secondary),
        mode: Mode::from(operator),
        background,
    })
}
