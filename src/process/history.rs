use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Marker that re-runs the previous command.
pub const REPEAT_LAST: &str = "!!";

/// Single remembered command used for `!!` substitution.
#[derive(Debug, Clone, Default)]
pub struct LastCommand {
    line: Option<String>,
}

/// What a line turned into after history substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// The line runs as typed.
    Verbatim(String),
    /// The line was `!!` and is replaced by the remembered command.
    Recalled(String),
    /// The line was `!!` but nothing has been run yet.
    Empty,
}

impl LastCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute `!!` and remember every other non-empty line.
    pub fn substitute(&mut self, line: &str) -> Substitution {
        if line == REPEAT_LAST {
            return match &self.line {
                Some(previous) => Substitution::Recalled(previous.clone()),
                None => Substitution::Empty,
            };
        }

        if !line.is_empty() {
            self.line = Some(line.to_string());
        }
        Substitution::Verbatim(line.to_string())
    }

    pub fn get(&self) -> Option<&str> {
        self.line.as_deref()
    }
}

/// Append an executed line to the history file as `timestamp:status:line`.
pub fn append_history(
    path: &Path,
    timestamp: u64,
    status: Option<i32>,
    line: &str,
) -> io::Result<()> {
    let status_code = status.unwrap_or(1);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}:{}:{}", timestamp, status_code, line.trim_end_matches('\n'))
}
