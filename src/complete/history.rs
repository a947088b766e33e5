use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Load the most recent `limit` commands from a history file.
pub fn load_history_entries(path: &Path, limit: usize) -> io::Result<Vec<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let reader = BufReader::new(file);
    let mut entries = VecDeque::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(cmd) = parse_history_command(&line) {
            entries.push_back(cmd);
            if entries.len() > limit {
                entries.pop_front();
            }
        }
    }

    Ok(entries.into_iter().collect())
}

/// Parse a persisted history line and extract the raw command if present.
fn parse_history_command(line: &str) -> Option<String> {
    let mut parts = line.splitn(3, ':');
    let timestamp = parts.next()?;
    if timestamp.is_empty() {
        return None;
    }
    parts.next()?; // status
    let command = parts.next()?;
    if command.is_empty() {
        None
    } else {
        Some(command.to_string())
    }
}
