//! State machine backing the interactive control loop.

use crate::conf::{ConfigurationModel, home_dir};
use crate::process::Executor;
use crate::process::cwd::ProcessWorkingDirectory;
use crate::process::history::{self, LastCommand, Substitution};
use crate::process::launch::ForkLauncher;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Signals whether the control loop should continue or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep reading user input.
    CONTINUE,
    /// Terminate the control loop.
    EXIT,
}

/// Shared state that backs the interactive control loop.
pub struct ControlState {
    executor: Executor,
    last_command: LastCommand,
    history_file: Option<PathBuf>,
    prompt_name: String,
    color: bool,
}

impl ControlState {
    /// Build a control state that runs commands against the real process.
    pub fn new(config: &ConfigurationModel) -> io::Result<Self> {
        let executor = Executor::new(
            Box::new(ProcessWorkingDirectory::new()?),
            Box::new(ForkLauncher::new(config.exec.discard_background_output())),
        );
        Ok(Self {
            executor,
            last_command: LastCommand::new(),
            history_file: config.history.resolved_file(config),
            prompt_name: config.ui.prompt_name().to_string(),
            color: config.ui.color(),
        })
    }

    /// Build a control state around an existing executor, without a history file.
    pub fn with_executor(executor: Executor) -> Self {
        let defaults = ConfigurationModel::default();
        Self {
            executor,
            last_command: LastCommand::new(),
            history_file: None,
            prompt_name: defaults.ui.prompt_name().to_string(),
            color: false,
        }
    }

    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    pub fn history_file(&self) -> Option<&Path> {
        self.history_file.as_deref()
    }

    pub fn status(&self) -> Option<i32> {
        self.executor.status()
    }

    pub fn cwd(&self) -> &Path {
        self.executor.cwd()
    }

    pub fn last_command(&self) -> Option<&str> {
        self.last_command.get()
    }

    /// Render the prompt string with status colouring and the current directory.
    pub fn prompt(&self) -> String {
        let cwd = update_cwd(self.executor.cwd());
        if self.color {
            generate_prompt(&self.prompt_name, &cwd, self.executor.status())
        } else {
            format!("{}:{}$ ", self.prompt_name, cwd)
        }
    }

    /// Trim a line, apply `!!` substitution, and execute it.
    ///
    /// Messages about the substitution and background process IDs are written to `out`.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> ControlFlow {
        let line = line.trim();
        let command = match self.last_command.substitute(line) {
            Substitution::Empty => {
                let _ = writeln!(out, "No commands in history.");
                return ControlFlow::CONTINUE;
            }
            Substitution::Recalled(command) => {
                let _ = writeln!(out, "{}", command);
                command
            }
            Substitution::Verbatim(command) => command,
        };
        let _ = out.flush();

        let unix_timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);

        let flow = self.executor.execute(&command, out);

        // Append executed line to end of history
        if !command.is_empty() {
            self.record(unix_timestamp, &command);
        }

        flow
    }

    fn record(&self, timestamp: u64, command: &str) {
        let Some(path) = self.history_file.as_deref() else {
            return;
        };
        if let Err(err) = history::append_history(path, timestamp, self.executor.status(), command) {
            warn!(path = %path.display(), %err, "unable to write history file");
        }
    }
}

/// Construct the shell prompt string combining status colouring and the cwd.
fn generate_prompt(name: &str, cwd: &str, status: Option<i32>) -> String {
    let arrow = 0x27A3;
    let red_text = "\u{1b}[31m";
    let green_text = "\u{1b}[32m";
    let purple_text = "\u{1b}[35m";
    let end_color_text = "\u{1b}[39m";

    format!(
        "{}{}:{}{} {}{}{} ",
        purple_text,
        name,
        cwd,
        end_color_text,
        match status {
            Some(0) => green_text,
            _ => red_text,
        },
        char::from_u32(arrow).unwrap_or('>'),
        end_color_text,
    )
}

/// Replace the home directory portion of the cwd with `~` for a compact prompt.
fn update_cwd(cwd: &Path) -> String {
    let cwd = cwd.to_string_lossy();
    match home_dir() {
        Some(home) => {
            let home = home.to_string_lossy();
            match cwd.strip_prefix(home.as_ref()) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("~{}", rest),
                _ => cwd.into_owned(),
            }
        }
        None => cwd.into_owned(),
    }
}
