//! Command execution engine: tokenizing, builtin dispatch and process orchestration.

pub mod builtin;
pub mod cd;
pub mod child;
pub mod command;
pub mod cwd;
pub mod error;
pub mod exit;
pub mod history;
pub mod launch;
pub mod tokenize;

use crate::control_state::ControlFlow;
use builtin::map::BuiltinMap;
use cwd::WorkingDirectory;
use error::ExecResult;
use launch::{Launcher, Outcome};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Runs command lines for one interpreter session.
pub struct Executor {
    builtin_map: BuiltinMap,
    cwd: Box<dyn WorkingDirectory>,
    launcher: Box<dyn Launcher>,
    status: Option<i32>,
}

impl Executor {
    pub fn new(cwd: Box<dyn WorkingDirectory>, launcher: Box<dyn Launcher>) -> Self {
        Self {
            builtin_map: BuiltinMap::new(),
            cwd,
            launcher,
            status: Some(0),
        }
    }

    pub fn cwd(&self) -> &Path {
        self.cwd.current()
    }

    /// Exit status of the last command, `None` when it could not be run.
    pub fn status(&self) -> Option<i32> {
        self.status
    }

    /// Execute a command line, reporting failures on stderr.
    ///
    /// Only `exit` stops the session; every failure continues it.
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> ControlFlow {
        match self.run(line, out) {
            Ok(flow) => flow,
            Err(err) if err.is_empty_command() => ControlFlow::CONTINUE,
            Err(err) => {
                warn!(%err, "command failed");
                eprintln!("mysh: {}", err);
                self.status = None;
                ControlFlow::CONTINUE
            }
        }
    }

    /// Execute a command line, returning failures to the caller.
    ///
    /// Process IDs of detached commands are reported on `out`.
    pub fn run(&mut self, line: &str, out: &mut dyn Write) -> ExecResult<ControlFlow> {
        let command = command::build(tokenize::tokenize(line))?;
        let args = &command.primary()[1..];

        // Determine if command is builtin, and call function
        if let Some(result) = self
            .builtin_map
            .invoke(command.program(), self.cwd.as_mut(), args)
        {
            debug!(builtin = command.program(), "ran builtin");
            let flow = result?;
            self.status = Some(0);
            return Ok(flow);
        }

        match self.launcher.launch(&command)? {
            Outcome::Completed { status } => {
                self.status = Some(status);
            }
            Outcome::Detached { pids } => {
                for pid in pids {
                    let _ = writeln!(out, "PID: {}", pid);
                }
                let _ = out.flush();
                self.status = Some(0);
            }
        }
        Ok(ControlFlow::CONTINUE)
    }
}
