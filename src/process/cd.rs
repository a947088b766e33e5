use crate::control_state::ControlFlow;
use crate::process::builtin::Builtin;
use crate::process::cwd::WorkingDirectory;
use crate::process::error::{ExecError, ExecResult};
use std::path::Path;
use tracing::debug;

/// Implements the `cd` builtin against the session's working directory.
///
/// Only the first operand is used; without one the directory is left alone.
pub struct Cd {}

impl Builtin for Cd {
    fn call(&mut self, cwd: &mut dyn WorkingDirectory, args: &[&str]) -> ExecResult<ControlFlow> {
        let Some(target) = args.first() else {
            return Ok(ControlFlow::CONTINUE);
        };

        let path = Path::new(target);
        cwd.change(path)
            .map_err(|source| ExecError::DirectoryChangeFailed {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(cwd = %cwd.current().display(), "changed directory");
        Ok(ControlFlow::CONTINUE)
    }
}

impl Cd {
    pub fn new() -> Self {
        Cd {}
    }
}
