use crate::control_state::ControlFlow;
use crate::process::builtin::Builtin;
use crate::process::cwd::WorkingDirectory;
use crate::process::error::ExecResult;

/// Implements the `exit` builtin, allowing the shell to terminate cleanly.
pub struct Exit {}

impl Builtin for Exit {
    /// Arguments are ignored.
    fn call(&mut self, _cwd: &mut dyn WorkingDirectory, _args: &[&str]) -> ExecResult<ControlFlow> {
        Ok(ControlFlow::EXIT)
    }
}

impl Exit {
    /// Construct a new exit builtin instance.
    pub fn new() -> Self {
        Exit {}
    }
}
