pub mod map;

use super::cwd::WorkingDirectory;
use super::error::ExecResult;
use crate::control_state::ControlFlow;

/// Commands that run inside the interpreter and are never forked.
pub const BUILTIN_NAMES: [&str; 2] = ["cd", "exit"];

pub trait Builtin {
    fn call(&mut self, cwd: &mut dyn WorkingDirectory, args: &[&str]) -> ExecResult<ControlFlow>;
}
