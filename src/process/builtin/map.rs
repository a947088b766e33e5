use super::Builtin;
use crate::control_state::ControlFlow;
use crate::process::cd::Cd;
use crate::process::cwd::WorkingDirectory;
use crate::process::error::ExecResult;
use crate::process::exit::Exit;
use std::collections::HashMap;

/// Registry of builtins keyed by command name.
pub struct BuiltinMap {
    func_map: HashMap<String, Box<dyn Builtin>>,
}

impl BuiltinMap {
    /// Build a registry holding the default builtins.
    pub fn new() -> Self {
        let mut builtin = BuiltinMap {
            func_map: HashMap::new(),
        };
        builtin.add("cd", Box::new(Cd::new()));
        builtin.add("exit", Box::new(Exit::new()));
        builtin
    }

    pub fn add(&mut self, func_name: &str, func: Box<dyn Builtin>) {
        self.func_map.insert(func_name.to_string(), func);
    }

    pub fn contains(&self, func_name: &str) -> bool {
        self.func_map.contains_key(func_name)
    }

    /// Run `func_name` if it is a builtin, returning `None` otherwise.
    pub fn invoke(
        &mut self,
        func_name: &str,
        cwd: &mut dyn WorkingDirectory,
        args: &[&str],
    ) -> Option<ExecResult<ControlFlow>> {
        self.func_map
            .get_mut(func_name)
            .map(|builtin| builtin.call(cwd, args))
    }
}

impl Default for BuiltinMap {
    fn default() -> Self {
        Self::new()
    }
}
