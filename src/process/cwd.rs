//! Working directory of the interpreter session.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Capability to read and change the session's working directory.
///
/// The `cd` builtin only goes through this trait, so sessions can be driven
/// against an in-memory directory tree.
pub trait WorkingDirectory {
    fn current(&self) -> &Path;
    fn change(&mut self, target: &Path) -> io::Result<()>;
}

/// Working directory backed by the process-wide current directory, which child
/// processes inherit.
#[derive(Debug, Clone)]
pub struct ProcessWorkingDirectory {
    current: PathBuf,
}

impl ProcessWorkingDirectory {
    /// Start from the process's current directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            current: env::current_dir()?,
        })
    }
}

impl WorkingDirectory for ProcessWorkingDirectory {
    fn current(&self) -> &Path {
        &self.current
    }

    /// Hand `target` to `chdir` as typed and track where the kernel put us.
    fn change(&mut self, target: &Path) -> io::Result<()> {
        env::set_current_dir(target)?;
        self.current = env::current_dir()?;
        Ok(())
    }
}
