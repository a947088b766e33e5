//! Child side of a spawn.
//!
//! Everything a child needs is prepared in the parent before the fork: the argument
//! vector as C strings plus the pointer array `execvp` wants, the descriptors to bind
//! onto the standard slots, the descriptors to close, and the not-found message.
//! After the fork the child only calls `dup2`, `close`, `execvp`, `write` and
//! `_exit`, none of which allocate.

use super::error::{ExecError, ExecResult};
use nix::libc::{self, c_char};
use nix::unistd::{close, dup2};
use std::ffi::CString;
use std::os::fd::RawFd;
use std::ptr;

/// Exit status of a child whose program could not be executed.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit status of a child that could not wire its standard streams.
pub const EXIT_SETUP_FAILED: i32 = 126;

pub struct ChildPlan {
    argv: Vec<CString>,
    argv_ptrs: Vec<*const c_char>,
    stdin: Option<RawFd>,
    stdout: Option<RawFd>,
    close: Vec<RawFd>,
    not_found: Vec<u8>,
}

impl ChildPlan {
    /// Prepare a plan that replaces the child's image with `words`.
    pub fn new(words: &[&str]) -> ExecResult<Self> {
        let program = words[0];
        let argv = words
            .iter()
            .map(|word| CString::new(*word))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ExecError::ArgumentContainsNul {
                program: program.to_string(),
            })?;

        let mut argv_ptrs: Vec<*const c_char> = argv.iter().map(|arg| arg.as_ptr()).collect();
        argv_ptrs.push(ptr::null());

        let not_found = format!(
            "mysh: {}\n",
            ExecError::CommandNotFound {
                program: program.to_string(),
            }
        )
        .into_bytes();

        Ok(Self {
            argv,
            argv_ptrs,
            stdin: None,
            stdout: None,
            close: Vec::new(),
            not_found,
        })
    }

    pub fn stdin_from(mut self, fd: RawFd) -> Self {
        self.stdin = Some(fd);
        self
    }

    pub fn stdout_to(mut self, fd: RawFd) -> Self {
        self.stdout = Some(fd);
        self
    }

    /// Descriptor the child must close once the standard slots are bound.
    pub fn closing(mut self, fd: RawFd) -> Self {
        self.close.push(fd);
        self
    }

    pub fn program(&self) -> String {
        self.argv[0].to_string_lossy().into_owned()
    }

    /// Bind descriptors and replace the process image. Never returns.
    pub fn exec(&self) -> ! {
        let bindings = [
            (self.stdin, libc::STDIN_FILENO),
            (self.stdout, libc::STDOUT_FILENO),
        ];
        for (source, slot) in bindings {
            if let Some(fd) = source {
                if retry(|| dup2(fd, slot)).is_err() {
                    exit_with(b"mysh: unable to redirect standard stream\n", EXIT_SETUP_FAILED);
                }
            }
        }

        for &fd in &self.close {
            if fd > libc::STDERR_FILENO {
                let _ = close(fd);
            }
        }

        // Only returns on failure.
        unsafe {
            libc::execvp(self.argv_ptrs[0], self.argv_ptrs.as_ptr());
        }
        exit_with(&self.not_found, EXIT_NOT_FOUND)
    }
}

/// Retry a system call interrupted by a signal.
pub(crate) fn retry<F, T>(f: F) -> nix::Result<T>
where
    F: Fn() -> nix::Result<T>,
{
    loop {
        match f() {
            Err(nix::Error::EINTR) => (),
            result => return result,
        }
    }
}

fn exit_with(message: &[u8], status: i32) -> ! {
    unsafe {
        libc::write(
            libc::STDERR_FILENO,
            message.as_ptr().cast(),
            message.len(),
        );
        libc::_exit(status)
    }
}
