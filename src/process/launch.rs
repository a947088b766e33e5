//! Creation, wiring and reaping of child processes.

use super::child::{ChildPlan, retry};
use super::command::{CommandDescriptor, Mode};
use super::error::{ExecError, ExecResult};
use nix::fcntl::OFlag;
use nix::sys::signal::{Signal, kill};
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, fork, pipe2};
use std::fs::{File, OpenOptions};
use std::os::fd::{AsRawFd, OwnedFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing::{debug, warn};

/// Where a detached command's standard output goes.
const DISCARD: &str = "/dev/null";

/// Permissions of a file created by `>`.
const REDIRECT_MODE: u32 = 0o660;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    WaitSynchronously,
    Detached,
}

/// A spawned process and what the orchestrator intends to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    pid: Pid,
    disposition: Disposition,
}

impl ProcessHandle {
    pub fn new(pid: Pid, disposition: Disposition) -> Self {
        Self { pid, disposition }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// Block until the process terminates and return its exit status.
    ///
    /// A process killed by a signal reports `128 + signal`, as shells do.
    pub fn wait(self) -> ExecResult<i32> {
        let status = retry(|| waitpid(self.pid, None)).map_err(|source| ExecError::WaitFailed {
            pid: self.pid.as_raw(),
            source,
        })?;
        debug!(pid = self.pid.as_raw(), ?status, "reaped child");
        Ok(match status {
            WaitStatus::Exited(_, code) => code,
            WaitStatus::Signaled(_, signal, _) => 128 + signal as i32,
            _ => 0,
        })
    }
}

/// Result of handing a command line to a [`Launcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every process was reaped; `status` is the exit status of the last one.
    Completed { status: i32 },
    /// Processes were left running and will not be reaped by the session.
    Detached { pids: Vec<Pid> },
}

/// Runs a parsed command line as external processes.
pub trait Launcher {
    fn launch(&mut self, command: &CommandDescriptor<'_>) -> ExecResult<Outcome>;
}

/// Launcher that forks the interpreter and replaces the child images.
#[derive(Debug, Clone)]
pub struct ForkLauncher {
    discard_background_output: bool,
}

impl ForkLauncher {
    pub fn new(discard_background_output: bool) -> Self {
        Self {
            discard_background_output,
        }
    }

    fn disposition(command: &CommandDescriptor<'_>) -> Disposition {
        if command.is_background() {
            Disposition::Detached
        } else {
            Disposition::WaitSynchronously
        }
    }

    /// Open the discard destination when a detached command would otherwise write
    /// to the terminal.
    fn background_sink(&self, command: &CommandDescriptor<'_>) -> ExecResult<Option<File>> {
        if !command.is_background() || !self.discard_background_output {
            return Ok(None);
        }
        let sink = OpenOptions::new()
            .write(true)
            .open(DISCARD)
            .map_err(|source| ExecError::RedirectTargetUnavailable {
                path: DISCARD.into(),
                source,
            })?;
        Ok(Some(sink))
    }

    fn launch_plain(&self, command: &CommandDescriptor<'_>) -> ExecResult<Vec<ProcessHandle>> {
        let sink = self.background_sink(command)?;
        let mut plan = ChildPlan::new(command.primary())?;
        if let Some(sink) = &sink {
            plan = plan.stdout_to(sink.as_raw_fd()).closing(sink.as_raw_fd());
        }
        let handle = spawn(&plan, Self::disposition(command))?;
        Ok(vec![handle])
    }

    fn launch_redirect_out(
        &self,
        command: &CommandDescriptor<'_>,
        target: &Path,
    ) -> ExecResult<Vec<ProcessHandle>> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(REDIRECT_MODE)
            .open(target)
            .map_err(|source| ExecError::RedirectTargetUnavailable {
                path: target.to_path_buf(),
                source,
            })?;
        debug!(fd = file.as_raw_fd(), target = %target.display(), "opened redirect target");

        let plan = ChildPlan::new(command.primary())?
            .stdout_to(file.as_raw_fd())
            .closing(file.as_raw_fd());
        let handle = spawn(&plan, Self::disposition(command))?;
        drop(file);
        Ok(vec![handle])
    }

    fn launch_redirect_in(
        &self,
        command: &CommandDescriptor<'_>,
        source_path: &Path,
    ) -> ExecResult<Vec<ProcessHandle>> {
        let file = File::open(source_path).map_err(|source| ExecError::InputSourceNotFound {
            path: source_path.to_path_buf(),
            source,
        })?;
        debug!(fd = file.as_raw_fd(), source = %source_path.display(), "opened redirect source");
        let sink = self.background_sink(command)?;

        let mut plan = ChildPlan::new(command.primary())?
            .stdin_from(file.as_raw_fd())
            .closing(file.as_raw_fd());
        if let Some(sink) = &sink {
            plan = plan.stdout_to(sink.as_raw_fd()).closing(sink.as_raw_fd());
        }
        let handle = spawn(&plan, Self::disposition(command))?;
        drop(file);
        Ok(vec![handle])
    }

    fn launch_pipeline(
        &self,
        command: &CommandDescriptor<'_>,
        right: &[&str],
    ) -> ExecResult<Vec<ProcessHandle>> {
        let disposition = Self::disposition(command);
        let sink = self.background_sink(command)?;
        let writer_plan = ChildPlan::new(command.primary())?;
        let mut reader_plan = ChildPlan::new(right)?;

        let (read_end, write_end) = create_pipe()?;
        let (read_fd, write_fd) = (read_end.as_raw_fd(), write_end.as_raw_fd());
        debug!(read_fd, write_fd, "created pipe");

        let writer_plan = writer_plan
            .stdout_to(write_fd)
            .closing(read_fd)
            .closing(write_fd);
        reader_plan = reader_plan
            .stdin_from(read_fd)
            .closing(read_fd)
            .closing(write_fd);
        if let Some(sink) = &sink {
            reader_plan = reader_plan
                .stdout_to(sink.as_raw_fd())
                .closing(sink.as_raw_fd());
        }

        let writer = spawn(&writer_plan, disposition)?;
        let reader = match spawn(&reader_plan, disposition) {
            Ok(reader) => reader,
            Err(err) => {
                drop(read_end);
                drop(write_end);
                abandon(writer);
                return Err(err);
            }
        };

        // Readers only see end-of-file once every copy of the write end is closed.
        drop(read_end);
        drop(write_end);
        debug!("closed pipe ends in the interpreter");

        Ok(vec![writer, reader])
    }
}

impl Launcher for ForkLauncher {
    fn launch(&mut self, command: &CommandDescriptor<'_>) -> ExecResult<Outcome> {
        let handles = match (command.mode(), command.secondary()) {
            (Mode::Pipe, Some(right)) => self.launch_pipeline(command, right)?,
            (Mode::RedirectOut, Some(&[target])) => {
                self.launch_redirect_out(command, Path::new(target))?
            }
            (Mode::RedirectIn, Some(&[source])) => {
                self.launch_redirect_in(command, Path::new(source))?
            }
            _ => self.launch_plain(command)?,
        };
        settle(handles)
    }
}

/// Fork and run `plan` in the child. The parent gets the child's handle back.
pub fn spawn(plan: &ChildPlan, disposition: Disposition) -> ExecResult<ProcessHandle> {
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            debug!(pid = child.as_raw(), program = %plan.program(), ?disposition, "spawned child");
            Ok(ProcessHandle::new(child, disposition))
        }
        Ok(ForkResult::Child) => plan.exec(),
        Err(source) => {
            warn!(program = %plan.program(), %source, "fork failed");
            Err(ExecError::ProcessCreationFailed {
                program: plan.program(),
                source,
            })
        }
    }
}

/// Wait for foreground processes in spawn order, or report detached ones.
fn settle(handles: Vec<ProcessHandle>) -> ExecResult<Outcome> {
    let detached = handles
        .iter()
        .all(|handle| handle.disposition() == Disposition::Detached);
    if detached {
        return Ok(Outcome::Detached {
            pids: handles.iter().map(ProcessHandle::pid).collect(),
        });
    }

    // Reap every stage even if an earlier wait fails.
    let mut status = Ok(0);
    for handle in handles {
        let result = handle.wait();
        if status.is_ok() {
            status = result;
        }
    }
    Ok(Outcome::Completed { status: status? })
}

/// Create a pipe whose ends are close-on-exec from the start, so no program
/// exec'd concurrently by another thread inherits them.
fn create_pipe() -> ExecResult<(OwnedFd, OwnedFd)> {
    pipe2(OFlag::O_CLOEXEC).map_err(ExecError::PipeCreationFailed)
}

/// Kill and reap a pipeline stage whose partner could not be started.
fn abandon(handle: ProcessHandle) {
    if let Err(err) = kill(handle.pid(), Signal::SIGKILL) {
        warn!(pid = handle.pid().as_raw(), %err, "unable to kill abandoned child");
    }
    if let Err(err) = handle.wait() {
        warn!(%err, "unable to reap abandoned child");
    }
}
