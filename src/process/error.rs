use super::command::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("cd: {path}: {source}")]
    DirectoryChangeFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{program}: command not found")]
    CommandNotFound { program: String },
    #[error("{path}: cannot open for writing: {source}")]
    RedirectTargetUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}: cannot open for reading: {source}")]
    InputSourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{program}: unable to create process: {source}")]
    ProcessCreationFailed {
        program: String,
        #[source]
        source: nix::Error,
    },
    #[error("unable to create pipe: {0}")]
    PipeCreationFailed(#[source] nix::Error),
    #[error("{program}: argument contains a nul byte")]
    ArgumentContainsNul { program: String },
    #[error("unable to wait for process {pid}: {source}")]
    WaitFailed {
        pid: i32,
        #[source]
        source: nix::Error,
    },
}

impl ExecError {
    /// True for an empty line, which is a no-op rather than a failure.
    pub fn is_empty_command(&self) -> bool {
        matches!(self, ExecError::Parse(ParseError::EmptyCommand))
    }
}

pub type ExecResult<T> = Result<T, ExecError>;
