//! `mysh`: a small interactive shell.
//!
//! Each line is tokenized on whitespace, split around at most one `|`, `>` or `<`,
//! and either handled by a builtin (`cd`, `exit`) or run as forked child processes.
//! A trailing `&` detaches the command.

pub mod complete;
pub mod conf;
pub mod control;
pub mod control_state;
pub mod process;
