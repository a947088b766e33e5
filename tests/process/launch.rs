use mysh::process::child::EXIT_NOT_FOUND;
use mysh::process::command;
use mysh::process::error::{ExecError, ExecResult};
use mysh::process::launch::{ForkLauncher, Launcher, Outcome};
use mysh::process::tokenize::tokenize;
use nix::sys::signal::{Signal, kill};
use nix::sys::wait::waitpid;
use nix::unistd::Pid;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::{Duration, Instant};

fn launch(line: &str) -> ExecResult<Outcome> {
    let command = command::build(tokenize(line))?;
    ForkLauncher::new(true).launch(&command)
}

fn completed(line: &str) -> i32 {
    match launch(line).unwrap() {
        Outcome::Completed { status } => status,
        other => panic!("expected a completed command, got {other:?}"),
    }
}

fn detached(line: &str) -> Vec<Pid> {
    match launch(line).unwrap() {
        Outcome::Detached { pids } => pids,
        other => panic!("expected a detached command, got {other:?}"),
    }
}

fn reap(pids: &[Pid]) {
    for &pid in pids {
        let _ = kill(pid, Signal::SIGKILL);
        let _ = waitpid(pid, None);
    }
}

#[test]
fn plain_command_reports_exit_status() {
    assert_eq!(completed("true"), 0);
    assert_eq!(completed("false"), 1);
}

#[test]
fn missing_program_exits_with_not_found_status() {
    assert_eq!(completed("mysh-definitely-not-a-program --flag"), EXIT_NOT_FOUND);
}

#[test]
fn pipeline_connects_first_stage_to_second() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tee.txt");

    let status = completed(&format!("echo hi | tee {}", out.display()));
    assert_eq!(status, 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "hi\n");
}

#[test]
fn pipeline_waits_for_both_stages() {
    assert_eq!(completed("echo hi | wc -w"), 0);
}

#[test]
fn pipeline_reader_sees_end_of_file() {
    // Would hang if the interpreter kept its copy of the write end open.
    assert_eq!(completed("true | cat"), 0);
}

#[test]
fn pipeline_status_comes_from_the_last_stage() {
    assert_eq!(completed("true | false"), 1);
    assert_eq!(completed("false | true"), 0);
}

#[test]
fn redirect_out_creates_and_truncates_target() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("marker"), "").unwrap();
    let out = dir.path().join("out.txt");
    fs::write(&out, "stale contents that must disappear\n").unwrap();

    let status = completed(&format!("ls {} > {}", dir.path().display(), out.display()));
    assert_eq!(status, 0);

    let listing = fs::read_to_string(&out).unwrap();
    assert!(listing.lines().any(|line| line == "marker"));
    assert!(!listing.contains("stale"));
}

#[test]
fn redirect_out_creates_owner_writable_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("new.txt");

    assert_eq!(completed(&format!("echo created > {}", out.display())), 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "created\n");
    let mode = fs::metadata(&out).unwrap().permissions().mode();
    assert_eq!(mode & 0o600, 0o600);
    assert_eq!(mode & 0o007, 0);
}

#[test]
fn redirect_out_to_missing_directory_fails_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("out.txt");

    let err = launch(&format!("echo hi > {}", out.display())).unwrap_err();
    match err {
        ExecError::RedirectTargetUnavailable { path, .. } => assert_eq!(path, out),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn redirect_in_feeds_file_to_standard_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let sorted = dir.path().join("sorted.txt");
    fs::write(&input, "pear\napple\n").unwrap();

    let status = completed(&format!("sort -o {} < {}", sorted.display(), input.display()));
    assert_eq!(status, 0);
    assert_eq!(fs::read_to_string(&sorted).unwrap(), "apple\npear\n");
}

#[test]
fn redirect_in_from_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.txt");

    let err = launch(&format!("cat < {}", input.display())).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
    assert!(err.to_string().contains("No such file or directory"));
    assert!(matches!(err, ExecError::InputSourceNotFound { .. }));
}

#[test]
fn redirect_in_reports_the_underlying_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.txt");
    fs::write(&plain, "").unwrap();
    let input = plain.join("child");

    let err = launch(&format!("cat < {}", input.display())).unwrap_err();
    assert!(matches!(err, ExecError::InputSourceNotFound { .. }));
    let message = err.to_string();
    assert!(message.contains("Not a directory"), "{message}");
    assert!(!message.contains("No such file"), "{message}");
}

#[test]
fn background_command_returns_immediately() {
    let started = Instant::now();
    let pids = detached("sleep 5 &");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(pids.len(), 1);
    reap(&pids);
}

#[test]
fn background_pipeline_detaches_both_stages() {
    let started = Instant::now();
    let pids = detached("sleep 5 | sleep 5 &");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(pids.len(), 2);
    assert_ne!(pids[0], pids[1]);
    reap(&pids);
}

#[test]
fn background_redirect_still_writes_its_target() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bg.txt");

    let pids = detached(&format!("echo later > {} &", out.display()));
    for &pid in &pids {
        waitpid(pid, None).unwrap();
    }
    assert_eq!(fs::read_to_string(&out).unwrap(), "later\n");
}
