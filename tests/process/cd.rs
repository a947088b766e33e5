use mysh::control_state::ControlFlow;
use mysh::process::builtin::Builtin;
use mysh::process::cd::Cd;
use mysh::process::cwd::{ProcessWorkingDirectory, WorkingDirectory};
use mysh::process::error::ExecError;
use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env<'a>() -> MutexGuard<'a, ()> {
    match ENV_LOCK.lock() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

struct TestEnv {
    temp_dir: TempDir,
    original_dir: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().unwrap(),
            original_dir: env::current_dir().unwrap(),
        }
    }

    fn root(&self) -> PathBuf {
        canonical_path(self.temp_dir.path())
    }

    fn working_directory(&self) -> ProcessWorkingDirectory {
        env::set_current_dir(self.root()).unwrap();
        ProcessWorkingDirectory::new().unwrap()
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        env::set_current_dir(&self.original_dir).ok();
    }
}

fn run_cd(cwd: &mut dyn WorkingDirectory, args: &[&str]) -> Result<ControlFlow, ExecError> {
    Cd::new().call(cwd, args)
}

#[test]
fn cd_changes_process_working_directory() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let target = env_state.root().join("project");
    fs::create_dir_all(&target).unwrap();
    let mut cwd = env_state.working_directory();

    assert_eq!(run_cd(&mut cwd, &["project"]).unwrap(), ControlFlow::CONTINUE);
    assert_paths_equal(&env::current_dir().unwrap(), &target);
    assert_paths_equal(cwd.current(), &target);
}

#[test]
fn cd_to_parent_directory() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let nested = env_state.root().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    let mut cwd = env_state.working_directory();

    run_cd(&mut cwd, &["a/b"]).unwrap();
    run_cd(&mut cwd, &[".."]).unwrap();
    assert_paths_equal(&env::current_dir().unwrap(), &env_state.root().join("a"));
}

#[test]
fn cd_reports_missing_directory_and_stays_put() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let mut cwd = env_state.working_directory();

    let err = run_cd(&mut cwd, &["missing"]).unwrap_err();
    match err {
        ExecError::DirectoryChangeFailed { ref path, .. } => {
            assert_eq!(path, Path::new("missing"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("missing"));
    assert_paths_equal(&env::current_dir().unwrap(), &env_state.root());
    assert_paths_equal(cwd.current(), &env_state.root());
}

#[test]
fn cd_without_operand_is_a_noop() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let mut cwd = env_state.working_directory();

    assert_eq!(run_cd(&mut cwd, &[]).unwrap(), ControlFlow::CONTINUE);
    assert_paths_equal(&env::current_dir().unwrap(), &env_state.root());
}

#[test]
fn cd_dot_is_idempotent() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let mut cwd = env_state.working_directory();

    for _ in 0..3 {
        run_cd(&mut cwd, &["."]).unwrap();
        assert_paths_equal(&env::current_dir().unwrap(), &env_state.root());
        assert_paths_equal(cwd.current(), &env_state.root());
    }
}

#[test]
fn cd_through_missing_component_fails() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let mut cwd = env_state.working_directory();

    let err = run_cd(&mut cwd, &["no-such-dir/.."]).unwrap_err();
    assert!(matches!(err, ExecError::DirectoryChangeFailed { .. }));
    assert_paths_equal(&env::current_dir().unwrap(), &env_state.root());
    assert_paths_equal(cwd.current(), &env_state.root());
}

#[test]
fn cd_parent_of_symlink_follows_the_link() {
    let _guard = lock_env();
    let env_state = TestEnv::new();
    let inner = env_state.root().join("real").join("inner");
    fs::create_dir_all(&inner).unwrap();
    std::os::unix::fs::symlink(&inner, env_state.root().join("link")).unwrap();
    let mut cwd = env_state.working_directory();

    run_cd(&mut cwd, &["link/.."]).unwrap();
    let expected = env_state.root().join("real");
    assert_paths_equal(&env::current_dir().unwrap(), &expected);
    assert_paths_equal(cwd.current(), &expected);
}

fn canonical_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn assert_paths_equal(lhs: &Path, rhs: &Path) {
    assert_eq!(canonical_path(lhs), canonical_path(rhs));
}
