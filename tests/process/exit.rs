use crate::support::MemoryWorkingDirectory;
use mysh::control_state::ControlFlow;
use mysh::process::builtin::Builtin;
use mysh::process::exit::Exit;

#[test]
fn exit_requests_termination() {
    let mut cwd = MemoryWorkingDirectory::new("/", &[]);
    let flow = Exit::new().call(&mut cwd, &[]).unwrap();
    assert_eq!(flow, ControlFlow::EXIT);
}

#[test]
fn exit_ignores_arguments() {
    let mut cwd = MemoryWorkingDirectory::new("/", &[]);
    let flow = Exit::new().call(&mut cwd, &["3", "now"]).unwrap();
    assert_eq!(flow, ControlFlow::EXIT);
}
