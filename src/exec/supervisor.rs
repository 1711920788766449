// src/exec/supervisor.rs

//! Runs one child with its stderr bound to a pipe and collects what it wrote.

use std::io;
use std::os::fd::OwnedFd;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};

use nix::libc;
use nix::sys::signal::Signal;
use tokio::io::AsyncReadExt;
use tokio::net::unix::pipe::Receiver;
use tokio::process::Command;
use tracing::{debug, info};

use crate::capture::CapturedLines;
use crate::cli::Invocation;
use crate::errors::{GateError, Result};
use crate::exec::pipe::Pipe;
use crate::exec::redirect::StderrRedirect;

/// How the child stopped running.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

impl Termination {
    pub fn from_status(status: ExitStatus) -> Result<Self> {
        if let Some(code) = status.code() {
            Ok(Termination::Exited(code))
        } else if let Some(signal) = status.signal() {
            Ok(Termination::Signaled(signal))
        } else {
            Err(GateError::resource(
                "wait",
                io::Error::other(format!("child reported a non-terminal status: {status}")),
            ))
        }
    }

    /// The exit code of a child that exited; a signal death is an error.
    pub fn exit_code(self) -> Result<i32> {
        match self {
            Termination::Exited(code) => Ok(code),
            Termination::Signaled(signal) => Err(GateError::Signaled {
                signal,
                name: signal_name(signal),
            }),
        }
    }
}

fn signal_name(signal: i32) -> String {
    Signal::try_from(signal)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| "unknown signal".to_string())
}

/// Everything a finished run hands to the verdict step.
#[derive(Debug)]
pub struct Run {
    pub exit_code: i32,
    pub captured: CapturedLines,
    /// Duplicate of the original stderr; fd 2 has already been restored.
    pub saved_stderr: OwnedFd,
}

/// Supervises a single child from spawn to captured output.
#[derive(Debug, Clone)]
pub struct Supervisor {
    invocation: Invocation,
}

impl Supervisor {
    pub fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }

    /// Spawn the child with fd 2 bound to a pipe, wait for it, and collect
    /// its stderr.
    ///
    /// The read end is drained while waiting so a child writing more than
    /// the pipe buffer cannot block forever; the drained bytes only matter
    /// once the child is known to have exited normally.
    pub async fn run(self) -> Result<Run> {
        let program = self.invocation.display_program();
        debug!(program = %program, args = ?self.invocation.args, "launching child");

        let mut pipe = Pipe::create()?;
        let write_end = pipe
            .write_end()
            .ok_or_else(|| GateError::resource("pipe2", io::Error::other("write end closed")))?;

        // No logging until fd 2 is restored: it would land in the pipe.
        let redirect = StderrRedirect::install(write_end)?;
        let spawned = self.command().spawn();
        let saved_stderr = redirect.restore()?;
        pipe.close_write();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                pipe.close_read();
                return Err(classify_spawn_error(&program, e));
            }
        };
        debug!(program = %program, pid = ?child.id(), "child spawned");

        let read_end = pipe
            .take_read()
            .ok_or_else(|| GateError::resource("read", io::Error::other("read end closed")))?;
        let mut reader =
            Receiver::from_owned_fd(read_end).map_err(|e| GateError::resource("read", e))?;

        let mut bytes = Vec::new();
        let (status, drained) = tokio::join!(child.wait(), reader.read_to_end(&mut bytes));

        let status = status.map_err(|e| GateError::resource("wait", e))?;
        let exit_code = Termination::from_status(status)?.exit_code()?;
        drained.map_err(|e| GateError::resource("read", e))?;

        let captured = CapturedLines::from_bytes(&bytes);
        info!(
            program = %program,
            exit_code,
            stderr_lines = captured.len(),
            "child exited"
        );

        Ok(Run {
            exit_code,
            captured,
            saved_stderr,
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.invocation.program);
        cmd.args(&self.invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }
}

/// Exec failures are reported back through `spawn`; anything else means the
/// process could not be created at all.
fn classify_spawn_error(program: &str, err: io::Error) -> GateError {
    let launch_failure = matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    ) || matches!(
        err.raw_os_error(),
        Some(libc::ENOEXEC | libc::ENOTDIR | libc::ELOOP | libc::ENAMETOOLONG)
    );

    if launch_failure {
        GateError::Launch {
            program: program.to_string(),
            source: err,
        }
    } else {
        GateError::resource("spawn", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exited_status_keeps_any_code() {
        let status = ExitStatus::from_raw(7 << 8);
        let termination = Termination::from_status(status).unwrap();
        assert_eq!(termination, Termination::Exited(7));
        assert_eq!(termination.exit_code().unwrap(), 7);
    }

    #[test]
    fn signaled_status_is_fatal() {
        let status = ExitStatus::from_raw(libc::SIGKILL);
        let termination = Termination::from_status(status).unwrap();
        assert_eq!(termination, Termination::Signaled(libc::SIGKILL));

        match termination.exit_code() {
            Err(GateError::Signaled { signal, name }) => {
                assert_eq!(signal, libc::SIGKILL);
                assert_eq!(name, "SIGKILL");
            }
            other => panic!("expected Signaled error, got: {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        assert!(matches!(
            classify_spawn_error("nope", err),
            GateError::Launch { ref program, .. } if program == "nope"
        ));
    }

    #[test]
    fn fork_failure_is_a_resource_error() {
        let err = io::Error::from_raw_os_error(libc::EAGAIN);
        assert!(matches!(
            classify_spawn_error("sh", err),
            GateError::Resource { op: "spawn", .. }
        ));
    }
}
