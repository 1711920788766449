// src/exec/redirect.rs

//! Temporary substitution of the process-wide stderr descriptor.

use std::io;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};

use nix::libc::STDERR_FILENO;
use nix::unistd::dup2;

use crate::errors::{GateError, Result};

/// While alive, fd 2 points at another descriptor.
///
/// The original stderr is kept as a close-on-exec duplicate. [`restore`]
/// puts it back and returns it; dropping the guard without calling
/// `restore` (an early error return) puts it back best-effort.
///
/// [`restore`]: StderrRedirect::restore
#[derive(Debug)]
pub struct StderrRedirect {
    saved: Option<OwnedFd>,
}

impl StderrRedirect {
    /// Point fd 2 at `target`.
    ///
    /// `dup2` closes the previous fd 2 and rebinds the slot in one step, and
    /// the resulting fd 2 is inheritable even when `target` is not.
    pub fn install(target: BorrowedFd<'_>) -> Result<Self> {
        let saved = io::stderr()
            .as_fd()
            .try_clone_to_owned()
            .map_err(|e| GateError::resource("dup", e))?;

        dup2(target.as_raw_fd(), STDERR_FILENO).map_err(|e| GateError::resource("dup2", e))?;

        Ok(Self { saved: Some(saved) })
    }

    /// Rebind fd 2 to the original stderr and hand back the saved duplicate.
    pub fn restore(mut self) -> Result<OwnedFd> {
        let Some(saved) = self.saved.take() else {
            return Err(GateError::resource(
                "dup2",
                io::Error::other("stderr already restored"),
            ));
        };
        dup2(saved.as_raw_fd(), STDERR_FILENO).map_err(|e| GateError::resource("dup2", e))?;
        Ok(saved)
    }
}

impl Drop for StderrRedirect {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            let _ = dup2(saved.as_raw_fd(), STDERR_FILENO);
        }
    }
}
