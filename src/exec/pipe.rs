// src/exec/pipe.rs

//! Anonymous pipe carrying the child's stderr back to the supervisor.

use std::os::fd::{AsFd, BorrowedFd, OwnedFd};

use nix::fcntl::OFlag;
use nix::unistd::pipe2;

use crate::errors::{GateError, Result};

/// Both ends of a unidirectional pipe.
///
/// Each end is closed at most once: `close_*` on an already closed end is a
/// no-op, and dropping the `Pipe` closes whatever is still open. Both ends
/// are created close-on-exec; the write end only reaches the child through
/// the fd 2 binding, which `dup2` makes inheritable.
#[derive(Debug)]
pub struct Pipe {
    read: Option<OwnedFd>,
    write: Option<OwnedFd>,
}

impl Pipe {
    pub fn create() -> Result<Self> {
        let (read, write) =
            pipe2(OFlag::O_CLOEXEC).map_err(|e| GateError::resource("pipe2", e))?;
        Ok(Self {
            read: Some(read),
            write: Some(write),
        })
    }

    #[cfg(test)]
    pub fn read_end(&self) -> Option<BorrowedFd<'_>> {
        self.read.as_ref().map(|fd| fd.as_fd())
    }

    pub fn write_end(&self) -> Option<BorrowedFd<'_>> {
        self.write.as_ref().map(|fd| fd.as_fd())
    }

    /// Hand the read end over to a reader; the pipe no longer owns it.
    pub fn take_read(&mut self) -> Option<OwnedFd> {
        self.read.take()
    }

    pub fn close_read(&mut self) {
        self.read = None;
    }

    pub fn close_write(&mut self) {
        self.write = None;
    }
}
