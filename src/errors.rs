// src/errors.rs

//! Crate-wide error type.
//!
//! Every variant is fatal for the run: the binary reports it and aborts
//! instead of returning the 0/1 verdict. A missing program is not an error
//! here; `run` prints [`crate::cli::USAGE`] and exits 1.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    /// A system call needed to set up, run or drain the child failed.
    #[error("{op} failed")]
    Resource {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// The requested program could not be found or executed.
    #[error("cannot execute '{program}'")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("child killed by signal {signal} ({name})")]
    Signaled { signal: i32, name: String },
}

impl GateError {
    pub fn resource(op: &'static str, source: impl Into<io::Error>) -> Self {
        GateError::Resource {
            op,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_names_the_failed_call() {
        let err = GateError::resource("dup2", nix::Error::EBADF);
        let msg = err.to_string();
        assert_eq!(msg, "dup2 failed");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert!(source.is_some_and(|s| s.contains("Bad file descriptor")));
    }

    #[test]
    fn signaled_error_reports_number_and_name() {
        let signaled = GateError::Signaled {
            signal: 9,
            name: "SIGKILL".to_string(),
        };
        assert_eq!(signaled.to_string(), "child killed by signal 9 (SIGKILL)");
    }
}
