// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`pipe`] owns the two ends of the stderr pipe.
//! - [`redirect`] temporarily binds fd 2 to the pipe's write end so the
//!   spawned child inherits it.
//! - [`supervisor`] spawns the child via `tokio::process::Command`, waits for
//!   it and collects its stderr.

pub mod pipe;
pub mod redirect;
pub mod supervisor;

pub use pipe::Pipe;
pub use redirect::StderrRedirect;
pub use supervisor::{Run, Supervisor, Termination};
