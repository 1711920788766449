// src/lib.rs

pub mod capture;
pub mod cli;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod verdict;

use std::fs::File;
use std::process::ExitCode;

use tracing::debug;

use crate::cli::{CliArgs, USAGE};
use crate::errors::{GateError, Result};
use crate::exec::Supervisor;
use crate::verdict::{replay, Verdict};

/// High-level entry point used by `main.rs`.
///
/// Runs the requested program once, replays its non-empty stderr lines to
/// our own stderr and turns "anything on stderr" into exit code 1. A missing
/// program prints the usage line to stdout and also exits 1 without
/// spawning anything.
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let Some(invocation) = args.invocation() else {
        println!("{USAGE}");
        return Ok(ExitCode::from(1));
    };

    let run = Supervisor::new(invocation).run().await?;

    replay(&run.captured, File::from(run.saved_stderr))
        .map_err(|e| GateError::resource("write", e))?;

    let verdict = Verdict::from_captured(&run.captured);
    debug!(?verdict, child_exit_code = run.exit_code, "gate decided");

    Ok(verdict.into())
}
