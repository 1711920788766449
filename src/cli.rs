// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Wrapper options must come before the program name. Everything from the
//! program name onwards is handed to the child untouched, including
//! arguments that look like flags.

use std::ffi::OsString;

use clap::{Parser, ValueEnum};

/// Printed to stdout when no program is given.
pub const USAGE: &str = "usage: stderr-gate BINARY [ARGS...]";

/// Command-line arguments for `stderr-gate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stderr-gate",
    version,
    about = "Run a program and fail if it writes anything to stderr.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STDERR_GATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Program to run (looked up on `PATH`) followed by its arguments.
    #[arg(
        value_name = "BINARY",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// The program to supervise and its argument vector (without argv[0]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Program name for diagnostics.
    pub fn display_program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl CliArgs {
    /// `None` when no program was given, which is a usage error.
    pub fn invocation(&self) -> Option<Invocation> {
        let (program, args) = self.command.split_first()?;
        Some(Invocation::new(program.clone(), args.iter().cloned()))
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(argv).expect("argv should parse")
    }

    #[test]
    fn no_program_yields_no_invocation() {
        let args = parse_from(&["stderr-gate"]);
        assert!(args.invocation().is_none());
    }

    #[test]
    fn flags_after_program_belong_to_the_child() {
        let args = parse_from(&["stderr-gate", "ls", "--help", "-l", "--log-level", "x"]);
        let inv = args.invocation().unwrap();
        assert_eq!(inv.program, OsString::from("ls"));
        assert_eq!(inv.args, vec!["--help", "-l", "--log-level", "x"]);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn wrapper_options_precede_program() {
        let args = parse_from(&["stderr-gate", "--log-level", "debug", "sh", "-c", "true"]);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        let inv = args.invocation().unwrap();
        assert_eq!(inv.program, OsString::from("sh"));
        assert_eq!(inv.args, vec!["-c", "true"]);
    }
}
