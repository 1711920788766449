// src/verdict.rs

//! Pass/fail decision and replay of the captured lines.

use std::io::{self, Write};
use std::process::ExitCode;

use crate::capture::CapturedLines;

/// Outcome of a completed run. The child's own exit code plays no part.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing but blank lines on stderr.
    Pass,
    /// At least one non-empty stderr line.
    Fail,
}

impl Verdict {
    pub fn from_captured(captured: &CapturedLines) -> Self {
        if captured.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Pass => 0,
            Verdict::Fail => 1,
        }
    }
}

impl From<Verdict> for ExitCode {
    fn from(verdict: Verdict) -> Self {
        ExitCode::from(verdict.exit_code())
    }
}

/// Write every captured line to `out`, each followed by `\n`.
pub fn replay(captured: &CapturedLines, mut out: impl Write) -> io::Result<()> {
    for line in captured.iter() {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_passes() {
        let captured = CapturedLines::from_bytes(b"\n");
        assert_eq!(Verdict::from_captured(&captured), Verdict::Pass);
        assert_eq!(Verdict::Pass.exit_code(), 0);
    }

    #[test]
    fn any_line_fails() {
        let captured = CapturedLines::from_bytes(b"warning: deprecated\n");
        assert_eq!(Verdict::from_captured(&captured), Verdict::Fail);
        assert_eq!(Verdict::Fail.exit_code(), 1);
    }

    #[test]
    fn replay_terminates_every_line() {
        let captured = CapturedLines::from_bytes(b"one\n\ntwo");
        let mut out = Vec::new();
        replay(&captured, &mut out).unwrap();
        assert_eq!(out, b"one\ntwo\n");
    }

    #[test]
    fn replay_is_byte_exact() {
        let captured = CapturedLines::from_bytes(b"bad \xff byte\r\n");
        let mut out = Vec::new();
        replay(&captured, &mut out).unwrap();
        assert_eq!(out, b"bad \xff byte\r\n");
    }

    #[test]
    fn replay_of_nothing_writes_nothing() {
        let mut out = Vec::new();
        replay(&CapturedLines::default(), &mut out).unwrap();
        assert!(out.is_empty());
    }
}
