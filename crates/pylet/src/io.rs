//! Output abstraction for the `print` builtin (§6).
//!
//! The interpreter never writes to stdout directly; it writes through a
//! [`PrintWriter`] so tests can capture output instead of inheriting the
//! process's real stdout.

use std::fmt::Write as _;
use std::io::Write as IoWrite;

/// Destination for `print` output.
pub trait PrintWriter {
    /// Writes `line` followed by a newline.
    fn write_line(&mut self, line: &str);
}

/// Writes to the process's real stdout, used by the CLI.
#[derive(Default)]
pub struct StdPrint;

impl PrintWriter for StdPrint {
    fn write_line(&mut self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(line.as_bytes());
        let _ = stdout.write_all(b"\n");
    }
}

/// Buffers every printed line into a `String`, one program's worth of output
/// per instance. Used by tests that assert on interpreter output.
#[derive(Default)]
pub struct CollectStringPrint {
    output: String,
}

impl CollectStringPrint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, including trailing newlines.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl PrintWriter for CollectStringPrint {
    fn write_line(&mut self, line: &str) {
        let _ = writeln!(self.output, "{line}");
    }
}

/// Discards everything written to it.
#[derive(Default)]
pub struct NoPrint;

impl PrintWriter for NoPrint {
    fn write_line(&mut self, _line: &str) {}
}
