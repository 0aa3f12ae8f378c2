//! Top-level orchestration: source text in, exit-code semantics out.
//!
//! Mirrors the teacher's `ReplError`-over-`Runner` shape: parsing and
//! evaluation are distinct stages with their own error types, unified here
//! into one error the caller can print and map to an exit code (§6, §7).

use std::fmt;

use crate::error::RuntimeError;
use crate::eval::Evaluator;
use crate::io::PrintWriter;
use crate::parse::{self, ParseError};

/// Either stage's error, unified at the `Runner` boundary.
#[derive(Debug, Clone)]
pub enum PyleteError {
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl fmt::Display for PyleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Runtime(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PyleteError {}

impl From<ParseError> for PyleteError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<RuntimeError> for PyleteError {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}

/// Parses and runs `source` to completion, writing `print` output through
/// `writer`.
///
/// # Errors
/// Returns [`PyleteError::Parse`] for anything outside the supported
/// grammar subset, or [`PyleteError::Runtime`] for the first uncaught
/// runtime error (§7: the source language has no exception handling, so
/// execution stops at the first one).
pub fn run(source: &str, writer: &mut dyn PrintWriter) -> Result<(), PyleteError> {
    let program = parse::parse_program(source)?;
    let mut evaluator = Evaluator::new(writer);
    evaluator.run(&program)?;
    Ok(())
}
