//! Runtime error taxonomy (§7).
//!
//! The source language has no exception handling: any [`RuntimeError`]
//! aborts evaluation and propagates out of [`crate::run::Runner::run`]. The
//! CLI prints it to stderr prefixed `Runtime Error:` and exits with status 1.

use std::fmt;

/// A runtime error raised by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// An operator was applied to operand types it does not support, e.g.
    /// `"a" - 1` or unary `-` on a string.
    TypeError(String),
    /// The denominator of `/`, `//`, or `%` was zero.
    DivisionByZero,
    /// A call targeted a function name with no matching definition or
    /// builtin.
    NameError(String),
    /// A coercion builtin (`int`/`float`) failed to parse its argument.
    ValueError(String),
    /// Too many arguments were passed to a builtin, or a required
    /// positional parameter of a user function was left unbound.
    ArityError(String),
    /// The evaluator encountered a parse-tree shape it does not know how to
    /// interpret. Should not happen for input that passed lowering.
    InternalError(String),
}

impl RuntimeError {
    /// The taxonomy name, used as the message prefix.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TypeError(_) => "TypeError",
            Self::DivisionByZero => "DivisionByZero",
            Self::NameError(_) => "NameError",
            Self::ValueError(_) => "ValueError",
            Self::ArityError(_) => "ArityError",
            Self::InternalError(_) => "InternalError",
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeError(msg) | Self::NameError(msg) | Self::ValueError(msg) | Self::ArityError(msg) | Self::InternalError(msg) => {
                write!(f, "{}: {msg}", self.kind())
            }
            Self::DivisionByZero => write!(f, "{}: division by zero", self.kind()),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<crate::bigint::DivisionByZero> for RuntimeError {
    fn from(_: crate::bigint::DivisionByZero) -> Self {
        Self::DivisionByZero
    }
}
