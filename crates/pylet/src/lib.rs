//! A tree-walking interpreter for a small Python-like scripting language.
//!
//! The two subsystems with the real engineering are [`bigint`] (arbitrary
//! precision signed integers, FFT multiplication, divide-and-conquer long
//! division) and [`eval`] (the visitor that walks the parse tree). Source
//! text is lowered from `ruff_python_ast` by [`parse`] before the evaluator
//! ever sees it; [`run`] wires the two stages together.

pub mod ast;
pub mod bigint;
pub mod builtins;
pub mod environment;
pub mod error;
pub mod eval;
pub mod function;
pub mod io;
pub mod ops;
pub mod parse;
pub mod run;
pub mod value;

pub use bigint::BigInt;
pub use error::RuntimeError;
pub use eval::Evaluator;
pub use io::{CollectStringPrint, NoPrint, PrintWriter, StdPrint};
pub use parse::ParseError;
pub use run::{run as run_source, PyleteError};
pub use value::Value;
