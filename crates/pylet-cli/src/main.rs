//! Minimal CLI entry point.
//!
//! The lexer/parser/grammar and the CLI itself are both out of this
//! interpreter's scope as designed subsystems (§1); this binary is the
//! thinnest possible glue between a file on disk and [`pylet::run_source`].

use std::path::PathBuf;
use std::process::ExitCode;

use pylet::StdPrint;

const DEFAULT_SOURCE: &str = "demos/hello.py";

fn main() -> ExitCode {
    let path = std::env::args().nth(1).map_or_else(|| PathBuf::from(DEFAULT_SOURCE), PathBuf::from);

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Runtime Error: could not read {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut writer = StdPrint;
    match pylet::run_source(&source, &mut writer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Runtime Error: {err}");
            ExitCode::FAILURE
        }
    }
}
