//! Error taxonomy tests (§7): each kind is reachable, and its `Display`
//! opens with the kind name as the diagnostic prefix.

use pylet::{run_source, NoPrint, PyleteError, RuntimeError};

fn run_err(source: &str) -> PyleteError {
    let mut out = NoPrint;
    run_source(source, &mut out).expect_err("expected a runtime error")
}

#[test]
fn type_error_on_str_minus_int() {
    let err = run_err("print(\"a\" - 1)\n");
    assert!(matches!(err, PyleteError::Runtime(RuntimeError::TypeError(_))));
    assert!(err.to_string().starts_with("TypeError"));
}

#[test]
fn division_by_zero_on_floor_div() {
    let err = run_err("print(1 // 0)\n");
    assert!(matches!(err, PyleteError::Runtime(RuntimeError::DivisionByZero)));
}

#[test]
fn name_error_on_undefined_function() {
    let err = run_err("print(undefined_fn())\n");
    assert!(matches!(err, PyleteError::Runtime(RuntimeError::NameError(_))));
}

#[test]
fn name_error_on_undefined_variable() {
    let err = run_err("print(undefined_var)\n");
    assert!(matches!(err, PyleteError::Runtime(RuntimeError::NameError(_))));
}

#[test]
fn value_error_on_bad_int_coercion() {
    let err = run_err("print(int(\"abc\"))\n");
    assert!(matches!(err, PyleteError::Runtime(RuntimeError::ValueError(_))));
}

#[test]
fn arity_error_on_missing_required_argument() {
    let err = run_err("def f(x):\n    return x\nprint(f())\n");
    assert!(matches!(err, PyleteError::Runtime(RuntimeError::ArityError(_))));
}

#[test]
fn arity_error_on_too_many_builtin_arguments() {
    let err = run_err("print(int(1, 2))\n");
    assert!(matches!(err, PyleteError::Runtime(RuntimeError::ArityError(_))));
}

#[test]
fn parse_error_on_unsupported_construct() {
    let err = run_err("class Foo:\n    pass\n");
    assert!(matches!(err, PyleteError::Parse(_)));
}

#[test]
fn uncaught_errors_abort_immediately() {
    // The second `print` never runs; the source language has no exception
    // handling (§7).
    let mut out = pylet::CollectStringPrint::new();
    let result = run_source("print(1)\nprint(1 // 0)\nprint(2)\n", &mut out);
    assert!(result.is_err());
    assert_eq!(out.into_output(), "1\n");
}
