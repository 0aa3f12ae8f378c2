//! `print`, `int`, `float`, `str`, `bool` (§4.2, §6).
//!
//! Each non-print builtin takes exactly one argument and returns the
//! coercion already implemented on [`Value`]; this module is just the arity
//! check and the dispatch table.

use crate::error::RuntimeError;
use crate::io::PrintWriter;
use crate::value::Value;

/// The builtin names the evaluator recognizes, checked before any
/// user-defined function table lookup (§4.5).
pub const NAMES: [&str; 5] = ["print", "int", "float", "str", "bool"];

pub fn is_builtin(name: &str) -> bool {
    NAMES.contains(&name)
}

/// Dispatches a builtin call by name.
///
/// # Errors
/// Returns [`RuntimeError::ArityError`] if a non-`print` builtin receives
/// anything but exactly one argument, or whatever coercion error
/// [`Value::to_int`]/[`Value::to_float`] raises.
pub fn call(name: &str, args: &[Value], writer: &mut dyn PrintWriter) -> Result<Value, RuntimeError> {
    match name {
        "print" => {
            builtin_print(args, writer);
            Ok(Value::None)
        }
        "int" => Ok(Value::Int(one_arg(name, args)?.to_int()?)),
        "float" => Ok(Value::Float(one_arg(name, args)?.to_float()?)),
        "str" => Ok(Value::str(one_arg(name, args)?.to_py_string())),
        "bool" => Ok(Value::Bool(one_arg(name, args)?.to_bool())),
        other => Err(RuntimeError::InternalError(format!("unknown builtin: {other}"))),
    }
}

fn one_arg<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, RuntimeError> {
    match args {
        [single] => Ok(single),
        _ => Err(RuntimeError::ArityError(format!("{name}() takes exactly one argument ({} given)", args.len()))),
    }
}

fn builtin_print(args: &[Value], writer: &mut dyn PrintWriter) {
    let mut line = String::new();
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            line.push(' ');
        }
        line.push_str(&arg.to_py_string());
    }
    writer.write_line(&line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::BigInt;
    use crate::io::CollectStringPrint;

    #[test]
    fn print_joins_args_with_single_spaces() {
        let mut out = CollectStringPrint::new();
        call("print", &[Value::Int(BigInt::from_i64(1)), Value::Int(BigInt::from_i64(2))], &mut out).unwrap();
        assert_eq!(out.output(), "1 2\n");
    }

    #[test]
    fn non_print_builtins_reject_wrong_arity() {
        let mut out = CollectStringPrint::new();
        assert!(call("int", &[], &mut out).is_err());
        assert!(call("int", &[Value::Bool(true), Value::Bool(false)], &mut out).is_err());
    }

    #[test]
    fn str_uses_value_coercion() {
        let mut out = CollectStringPrint::new();
        let result = call("str", &[Value::Bool(true)], &mut out).unwrap();
        assert!(matches!(result, Value::Str(s) if &*s == "True"));
    }
}
