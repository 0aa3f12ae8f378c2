//! Binary/unary operator semantics and cross-type promotion (§4.3).
//!
//! This is the dispatch matrix the task description calls out as its own
//! component: for each operator, a fixed precedence of operand typing
//! decides whether the result is a string operation, a float-dominant
//! promotion, or a `BigInt` operation. `and`/`or`/chained comparisons are
//! *not* here — those need to evaluate their operands lazily for
//! short-circuiting, which only [`crate::eval`] can do; this module only
//! ever sees already-evaluated [`Value`]s.

use std::cmp::Ordering;

use crate::ast::{BinOp, CmpOp, UnaryOp};
use crate::bigint::BigInt;
use crate::error::RuntimeError;
use crate::value::Value;

enum Num {
    Int(BigInt),
    Float(f64),
}

enum Promoted {
    Int(BigInt, BigInt),
    Float(f64, f64),
}

/// Coerces a value to a numeric operand for arithmetic dispatch. Unlike the
/// `int()`/`float()` builtins, this never parses strings: `Str` is always a
/// type error here, matching the operator table in §4.3.
fn to_numeric(value: &Value, op: &str) -> Result<Num, RuntimeError> {
    match value {
        Value::Int(i) => Ok(Num::Int(i.clone())),
        Value::Float(f) => Ok(Num::Float(*f)),
        Value::Bool(b) => Ok(Num::Int(BigInt::from_i64(i64::from(*b)))),
        other => Err(RuntimeError::TypeError(format!(
            "unsupported operand type for {op}: '{}'",
            other.type_name()
        ))),
    }
}

fn promote(a: Num, b: Num) -> Promoted {
    match (a, b) {
        (Num::Int(a), Num::Int(b)) => Promoted::Int(a, b),
        (Num::Float(a), Num::Float(b)) => Promoted::Float(a, b),
        (Num::Float(a), Num::Int(b)) => Promoted::Float(a, b.to_f64()),
        (Num::Int(a), Num::Float(b)) => Promoted::Float(a.to_f64(), b),
    }
}

fn repeat_count(value: &Value) -> i64 {
    match value {
        Value::Int(i) => {
            if i.is_negative() {
                0
            } else {
                i.to_i64().unwrap_or(i64::MAX)
            }
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Applies a binary operator (`+ - * / // %`) to two already-evaluated
/// operands.
///
/// # Errors
/// Returns [`RuntimeError::TypeError`] when the operand types are
/// incompatible with `op`, or [`RuntimeError::DivisionByZero`] when `op` is
/// `/`, `//`, or `%` and the right operand is (numerically) zero.
pub fn apply_bin_op(op: BinOp, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match op {
        BinOp::Add => {
            if let (Value::Str(a), Value::Str(b)) = (left, right) {
                return Ok(Value::str(format!("{a}{b}")));
            }
            reject_str_operand(left, right, "+")?;
            match promote(to_numeric(left, "+")?, to_numeric(right, "+")?) {
                Promoted::Int(a, b) => Ok(Value::Int(a.add(&b))),
                Promoted::Float(a, b) => Ok(Value::Float(a + b)),
            }
        }
        BinOp::Sub => {
            reject_str_operand(left, right, "-")?;
            match promote(to_numeric(left, "-")?, to_numeric(right, "-")?) {
                Promoted::Int(a, b) => Ok(Value::Int(a.sub(&b))),
                Promoted::Float(a, b) => Ok(Value::Float(a - b)),
            }
        }
        BinOp::Mul => apply_mul(left, right),
        BinOp::Div => {
            reject_str_operand(left, right, "/")?;
            let a = numeric_to_f64(left, "/")?;
            let b = numeric_to_f64(right, "/")?;
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Float(a / b))
        }
        BinOp::FloorDiv => {
            reject_str_operand(left, right, "//")?;
            match promote(to_numeric(left, "//")?, to_numeric(right, "//")?) {
                Promoted::Int(a, b) => Ok(Value::Int(a.div_floor(&b)?)),
                Promoted::Float(a, b) => {
                    if b == 0.0 {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    Ok(Value::Float((a / b).floor()))
                }
            }
        }
        BinOp::Mod => {
            reject_str_operand(left, right, "%")?;
            match promote(to_numeric(left, "%")?, to_numeric(right, "%")?) {
                Promoted::Int(a, b) => Ok(Value::Int(a.rem_floor(&b)?)),
                Promoted::Float(a, b) => {
                    if b == 0.0 {
                        return Err(RuntimeError::DivisionByZero);
                    }
                    Ok(Value::Float(a % b))
                }
            }
        }
    }
}

fn apply_mul(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Str(s), n @ (Value::Int(_) | Value::Bool(_))) | (n @ (Value::Int(_) | Value::Bool(_)), Value::Str(s)) => {
            let count = repeat_count(n);
            Ok(Value::str(s.repeat(usize::try_from(count).unwrap_or(usize::MAX))))
        }
        (Value::Str(_), _) | (_, Value::Str(_)) => Err(RuntimeError::TypeError(format!(
            "can't multiply sequence by non-int of type '{}'",
            if matches!(left, Value::Str(_)) { right.type_name() } else { left.type_name() }
        ))),
        _ => match promote(to_numeric(left, "*")?, to_numeric(right, "*")?) {
            Promoted::Int(a, b) => Ok(Value::Int(a.mul(&b))),
            Promoted::Float(a, b) => Ok(Value::Float(a * b)),
        },
    }
}

fn reject_str_operand(left: &Value, right: &Value, op: &str) -> Result<(), RuntimeError> {
    for side in [left, right] {
        if matches!(side, Value::Str(_)) {
            return Err(RuntimeError::TypeError(format!("unsupported operand type for {op}: 'str'")));
        }
    }
    Ok(())
}

fn numeric_to_f64(value: &Value, op: &str) -> Result<f64, RuntimeError> {
    match to_numeric(value, op)? {
        Num::Int(i) => Ok(i.to_f64()),
        Num::Float(f) => Ok(f),
    }
}

/// Applies unary `+`/`-` (§4.3: identity / negation; `Bool` promotes to
/// `Int`).
///
/// # Errors
/// Returns [`RuntimeError::TypeError`] for `Str`/`None`/`Tuple` operands.
pub fn apply_unary_op(op: UnaryOp, operand: &Value) -> Result<Value, RuntimeError> {
    let label = if op == UnaryOp::Minus { "-" } else { "+" };
    match to_numeric(operand, label)? {
        Num::Int(i) => Ok(Value::Int(if op == UnaryOp::Minus { i.negate() } else { i })),
        Num::Float(f) => Ok(Value::Float(if op == UnaryOp::Minus { -f } else { f })),
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Str(_), _) | (_, Value::Str(_)) => false,
        (Value::None, Value::None) => true,
        (Value::None, _) | (_, Value::None) => false,
        (Value::Tuple(a), Value::Tuple(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y)),
        (Value::Tuple(_), _) | (_, Value::Tuple(_)) => false,
        _ => match (to_numeric(left, "=="), to_numeric(right, "==")) {
            (Ok(a), Ok(b)) => match promote(a, b) {
                Promoted::Int(a, b) => a == b,
                Promoted::Float(a, b) => a == b,
            },
            _ => false,
        },
    }
}

/// Applies `== != < > <= >=` (§4.3). `==`/`!=` never fail; `<`/`>`/`<=`/`>=`
/// reject mixed `Str`/non-`Str` operands.
///
/// # Errors
/// Returns [`RuntimeError::TypeError`] for ordered comparisons between a
/// `Str` and a non-`Str` operand.
pub fn apply_cmp_op(op: CmpOp, left: &Value, right: &Value) -> Result<bool, RuntimeError> {
    match op {
        CmpOp::Eq => Ok(values_equal(left, right)),
        CmpOp::NotEq => Ok(!values_equal(left, right)),
        CmpOp::Lt | CmpOp::Gt | CmpOp::Le | CmpOp::Ge => {
            let ordering = ordered_compare(left, right)?;
            Ok(match op {
                CmpOp::Lt => ordering == Ordering::Less,
                CmpOp::Gt => ordering == Ordering::Greater,
                CmpOp::Le => ordering != Ordering::Greater,
                CmpOp::Ge => ordering != Ordering::Less,
                CmpOp::Eq | CmpOp::NotEq => unreachable!("handled above"),
            })
        }
    }
}

fn ordered_compare(left: &Value, right: &Value) -> Result<Ordering, RuntimeError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => Err(RuntimeError::TypeError(format!(
            "'<' not supported between instances of '{}' and '{}'",
            left.type_name(),
            right.type_name()
        ))),
        _ => match promote(to_numeric(left, "<")?, to_numeric(right, "<")?) {
            Promoted::Int(a, b) => Ok(a.cmp(&b)),
            Promoted::Float(a, b) => a.partial_cmp(&b).ok_or_else(|| RuntimeError::TypeError("comparison with NaN".to_owned())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::Int(BigInt::from_i64(n))
    }

    #[test]
    fn string_concat_and_numeric_add_promote() {
        assert!(matches!(apply_bin_op(BinOp::Add, &Value::str("ab"), &Value::str("c")).unwrap(), Value::Str(s) if &*s == "abc"));
        assert!(matches!(apply_bin_op(BinOp::Add, &int(1), &Value::Float(2.0)).unwrap(), Value::Float(f) if f == 3.0));
    }

    #[test]
    fn string_plus_int_is_a_type_error() {
        assert!(apply_bin_op(BinOp::Add, &Value::str("a"), &int(1)).is_err());
    }

    #[test]
    fn string_repeat_either_order() {
        assert!(matches!(apply_bin_op(BinOp::Mul, &Value::str("ab"), &int(3)).unwrap(), Value::Str(s) if &*s == "ababab"));
        assert!(matches!(apply_bin_op(BinOp::Mul, &int(2), &Value::str("x")).unwrap(), Value::Str(s) if &*s == "xx"));
    }

    #[test]
    fn floor_div_and_mod_use_bigint_floor_semantics() {
        assert!(matches!(apply_bin_op(BinOp::FloorDiv, &int(-7), &int(2)).unwrap(), Value::Int(i) if i == BigInt::from_i64(-4)));
        assert!(matches!(apply_bin_op(BinOp::Mod, &int(-7), &int(2)).unwrap(), Value::Int(i) if i == BigInt::from_i64(1)));
    }

    #[test]
    fn float_mod_is_fmod_not_floor_mod() {
        assert!(matches!(apply_bin_op(BinOp::Mod, &Value::Float(-7.0), &Value::Float(2.0)).unwrap(), Value::Float(f) if f == -1.0));
    }

    #[test]
    fn string_repeat_by_huge_negative_bigint_is_empty() {
        let huge_negative = BigInt::parse(&format!("-{}", "1".repeat(30))).unwrap();
        assert!(matches!(apply_bin_op(BinOp::Mul, &Value::str("x"), &Value::Int(huge_negative)).unwrap(), Value::Str(s) if s.is_empty()));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert!(matches!(apply_bin_op(BinOp::Div, &int(1), &int(0)), Err(RuntimeError::DivisionByZero)));
        assert!(matches!(apply_bin_op(BinOp::FloorDiv, &int(1), &int(0)), Err(RuntimeError::DivisionByZero)));
    }

    #[test]
    fn equality_never_errors_across_types() {
        assert!(!apply_cmp_op(CmpOp::Eq, &Value::str("1"), &int(1)).unwrap());
        assert!(apply_cmp_op(CmpOp::Eq, &Value::None, &Value::None).unwrap());
        assert!(!apply_cmp_op(CmpOp::Eq, &Value::None, &int(0)).unwrap());
    }

    #[test]
    fn ordering_rejects_mixed_str_and_numeric() {
        assert!(apply_cmp_op(CmpOp::Lt, &Value::str("a"), &int(1)).is_err());
    }

    #[test]
    fn unary_minus_promotes_bool_to_int() {
        assert!(matches!(apply_unary_op(UnaryOp::Minus, &Value::Bool(true)).unwrap(), Value::Int(i) if i == BigInt::from_i64(-1)));
    }
}
