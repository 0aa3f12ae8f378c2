//! The runtime `Value` type and its coercion rules.
//!
//! `Value` is a small tagged union over the six kinds the evaluator ever
//! produces. Tuples exist only transiently, for multi-target assignment and
//! multi-value `return` — they are never a first-class container a program
//! can store a reference to and mutate.

use std::fmt;
use std::rc::Rc;

use crate::bigint::BigInt;
use crate::error::RuntimeError;

/// A runtime value.
///
/// `Str` is reference-counted so that string concatenation and repetition
/// (`4.3`) stay cheap to pass around without deep-cloning on every
/// assignment; the externally observed value is always the full text.
#[derive(Debug, Clone)]
pub enum Value {
    Int(BigInt),
    Float(f64),
    Str(Rc<str>),
    Bool(bool),
    None,
    /// Produced only by a comma-separated expression list where the
    /// surrounding context accepts multiples. Never nested implicitly:
    /// appending a `Tuple` to another flattens one level (see `extend`).
    Tuple(Vec<Value>),
}

impl Value {
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Self::Str(s.into())
    }

    /// Truth-testing per the language's falsy set: `0`, `0.0`, `""`,
    /// `False`, and `None` are falsy; everything else (including a
    /// zero-length `Tuple`, which this language never actually produces at
    /// the surface level) is truthy except as noted.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Int(i) => !i.is_zero(),
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::None => false,
            Self::Tuple(items) => !items.is_empty(),
        }
    }

    /// A short, stable name for this value's kind, used in `TypeError`
    /// messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bool(_) => "bool",
            Self::None => "NoneType",
            Self::Tuple(_) => "tuple",
        }
    }

    /// Coerces to `bool` per the §4.2 coercion table.
    pub fn to_bool(&self) -> bool {
        self.is_truthy()
    }

    /// Coerces to `int`, per the §4.2 coercion table.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ValueError`] if a `Str` does not parse as a
    /// decimal integer, or [`RuntimeError::TypeError`] for `None`.
    pub fn to_int(&self) -> Result<BigInt, RuntimeError> {
        match self {
            Self::Int(i) => Ok(i.clone()),
            Self::Float(f) => Ok(float_to_bigint_trunc(*f)),
            Self::Bool(b) => Ok(BigInt::from_i64(i64::from(*b))),
            Self::Str(s) => {
                BigInt::parse(s.trim()).map_err(|_| RuntimeError::ValueError(format!("invalid literal for int() with base 10: {s:?}")))
            }
            Self::None => Err(RuntimeError::TypeError("int() argument cannot be NoneType".to_owned())),
            Self::Tuple(_) => Err(RuntimeError::TypeError("int() argument cannot be tuple".to_owned())),
        }
    }

    /// Coerces to `float`, per the §4.2 coercion table.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ValueError`] if a `Str` does not parse as a
    /// float, or [`RuntimeError::TypeError`] for `None`/`Tuple`.
    pub fn to_float(&self) -> Result<f64, RuntimeError> {
        match self {
            Self::Int(i) => Ok(i.to_f64()),
            Self::Float(f) => Ok(*f),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| RuntimeError::ValueError(format!("could not convert string to float: {s:?}"))),
            Self::None => Err(RuntimeError::TypeError("float() argument cannot be NoneType".to_owned())),
            Self::Tuple(_) => Err(RuntimeError::TypeError("float() argument cannot be tuple".to_owned())),
        }
    }

    /// Coerces to `str`, per the §4.2 coercion table. Infallible.
    pub fn to_py_string(&self) -> String {
        match self {
            Self::Int(i) => i.to_decimal_string(),
            Self::Float(f) => float_repr(*f),
            Self::Bool(b) => if *b { "True" } else { "False" }.to_owned(),
            Self::Str(s) => s.to_string(),
            Self::None => "None".to_owned(),
            Self::Tuple(items) => {
                let mut out = String::new();
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push(' ');
                    }
                    out.push_str(&item.to_py_string());
                }
                out
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_py_string())
    }
}

/// Truncates a float toward zero into a `BigInt`, used by `int(float)`.
fn float_to_bigint_trunc(f: f64) -> BigInt {
    let truncated = f.trunc();
    if let Some(i) = i64_from_f64_exact(truncated) {
        return BigInt::from_i64(i);
    }
    // Fall back to building the digits from the decimal text for magnitudes
    // beyond i64 range (rare for `int(float)`, but keeps the contract total).
    BigInt::parse(&format!("{truncated:.0}")).unwrap_or_else(|_| BigInt::zero())
}

fn i64_from_f64_exact(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Renders a float matching the host's default decimal representation,
/// always showing at least one fractional digit for integral-looking
/// values, via the shortest round-tripping decimal from `ryu`.
pub fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_owned();
    }
    if f.is_infinite() {
        return if f.is_sign_negative() { "-inf" } else { "inf" }.to_owned();
    }

    let mut buffer = ryu::Buffer::new();
    let rendered = buffer.format(f);
    fix_exponent_and_point(rendered)
}

fn fix_exponent_and_point(s: &str) -> String {
    if let Some(e_pos) = s.find('e') {
        let (mantissa, exp_part) = s.split_at(e_pos);
        let exp = &exp_part[1..];
        if !exp.starts_with('-') {
            return format!("{mantissa}e+{exp}");
        }
        return s.to_owned();
    }
    if !s.contains('.') {
        return format!("{s}.0");
    }
    s.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_falsy_set() {
        assert!(!Value::Int(BigInt::zero()).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::str("").is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::None.is_truthy());
        assert!(Value::Int(BigInt::from_i64(1)).is_truthy());
        assert!(Value::str("x").is_truthy());
    }

    #[test]
    fn float_repr_matches_stable_format() {
        assert_eq!(float_repr(3.0), "3.0");
        assert_eq!(float_repr(3.5), "3.5");
        assert_eq!(float_repr(f64::INFINITY), "inf");
    }

    #[test]
    fn bool_to_str_is_titlecase() {
        assert_eq!(Value::Bool(true).to_py_string(), "True");
        assert_eq!(Value::Bool(false).to_py_string(), "False");
    }

    #[test]
    fn str_to_int_parses_decimal() {
        assert_eq!(Value::str("42").to_int().unwrap(), BigInt::from_i64(42));
        assert!(Value::str("abc").to_int().is_err());
    }
}
