//! Arbitrary-precision signed integer arithmetic.
//!
//! This is the performance and correctness heart of the interpreter: every
//! `int` value the evaluator produces is a [`BigInt`]. The representation is
//! a sign in `{-1, 0, 1}` paired with a little-endian sequence of base-10000
//! digits, matching the `int2048` design this interpreter descends from.
//! Multiplication uses a recursive Cooley-Tukey FFT; division uses a
//! divide-and-conquer long division with a binary-searched basic-divide base
//! case. Neither of those is available off the shelf for this exact
//! representation, so both are hand-rolled here rather than reached for from
//! a crate.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Each digit holds a value in `0..BASE`.
const BASE: i64 = 10_000;
/// Zero-padding width for every digit but the most significant one.
const WIDTH: usize = 4;

/// Arbitrary-precision signed integer.
///
/// `sign` is `-1`, `0`, or `1`; the zero value always has `sign == 0` and an
/// empty digit vector. Every other value is normalized so its most
/// significant digit is nonzero. Digits are little-endian base-10000.
#[derive(Clone, Eq)]
pub struct BigInt {
    sign: i8,
    digits: Vec<u32>,
}

/// Error raised when an operation divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionByZero;

impl fmt::Display for DivisionByZero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "division by zero")
    }
}

impl std::error::Error for DivisionByZero {}

/// Error raised when parsing decimal text fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigIntError(pub String);

impl fmt::Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid literal for int(): {:?}", self.0)
    }
}

impl std::error::Error for ParseBigIntError {}

impl BigInt {
    /// The zero value.
    pub fn zero() -> Self {
        Self { sign: 0, digits: Vec::new() }
    }

    /// Returns whether this value is zero.
    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    /// Returns whether this value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }

    /// Drops trailing (most-significant) zero digits and resets the sign to
    /// zero if nothing is left. Every constructor and mutating operation
    /// below routes its result through this before returning.
    fn normalize(mut self) -> Self {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.sign = 0;
        }
        self
    }

    /// Builds a value directly from a sign and little-endian base-10000
    /// digits, normalizing the result.
    fn from_raw(sign: i8, digits: Vec<u32>) -> Self {
        Self { sign, digits }.normalize()
    }

    /// Parses decimal text into a `BigInt`.
    ///
    /// Accepts an optional leading `+`/`-` followed by decimal digits.
    /// `"0"` and `"-0"` both produce the zero value. The empty string is
    /// treated as zero, matching the original interpreter's `read()`.
    pub fn parse(text: &str) -> Result<Self, ParseBigIntError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::zero());
        }

        let (sign_char, unsigned) = match text.as_bytes()[0] {
            b'+' => (1i8, &text[1..]),
            b'-' => (-1i8, &text[1..]),
            _ => (1i8, text),
        };

        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBigIntError(text.to_owned()));
        }

        let mut digits = Vec::with_capacity(unsigned.len() / WIDTH + 1);
        let bytes = unsigned.as_bytes();
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(WIDTH);
            // SAFETY-free: the slice is ASCII digits only, checked above.
            let chunk = std::str::from_utf8(&bytes[start..end]).unwrap();
            digits.push(chunk.parse::<u32>().expect("chunk is all ASCII digits"));
            end = start;
        }

        let sign = if digits.iter().all(|&d| d == 0) { 0 } else { sign_char };
        Ok(Self::from_raw(sign, digits))
    }

    /// Renders the canonical decimal representation.
    ///
    /// Zero prints as `"0"`. Otherwise an optional `-`, the most significant
    /// digit unpadded, then every remaining digit zero-padded to `WIDTH`.
    pub fn to_decimal_string(&self) -> String {
        if self.sign == 0 {
            return "0".to_owned();
        }
        let mut out = String::new();
        if self.sign < 0 {
            out.push('-');
        }
        let mut iter = self.digits.iter().rev();
        let Some(first) = iter.next() else { unreachable!("non-zero sign implies a digit") };
        out.push_str(&first.to_string());
        for digit in iter {
            out.push_str(&format!("{digit:0width$}", width = WIDTH));
        }
        out
    }

    /// Converts to the nearest `f64` via Horner's method over the digits.
    pub fn to_f64(&self) -> f64 {
        let mut acc = 0.0_f64;
        for &digit in self.digits.iter().rev() {
            acc = acc * BASE as f64 + f64::from(digit);
        }
        acc * f64::from(self.sign as i32)
    }

    /// Truncates toward zero into an `i64`, if the value fits.
    pub fn to_i64(&self) -> Option<i64> {
        let mut acc: i64 = 0;
        for &digit in self.digits.iter().rev() {
            acc = acc.checked_mul(BASE)?.checked_add(i64::from(digit))?;
        }
        Some(acc * i64::from(self.sign as i32))
    }

    /// Builds a `BigInt` from a host `i64`.
    pub fn from_i64(value: i64) -> Self {
        if value == 0 {
            return Self::zero();
        }
        let sign = if value < 0 { -1 } else { 1 };
        // `i128` avoids overflow on `i64::MIN.abs()`.
        let mut magnitude = i128::from(value).unsigned_abs();
        let mut digits = Vec::new();
        while magnitude > 0 {
            digits.push((magnitude % BASE as u128) as u32);
            magnitude /= BASE as u128;
        }
        Self::from_raw(sign, digits)
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self::from_raw(-self.sign, self.digits.clone())
    }

    /// Compares magnitudes only (ignoring sign), most significant digit down.
    fn cmp_magnitude(a: &[u32], b: &[u32]) -> Ordering {
        a.len().cmp(&b.len()).then_with(|| a.iter().rev().cmp(b.iter().rev()))
    }

    /// Adds two non-negative digit vectors, base-BASE with carry.
    fn add_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
        let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
        let mut carry = 0u32;
        for i in 0..a.len().max(b.len()) {
            let x = a.get(i).copied().unwrap_or(0) + b.get(i).copied().unwrap_or(0) + carry;
            out.push(x % BASE as u32);
            carry = x / BASE as u32;
        }
        if carry > 0 {
            out.push(carry);
        }
        out
    }

    /// Subtracts `b` from `a`, assuming `a >= b` in magnitude.
    fn sub_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
        let mut out = Vec::with_capacity(a.len());
        let mut borrow = 0i64;
        for i in 0..a.len() {
            let mut x = i64::from(a[i]) - i64::from(b.get(i).copied().unwrap_or(0)) - borrow;
            if x < 0 {
                x += BASE;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(x as u32);
        }
        out
    }

    /// Adds `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        if self.sign == 0 {
            return other.clone();
        }
        if other.sign == 0 {
            return self.clone();
        }
        if self.sign != other.sign {
            return self.sub(&other.negate());
        }
        Self::from_raw(self.sign, Self::add_magnitude(&self.digits, &other.digits))
    }

    /// Computes `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        if other.sign == 0 {
            return self.clone();
        }
        if self.sign == 0 {
            return other.negate();
        }
        if self.sign != other.sign {
            return self.add(&other.negate());
        }
        // same sign: reduce to a magnitude subtraction.
        match Self::cmp_magnitude(&self.digits, &other.digits) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => Self::from_raw(self.sign, Self::sub_magnitude(&self.digits, &other.digits)),
            Ordering::Less => Self::from_raw(-self.sign, Self::sub_magnitude(&other.digits, &self.digits)),
        }
    }

    /// Multiplies a digit vector by a small scalar `0..BASE`, used by the
    /// basic-divide base case's binary search.
    fn mul_short(digits: &[u32], k: u32) -> Vec<u32> {
        if k == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(digits.len() + 1);
        let mut carry = 0u64;
        for &d in digits {
            let x = u64::from(d) * u64::from(k) + carry;
            out.push((x % BASE as u64) as u32);
            carry = x / BASE as u64;
        }
        while carry > 0 {
            out.push((carry % BASE as u64) as u32);
            carry /= BASE as u64;
        }
        out
    }

    /// Forward/inverse recursive Cooley-Tukey FFT over `a`, in place.
    ///
    /// `a.len()` must be a power of two. `invert` selects the inverse
    /// transform (positive angle); the caller is responsible for dividing by
    /// `n` afterward.
    fn fft(a: &mut [(f64, f64)], invert: bool) {
        let n = a.len();
        if n == 1 {
            return;
        }

        let mut evens: Vec<(f64, f64)> = Vec::with_capacity(n / 2);
        let mut odds: Vec<(f64, f64)> = Vec::with_capacity(n / 2);
        for (i, &v) in a.iter().enumerate() {
            if i % 2 == 0 {
                evens.push(v);
            } else {
                odds.push(v);
            }
        }

        Self::fft(&mut evens, invert);
        Self::fft(&mut odds, invert);

        let sign = if invert { 1.0 } else { -1.0 };
        let angle = sign * 2.0 * std::f64::consts::PI / n as f64;
        let delta = (angle.cos(), angle.sin());
        let mut omega = (1.0_f64, 0.0_f64);

        for i in 0..n / 2 {
            let t = complex_mul(omega, odds[i]);
            a[i] = complex_add(evens[i], t);
            a[i + n / 2] = complex_sub(evens[i], t);
            omega = complex_mul(omega, delta);
        }
    }

    /// Multiplies magnitudes via FFT: embed both digit vectors as complex
    /// numbers, transform, pointwise-multiply, inverse-transform, round and
    /// carry in base BASE.
    fn mul_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }

        let mut len = 1usize;
        while len < a.len() + b.len() {
            len <<= 1;
        }

        let mut fa: Vec<(f64, f64)> = a.iter().map(|&d| (f64::from(d), 0.0)).collect();
        let mut fb: Vec<(f64, f64)> = b.iter().map(|&d| (f64::from(d), 0.0)).collect();
        fa.resize(len, (0.0, 0.0));
        fb.resize(len, (0.0, 0.0));

        Self::fft(&mut fa, false);
        Self::fft(&mut fb, false);
        for i in 0..len {
            fa[i] = complex_mul(fa[i], fb[i]);
        }
        Self::fft(&mut fa, true);

        let mut out = Vec::with_capacity(len);
        let mut carry: i64 = 0;
        for v in &fa {
            let rounded = (v.0 / len as f64 + 0.5).floor() as i64 + carry;
            out.push((rounded.rem_euclid(BASE)) as u32);
            carry = rounded.div_euclid(BASE);
        }
        while carry > 0 {
            out.push((carry % BASE) as u32);
            carry /= BASE;
        }
        out
    }

    /// Multiplies `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        if self.sign == 0 || other.sign == 0 {
            return Self::zero();
        }
        let sign = self.sign * other.sign;
        Self::from_raw(sign, Self::mul_magnitude(&self.digits, &other.digits))
    }

    /// Digit-at-a-time long division with a binary-searched quotient digit.
    ///
    /// Used directly when `a`'s digit count is at most twice `b`'s; always
    /// the base case of [`Self::divmod_magnitude`].
    fn basic_divide(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
        let mut quotient = vec![0u32; a.len()];
        let mut remainder: Vec<u32> = Vec::new();

        for i in (0..a.len()).rev() {
            remainder.insert(0, a[i]);
            while remainder.last() == Some(&0) {
                remainder.pop();
            }

            if Self::cmp_magnitude(&remainder, b) == Ordering::Less {
                continue;
            }

            let (mut lo, mut hi, mut q) = (0i64, BASE - 1, 0i64);
            while lo <= hi {
                let mid = lo + (hi - lo) / 2;
                let prod = Self::mul_short(b, mid as u32);
                if Self::cmp_magnitude(&prod, &remainder) != Ordering::Greater {
                    q = mid;
                    lo = mid + 1;
                } else {
                    hi = mid - 1;
                }
            }
            quotient[i] = q as u32;
            remainder = Self::sub_magnitude(&remainder, &Self::mul_short(b, q));
            while remainder.last() == Some(&0) {
                remainder.pop();
            }
        }

        while quotient.last() == Some(&0) {
            quotient.pop();
        }
        (quotient, remainder)
    }

    /// Divides magnitude `a` by nonzero magnitude `b`, divide-and-conquer.
    fn divmod_magnitude(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
        if Self::cmp_magnitude(a, b) == Ordering::Less {
            return (Vec::new(), a.to_vec());
        }
        if a.len() <= b.len() * 2 {
            return Self::basic_divide(a, b);
        }

        let m = a.len() / 2;
        let high = &a[m..];
        let low = &a[..m];

        let (q_high, r_high) = Self::divmod_magnitude(high, b);
        // temp = r_high shifted left by m digits, plus low.
        let mut shifted = vec![0u32; m];
        shifted.extend_from_slice(&r_high);
        let temp = Self::add_magnitude(&shifted, low);

        let (q_low, r_low) = Self::divmod_magnitude(&temp, b);

        let mut quotient = vec![0u32; m];
        quotient.extend_from_slice(&q_high);
        let quotient = Self::add_magnitude(&quotient, &q_low);

        (quotient, r_low)
    }

    /// Floor division and floor-mod, per Python semantics: the quotient
    /// rounds toward negative infinity and the remainder's sign matches the
    /// divisor's (or is zero).
    ///
    /// # Errors
    /// Returns [`DivisionByZero`] if `other` is zero.
    pub fn div_rem_floor(&self, other: &Self) -> Result<(Self, Self), DivisionByZero> {
        if other.sign == 0 {
            return Err(DivisionByZero);
        }
        if self.sign == 0 {
            return Ok((Self::zero(), Self::zero()));
        }

        let (q_mag, r_mag) = Self::divmod_magnitude(&self.digits, &other.digits);
        let result_sign = self.sign * other.sign;
        let mut quotient = Self::from_raw(if q_mag.is_empty() { 0 } else { result_sign }, q_mag);

        // Floor semantics: when the mathematical quotient is negative and the
        // division wasn't exact, round toward negative infinity by taking one
        // off the magnitude-based quotient. The remainder is then recomputed
        // from the definition `a - (a // b) * b`, which automatically gives
        // it the divisor's sign.
        if result_sign < 0 && !r_mag.is_empty() {
            quotient = quotient.sub(&Self::from_i64(1));
        }
        let remainder = self.sub(&quotient.mul(other));

        Ok((quotient, remainder))
    }

    /// Floor-mod defined as `a - (a // b) * b`; matches [`Self::div_rem_floor`]'s
    /// remainder but is exposed separately for callers that only need it.
    ///
    /// # Errors
    /// Returns [`DivisionByZero`] if `other` is zero.
    pub fn rem_floor(&self, other: &Self) -> Result<Self, DivisionByZero> {
        Ok(self.div_rem_floor(other)?.1)
    }

    /// Floor division quotient only.
    ///
    /// # Errors
    /// Returns [`DivisionByZero`] if `other` is zero.
    pub fn div_floor(&self, other: &Self) -> Result<Self, DivisionByZero> {
        Ok(self.div_rem_floor(other)?.0)
    }
}

fn complex_add(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 + b.0, a.1 + b.1)
}

fn complex_sub(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 - b.0, a.1 - b.1)
}

fn complex_mul(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 * b.0 - a.1 * b.1, a.0 * b.1 + a.1 * b.0)
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    /// Sign-first, then digit-count, then most-significant-digit-down —
    /// a total order consistent with mathematical integer order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.sign.cmp(&other.sign).then_with(|| {
            if self.sign >= 0 {
                Self::cmp_magnitude(&self.digits, &other.digits)
            } else {
                Self::cmp_magnitude(&other.digits, &self.digits)
            }
        })
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({})", self.to_decimal_string())
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Add for &BigInt {
    type Output = BigInt;
    fn add(self, rhs: Self) -> BigInt {
        BigInt::add(self, rhs)
    }
}

impl Sub for &BigInt {
    type Output = BigInt;
    fn sub(self, rhs: Self) -> BigInt {
        BigInt::sub(self, rhs)
    }
}

impl Mul for &BigInt {
    type Output = BigInt;
    fn mul(self, rhs: Self) -> BigInt {
        BigInt::mul(self, rhs)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.negate()
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInt {
        BigInt::parse(s).unwrap()
    }

    #[test]
    fn round_trip_decimal() {
        for s in ["0", "-0", "1", "-1", "123456789012345678901234567890", "-999999999999999999999"] {
            let parsed = big(s);
            let expected = if s == "-0" { "0" } else { s };
            assert_eq!(parsed.to_decimal_string(), expected);
        }
    }

    #[test]
    fn addition_matches_i64_for_small_values() {
        assert_eq!(big("123").add(&big("456")).to_decimal_string(), "579");
        assert_eq!(big("-5").add(&big("3")).to_decimal_string(), "-2");
        assert_eq!(big("5").add(&big("-3")).to_decimal_string(), "2");
    }

    #[test]
    fn subtraction_handles_sign_crossing() {
        assert_eq!(big("3").sub(&big("5")).to_decimal_string(), "-2");
        assert_eq!(big("-3").sub(&big("-5")).to_decimal_string(), "2");
    }

    #[test]
    fn fft_multiplication_handles_large_operands() {
        let a = big("99999999999999999999999999999999999999");
        let b = big("99999999999999999999999999999999999999");
        let product = a.mul(&b);
        // (10^38 - 1)^2 = 10^76 - 2*10^38 + 1
        let expected = "9999999999999999999999999999999999999800000000000000000000000000000000000001";
        assert_eq!(product.to_decimal_string(), expected);
    }

    #[test]
    fn floor_division_rounds_toward_negative_infinity() {
        assert_eq!(big("-7").div_floor(&big("2")).unwrap().to_decimal_string(), "-4");
        assert_eq!(big("-7").rem_floor(&big("2")).unwrap().to_decimal_string(), "1");
        assert_eq!(big("7").div_floor(&big("-2")).unwrap().to_decimal_string(), "-4");
        assert_eq!(big("7").rem_floor(&big("-2")).unwrap().to_decimal_string(), "-1");
    }

    #[test]
    fn division_by_zero_errors() {
        assert_eq!(big("1").div_floor(&big("0")), Err(DivisionByZero));
        assert_eq!(big("1").rem_floor(&big("0")), Err(DivisionByZero));
    }

    #[test]
    fn division_identity_holds() {
        let samples = ["0", "1", "-1", "7", "-7", "200", "-200", "123456789012345678901234567890", "-999999999999"];
        for a in &samples {
            for b in &samples {
                let a = big(a);
                let b = big(b);
                if b.is_zero() {
                    continue;
                }
                let (q, r) = a.div_rem_floor(&b).unwrap();
                assert_eq!(q.mul(&b).add(&r), a, "a={a} b={b}");
                assert!(r.is_zero() || r.sign.signum() == b.sign.signum(), "remainder sign must match divisor");
            }
        }
    }

    #[test]
    fn total_order_trichotomy() {
        let samples = ["-10", "-1", "0", "1", "10", "99999999999999999999"];
        for a in &samples {
            for b in &samples {
                let a = big(a);
                let b = big(b);
                let lt = a < b;
                let eq = a == b;
                let gt = a > b;
                assert_eq!([lt, eq, gt].iter().filter(|x| **x).count(), 1);
            }
        }
    }

    #[test]
    fn to_f64_round_trips_small_values() {
        assert!((big("12345").to_f64() - 12345.0).abs() < f64::EPSILON);
        assert!((big("-12345").to_f64() + 12345.0).abs() < f64::EPSILON);
    }

    #[test]
    fn multiplication_matches_repeated_addition() {
        let a = big("12345678901234567890");
        for b in 0..6i64 {
            let mut sum = BigInt::zero();
            for _ in 0..b {
                sum = sum.add(&a);
            }
            assert_eq!(a.mul(&BigInt::from_i64(b)), sum);
        }
    }
}
