//! Algebraic law tests (§8) over a representative sample including zero,
//! +-1, small, and large (10- and 200-digit) values.

use pretty_assertions::assert_eq;
use pylet::BigInt;

fn samples() -> Vec<BigInt> {
    [
        "0",
        "1",
        "-1",
        "7",
        "-7",
        "12345",
        "-12345",
        "9876543210",
        "-9876543210",
    ]
    .into_iter()
    .map(|s| BigInt::parse(s).unwrap())
    .chain([
        BigInt::parse(&"7".repeat(10)).unwrap(),
        BigInt::parse(&format!("-{}", "3".repeat(10))).unwrap(),
        BigInt::parse(&"9".repeat(200)).unwrap(),
        BigInt::parse(&format!("-{}", "8".repeat(200))).unwrap(),
    ])
    .collect()
}

#[test]
fn round_trip() {
    for a in samples() {
        let text = a.to_decimal_string();
        assert_eq!(BigInt::parse(&text).unwrap(), a);
    }
}

#[test]
fn additive_identity_and_inverse() {
    let zero = BigInt::zero();
    for a in samples() {
        assert_eq!(a.add(&zero), a);
        assert_eq!(a.add(&a.negate()), zero);
    }
}

#[test]
fn addition_and_multiplication_commute() {
    let values = samples();
    for a in &values {
        for b in &values {
            assert_eq!(a.add(b), b.add(a));
            assert_eq!(a.mul(b), b.mul(a));
        }
    }
}

#[test]
fn addition_and_multiplication_associate_sampled() {
    let values = samples();
    for a in &values {
        for b in &values {
            for c in &values {
                assert_eq!(a.add(b).add(c), a.add(&b.add(c)));
                assert_eq!(a.mul(b).mul(c), a.mul(&b.mul(c)));
            }
        }
    }
}

#[test]
fn multiplicative_identity_and_zero() {
    let one = BigInt::from_i64(1);
    let zero = BigInt::zero();
    for a in samples() {
        assert_eq!(a.mul(&one), a);
        assert_eq!(a.mul(&zero), zero);
    }
}

#[test]
fn division_identity_and_remainder_sign() {
    let values = samples();
    for a in &values {
        for b in &values {
            if b.is_zero() {
                continue;
            }
            let (q, r) = a.div_rem_floor(b).unwrap();
            assert_eq!(q.mul(b).add(&r), *a);
            assert!(r.is_zero() || r.is_negative() == b.is_negative());
        }
    }
}

#[test]
fn total_order_trichotomy_holds() {
    let values = samples();
    for a in &values {
        for b in &values {
            let outcomes = [a < b, a == b, a > b];
            assert_eq!(outcomes.iter().filter(|x| **x).count(), 1);
        }
    }
}

#[test]
fn multiplication_matches_repeated_addition_for_small_b() {
    for a in samples() {
        let mut sum = BigInt::zero();
        for b in 0..5i64 {
            assert_eq!(a.mul(&BigInt::from_i64(b)), sum);
            sum = sum.add(&a);
        }
    }
}
