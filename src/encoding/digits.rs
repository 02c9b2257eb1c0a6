use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::Zero;

use crate::error::{CodecError, Result};

/// Expand a magnitude into base-b digits, least significant first.
///
/// Returns the shortest [d_0, ..., d_{k-1}] with 0 ≤ d_i < b and
/// magnitude = Σ d_i · b^i. Zero expands to no digits at all.
pub fn expand_unsigned(magnitude: &BigUint, base: u64) -> Vec<u64> {
    if base == 2 {
        return (0..magnitude.bits()).map(|i| u64::from(magnitude.bit(i))).collect();
    }
    let base_big = BigUint::from(base);
    let mut digits = Vec::new();
    let mut remaining = magnitude.clone();
    while !remaining.is_zero() {
        let (quotient, rem) = remaining.div_rem(&base_big);
        digits.push(rem.iter_u64_digits().next().unwrap_or(0));
        remaining = quotient;
    }
    digits
}

/// Rewrite unsigned base-b digits into the balanced range [-(b-1)/2, (b-1)/2].
///
/// Digits above (b-1)/2 become d - b and borrow one from the next position;
/// a carry out of the top digit becomes a new leading 1. `base` must be odd.
pub fn normalize_balanced(digits: &[u64], base: u64) -> Vec<i128> {
    let half = i128::from((base - 1) / 2);
    let base = i128::from(base);
    let mut balanced = Vec::with_capacity(digits.len() + 1);
    let mut carry = 0i128;
    for &d in digits {
        let r = i128::from(d) + carry;
        if r > half {
            balanced.push(r - base);
            carry = 1;
        } else {
            balanced.push(r);
            carry = 0;
        }
    }
    if carry != 0 {
        balanced.push(carry);
    }
    balanced
}

/// Digits of a fractional magnitude, most significant (weight b^-1) first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FractionDigits {
    /// Units moved into the integer part while centring the fraction.
    pub carry: u64,
    pub digits: Vec<i128>,
}

/// Positional digit system used by the encoders.
pub trait DigitCodec {
    fn base(&self) -> u64;

    /// Largest digit magnitude `expand` and `expand_fraction` produce.
    fn max_digit(&self) -> u64;

    /// Signed digits of a non-negative magnitude, least significant first.
    fn expand(&self, magnitude: &BigUint) -> Vec<i128>;

    /// Exactly `count` digits of `fraction` ∈ [0, 1), weights b^-1, b^-2, ...
    fn expand_fraction(&self, fraction: f64, count: usize) -> FractionDigits;

    /// Σ d_i · b^i for arbitrary signed digits, not only ones from `expand`.
    fn compose(&self, digits: &[BigInt]) -> BigInt {
        let base = BigInt::from(self.base());
        digits
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, d| acc * &base + d)
    }
}

/// Base-2 digits in {0, 1}; negative values negate every digit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinaryDigits;

impl DigitCodec for BinaryDigits {
    fn base(&self) -> u64 {
        2
    }

    fn max_digit(&self) -> u64 {
        1
    }

    fn expand(&self, magnitude: &BigUint) -> Vec<i128> {
        expand_unsigned(magnitude, 2)
            .into_iter()
            .map(i128::from)
            .collect()
    }

    fn expand_fraction(&self, fraction: f64, count: usize) -> FractionDigits {
        let mut r = fraction;
        let mut digits = Vec::with_capacity(count);
        for _ in 0..count {
            r *= 2.0;
            let d = r.trunc();
            r -= d;
            digits.push(d as i128);
        }
        FractionDigits { carry: 0, digits }
    }
}

/// Balanced digits for an odd base b ≥ 3, each in [-(b-1)/2, (b-1)/2].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalancedDigits {
    base: u64,
}

impl BalancedDigits {
    pub fn new(base: u64) -> Result<Self> {
        if base < 3 || base % 2 == 0 {
            return Err(CodecError::InvalidBase(base));
        }
        Ok(Self { base })
    }
}

impl DigitCodec for BalancedDigits {
    fn base(&self) -> u64 {
        self.base
    }

    fn max_digit(&self) -> u64 {
        (self.base - 1) / 2
    }

    fn expand(&self, magnitude: &BigUint) -> Vec<i128> {
        normalize_balanced(&expand_unsigned(magnitude, self.base), self.base)
    }

    fn expand_fraction(&self, fraction: f64, count: usize) -> FractionDigits {
        // Centre the fraction in [-1/2, 1/2] so every digit stays balanced.
        let (mut r, carry) = if fraction > 0.5 {
            (fraction - 1.0, 1)
        } else {
            (fraction, 0)
        };
        let base = self.base as f64;
        let mut digits = Vec::with_capacity(count);
        for _ in 0..count {
            r *= base;
            // round to nearest, ties toward zero
            let d = r.signum() * (r.abs() - 0.5).ceil();
            r -= d;
            digits.push(d as i128);
        }
        FractionDigits { carry, digits }
    }
}

/// Digit system chosen from the configured base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitScheme {
    Binary(BinaryDigits),
    Balanced(BalancedDigits),
}

impl DigitScheme {
    /// Base 2 selects binary digits, odd bases ≥ 3 balanced digits.
    pub fn for_base(base: u64) -> Result<Self> {
        if base == 2 {
            Ok(Self::Binary(BinaryDigits))
        } else {
            Ok(Self::Balanced(BalancedDigits::new(base)?))
        }
    }

    fn codec(&self) -> &dyn DigitCodec {
        match self {
            Self::Binary(d) => d,
            Self::Balanced(d) => d,
        }
    }
}

impl DigitCodec for DigitScheme {
    fn base(&self) -> u64 {
        self.codec().base()
    }

    fn max_digit(&self) -> u64 {
        self.codec().max_digit()
    }

    fn expand(&self, magnitude: &BigUint) -> Vec<i128> {
        self.codec().expand(magnitude)
    }

    fn expand_fraction(&self, fraction: f64, count: usize) -> FractionDigits {
        self.codec().expand_fraction(fraction, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    /// Quotient-form balanced expansion, used as a reference.
    fn balanced_by_division(mut m: u64, base: u64) -> Vec<i128> {
        let half = (base - 1) / 2;
        let mut digits = Vec::new();
        while m != 0 {
            let r = m % base;
            if r > half {
                digits.push(r as i128 - base as i128);
                m = m / base + 1;
            } else {
                digits.push(r as i128);
                m /= base;
            }
        }
        digits
    }

    #[test]
    fn test_expand_unsigned() {
        // 42 = 10 + 2*16 in base 16
        assert_eq!(expand_unsigned(&big(42), 16), vec![10, 2]);
        // 255 = 15 + 15*16 in base 16
        assert_eq!(expand_unsigned(&big(255), 16), vec![15, 15]);
        assert_eq!(expand_unsigned(&big(6), 2), vec![0, 1, 1]);
        assert!(expand_unsigned(&big(0), 2).is_empty());
        assert!(expand_unsigned(&big(0), 7).is_empty());
    }

    #[test]
    fn test_expand_unsigned_max_u64() {
        let digits = expand_unsigned(&big(u64::MAX), 2);
        assert_eq!(digits.len(), 64);
        assert!(digits.iter().all(|&d| d == 1));
    }

    #[test]
    fn test_normalize_balanced_small() {
        assert_eq!(normalize_balanced(&[2], 3), vec![-1, 1]);
        assert_eq!(normalize_balanced(&[0, 1], 3), vec![0, 1]);
        // 8 = 22 in base 3 -> 1, 0, -1
        assert_eq!(normalize_balanced(&[2, 2], 3), vec![-1, 0, 1]);
        assert!(normalize_balanced(&[], 3).is_empty());
    }

    #[test]
    fn test_balanced_matches_division_form() {
        for base in (3..20).step_by(2) {
            let scheme = BalancedDigits::new(base).unwrap();
            for m in (0..5000u64).chain([u64::MAX, u64::MAX - 1, 1 << 63]) {
                assert_eq!(
                    scheme.expand(&big(m)),
                    balanced_by_division(m, base),
                    "base={base} m={m}"
                );
            }
        }
    }

    #[test]
    fn test_balanced_digits_in_range_and_minimal() {
        for base in (3..20).step_by(2) {
            let scheme = BalancedDigits::new(base).unwrap();
            let half = scheme.max_digit() as i128;
            for m in 1..3000u64 {
                let digits = scheme.expand(&big(m));
                assert!(digits.iter().all(|d| d.abs() <= half));
                assert_ne!(*digits.last().unwrap(), 0);
                let recomposed = scheme.compose(
                    &digits.iter().map(|&d| BigInt::from(d)).collect::<Vec<_>>(),
                );
                assert_eq!(recomposed, BigInt::from(m));
            }
        }
    }

    #[test]
    fn test_balanced_all_ones() {
        // 0x2671 = (3^9 - 1) / 2
        let digits = BalancedDigits::new(3).unwrap().expand(&big(0x2671));
        assert_eq!(digits, vec![1; 9]);
    }

    #[test]
    fn test_compose_accepts_large_digits() {
        let binary = BinaryDigits;
        let digits = [BigInt::from(1), BigInt::from(500), BigInt::from(1023)];
        assert_eq!(binary.compose(&digits), BigInt::from(1 + 500 * 2 + 1023 * 4));

        let seven = BalancedDigits::new(7).unwrap();
        let digits = [
            BigInt::from(123),
            BigInt::from(-1),
            BigInt::from(511),
            BigInt::from(1),
        ];
        assert_eq!(seven.compose(&digits), BigInt::from(123 - 7 + 511 * 49 + 343));
    }

    #[test]
    fn test_invalid_bases() {
        for base in [0, 1, 2, 4, 6, 10, 16] {
            assert_eq!(BalancedDigits::new(base), Err(CodecError::InvalidBase(base)));
        }
        for base in [0, 1, 4, 6, 10] {
            assert!(DigitScheme::for_base(base).is_err());
        }
        assert!(matches!(DigitScheme::for_base(2), Ok(DigitScheme::Binary(_))));
        assert!(matches!(DigitScheme::for_base(3), Ok(DigitScheme::Balanced(_))));
    }

    #[test]
    fn test_binary_fraction() {
        let frac = BinaryDigits.expand_fraction(0.625, 5);
        assert_eq!(frac.carry, 0);
        assert_eq!(frac.digits, vec![1, 0, 1, 0, 0]);
    }

    #[test]
    fn test_balanced_fraction_centres() {
        let three = BalancedDigits::new(3).unwrap();
        // 2/3 = 1 - 1/3
        let frac = three.expand_fraction(2.0 / 3.0, 3);
        assert_eq!(frac.carry, 1);
        assert_eq!(frac.digits[0], -1);

        let frac = three.expand_fraction(0.5, 6);
        assert_eq!(frac.carry, 0);
        assert_eq!(frac.digits, vec![1; 6]);
    }

    #[test]
    fn test_balanced_fraction_digits_in_range() {
        for base in (3..20).step_by(2) {
            let scheme = BalancedDigits::new(base).unwrap();
            let half = scheme.max_digit() as i128;
            for f in [0.0, 0.1, 0.123, 0.456, 0.5, 0.98765, 0.999] {
                let frac = scheme.expand_fraction(f, 30);
                assert_eq!(frac.digits.len(), 30);
                assert!(frac.digits.iter().all(|d| d.abs() <= half), "base={base} f={f}");
                let value = frac
                    .digits
                    .iter()
                    .rev()
                    .fold(0.0, |acc, &d| (acc + d as f64) / base as f64);
                assert!((value + frac.carry as f64 - f).abs() < 1e-9, "base={base} f={f}");
            }
        }
    }
}
