use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, ToPrimitive};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::encoding::digits::DigitCodec;
use crate::error::{CodecError, Result};
use crate::params::CodecParams;
use crate::ring::modular::centered;
use crate::ring::plaintext::Plaintext;

/// Encodes integers as plaintext polynomials whose value at x = b is the integer.
///
/// Base 2 writes the binary expansion with digits in {0, 1}; an odd base b
/// writes the balanced expansion with digits in [-(b-1)/2, (b-1)/2]. Negative
/// values negate every digit, and negative digits are stored as t + d.
///
/// Decoding is a plain weighted sum Σ centered(c_i) · b^i, so it also accepts
/// plaintexts that were never produced by `encode_*`, e.g. the result of
/// homomorphic additions where coefficients have grown past the digit range.
#[derive(Clone, Debug)]
pub struct IntegerEncoder {
    params: Arc<CodecParams>,
}

impl IntegerEncoder {
    pub fn new(params: Arc<CodecParams>) -> Self {
        debug!(base = params.base, plain_modulus = %params.plain_modulus, "integer encoder ready");
        Self { params }
    }

    pub fn params(&self) -> &Arc<CodecParams> {
        &self.params
    }

    pub fn base(&self) -> u64 {
        self.params.base
    }

    pub fn plain_modulus(&self) -> &BigUint {
        &self.params.plain_modulus
    }

    pub fn encode_u64(&self, value: u64) -> Result<Plaintext> {
        self.encode_magnitude(&BigUint::from(value), false)
    }

    pub fn encode_u32(&self, value: u32) -> Result<Plaintext> {
        self.encode_magnitude(&BigUint::from(value), false)
    }

    pub fn encode_i64(&self, value: i64) -> Result<Plaintext> {
        self.encode_magnitude(&BigUint::from(value.unsigned_abs()), value < 0)
    }

    pub fn encode_i32(&self, value: i32) -> Result<Plaintext> {
        self.encode_magnitude(&BigUint::from(value.unsigned_abs()), value < 0)
    }

    pub fn encode_biguint(&self, value: &BigUint) -> Result<Plaintext> {
        self.encode_magnitude(value, false)
    }

    pub fn encode_bigint(&self, value: &BigInt) -> Result<Plaintext> {
        self.encode_magnitude(value.magnitude(), value.is_negative())
    }

    /// Encode a slice of values in parallel; fails with the first error.
    pub fn encode_i64_batch(&self, values: &[i64]) -> Result<Vec<Plaintext>> {
        values.par_iter().map(|&v| self.encode_i64(v)).collect()
    }

    /// Signed digits of ±magnitude, least significant first.
    pub(crate) fn signed_digits(&self, magnitude: &BigUint, negative: bool) -> Vec<i128> {
        let mut digits = self.params.scheme.expand(magnitude);
        if negative {
            for d in digits.iter_mut() {
                *d = -*d;
            }
        }
        digits
    }

    fn encode_magnitude(&self, magnitude: &BigUint, negative: bool) -> Result<Plaintext> {
        let digits = self.signed_digits(magnitude, negative);
        trace!(digits = digits.len(), negative, "encoded integer");
        Plaintext::from_signed_digits(&digits, &self.params.plain_modulus)
    }

    /// Weighted sum Σ centered(c_i) · b^i over the given coefficients.
    pub(crate) fn decode_coeffs(&self, coeffs: &[BigUint]) -> Result<BigInt> {
        let t = &self.params.plain_modulus;
        let digits = coeffs
            .iter()
            .map(|c| centered(c, t))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.params.scheme.compose(&digits))
    }

    pub fn decode_bigint(&self, plain: &Plaintext) -> Result<BigInt> {
        self.decode_coeffs(plain.significant_coeffs())
    }

    /// Fails with `Overflow` if the plaintext decodes to a negative value.
    pub fn decode_biguint(&self, plain: &Plaintext) -> Result<BigUint> {
        let value = self.decode_bigint(plain)?;
        value.to_biguint().ok_or_else(|| overflow(&value, "BigUint"))
    }

    pub fn decode_u64(&self, plain: &Plaintext) -> Result<u64> {
        let value = self.decode_bigint(plain)?;
        value.to_u64().ok_or_else(|| overflow(&value, "u64"))
    }

    pub fn decode_u32(&self, plain: &Plaintext) -> Result<u32> {
        let value = self.decode_bigint(plain)?;
        value.to_u32().ok_or_else(|| overflow(&value, "u32"))
    }

    pub fn decode_i64(&self, plain: &Plaintext) -> Result<i64> {
        let value = self.decode_bigint(plain)?;
        value.to_i64().ok_or_else(|| overflow(&value, "i64"))
    }

    pub fn decode_i32(&self, plain: &Plaintext) -> Result<i32> {
        let value = self.decode_bigint(plain)?;
        value.to_i32().ok_or_else(|| overflow(&value, "i32"))
    }

    pub fn decode_i64_batch(&self, plains: &[Plaintext]) -> Result<Vec<i64>> {
        plains.par_iter().map(|p| self.decode_i64(p)).collect()
    }
}

fn overflow(value: &BigInt, ty: &'static str) -> CodecError {
    debug!(%value, ty, "decoded value out of range");
    CodecError::Overflow(ty)
}
