use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{FromPrimitive, ToPrimitive};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::encoding::digits::DigitCodec;
use crate::encoding::integer::IntegerEncoder;
use crate::error::{CodecError, Result};
use crate::params::FractionalParams;
use crate::ring::modular::centered;
use crate::ring::plaintext::Plaintext;

/// Fixed-point encoder for Z_t[X]/(X^N + 1).
///
/// The integer part occupies coefficients [0, I). Fraction digit k, of weight
/// b^-k, sits at coefficient N - k and stores the negated digit, because
/// x^(N-k) = -x^-k in the negacyclic ring. Multiplying an encoding by x thus
/// multiplies the decoded value by b.
#[derive(Clone, Debug)]
pub struct FractionalEncoder {
    params: Arc<FractionalParams>,
    integer: IntegerEncoder,
}

impl FractionalEncoder {
    pub fn new(params: Arc<FractionalParams>) -> Self {
        let integer = IntegerEncoder::new(params.codec.clone());
        Self { params, integer }
    }

    pub fn params(&self) -> &Arc<FractionalParams> {
        &self.params
    }

    /// Fraction digits past the first F are dropped, so a nonzero value below
    /// b^-F with no integer part encodes to the zero polynomial.
    pub fn encode_f64(&self, value: f64) -> Result<Plaintext> {
        if !value.is_finite() {
            return Err(CodecError::InvalidParam(format!(
                "cannot encode non-finite value {value}"
            )));
        }
        let p = &self.params;
        let negative = value < 0.0;
        let magnitude = value.abs();
        let whole = magnitude.floor();

        let fraction = p
            .codec
            .scheme
            .expand_fraction(magnitude - whole, p.fraction_coeff_count);
        let int_part = BigUint::from_f64(whole)
            .ok_or_else(|| CodecError::InvalidParam(format!("cannot encode {value}")))?
            + fraction.carry;

        let int_digits = self.integer.signed_digits(&int_part, negative);
        if int_digits.len() > p.integer_coeff_count {
            debug!(
                needed = int_digits.len(),
                available = p.integer_coeff_count,
                "integer part exceeds capacity"
            );
            return Err(CodecError::CapacityExceeded {
                needed: int_digits.len(),
                available: p.integer_coeff_count,
            });
        }

        let n = p.ring_degree;
        let mut layout = vec![0i128; n];
        layout[..int_digits.len()].copy_from_slice(&int_digits);
        for (k, &d) in fraction.digits.iter().enumerate() {
            // digit k+1 at N-(k+1), negated once for the wrap and once more if x < 0
            layout[n - 1 - k] = if negative { d } else { -d };
        }
        trace!(
            int_digits = int_digits.len(),
            carry = fraction.carry,
            negative,
            "encoded fixed-point value"
        );
        Plaintext::from_signed_digits(&layout, &p.codec.plain_modulus)
    }

    pub fn decode_f64(&self, plain: &Plaintext) -> Result<f64> {
        let p = &self.params;
        let t = &p.codec.plain_modulus;
        let coeffs = plain.significant_coeffs();
        if coeffs.len() > p.ring_degree {
            return Err(CodecError::InvalidPlaintext(format!(
                "{} significant coefficients exceed ring degree {}",
                coeffs.len(),
                p.ring_degree
            )));
        }
        if let Some(c) = coeffs.iter().find(|c| *c >= t) {
            return Err(CodecError::InvalidPlaintext(format!(
                "coefficient {c:X} not reduced modulo {t:X}"
            )));
        }

        let int_end = coeffs.len().min(p.integer_coeff_count);
        let int_part = self
            .integer
            .decode_coeffs(&coeffs[..int_end])?
            .to_f64()
            .unwrap_or(f64::NAN);

        let base = p.codec.base as f64;
        let mut acc = 0.0;
        for pos in p.ring_degree - p.fraction_coeff_count..p.ring_degree {
            let digit = match coeffs.get(pos) {
                Some(c) => centered(c, t)?.to_f64().unwrap_or(f64::NAN),
                None => 0.0,
            };
            acc = (acc + digit) / base;
        }
        Ok(int_part - acc)
    }

    /// Encode a slice of values in parallel; fails with the first error.
    pub fn encode_f64_batch(&self, values: &[f64]) -> Result<Vec<Plaintext>> {
        values.par_iter().map(|&v| self.encode_f64(v)).collect()
    }
}
