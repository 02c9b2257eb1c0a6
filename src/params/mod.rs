pub mod presets;

use std::sync::Arc;

use num_bigint::BigUint;
use tracing::debug;

use crate::encoding::digits::{DigitCodec, DigitScheme};
use crate::error::{CodecError, Result};

/// Parameters shared by the integer encoders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecParams {
    /// Plaintext modulus t; coefficients live in [0, t).
    pub plain_modulus: BigUint,
    /// Expansion base b (2, or odd ≥ 3).
    pub base: u64,
    /// Digit system selected from `base`.
    pub scheme: DigitScheme,
}

/// Builder for CodecParams.
pub struct CodecParamsBuilder {
    plain_modulus: BigUint,
    base: u64,
}

impl Default for CodecParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecParamsBuilder {
    pub fn new() -> Self {
        Self {
            plain_modulus: BigUint::from(0x10000u32),
            base: 2,
        }
    }

    pub fn plain_modulus(mut self, t: impl Into<BigUint>) -> Self {
        self.plain_modulus = t.into();
        self
    }

    pub fn base(mut self, base: u64) -> Self {
        self.base = base;
        self
    }

    pub fn build(self) -> Result<Arc<CodecParams>> {
        let scheme = DigitScheme::for_base(self.base)?;

        // Every digit d the scheme emits must satisfy 2|d| < t, otherwise
        // negative residues become indistinguishable from positive ones.
        let max_digit = BigUint::from(scheme.max_digit());
        if (&max_digit << 1u32) >= self.plain_modulus {
            return Err(CodecError::ModulusTooSmall {
                modulus: self.plain_modulus,
                digit: max_digit,
            });
        }

        debug!(
            plain_modulus = %self.plain_modulus,
            base = self.base,
            "built codec parameters"
        );
        Ok(Arc::new(CodecParams {
            plain_modulus: self.plain_modulus,
            base: self.base,
            scheme,
        }))
    }
}

/// Parameters for fixed-point encoding into Z_t[X]/(X^N + 1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FractionalParams {
    /// Underlying integer codec parameters.
    pub codec: Arc<CodecParams>,
    /// Ring degree N of X^N + 1.
    pub ring_degree: usize,
    /// Coefficients [0, I) hold the integer part.
    pub integer_coeff_count: usize,
    /// Coefficients [N - F, N) hold the fractional part.
    pub fraction_coeff_count: usize,
}

impl FractionalParams {
    /// Create fractional parameters.
    /// - `ring_degree`: N, a power of two
    /// - `integer_coeff_count`: I ≥ 1
    /// - `fraction_coeff_count`: F ≥ 1, with I + F ≤ N
    pub fn new(
        codec: Arc<CodecParams>,
        ring_degree: usize,
        integer_coeff_count: usize,
        fraction_coeff_count: usize,
    ) -> Result<Arc<Self>> {
        if !ring_degree.is_power_of_two() || ring_degree < 2 {
            return Err(CodecError::InvalidRingDegree(ring_degree));
        }
        if integer_coeff_count == 0 {
            return Err(CodecError::InvalidParam("integer_coeff_count must be >= 1".into()));
        }
        if fraction_coeff_count == 0 {
            return Err(CodecError::InvalidParam("fraction_coeff_count must be >= 1".into()));
        }
        let used = integer_coeff_count.saturating_add(fraction_coeff_count);
        if used > ring_degree {
            return Err(CodecError::InvalidParam(format!(
                "integer_coeff_count + fraction_coeff_count = {used} > ring_degree = {ring_degree}"
            )));
        }

        debug!(
            ring_degree,
            integer_coeff_count,
            fraction_coeff_count,
            base = codec.base,
            "built fractional parameters"
        );
        Ok(Arc::new(Self {
            codec,
            ring_degree,
            integer_coeff_count,
            fraction_coeff_count,
        }))
    }
}
