use std::sync::Arc;

use crate::error::Result;
use crate::params::{CodecParams, CodecParamsBuilder, FractionalParams};

/// 60-bit plaintext modulus 2^60 - 1.
pub const PLAIN_MODULUS_60BIT: u64 = 0xFFF_FFFF_FFFF_FFFF;

/// 16-bit plaintext modulus 2^16.
pub const PLAIN_MODULUS_16BIT: u64 = 0x10000;

/// Binary integer encoding with a 60-bit plaintext modulus.
/// Room for intermediate coefficient growth far beyond the {-1, 0, 1} digits
/// a fresh encoding uses.
pub fn binary_60bit() -> Result<Arc<CodecParams>> {
    CodecParamsBuilder::new()
        .plain_modulus(PLAIN_MODULUS_60BIT)
        .base(2)
        .build()
}

/// Integer encoding with base `base` (2 or odd) and t = 2^16.
pub fn balanced_16bit(base: u64) -> Result<Arc<CodecParams>> {
    CodecParamsBuilder::new()
        .plain_modulus(PLAIN_MODULUS_16BIT)
        .base(base)
        .build()
}

/// Fixed-point encoding in Z_{2^16}[X]/(X^1024 + 1).
/// 500 integer coefficients and 50 fractional coefficients, which keeps the
/// relative error of typical doubles below 1e-6 for every base up to 19.
pub fn fractional_1024(base: u64) -> Result<Arc<FractionalParams>> {
    FractionalParams::new(balanced_16bit(base)?, 1024, 500, 50)
}
