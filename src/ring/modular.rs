use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use tracing::debug;

use crate::error::{CodecError, Result};

/// Largest coefficient still read as non-negative: floor(t / 2).
#[inline]
pub fn neg_threshold(modulus: &BigUint) -> BigUint {
    modulus >> 1u32
}

/// Map a signed digit into its canonical residue in [0, t).
///
/// Non-negative digits are stored as-is, negative digits as t + d.
/// A digit with 2|d| >= t would collide with a legitimate residue of the
/// opposite sign, so it is rejected.
pub fn project_signed(digit: i128, modulus: &BigUint) -> Result<BigUint> {
    let magnitude = BigUint::from(digit.unsigned_abs());
    if (&magnitude << 1u32) >= *modulus {
        return Err(CodecError::ModulusTooSmall {
            modulus: modulus.clone(),
            digit: magnitude,
        });
    }
    if digit >= 0 || magnitude.is_zero() {
        Ok(magnitude)
    } else {
        Ok(modulus - magnitude)
    }
}

/// Centered representation of a residue: [0, t) -> (-t/2, t/2].
///
/// Values above floor(t/2) map to c - t. Applied to any coefficient on decode,
/// not only ones produced by [`project_signed`].
pub fn centered(coeff: &BigUint, modulus: &BigUint) -> Result<BigInt> {
    if coeff >= modulus {
        debug!(%coeff, %modulus, "coefficient is not a canonical residue");
        return Err(CodecError::InvalidPlaintext(format!(
            "coefficient {coeff:X} >= plain modulus {modulus:X}"
        )));
    }
    if *coeff > neg_threshold(modulus) {
        Ok(BigInt::from_biguint(Sign::Minus, modulus - coeff))
    } else {
        Ok(BigInt::from(coeff.clone()))
    }
}
