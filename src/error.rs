use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("base {0} is not supported: expected 2 or an odd base >= 3")]
    InvalidBase(u64),

    #[error("ring degree must be a power of 2, got {0}")]
    InvalidRingDegree(usize),

    #[error("plain modulus {modulus} too small for digit magnitude {digit}")]
    ModulusTooSmall { modulus: BigUint, digit: BigUint },

    #[error("invalid plaintext: {0}")]
    InvalidPlaintext(String),

    #[error("capacity exceeded: need {needed} coefficients, only {available} available")]
    CapacityExceeded { needed: usize, available: usize },

    #[error("decoded value does not fit in {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, CodecError>;
