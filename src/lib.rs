//! # Polycodec: integer and fixed-point plaintext encoding
//!
//! Encodes integers and reals as plaintext polynomials over Z_t for
//! homomorphic encryption schemes such as BFV.
//!
//! An integer v becomes a polynomial p with p(b) = v, where b is the
//! expansion base: binary digits for b = 2, balanced digits in
//! [-(b-1)/2, (b-1)/2] for odd b. Additions and multiplications of
//! plaintexts then match the integer arithmetic as long as coefficients
//! stay below t/2. Fixed-point values additionally place their fraction
//! digits at the top of Z_t[X]/(X^N + 1), where x^(N-k) acts as -b^-k.
//!
//! ## Quick Start
//!
//! ```no_run
//! use polycodec::prelude::*;
//!
//! // Balanced base-3 digits with t = 2^16
//! let params = polycodec::params::presets::balanced_16bit(3).unwrap();
//! let encoder = IntegerEncoder::new(params);
//!
//! let pt = encoder.encode_i64(-2).unwrap();
//! assert_eq!(pt.to_string(), "FFFFx^1 + 1");
//! assert_eq!(encoder.decode_i64(&pt).unwrap(), -2);
//!
//! // Fixed-point values in Z_t[X]/(X^1024 + 1)
//! let params = polycodec::params::presets::fractional_1024(3).unwrap();
//! let encoder = FractionalEncoder::new(params);
//! let pt = encoder.encode_f64(-123.456).unwrap();
//! assert!((encoder.decode_f64(&pt).unwrap() + 123.456).abs() < 1e-6);
//! ```

pub mod error;
pub mod params;
pub mod ring;
pub mod encoding;

/// Convenient re-exports for common types and functions.
pub mod prelude {
    pub use crate::error::{CodecError, Result};
    pub use crate::params::{CodecParams, CodecParamsBuilder, FractionalParams};
    pub use crate::ring::{centered, project_signed, Plaintext};
    pub use crate::encoding::{
        BalancedDigits, BinaryDigits, DigitCodec, DigitScheme,
        FractionalEncoder, IntegerEncoder,
    };
}
