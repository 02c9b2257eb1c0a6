pub mod digits;
pub mod fractional;
pub mod integer;

pub use digits::{BalancedDigits, BinaryDigits, DigitCodec, DigitScheme, FractionDigits};
pub use fractional::FractionalEncoder;
pub use integer::IntegerEncoder;
