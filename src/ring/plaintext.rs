use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{Num, Zero};

use crate::error::{CodecError, Result};
use crate::ring::modular::project_signed;

/// Highest exponent accepted when parsing a plaintext from text.
pub const MAX_PARSE_DEGREE: usize = 1 << 17;

/// Plaintext polynomial c_0 + c_1·x + c_2·x^2 + ... with canonical residues mod t.
///
/// The buffer length is the capacity; coefficients past it read as zero.
/// Equality only looks at the significant coefficients, so trailing zeros
/// never distinguish two plaintexts.
#[derive(Clone, Debug, Default)]
pub struct Plaintext {
    coeffs: Vec<BigUint>,
}

impl Plaintext {
    /// Empty (zero) polynomial with no coefficients.
    pub fn new() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Zero polynomial with `len` explicit coefficients.
    pub fn zero(len: usize) -> Self {
        Self {
            coeffs: vec![BigUint::zero(); len],
        }
    }

    pub fn from_coeffs(coeffs: Vec<BigUint>) -> Self {
        Self { coeffs }
    }

    pub fn from_u64s(coeffs: &[u64]) -> Self {
        Self {
            coeffs: coeffs.iter().map(|&c| BigUint::from(c)).collect(),
        }
    }

    /// Build a plaintext from signed digits, digit i becoming the coefficient of x^i.
    ///
    /// Each digit is projected into [0, t) and the result is trimmed to its
    /// significant coefficient count, so all-zero input gives the empty polynomial.
    pub fn from_signed_digits(digits: &[i128], modulus: &BigUint) -> Result<Self> {
        let coeffs = digits
            .iter()
            .map(|&d| project_signed(d, modulus))
            .collect::<Result<Vec<_>>>()?;
        let mut pt = Self { coeffs };
        pt.trim();
        Ok(pt)
    }

    /// Number of stored coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(Zero::is_zero)
    }

    /// Index of the highest nonzero coefficient plus one, 0 for the zero polynomial.
    pub fn significant_coeff_count(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|c| !c.is_zero())
            .map_or(0, |i| i + 1)
    }

    pub fn coeffs(&self) -> &[BigUint] {
        &self.coeffs
    }

    /// The significant prefix of the coefficient buffer.
    pub fn significant_coeffs(&self) -> &[BigUint] {
        &self.coeffs[..self.significant_coeff_count()]
    }

    pub fn coeff(&self, index: usize) -> Option<&BigUint> {
        self.coeffs.get(index)
    }

    /// Set coefficient `index`, growing the buffer with zeros if needed.
    pub fn set_coeff(&mut self, index: usize, value: BigUint) -> Result<()> {
        if index >= self.coeffs.len() {
            if value.is_zero() {
                return Ok(());
            }
            let len = index.checked_add(1).ok_or_else(|| {
                CodecError::InvalidPlaintext(format!("coefficient index {index} out of range"))
            })?;
            self.coeffs.resize(len, BigUint::zero());
        }
        self.coeffs[index] = value;
        Ok(())
    }

    pub fn resize(&mut self, len: usize) {
        self.coeffs.resize(len, BigUint::zero());
    }

    /// Drop trailing zero coefficients.
    pub fn trim(&mut self) {
        let len = self.significant_coeff_count();
        self.coeffs.truncate(len);
    }
}

impl PartialEq for Plaintext {
    fn eq(&self, other: &Self) -> bool {
        self.significant_coeffs() == other.significant_coeffs()
    }
}

impl Eq for Plaintext {}

impl Index<usize> for Plaintext {
    type Output = BigUint;

    fn index(&self, index: usize) -> &BigUint {
        &self.coeffs[index]
    }
}

/// Formats as e.g. `1x^2 + FFFFx^1 + 3`: hex coefficients, highest power first.
impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (power, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            if power > 0 {
                write!(f, "{c:X}x^{power}")?;
            } else {
                write!(f, "{c:X}")?;
            }
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl FromStr for Plaintext {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut pt = Self::new();
        if s.is_empty() {
            return Err(CodecError::InvalidPlaintext("empty polynomial string".into()));
        }
        for term in s.split('+').map(str::trim) {
            let (coeff, power) = match term.split_once("x^") {
                Some((c, p)) => {
                    let power = p.trim().parse::<usize>().map_err(|_| {
                        CodecError::InvalidPlaintext(format!("bad exponent in term `{term}`"))
                    })?;
                    if power > MAX_PARSE_DEGREE {
                        return Err(CodecError::InvalidPlaintext(format!(
                            "exponent {power} exceeds {MAX_PARSE_DEGREE}"
                        )));
                    }
                    (c.trim(), power)
                }
                None => (term, 0),
            };
            let value = BigUint::from_str_radix(coeff, 16).map_err(|_| {
                CodecError::InvalidPlaintext(format!("bad coefficient in term `{term}`"))
            })?;
            if pt.coeff(power).is_some_and(|c| !c.is_zero()) {
                return Err(CodecError::InvalidPlaintext(format!(
                    "duplicate term for x^{power}"
                )));
            }
            pt.set_coeff(power, value)?;
        }
        Ok(pt)
    }
}
