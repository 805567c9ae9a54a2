//! Fixed-point decimal primitive.
//!
//! A `Decimal` is a 96-bit signed integer mantissa with a base-10 scale of
//! 0..=28, the same range as the classic 128-bit decimal layout. It exists so
//! that money-like values can be hashed exactly instead of through `f64`.
//!
//! ## Equality vs. encoding
//!
//! Ordering and equality are by numeric value (`1.0 == 1.00`), but the
//! canonical encoding keeps the scale, so `1.0` and `1.00` produce different
//! bytes. The encoding describes what the caller wrote, not a normalized value.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest representable scale.
pub const MAX_SCALE: u8 = 28;

/// Exclusive upper bound on the mantissa magnitude (2^96).
const MANTISSA_LIMIT: u128 = 1 << 96;

/// Errors constructing or parsing a [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    /// Mantissa does not fit in 96 bits.
    #[error("Decimal mantissa out of range: {0}")]
    MantissaOutOfRange(i128),

    /// Scale above [`MAX_SCALE`].
    #[error("Decimal scale {0} exceeds maximum of 28")]
    ScaleOutOfRange(u32),

    /// Text was not a plain decimal literal.
    #[error("Invalid decimal literal: {0:?}")]
    Parse(String),
}

/// Fixed-point decimal value.
#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    mantissa: i128,
    scale: u8,
}

impl Decimal {
    /// Zero with scale 0.
    pub const ZERO: Self = Self { mantissa: 0, scale: 0 };

    /// Create a decimal equal to `mantissa * 10^-scale`.
    pub fn new(mantissa: i128, scale: u32) -> Result<Self, DecimalError> {
        if mantissa.unsigned_abs() >= MANTISSA_LIMIT {
            return Err(DecimalError::MantissaOutOfRange(mantissa));
        }
        if scale > MAX_SCALE as u32 {
            return Err(DecimalError::ScaleOutOfRange(scale));
        }
        Ok(Self {
            mantissa,
            scale: scale as u8,
        })
    }

    /// Integer mantissa.
    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.scale as u32
    }

    /// Whether the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// Canonical 16-byte encoding: `lo, mid, hi, flags`, each a little-endian u32.
    ///
    /// `flags` carries the scale in bits 16..24 and the sign in bit 31.
    pub fn to_le_bytes(&self) -> [u8; 16] {
        let magnitude = self.mantissa.unsigned_abs();
        let lo = magnitude as u32;
        let mid = (magnitude >> 32) as u32;
        let hi = (magnitude >> 64) as u32;
        let mut flags = (self.scale as u32) << 16;
        if self.is_negative() {
            flags |= 1 << 31;
        }

        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&lo.to_le_bytes());
        out[4..8].copy_from_slice(&mid.to_le_bytes());
        out[8..12].copy_from_slice(&hi.to_le_bytes());
        out[12..16].copy_from_slice(&flags.to_le_bytes());
        out
    }

    /// Strip trailing fractional zeros.
    fn normalized(&self) -> (i128, u8) {
        let mut mantissa = self.mantissa;
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        (mantissa, scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, sa) = self.normalized();
        let (b, sb) = other.normalized();

        if sa == sb {
            return a.cmp(&b);
        }

        // Align to the larger scale. Mantissas are below 2^96, so if the
        // rescaled side overflows i128 its magnitude dominates the other.
        let (low, low_scale, high, high_scale, flipped) = if sa < sb {
            (a, sa, b, sb, false)
        } else {
            (b, sb, a, sa, true)
        };
        let factor = 10i128.pow((high_scale - low_scale) as u32);
        let ordering = match low.checked_mul(factor) {
            Some(scaled) => scaled.cmp(&high),
            None if low < 0 => Ordering::Less,
            None => Ordering::Greater,
        };

        if flipped {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        let sign = if self.is_negative() { "-" } else { "" };

        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::Parse(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let scale = frac_part.len() as u32;
        if scale > MAX_SCALE as u32 {
            return Err(DecimalError::ScaleOutOfRange(scale));
        }

        let mut magnitude: u128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add((b - b'0') as u128))
                .filter(|m| *m < MANTISSA_LIMIT)
                .ok_or_else(invalid)?;
        }

        let mantissa = if negative {
            -(magnitude as i128)
        } else {
            magnitude as i128
        };
        Self::new(mantissa, scale)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            mantissa: value as i128,
            scale: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(dec("12.345").to_string(), "12.345");
        assert_eq!(dec("-0.05").to_string(), "-0.05");
        assert_eq!(dec("7").to_string(), "7");
        assert_eq!(dec("+3.10").to_string(), "3.10");
        assert_eq!(dec(".5").to_string(), "0.5");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
        assert!("1e5".parse::<Decimal>().is_err());
        assert!("-".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_range_checks() {
        assert!(Decimal::new(1, 29).is_err());
        assert!(Decimal::new(1i128 << 96, 0).is_err());
        assert!(Decimal::new((1i128 << 96) - 1, 28).is_ok());
    }

    #[test]
    fn test_equality_ignores_trailing_zeros() {
        assert_eq!(dec("1.0"), dec("1.00"));
        assert_eq!(dec("1"), dec("1.000"));
        assert_ne!(dec("1.01"), dec("1.1"));
    }

    #[test]
    fn test_encoding_keeps_scale() {
        assert_ne!(dec("1.0").to_le_bytes(), dec("1.00").to_le_bytes());
    }

    #[test]
    fn test_ordering() {
        assert!(dec("-2") < dec("-1.5"));
        assert!(dec("0.1") < dec("0.11"));
        assert!(dec("10") > dec("9.999999"));
        // Forces the overflow branch of the alignment.
        let huge = Decimal::new((1i128 << 95) + 1, 0).unwrap();
        let tiny = Decimal::new(1, 28).unwrap();
        assert!(huge > tiny);
        assert!(tiny < huge);
    }

    #[test]
    fn test_encoding_layout() {
        let bytes = dec("-1.5").to_le_bytes();
        assert_eq!(&bytes[0..4], &15u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &[0u8; 8]);
        let flags = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
        assert_eq!(flags, (1 << 16) | (1 << 31));
    }
}
