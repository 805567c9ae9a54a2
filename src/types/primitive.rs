//! The closed set of primitive values and their canonical encodings.
//!
//! ## Canonical Encoding
//!
//! | Variant | Bytes (little-endian) |
//! |---------|-----------------------|
//! | `Bool` | 1 byte, `0` or `1` |
//! | `I8`..`U64` | natural width |
//! | `F32`, `F64` | IEEE-754 bit pattern |
//! | `Decimal` | 16 bytes, see [`Decimal::to_le_bytes`] |
//! | `Char` | scalar value as `u32` |
//! | `Str` | [`platform_independent_hash`] as `i32` |
//! | `Bytes` | `u64` length, raw bytes |
//! | `Chars` | `u64` length, each char as `u32` |
//!
//! Strings are hashed rather than copied. Two strings that collide under the
//! string hash also digest identically; that trade buys stability across
//! platforms and locales.

use std::cmp::Ordering;
use std::fmt;

use super::decimal::Decimal;
use crate::stable_hash::platform_independent_hash;

/// A primitive value borrowed from the object being hashed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    /// Boolean.
    Bool(bool),
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// Fixed-point decimal.
    Decimal(Decimal),
    /// Single character.
    Char(char),
    /// Text, encoded through the platform-independent string hash.
    Str(&'a str),
    /// Raw byte array.
    Bytes(&'a [u8]),
    /// Raw character array.
    Chars(&'a [char]),
}

impl Primitive<'_> {
    /// Short name of the primitive kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Decimal(_) => "decimal",
            Self::Char(_) => "char",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Chars(_) => "chars",
        }
    }

    /// Append the canonical encoding to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match *self {
            Self::Bool(v) => out.push(v as u8),
            Self::I8(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U8(v) => out.push(v),
            Self::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::F32(v) => out.extend_from_slice(&v.to_bits().to_le_bytes()),
            Self::F64(v) => out.extend_from_slice(&v.to_bits().to_le_bytes()),
            Self::Decimal(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Char(v) => out.extend_from_slice(&(v as u32).to_le_bytes()),
            Self::Str(v) => out.extend_from_slice(&platform_independent_hash(v).to_le_bytes()),
            Self::Bytes(v) => {
                out.extend_from_slice(&(v.len() as u64).to_le_bytes());
                out.extend_from_slice(v);
            }
            Self::Chars(v) => {
                out.extend_from_slice(&(v.len() as u64).to_le_bytes());
                for c in v {
                    out.extend_from_slice(&(*c as u32).to_le_bytes());
                }
            }
        }
    }

    /// Canonical encoding as a fresh buffer.
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    /// Natural ordering between two primitives of the same kind.
    ///
    /// Returns `None` for different kinds and for NaN floats.
    pub fn try_cmp(&self, other: &Primitive<'_>) -> Option<Ordering> {
        use Primitive::*;
        match (self, other) {
            (Bool(a), Bool(b)) => Some(a.cmp(b)),
            (I8(a), I8(b)) => Some(a.cmp(b)),
            (I16(a), I16(b)) => Some(a.cmp(b)),
            (I32(a), I32(b)) => Some(a.cmp(b)),
            (I64(a), I64(b)) => Some(a.cmp(b)),
            (U8(a), U8(b)) => Some(a.cmp(b)),
            (U16(a), U16(b)) => Some(a.cmp(b)),
            (U32(a), U32(b)) => Some(a.cmp(b)),
            (U64(a), U64(b)) => Some(a.cmp(b)),
            (F32(a), F32(b)) => a.partial_cmp(b),
            (F64(a), F64(b)) => a.partial_cmp(b),
            (Decimal(a), Decimal(b)) => Some(a.cmp(b)),
            (Char(a), Char(b)) => Some(a.cmp(b)),
            (Str(a), Str(b)) => Some(a.cmp(b)),
            (Bytes(a), Bytes(b)) => Some(a.cmp(b)),
            (Chars(a), Chars(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Write text with control characters escaped so one token never spans lines.
fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for c in text.chars() {
        if c.is_control() {
            write!(f, "{}", c.escape_default())?;
        } else {
            write!(f, "{c}")?;
        }
    }
    Ok(())
}

/// Free text rendered with the same escaping as string tokens.
pub(crate) struct EscapedText<'a>(pub(crate) &'a str);

impl fmt::Display for EscapedText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, self.0)
    }
}

/// Trace token for the value.
impl fmt::Display for Primitive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Char(v) => write_escaped(f, v.encode_utf8(&mut [0u8; 4])),
            Self::Str(v) => write_escaped(f, v),
            Self::Bytes(v) => write!(f, "{}", hex::encode(v)),
            Self::Chars(v) => {
                let text: String = v.iter().collect();
                write_escaped(f, &text)
            }
        }
    }
}

macro_rules! primitive_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive<'_> {
                fn from(value: $ty) -> Self {
                    Primitive::$variant(value)
                }
            }
        )*
    };
}

primitive_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    char => Char,
}

impl<'a> From<&'a str> for Primitive<'a> {
    fn from(value: &'a str) -> Self {
        Primitive::Str(value)
    }
}

impl<'a> From<&'a String> for Primitive<'a> {
    fn from(value: &'a String) -> Self {
        Primitive::Str(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for Primitive<'a> {
    fn from(value: &'a [u8]) -> Self {
        Primitive::Bytes(value)
    }
}

impl<'a> From<&'a [char]> for Primitive<'a> {
    fn from(value: &'a [char]) -> Self {
        Primitive::Chars(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_widths() {
        assert_eq!(Primitive::Bool(true).to_canonical_bytes(), vec![1]);
        assert_eq!(Primitive::I8(-1).to_canonical_bytes(), vec![0xff]);
        assert_eq!(Primitive::I16(1).to_canonical_bytes(), vec![1, 0]);
        assert_eq!(Primitive::U32(1).to_canonical_bytes().len(), 4);
        assert_eq!(Primitive::I64(1).to_canonical_bytes().len(), 8);
        assert_eq!(Primitive::F32(1.5).to_canonical_bytes(), 1.5f32.to_bits().to_le_bytes());
        assert_eq!(Primitive::F64(1.5).to_canonical_bytes(), 1.5f64.to_bits().to_le_bytes());
        assert_eq!(Primitive::Char('A').to_canonical_bytes(), vec![65, 0, 0, 0]);
    }

    #[test]
    fn test_same_value_different_width_differs() {
        assert_ne!(
            Primitive::I32(7).to_canonical_bytes(),
            Primitive::I64(7).to_canonical_bytes()
        );
    }

    #[test]
    fn test_str_encodes_hash_not_text() {
        let bytes = Primitive::Str("hello world, this is long").to_canonical_bytes();
        assert_eq!(bytes.len(), 4);
        assert_eq!(
            bytes,
            platform_independent_hash("hello world, this is long").to_le_bytes()
        );
    }

    #[test]
    fn test_arrays_are_length_prefixed() {
        let bytes = Primitive::Bytes(&[9, 8, 7]).to_canonical_bytes();
        assert_eq!(&bytes[..8], &3u64.to_le_bytes());
        assert_eq!(&bytes[8..], &[9, 8, 7]);

        let chars = ['a', 'b'];
        let bytes = Primitive::Chars(&chars).to_canonical_bytes();
        assert_eq!(bytes.len(), 8 + 2 * 4);
        assert_eq!(&bytes[..8], &2u64.to_le_bytes());
    }

    #[test]
    fn test_length_prefix_separates_adjacent_arrays() {
        let mut a = Vec::new();
        Primitive::Bytes(&[1, 2]).encode_into(&mut a);
        Primitive::Bytes(&[3]).encode_into(&mut a);

        let mut b = Vec::new();
        Primitive::Bytes(&[1]).encode_into(&mut b);
        Primitive::Bytes(&[2, 3]).encode_into(&mut b);

        assert_ne!(a, b);
    }

    #[test]
    fn test_trace_tokens() {
        assert_eq!(Primitive::Bool(false).to_string(), "false");
        assert_eq!(Primitive::I32(-42).to_string(), "-42");
        assert_eq!(Primitive::F64(0.5).to_string(), "0.5");
        assert_eq!(Primitive::Str("key").to_string(), "key");
        assert_eq!(Primitive::Bytes(&[0xde, 0xad]).to_string(), "dead");
        assert_eq!(Primitive::Chars(&['h', 'i']).to_string(), "hi");
    }

    #[test]
    fn test_trace_tokens_escape_line_breaks() {
        assert_eq!(Primitive::Str("a\nb\tc").to_string(), "a\\nb\\tc");
        assert_eq!(Primitive::Char('\n').to_string(), "\\n");
    }

    #[test]
    fn test_try_cmp() {
        assert_eq!(Primitive::I32(1).try_cmp(&Primitive::I32(2)), Some(Ordering::Less));
        assert_eq!(Primitive::Str("b").try_cmp(&Primitive::Str("a")), Some(Ordering::Greater));
        assert_eq!(Primitive::I32(1).try_cmp(&Primitive::I64(1)), None);
        assert_eq!(Primitive::F64(f64::NAN).try_cmp(&Primitive::F64(1.0)), None);
    }
}
