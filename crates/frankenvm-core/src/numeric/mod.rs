//! Numeric representation and conversion rules.
//!
//! A [`NumericValue`] carries its declared width/representation together
//! with its bit pattern. Conversion between representations follows the
//! two's-complement truncation, sign/zero extension, and IEEE-754 value
//! conversion rules in [`convert`]; arithmetic and comparison semantics
//! live in [`ops`].

pub mod convert;
pub mod ops;

pub use ops::{BinOp, CmpOp, fmt_f32, fmt_f64};

use serde::{Deserialize, Serialize};

/// Declared width/representation of a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repr {
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer (zero-extends on widening).
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// IEEE-754 binary32.
    F32,
    /// IEEE-754 binary64.
    F64,
}

/// A tagged numeric value: representation plus bit pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    I8(i8),
    I16(i16),
    U16(u16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl NumericValue {
    /// The representation this value is declared with.
    #[must_use]
    pub const fn repr(&self) -> Repr {
        match self {
            Self::I8(_) => Repr::I8,
            Self::I16(_) => Repr::I16,
            Self::U16(_) => Repr::U16,
            Self::I32(_) => Repr::I32,
            Self::I64(_) => Repr::I64,
            Self::F32(_) => Repr::F32,
            Self::F64(_) => Repr::F64,
        }
    }
}

impl std::fmt::Display for NumericValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{}", fmt_f32(v)),
            Self::F64(v) => write!(f, "{}", fmt_f64(v)),
        }
    }
}
