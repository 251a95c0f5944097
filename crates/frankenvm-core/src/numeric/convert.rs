//! Representation conversion rule table.
//!
//! Conversions are total functions: they never fault, for every input.
//!
//! - integer → narrower integer: keep the low-order bits of the target
//!   width, reinterpreted under the target's sign convention
//! - integer → wider integer: sign-extend, except the unsigned 16-bit
//!   representation, which zero-extends
//! - integer ↔ floating point: convert by value, not bit pattern
//! - floating point → integer: truncate toward zero, saturating at the
//!   target's min/max; NaN converts to zero
//! - binary64 → binary32: round-to-nearest value conversion

use super::{NumericValue, Repr};

impl NumericValue {
    /// Convert this value to `target` per the rule table above.
    #[must_use]
    pub fn convert(self, target: Repr) -> Self {
        match self {
            Self::F32(v) => from_f32(v, target),
            Self::F64(v) => from_f64(v, target),
            _ => from_integral(self.widen_i64(), target),
        }
    }

    /// Widen an integral value to 64 bits: sign-extends signed sources,
    /// zero-extends the unsigned 16-bit representation.
    ///
    /// Floating-point sources are truncated toward zero (saturating),
    /// matching the float → integer rule for a 64-bit target.
    #[must_use]
    pub fn widen_i64(self) -> i64 {
        match self {
            Self::I8(v) => i64::from(v),
            Self::I16(v) => i64::from(v),
            Self::U16(v) => i64::from(v),
            Self::I32(v) => i64::from(v),
            Self::I64(v) => v,
            Self::F32(v) => v as i64,
            Self::F64(v) => v as i64,
        }
    }

    /// Widen to binary64 by value.
    #[must_use]
    pub fn widen_f64(self) -> f64 {
        match self {
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
            _ => self.widen_i64() as f64,
        }
    }
}

/// Build a value of `target` from a sign/zero-extended 64-bit pattern.
///
/// The `as` narrowing casts implement exactly the two's-complement
/// truncation rule (keep low bits, reinterpret sign).
fn from_integral(wide: i64, target: Repr) -> NumericValue {
    match target {
        Repr::I8 => NumericValue::I8(wide as i8),
        Repr::I16 => NumericValue::I16(wide as i16),
        Repr::U16 => NumericValue::U16(wide as u16),
        Repr::I32 => NumericValue::I32(wide as i32),
        Repr::I64 => NumericValue::I64(wide),
        Repr::F32 => NumericValue::F32(wide as f32),
        Repr::F64 => NumericValue::F64(wide as f64),
    }
}

/// Float → target conversions must cast directly to the target width so
/// saturation clamps at the target's own min/max.
fn from_f32(v: f32, target: Repr) -> NumericValue {
    match target {
        Repr::I8 => NumericValue::I8(v as i8),
        Repr::I16 => NumericValue::I16(v as i16),
        Repr::U16 => NumericValue::U16(v as u16),
        Repr::I32 => NumericValue::I32(v as i32),
        Repr::I64 => NumericValue::I64(v as i64),
        Repr::F32 => NumericValue::F32(v),
        Repr::F64 => NumericValue::F64(f64::from(v)),
    }
}

fn from_f64(v: f64, target: Repr) -> NumericValue {
    match target {
        Repr::I8 => NumericValue::I8(v as i8),
        Repr::I16 => NumericValue::I16(v as i16),
        Repr::U16 => NumericValue::U16(v as u16),
        Repr::I32 => NumericValue::I32(v as i32),
        Repr::I64 => NumericValue::I64(v as i64),
        Repr::F32 => NumericValue::F32(v as f32),
        Repr::F64 => NumericValue::F64(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ones_i32_narrows_to_minus_one_everywhere() {
        let x = NumericValue::I32(0xFFFF_FFFFu32 as i32);
        assert_eq!(x.convert(Repr::I64), NumericValue::I64(-1));
        assert_eq!(x.convert(Repr::I16), NumericValue::I16(-1));
        assert_eq!(x.convert(Repr::U16), NumericValue::U16(0xFFFF));
        assert_eq!(x.convert(Repr::I8), NumericValue::I8(-1));
    }

    #[test]
    fn all_ones_i64_narrows_to_minus_one_i32() {
        let x = NumericValue::I64(-1);
        assert_eq!(x.convert(Repr::I32), NumericValue::I32(-1));
    }

    #[test]
    fn widening_preserves_value_not_bit_salad() {
        // Widening -1 through the 32-bit value yields -1, not 4294967295.
        let x = NumericValue::I32(-1);
        assert_eq!(x.widen_i64(), -1);
        // The unsigned 16-bit representation zero-extends.
        let c = NumericValue::U16(0xFFFF);
        assert_eq!(c.widen_i64(), 65535);
        assert_eq!(c.convert(Repr::I32), NumericValue::I32(65535));
    }

    #[test]
    fn truncation_keeps_low_order_bits() {
        let x = NumericValue::I32(0x0001_2345);
        assert_eq!(x.convert(Repr::I16), NumericValue::I16(0x2345));
        assert_eq!(x.convert(Repr::I8), NumericValue::I8(0x45));
        // Low bits with the target sign bit set read back negative.
        let y = NumericValue::I32(0x0000_8000);
        assert_eq!(y.convert(Repr::I16), NumericValue::I16(i16::MIN));
    }

    #[test]
    fn float_to_int_truncates_toward_zero() {
        assert_eq!(
            NumericValue::F64(1.5).convert(Repr::I32),
            NumericValue::I32(1)
        );
        assert_eq!(
            NumericValue::F64(-1.5).convert(Repr::I32),
            NumericValue::I32(-1)
        );
        assert_eq!(
            NumericValue::F32(1.5).convert(Repr::I64),
            NumericValue::I64(1)
        );
    }

    #[test]
    fn float_to_int_saturates_out_of_range() {
        assert_eq!(
            NumericValue::F64(1e300).convert(Repr::I32),
            NumericValue::I32(i32::MAX)
        );
        assert_eq!(
            NumericValue::F64(-1e300).convert(Repr::I8),
            NumericValue::I8(i8::MIN)
        );
        assert_eq!(
            NumericValue::F32(1e30).convert(Repr::I16),
            NumericValue::I16(i16::MAX)
        );
    }

    #[test]
    fn nan_to_int_is_zero() {
        assert_eq!(
            NumericValue::F64(f64::NAN).convert(Repr::I32),
            NumericValue::I32(0)
        );
        assert_eq!(
            NumericValue::F32(f32::NAN).convert(Repr::I64),
            NumericValue::I64(0)
        );
    }

    #[test]
    fn int_to_float_converts_by_value() {
        assert_eq!(
            NumericValue::I32(1).convert(Repr::F64),
            NumericValue::F64(1.0)
        );
        assert_eq!(
            NumericValue::I64(1).convert(Repr::F32),
            NumericValue::F32(1.0)
        );
        // Small integral literals round-trip exactly.
        for n in 0..5i64 {
            assert_eq!(
                NumericValue::I64(n).convert(Repr::F64),
                NumericValue::F64(n as f64)
            );
            assert_eq!(NumericValue::I64(n).convert(Repr::F64).widen_i64(), n);
        }
    }

    #[test]
    fn double_to_float_rounds_to_nearest() {
        // 1 + 2^-60 is not representable in binary32; rounds to 1.0.
        let v = NumericValue::F64(1.0 + 2f64.powi(-60)).convert(Repr::F32);
        assert_eq!(v, NumericValue::F32(1.0));
        // binary32 → binary64 is exact.
        assert_eq!(
            NumericValue::F32(0.1).convert(Repr::F64),
            NumericValue::F64(f64::from(0.1f32))
        );
    }

    #[test]
    fn conversion_reprs_match_targets() {
        let x = NumericValue::I32(7);
        for target in [
            Repr::I8,
            Repr::I16,
            Repr::U16,
            Repr::I32,
            Repr::I64,
            Repr::F32,
            Repr::F64,
        ] {
            assert_eq!(x.convert(target).repr(), target);
        }
    }
}
