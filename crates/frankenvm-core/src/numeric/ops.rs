//! IEEE-754 arithmetic and comparison semantics.
//!
//! Arithmetic on binary32/binary64 follows IEEE-754 exactly: division of
//! a nonzero dividend by zero produces signed infinity, 0/0 produces
//! NaN, and the remainder takes the sign of the dividend. Ordered
//! comparisons and equality are false whenever either operand is NaN.

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinOp {
    /// Apply under binary64 semantics.
    #[must_use]
    pub fn apply_f64(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Rem => a % b,
        }
    }

    /// Apply under binary32 semantics.
    #[must_use]
    pub fn apply_f32(self, a: f32, b: f32) -> f32 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Rem => a % b,
        }
    }

    /// Operator glyph used in observation lines.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

/// Ordered/equality comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
}

impl CmpOp {
    /// Apply under binary64 semantics; false when either operand is NaN.
    #[must_use]
    pub fn apply_f64(self, a: f64, b: f64) -> bool {
        match self {
            Self::Lt => a < b,
            Self::Gt => a > b,
            Self::Le => a <= b,
            Self::Ge => a >= b,
            Self::Eq => a == b,
        }
    }

    /// Apply under binary32 semantics; false when either operand is NaN.
    #[must_use]
    pub fn apply_f32(self, a: f32, b: f32) -> bool {
        match self {
            Self::Lt => a < b,
            Self::Gt => a > b,
            Self::Le => a <= b,
            Self::Ge => a >= b,
            Self::Eq => a == b,
        }
    }
}

/// Canonical binary64 rendering: shortest round-trip decimal with a
/// mandatory fractional part, so the integral value 3 renders as "3.0".
#[must_use]
pub fn fmt_f64(value: f64) -> String {
    format!("{value:?}")
}

/// Canonical binary32 rendering (see [`fmt_f64`]).
#[must_use]
pub fn fmt_f32(value: f32) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_binary64_arithmetic() {
        assert_eq!(BinOp::Add.apply_f64(4.0, 2.0), 6.0);
        assert_eq!(BinOp::Sub.apply_f64(4.0, 2.0), 2.0);
        assert_eq!(BinOp::Mul.apply_f64(4.0, 2.0), 8.0);
        assert_eq!(BinOp::Div.apply_f64(4.0, 2.0), 2.0);
        assert_eq!(BinOp::Rem.apply_f64(4.0, 2.0), 0.0);
    }

    #[test]
    fn division_by_zero_produces_signed_infinity() {
        assert_eq!(BinOp::Div.apply_f64(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinOp::Div.apply_f64(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(BinOp::Div.apply_f64(0.0, 0.0).is_nan());
        assert_eq!(BinOp::Div.apply_f32(1.0, 0.0), f32::INFINITY);
    }

    #[test]
    fn remainder_takes_sign_of_dividend() {
        assert_eq!(BinOp::Rem.apply_f64(5.5, 2.0), 1.5);
        assert_eq!(BinOp::Rem.apply_f64(-5.5, 2.0), -1.5);
        assert_eq!(BinOp::Rem.apply_f64(-5.5, -2.0), -1.5);
        assert_eq!(BinOp::Rem.apply_f64(5.5, -2.0), 1.5);
    }

    #[test]
    fn division_identity_holds_for_finite_operands() {
        // a == (a/b)*b + a%b within one ulp, using truncated division.
        for (a, b) in [(5.5f64, 2.0f64), (-7.25, 3.0), (10.0, 4.0), (1.0, 3.0)] {
            let q = (a / b).trunc();
            let reconstructed = q * b + BinOp::Rem.apply_f64(a, b);
            let ulp = a.abs().max(1.0) * f64::EPSILON;
            assert!(
                (a - reconstructed).abs() <= ulp,
                "identity failed for {a} % {b}: got {reconstructed}"
            );
        }
    }

    #[test]
    fn nan_never_orders_or_equals() {
        let n = f64::NAN;
        for op in [CmpOp::Lt, CmpOp::Gt, CmpOp::Le, CmpOp::Ge, CmpOp::Eq] {
            assert!(!op.apply_f64(n, n));
            assert!(!op.apply_f64(n, 1.0));
            assert!(!op.apply_f64(1.0, n));
        }
        let n32 = f32::NAN;
        for op in [CmpOp::Lt, CmpOp::Gt, CmpOp::Le, CmpOp::Ge, CmpOp::Eq] {
            assert!(!op.apply_f32(n32, n32));
        }
    }

    #[test]
    fn reflexive_comparisons_on_equal_operands() {
        assert!(CmpOp::Le.apply_f64(0.0, 0.0));
        assert!(CmpOp::Ge.apply_f64(0.0, 0.0));
        assert!(!CmpOp::Lt.apply_f64(0.0, 0.0));
        assert!(!CmpOp::Gt.apply_f64(0.0, 0.0));
        assert!(CmpOp::Lt.apply_f64(0.0, 1.0));
        assert!(CmpOp::Gt.apply_f64(1.0, 0.0));
    }

    #[test]
    fn canonical_rendering_keeps_fractional_part() {
        assert_eq!(fmt_f64(3.0), "3.0");
        assert_eq!(fmt_f64(-4.0), "-4.0");
        assert_eq!(fmt_f64(1.5), "1.5");
        assert_eq!(fmt_f32(2.0), "2.0");
        assert_eq!(fmt_f64(0.0), "0.0");
    }

    #[test]
    fn unary_negation_flips_sign_exactly() {
        assert_eq!(-(4.0f64), -4.0);
        assert_eq!(fmt_f64(-(4.0f64)), "-4.0");
        assert!((-f64::NAN).is_nan());
    }
}
