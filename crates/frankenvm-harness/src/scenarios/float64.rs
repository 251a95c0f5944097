//! binary64 conformance: arithmetic, comparison, conversion, storage
//! fidelity, and checked array access.

use frankenvm_core::fault::{Fault, FaultClass, FaultKind};
use frankenvm_core::except::Scope;
use frankenvm_core::heap::ArrayRef;
use frankenvm_core::numeric::{BinOp, CmpOp, NumericValue, Repr, fmt_f64};
use frankenvm_core::TraceSink;

use crate::scenario::{Expectation, Scenario};

fn add(a: f64, b: f64) -> f64 {
    BinOp::Add.apply_f64(a, b)
}

fn add_labelled(header: &str, a: f64, b: f64, footer: &str) -> String {
    format!("{header}{}{footer}", fmt_f64(add(a, b)))
}

fn check_method(sink: &TraceSink) {
    sink.emit(add_labelled("1.0 + 2.0 = '", 1.0, 2.0, "'"));
}

fn check_compare(sink: &TraceSink) {
    // Equal operands: both inclusive comparisons hold, neither strict does.
    if CmpOp::Le.apply_f64(0.0, 0.0) {
        sink.emit("0.0 <= 0.0");
    }
    if CmpOp::Ge.apply_f64(0.0, 0.0) {
        sink.emit("0.0 >= 0.0");
    }
    if CmpOp::Lt.apply_f64(0.0, 1.0) {
        sink.emit("0.0 < 1.0");
    }
    if CmpOp::Gt.apply_f64(0.0, 1.0) {
        sink.emit("0.0 > 1.0");
    }
    if CmpOp::Lt.apply_f64(1.0, 0.0) {
        sink.emit("1.0 < 0.0");
    }
    if CmpOp::Gt.apply_f64(1.0, 0.0) {
        sink.emit("1.0 > 0.0");
    }
}

fn check_convert(sink: &TraceSink) {
    let d = NumericValue::F64(1.5);
    sink.emit(format!("(i32)1.5 = {}", d.convert(Repr::I32)));
    sink.emit(format!("(i64)1.5 = {}", d.convert(Repr::I64)));
    let i = NumericValue::I32(1);
    sink.emit(format!("(f64)1 = {}", i.convert(Repr::F64)));
    let l = NumericValue::I64(1);
    sink.emit(format!("(f64)1 = {}", l.convert(Repr::F64)));
}

fn check_calculate(sink: &TraceSink) {
    let (d1, d2) = (4.0f64, 2.0f64);
    for op in [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Rem] {
        sink.emit(format!(
            "4.0 {} 2.0 = {}",
            op.glyph(),
            fmt_f64(op.apply_f64(d1, d2))
        ));
    }
    sink.emit(format!("-(4.0) = {}", fmt_f64(-d1)));
}

fn check_constant(sink: &TraceSink) {
    for value in [0.0f64, 1.0, 2.0, 3.0] {
        sink.emit(fmt_f64(value));
    }
}

fn check_store_and_load(sink: &TraceSink) {
    // Storing a literal integer into a binary64 variable is a
    // value-preserving widen: small integrals read back exactly.
    for n in 0..5i64 {
        let stored = NumericValue::I64(n).convert(Repr::F64);
        sink.emit(format!("d{n} = {stored}"));
    }
}

fn check_array(sink: &TraceSink) -> Result<(), Fault> {
    let mut da: ArrayRef<f64> = ArrayRef::null();

    Scope::new()
        .on(FaultClass::Exact(FaultKind::NullDereference), |_| Ok(()))
        .run(|| {
            sink.emit(fmt_f64(da.get(0)?));
            sink.emit("not reached1!");
            Ok(())
        })?;

    Scope::new()
        .on(FaultClass::Exact(FaultKind::NullDereference), |_| Ok(()))
        .run(|| {
            da.set(0, 0.0)?;
            sink.emit("not reached2!");
            Ok(())
        })?;

    da = ArrayRef::alloc(0, 0.0);

    Scope::new()
        .on(FaultClass::Exact(FaultKind::OutOfBounds), |_| Ok(()))
        .run(|| {
            sink.emit(fmt_f64(da.get(1)?));
            sink.emit("not reached3!");
            Ok(())
        })?;

    Scope::new()
        .on(FaultClass::Exact(FaultKind::OutOfBounds), |_| Ok(()))
        .run(|| {
            da.set(1, 1.0)?;
            sink.emit("not reached4!");
            Ok(())
        })?;

    da = ArrayRef::alloc(1, 0.0);
    da.set(0, 2.0)?;
    sink.emit(format!("da[0] is '{}'.", fmt_f64(da.get(0)?)));
    Ok(())
}

fn entry(sink: &TraceSink) -> i32 {
    check_method(sink);
    check_compare(sink);
    check_convert(sink);
    check_calculate(sink);
    check_constant(sink);
    check_store_and_load(sink);
    match check_array(sink) {
        Ok(()) => 0,
        Err(fault) => {
            sink.emit(format!("unhandled fault: {fault}"));
            1
        }
    }
}

/// Build the binary64 scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "float64",
        entry,
        expectation: Expectation::ExactLines(expected_lines()),
    }
}

fn expected_lines() -> Vec<String> {
    [
        "1.0 + 2.0 = '3.0'",
        "0.0 <= 0.0",
        "0.0 >= 0.0",
        "0.0 < 1.0",
        "1.0 > 0.0",
        "(i32)1.5 = 1",
        "(i64)1.5 = 1",
        "(f64)1 = 1.0",
        "(f64)1 = 1.0",
        "4.0 + 2.0 = 6.0",
        "4.0 - 2.0 = 2.0",
        "4.0 * 2.0 = 8.0",
        "4.0 / 2.0 = 2.0",
        "4.0 % 2.0 = 0.0",
        "-(4.0) = -4.0",
        "0.0",
        "1.0",
        "2.0",
        "3.0",
        "d0 = 0.0",
        "d1 = 1.0",
        "d2 = 2.0",
        "d3 = 3.0",
        "d4 = 4.0",
        "da[0] is '2.0'.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observations_match_the_contract() {
        let sink = TraceSink::new();
        assert_eq!(entry(&sink), 0);
        assert_eq!(sink.snapshot(), expected_lines());
    }

    #[test]
    fn caught_faults_leave_no_not_reached_lines() {
        let sink = TraceSink::new();
        entry(&sink);
        assert!(
            sink.snapshot()
                .iter()
                .all(|line| !line.contains("not reached"))
        );
    }
}
