//! binary32 conformance: the [`float64`](crate::scenarios::float64)
//! checks under binary32 arithmetic, storage, and array semantics.

use frankenvm_core::fault::{Fault, FaultClass, FaultKind};
use frankenvm_core::except::Scope;
use frankenvm_core::heap::ArrayRef;
use frankenvm_core::numeric::{BinOp, CmpOp, NumericValue, Repr, fmt_f32};
use frankenvm_core::TraceSink;

use crate::scenario::{Expectation, Scenario};

fn add(a: f32, b: f32) -> f32 {
    BinOp::Add.apply_f32(a, b)
}

fn add_labelled(header: &str, a: f32, b: f32, footer: &str) -> String {
    format!("{header}{}{footer}", fmt_f32(add(a, b)))
}

fn check_method(sink: &TraceSink) {
    sink.emit(add_labelled("1.0 + 2.0 = '", 1.0, 2.0, "'"));
}

fn check_compare(sink: &TraceSink) {
    if CmpOp::Le.apply_f32(0.0, 0.0) {
        sink.emit("0.0 <= 0.0");
    }
    if CmpOp::Ge.apply_f32(0.0, 0.0) {
        sink.emit("0.0 >= 0.0");
    }
    if CmpOp::Lt.apply_f32(0.0, 1.0) {
        sink.emit("0.0 < 1.0");
    }
    if CmpOp::Gt.apply_f32(0.0, 1.0) {
        sink.emit("0.0 > 1.0");
    }
    if CmpOp::Lt.apply_f32(1.0, 0.0) {
        sink.emit("1.0 < 0.0");
    }
    if CmpOp::Gt.apply_f32(1.0, 0.0) {
        sink.emit("1.0 > 0.0");
    }
}

fn check_convert(sink: &TraceSink) {
    let f = NumericValue::F32(1.5);
    sink.emit(format!("(i32)1.5 = {}", f.convert(Repr::I32)));
    sink.emit(format!("(i64)1.5 = {}", f.convert(Repr::I64)));
    let i = NumericValue::I32(1);
    sink.emit(format!("(f32)1 = {}", i.convert(Repr::F32)));
    let l = NumericValue::I64(1);
    sink.emit(format!("(f32)1 = {}", l.convert(Repr::F32)));
}

fn check_calculate(sink: &TraceSink) {
    let (f1, f2) = (4.0f32, 2.0f32);
    for op in [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Rem] {
        sink.emit(format!(
            "4.0 {} 2.0 = {}",
            op.glyph(),
            fmt_f32(op.apply_f32(f1, f2))
        ));
    }
    sink.emit(format!("-(4.0) = {}", fmt_f32(-f1)));
}

fn check_constant(sink: &TraceSink) {
    for value in [0.0f32, 1.0, 2.0, 3.0] {
        sink.emit(fmt_f32(value));
    }
}

fn check_store_and_load(sink: &TraceSink) {
    for n in 0..5i64 {
        let stored = NumericValue::I64(n).convert(Repr::F32);
        sink.emit(format!("f{n} = {stored}"));
    }
}

fn check_array(sink: &TraceSink) -> Result<(), Fault> {
    let mut fa: ArrayRef<f32> = ArrayRef::null();

    Scope::new()
        .on(FaultClass::Exact(FaultKind::NullDereference), |_| Ok(()))
        .run(|| {
            sink.emit(fmt_f32(fa.get(0)?));
            sink.emit("not reached1!");
            Ok(())
        })?;

    Scope::new()
        .on(FaultClass::Exact(FaultKind::NullDereference), |_| Ok(()))
        .run(|| {
            fa.set(0, 0.0)?;
            sink.emit("not reached2!");
            Ok(())
        })?;

    fa = ArrayRef::alloc(0, 0.0);

    Scope::new()
        .on(FaultClass::Exact(FaultKind::OutOfBounds), |_| Ok(()))
        .run(|| {
            sink.emit(fmt_f32(fa.get(1)?));
            sink.emit("not reached3!");
            Ok(())
        })?;

    Scope::new()
        .on(FaultClass::Exact(FaultKind::OutOfBounds), |_| Ok(()))
        .run(|| {
            fa.set(1, 1.0)?;
            sink.emit("not reached4!");
            Ok(())
        })?;

    fa = ArrayRef::alloc(1, 0.0);
    fa.set(0, 2.0)?;
    sink.emit(format!("fa[0] is '{}'.", fmt_f32(fa.get(0)?)));
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

/// Build the binary32 scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "float32",
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
        "(f32)1 = 1.0",
        "(f32)1 = 1.0",
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
        "f0 = 0.0",
        "f1 = 1.0",
        "f2 = 2.0",
        "f3 = 3.0",
        "f4 = 4.0",
        "fa[0] is '2.0'.",
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
}
