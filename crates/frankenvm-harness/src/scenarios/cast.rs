//! Integer narrowing/widening conformance.
//!
//! Walks an all-ones 32-bit pattern through every representation:
//! widening must sign-extend the value (yielding -1, never 4294967295),
//! narrowing must keep the low-order bits under the target's sign
//! convention, and the unsigned 16-bit representation must read back
//! zero-extended.

use frankenvm_core::TraceSink;
use frankenvm_core::numeric::{NumericValue, Repr};

use crate::scenario::{Expectation, Scenario};

fn entry(sink: &TraceSink) -> i32 {
    let i = NumericValue::I32(0xFFFF_FFFFu32 as i32);

    sink.emit(format!("num = {}", i.convert(Repr::I64)));
    sink.emit(format!("num = {}", i.convert(Repr::I16)));
    // The unsigned 16-bit value, read back through a 32-bit widen.
    sink.emit(format!("num = {}", i.convert(Repr::U16).convert(Repr::I32)));
    sink.emit(format!("num = {}", i.convert(Repr::I8)));

    let l = NumericValue::I64(0xFFFF_FFFF_FFFF_FFFFu64 as i64);
    sink.emit(format!("num = {}", l.convert(Repr::I32)));
    0
}

/// Build the cast scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "cast",
        entry,
        expectation: Expectation::ExactLines(
            ["num = -1", "num = -1", "num = 65535", "num = -1", "num = -1"]
                .into_iter()
                .map(String::from)
                .collect(),
        ),
    }
}
