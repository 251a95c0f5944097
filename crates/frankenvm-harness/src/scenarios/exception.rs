//! Fault propagation conformance: catch/finally ordering and nested
//! independent raises.

use frankenvm_core::fault::{Fault, FaultClass, FaultKind};
use frankenvm_core::except::Scope;
use frankenvm_core::TraceSink;

use crate::scenario::{Expectation, Scenario};

fn check_throw(sink: &TraceSink) -> Result<(), Fault> {
    Scope::new()
        .on(FaultClass::Exact(FaultKind::NullDereference), |_| {
            sink.emit("throw: ok");
            Ok(())
        })
        .finally(|| sink.emit("throw: finally"))
        .run(|| {
            sink.emit("throw: ..");
            Err(Fault::null_dereference())
        })?;
    Ok(())
}

fn check_nest(sink: &TraceSink) -> Result<(), Fault> {
    // An inner fault caught and logged must not prevent a second,
    // independent fault from being raised and caught in the enclosing
    // scope; the broad outer handler never sees the inner raise.
    Scope::new()
        .on(FaultClass::Runtime, |_| {
            sink.emit("throw 2: ok");
            Ok(())
        })
        .run(|| {
            Scope::new()
                .on(FaultClass::Exact(FaultKind::NullDereference), |_| {
                    sink.emit("throw 1: ok");
                    Ok(())
                })
                .run(|| {
                    sink.emit("throw 1: ..");
                    Err(Fault::null_dereference())
                })?;

            sink.emit("throw 2: ..");
            Err(Fault::user_raised("second raise"))
        })?;
    Ok(())
}

fn entry(sink: &TraceSink) -> i32 {
    match check_throw(sink).and_then(|()| check_nest(sink)) {
        Ok(()) => 0,
        Err(fault) => {
            sink.emit(format!("unhandled fault: {fault}"));
            1
        }
    }
}

/// Build the exception scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "exception",
        entry,
        expectation: Expectation::ExactLines(
            [
                "throw: ..",
                "throw: ok",
                "throw: finally",
                "throw 1: ..",
                "throw 1: ok",
                "throw 2: ..",
                "throw 2: ok",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        ),
    }
}
