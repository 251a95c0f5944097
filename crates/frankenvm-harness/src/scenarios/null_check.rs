//! Assertion raise/catch conformance and null rendering.

use frankenvm_core::fault::{FaultClass, FaultKind};
use frankenvm_core::except::{Scope, check};
use frankenvm_core::TraceSink;

use crate::scenario::{Expectation, Scenario};

fn render_nullable(value: Option<&str>) -> String {
    value.unwrap_or("null").to_owned()
}

fn entry(sink: &TraceSink) -> i32 {
    let mut message = Some("hello world!");

    let result = Scope::new()
        .on(FaultClass::Exact(FaultKind::AssertionFailure), |fault| {
            sink.emit(fault.to_string());
            Ok(())
        })
        .run(|| {
            // The first check passes silently; assertions are never
            // compiled out, so the second one must raise.
            check(message.is_some(), None)?;
            message = None;
            check(message.is_some(), Some("empty message!"))?;
            Ok(())
        });

    sink.emit(render_nullable(message));

    match result {
        Ok(_) => 0,
        Err(fault) => {
            sink.emit(format!("unhandled fault: {fault}"));
            1
        }
    }
}

/// Build the null/assertion scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "null_check",
        entry,
        expectation: Expectation::ExactLines(
            ["assertion failure: empty message!", "null"]
                .into_iter()
                .map(String::from)
                .collect(),
        ),
    }
}
