//! Visibility and encapsulation conformance.
//!
//! Every member invocation in this scenario originates inside the
//! declaring object's own module, so each one is checked against the
//! binding matrix before the call; field mutation through the public
//! reference must preserve object identity (the same storage reads
//! back).

use frankenvm_core::access::{AccessLevel, CallSite, permits};
use frankenvm_core::fault::Fault;
use frankenvm_core::except::check;
use frankenvm_core::TraceSink;

use crate::scenario::{Expectation, Scenario};

/// The object under test: one field, one method per access level.
struct Instance {
    field: String,
}

impl Instance {
    fn new(field: &str) -> Self {
        Self {
            field: field.to_owned(),
        }
    }

    fn public_method(&self, sink: &TraceSink) {
        sink.emit("public_method");
    }

    fn protected_method(&self, sink: &TraceSink) {
        sink.emit("protected_method");
    }

    fn package_method(&self, sink: &TraceSink) {
        sink.emit("package_method");
    }

    fn private_method(&self, sink: &TraceSink) {
        sink.emit("private_method");
    }
}

const MEMBER_LEVELS: [(&str, AccessLevel); 4] = [
    ("public_method", AccessLevel::Public),
    ("protected_method", AccessLevel::Protected),
    ("package_method", AccessLevel::Package),
    ("private_method", AccessLevel::Private),
];

fn run(sink: &TraceSink) -> Result<(), Fault> {
    let mut instance = Instance::new("hello world!");

    // Binding check first: all four levels admit the declaring
    // object's own implementation as a call site.
    for (name, level) in MEMBER_LEVELS {
        check(permits(level, CallSite::OwnImpl), Some(name))?;
    }

    instance.public_method(sink);
    instance.protected_method(sink);
    instance.package_method(sink);
    instance.private_method(sink);

    sink.emit(instance.field.clone());
    instance.field = "hello frankenvm!".to_owned();
    sink.emit(instance.field.clone());
    Ok(())
}

fn entry(sink: &TraceSink) -> i32 {
    match run(sink) {
        Ok(()) => 0,
        Err(fault) => {
            sink.emit(format!("unhandled fault: {fault}"));
            1
        }
    }
}

/// Build the instance scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "instance",
        entry,
        expectation: Expectation::ExactLines(
            [
                "public_method",
                "protected_method",
                "package_method",
                "private_method",
                "hello world!",
                "hello frankenvm!",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        ),
    }
}
