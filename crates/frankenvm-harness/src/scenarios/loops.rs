//! Loop accumulation conformance, validated through assertion checks.
//!
//! Emits no observations of its own: the contract here is that both
//! accumulations reach the expected sum and the assertion path stays
//! silent on success.

use frankenvm_core::fault::Fault;
use frankenvm_core::except::check;
use frankenvm_core::TraceSink;

use crate::scenario::{Expectation, Scenario};

fn run() -> Result<(), Fault> {
    // Counting loop: 0 + 1 + ... + 9.
    let mut s = 0i32;
    for i in 0..10i32 {
        s = s.wrapping_add(i);
    }
    check(s == 45, Some("counting loop sum"))?;

    // Post-decrement style loop: adds 9 down to 0.
    s = 0;
    let mut i = 10i32;
    loop {
        let before = i;
        i -= 1;
        if before <= 0 {
            break;
        }
        s = s.wrapping_add(i);
    }
    check(s == 45, Some("decrementing loop sum"))?;
    Ok(())
}

fn entry(sink: &TraceSink) -> i32 {
    match run() {
        Ok(()) => 0,
        Err(fault) => {
            sink.emit(format!("unhandled fault: {fault}"));
            1
        }
    }
}

/// Build the loops scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "loops",
        entry,
        expectation: Expectation::ExactLines(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_loops_pass_silently() {
        let sink = TraceSink::new();
        assert_eq!(entry(&sink), 0);
        assert!(sink.is_empty());
    }
}
