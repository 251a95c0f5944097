//! Alternating-series convergence under binary64 accumulation.
//!
//! Sums the Leibniz series until the last term's magnitude drops to
//! 1e-3. The rendered digits depend on the truncation point, so the
//! contract is a property: a single `pi = 3.14…` line whose value is
//! within the series' truncation error of π.

use frankenvm_core::TraceSink;
use frankenvm_core::numeric::fmt_f64;

use crate::scenario::{Expectation, Scenario};

fn entry(sink: &TraceSink) -> i32 {
    let bound = 1.0e-3f64;
    let mut sum = 0.0f64;
    let mut j = 1i32;
    let mut sign = 1i32;
    loop {
        let mut term = 1.0 / f64::from(j);
        term *= f64::from(sign);
        sum += term;
        sign = -sign;
        j += 2;
        let magnitude = if term > 0.0 { term } else { -term };
        if magnitude <= bound {
            break;
        }
    }
    sink.emit(format!("pi = {}", fmt_f64(sum * 4.0)));
    0
}

fn verify(lines: &[String]) -> Result<(), String> {
    let [line] = lines else {
        return Err(format!("expected exactly one observation, got {}", lines.len()));
    };
    let Some(rendered) = line.strip_prefix("pi = ") else {
        return Err(format!("missing 'pi = ' prefix: {line}"));
    };
    let value: f64 = rendered
        .parse()
        .map_err(|_| format!("unparseable value: {rendered}"))?;
    // Truncating at term magnitude 1e-3 bounds the error by the first
    // dropped term: |4·(sum − π/4)| < 4e-3.
    let error = (value - std::f64::consts::PI).abs();
    if error < 4.0e-3 {
        Ok(())
    } else {
        Err(format!("{value} is {error} away from pi"))
    }
}

/// Build the pi scenario.
#[must_use]
pub fn scenario() -> Scenario {
    Scenario {
        name: "pi",
        entry,
        expectation: Expectation::Property(verify),
    }
}
