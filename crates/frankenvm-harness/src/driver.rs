//! Scenario execution engine.
//!
//! The driver invokes each scenario in a fixed order, gives each one a
//! fresh observation sink (scenario isolation), frames the scenario's
//! observations on the report sink with a banner and a trailing ok/
//! FAILED line, and compares the observations against the scenario's
//! expected contract. A mismatching or erroring scenario never aborts
//! the remaining scenarios.

use std::io::Write;

use frankenvm_core::TraceSink;

use crate::report::{Mismatch, Outcome, ScenarioReport, SuiteReport};
use crate::scenario::{Expectation, Observation, Scenario};
use crate::scenarios;

/// Fixed suite order, leaves first: numeric, propagation, visibility,
/// fault detection (inside the numeric array subchecks), concurrency.
#[must_use]
pub fn suite() -> Vec<Scenario> {
    vec![
        scenarios::cast::scenario(),
        scenarios::float32::scenario(),
        scenarios::float64::scenario(),
        scenarios::exception::scenario(),
        scenarios::instance::scenario(),
        scenarios::null_check::scenario(),
        scenarios::loops::scenario(),
        scenarios::pi::scenario(),
        scenarios::task::scenario(),
    ]
}

/// Runs scenarios and collects suite results.
pub struct Driver {
    /// Name of the suite run (appears in reports and banners).
    pub suite_name: String,
}

impl Driver {
    /// Create a new driver.
    #[must_use]
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
        }
    }

    /// Run `scenarios` in order, streaming framed observations to
    /// `out`, and return the aggregated report.
    pub fn run(
        &self,
        scenarios: &[Scenario],
        out: &mut dyn Write,
    ) -> std::io::Result<SuiteReport> {
        let mut rows = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            rows.push(self.run_one(scenario, out)?);
        }
        Ok(SuiteReport::from_scenarios(self.suite_name.clone(), rows))
    }

    fn run_one(&self, scenario: &Scenario, out: &mut dyn Write) -> std::io::Result<ScenarioReport> {
        writeln!(out, "test: {}", "=".repeat(63))?;
        writeln!(out, "test: {}: ..", scenario.name)?;
        writeln!(out)?;

        let sink = TraceSink::new();
        let status_code = (scenario.entry)(&sink);
        let lines = sink.snapshot();
        for line in &lines {
            writeln!(out, "{line}")?;
        }

        let mismatches = compare(&scenario.expectation, &lines);
        let outcome = if status_code != 0 {
            Outcome::Error
        } else if mismatches.is_empty() {
            Outcome::Pass
        } else {
            Outcome::Fail
        };

        writeln!(out)?;
        match outcome {
            Outcome::Pass => writeln!(out, "test: {}: ok", scenario.name)?,
            Outcome::Fail => writeln!(out, "test: {}: FAILED", scenario.name)?,
            Outcome::Error => writeln!(out, "test: {}: ERROR ({status_code})", scenario.name)?,
        }

        let observations = lines
            .into_iter()
            .enumerate()
            .map(|(index, payload)| Observation {
                scenario: scenario.name.to_owned(),
                index,
                payload,
            })
            .collect();

        Ok(ScenarioReport {
            name: scenario.name.to_owned(),
            outcome,
            status_code,
            observations,
            mismatches,
        })
    }
}

fn compare(expectation: &Expectation, lines: &[String]) -> Vec<Mismatch> {
    match expectation {
        Expectation::ExactLines(expected) => {
            let mut mismatches = Vec::new();
            let len = expected.len().max(lines.len());
            for index in 0..len {
                let want = expected.get(index);
                let got = lines.get(index);
                if want != got {
                    mismatches.push(Mismatch {
                        index,
                        expected: want.cloned(),
                        actual: got.cloned(),
                        detail: None,
                    });
                }
            }
            mismatches
        }
        Expectation::Property(check) => match check(lines) {
            Ok(()) => Vec::new(),
            Err(detail) => vec![Mismatch {
                index: 0,
                expected: None,
                actual: None,
                detail: Some(detail),
            }],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_two(sink: &TraceSink) -> i32 {
        sink.emit("alpha");
        sink.emit("beta");
        0
    }

    fn erroring(sink: &TraceSink) -> i32 {
        sink.emit("partial");
        1
    }

    fn always_short(lines: &[String]) -> Result<(), String> {
        if lines.len() <= 2 {
            Ok(())
        } else {
            Err(format!("expected at most 2 lines, got {}", lines.len()))
        }
    }

    fn matching() -> Scenario {
        Scenario {
            name: "matching",
            entry: emit_two,
            expectation: Expectation::ExactLines(vec!["alpha".to_owned(), "beta".to_owned()]),
        }
    }

    fn mismatching() -> Scenario {
        Scenario {
            name: "mismatching",
            entry: emit_two,
            expectation: Expectation::ExactLines(vec!["alpha".to_owned(), "gamma".to_owned()]),
        }
    }

    #[test]
    fn matching_scenario_passes_with_framing() {
        let mut out = Vec::new();
        let report = Driver::new("unit")
            .run(&[matching()], &mut out)
            .expect("write to vec");
        assert!(report.all_passed());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("test: matching: .."));
        assert!(text.contains("alpha\nbeta"));
        assert!(text.ends_with("test: matching: ok\n"));
    }

    #[test]
    fn mismatch_is_reported_and_does_not_abort_suite() {
        let mut out = Vec::new();
        let report = Driver::new("unit")
            .run(&[mismatching(), matching()], &mut out)
            .expect("write to vec");
        assert_eq!(report.total, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.passed, 1);
        let first = &report.scenarios[0];
        assert_eq!(first.outcome, Outcome::Fail);
        assert_eq!(first.mismatches.len(), 1);
        assert_eq!(first.mismatches[0].index, 1);
        assert_eq!(first.mismatches[0].actual.as_deref(), Some("beta"));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("test: mismatching: FAILED"));
        assert!(text.contains("test: matching: ok"));
    }

    #[test]
    fn nonzero_status_is_an_error_outcome() {
        let scenario = Scenario {
            name: "erroring",
            entry: erroring,
            expectation: Expectation::Property(always_short),
        };
        let mut out = Vec::new();
        let report = Driver::new("unit").run(&[scenario], &mut out).unwrap();
        assert_eq!(report.errors, 1);
        assert_eq!(report.scenarios[0].outcome, Outcome::Error);
        assert_eq!(report.scenarios[0].status_code, 1);
    }

    #[test]
    fn property_failure_carries_detail() {
        fn chatty(sink: &TraceSink) -> i32 {
            for _ in 0..3 {
                sink.emit("line");
            }
            0
        }
        let scenario = Scenario {
            name: "chatty",
            entry: chatty,
            expectation: Expectation::Property(always_short),
        };
        let mut out = Vec::new();
        let report = Driver::new("unit").run(&[scenario], &mut out).unwrap();
        assert_eq!(report.failed, 1);
        let detail = report.scenarios[0].mismatches[0].detail.as_deref();
        assert_eq!(detail, Some("expected at most 2 lines, got 3"));
    }

    #[test]
    fn missing_and_extra_lines_both_mismatch() {
        fn emit_one(sink: &TraceSink) -> i32 {
            sink.emit("alpha");
            0
        }
        let scenario = Scenario {
            name: "short",
            entry: emit_one,
            expectation: Expectation::ExactLines(vec!["alpha".to_owned(), "beta".to_owned()]),
        };
        let mut out = Vec::new();
        let report = Driver::new("unit").run(&[scenario], &mut out).unwrap();
        let mismatch = &report.scenarios[0].mismatches[0];
        assert_eq!(mismatch.expected.as_deref(), Some("beta"));
        assert_eq!(mismatch.actual, None);
    }

    #[test]
    fn full_suite_has_fixed_order() {
        let names: Vec<_> = suite().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "cast",
                "float32",
                "float64",
                "exception",
                "instance",
                "null_check",
                "loops",
                "pi",
                "task"
            ]
        );
    }
}
