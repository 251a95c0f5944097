//! Suite and scenario reports.

use serde::{Deserialize, Serialize};

use crate::scenario::Observation;

/// Outcome of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// All observations matched the expected contract.
    Pass,
    /// A conformance mismatch: some observation differed.
    Fail,
    /// The scenario's entry reported a non-zero status (an expected
    /// fault escaped, or a contract violation surfaced).
    Error,
}

/// One difference between expected and observed lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Observation index the difference occurred at.
    pub index: usize,
    /// Expected line, if any was expected at this index.
    pub expected: Option<String>,
    /// Observed line, if any was emitted at this index.
    pub actual: Option<String>,
    /// Property-check explanation, for property expectations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Per-scenario result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: Outcome,
    pub status_code: i32,
    pub observations: Vec<Observation>,
    pub mismatches: Vec<Mismatch>,
}

/// Top-level suite report payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub schema_version: String,
    pub suite: String,
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub errors: u64,
    pub pass_rate_percent: f64,
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Aggregate scenario rows into a suite report.
    #[must_use]
    pub fn from_scenarios(suite: impl Into<String>, scenarios: Vec<ScenarioReport>) -> Self {
        let total = u64::try_from(scenarios.len()).unwrap_or(u64::MAX);
        let passed = count(&scenarios, Outcome::Pass);
        let failed = count(&scenarios, Outcome::Fail);
        let errors = count(&scenarios, Outcome::Error);
        Self {
            schema_version: "v1".to_owned(),
            suite: suite.into(),
            total,
            passed,
            failed,
            errors,
            pass_rate_percent: ratio_percent(passed, total),
            scenarios,
        }
    }

    /// Returns true when no failures/errors are present.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable markdown rendering.
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Conformance report: {}\n\n", self.suite));
        out.push_str(&format!(
            "- scenarios: {} (passed {}, failed {}, errors {})\n",
            self.total, self.passed, self.failed, self.errors
        ));
        out.push_str(&format!("- pass rate: {:.1}%\n\n", self.pass_rate_percent));
        out.push_str("| scenario | outcome | status | observations | mismatches |\n");
        out.push_str("| --- | --- | --- | --- | --- |\n");
        for scenario in &self.scenarios {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                scenario.name,
                outcome_label(scenario.outcome),
                scenario.status_code,
                scenario.observations.len(),
                scenario.mismatches.len()
            ));
        }
        for scenario in &self.scenarios {
            if scenario.mismatches.is_empty() {
                continue;
            }
            out.push_str(&format!("\n## {} mismatches\n\n", scenario.name));
            for mismatch in &scenario.mismatches {
                match &mismatch.detail {
                    Some(detail) => {
                        out.push_str(&format!("- [{}] {}\n", mismatch.index, detail));
                    }
                    None => out.push_str(&format!(
                        "- [{}] expected {:?}, got {:?}\n",
                        mismatch.index, mismatch.expected, mismatch.actual
                    )),
                }
            }
        }
        out
    }
}

fn count(scenarios: &[ScenarioReport], outcome: Outcome) -> u64 {
    u64::try_from(scenarios.iter().filter(|s| s.outcome == outcome).count()).unwrap_or(0)
}

fn ratio_percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 * 100.0) / denominator as f64
}

const fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Pass => "pass",
        Outcome::Fail => "fail",
        Outcome::Error => "error",
    }
}
