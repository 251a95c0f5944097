//! Scenario data model.

use frankenvm_core::TraceSink;
use serde::{Deserialize, Serialize};

/// Entry point of a scenario: a no-argument invocation (the sink is the
/// scenario's own observation channel) returning a status code, 0 when
/// every fault the scenario deliberately triggers was caught where
/// expected.
pub type EntryFn = fn(&TraceSink) -> i32;

/// Property check over the full observation log, for scenarios whose
/// exact line order is scheduler-dependent.
pub type PropertyFn = fn(&[String]) -> Result<(), String>;

/// Expected outcome contract for a scenario's observations.
pub enum Expectation {
    /// The observation log must equal these lines exactly, in order.
    ExactLines(Vec<String>),
    /// The observation log must satisfy this predicate.
    Property(PropertyFn),
}

/// A named, independently-runnable conformance check.
///
/// Scenarios are created once at suite-definition time and never
/// mutated afterward.
pub struct Scenario {
    /// Identifier used in banners, reports, and the CLI filter.
    pub name: &'static str,
    /// The scenario's single entry point.
    pub entry: EntryFn,
    /// Expected-observation contract.
    pub expectation: Expectation,
}

/// One emitted event during a scenario, owned by the driver for the
/// scenario's duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Scenario the event belongs to.
    pub scenario: String,
    /// Zero-based emission index.
    pub index: usize,
    /// The observation line.
    pub payload: String,
}
