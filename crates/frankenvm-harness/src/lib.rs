//! Conformance harness for frankenvm.
//!
//! This crate provides:
//! - Scenario definitions: each conformance check as an independently
//!   runnable scenario with an expected-observation contract
//! - Driver: deterministic fixed-order execution with per-scenario
//!   isolation and banner/ok framing on the report sink
//! - Report generation: machine-readable (JSON) + human-readable
//!   (markdown) suite reports
//! - Structured logging: JSONL evidence lines for suite runs

#![forbid(unsafe_code)]

pub mod driver;
pub mod report;
pub mod scenario;
pub mod scenarios;
pub mod structured_log;

pub use driver::{Driver, suite};
pub use report::{Outcome, ScenarioReport, SuiteReport};
pub use scenario::{Expectation, Observation, Scenario};
