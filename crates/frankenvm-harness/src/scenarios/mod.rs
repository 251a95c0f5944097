//! The conformance scenarios.
//!
//! Each scenario is an independently-runnable check over one slice of
//! the runtime contract. Deterministic scenarios pin their observation
//! log exactly; the concurrency and convergence scenarios verify
//! properties of the log instead, since their exact interleaving is
//! scheduler-dependent.

pub mod cast;
pub mod exception;
pub mod float32;
pub mod float64;
pub mod instance;
pub mod loops;
pub mod null_check;
pub mod pi;
pub mod task;
