//! # frankenvm-core
//!
//! Executable models of the runtime semantics a managed-language
//! execution environment must reproduce bit-exactly and ordering-exactly:
//!
//! - [`numeric`]: integer widening/narrowing and IEEE-754 arithmetic rules
//! - [`except`]: structured fault propagation with try/catch/finally ordering
//! - [`access`]: member visibility binding matrix
//! - [`heap`]: null-reference and bounds fault detection on array cells
//! - [`task`]: thread lifecycle, interruptible sleep, and mutual exclusion
//! - [`fault`]: the fault taxonomy shared by all of the above
//! - [`trace`]: the ordered observation channel scenarios emit into
//!
//! No `unsafe` code is permitted in this crate.

#![forbid(unsafe_code)]

pub mod access;
pub mod except;
pub mod fault;
pub mod heap;
pub mod numeric;
pub mod task;
pub mod trace;

pub use fault::{Fault, FaultClass, FaultKind};
pub use trace::TraceSink;
