//! Fault taxonomy for detected runtime violations.
//!
//! A [`Fault`] is produced at the precise point of violation and
//! propagated through `Result`, driving the unwind rules in
//! [`crate::except`]. Handlers match on a [`FaultClass`], which may be
//! broader than a single [`FaultKind`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Fault kinds
// ---------------------------------------------------------------------------

/// Classification tag for a detected runtime violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// An absent reference was dereferenced for read or write.
    NullDereference,
    /// An index access fell outside `[0, length)`.
    OutOfBounds,
    /// An assertion-style check evaluated to false.
    AssertionFailure,
    /// A fault raised deliberately by user code.
    UserRaised,
    /// A suspended task was interrupted while sleeping.
    Interrupted,
}

impl FaultKind {
    /// Stable human-readable label used in observation lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NullDereference => "null dereference",
            Self::OutOfBounds => "out of bounds",
            Self::AssertionFailure => "assertion failure",
            Self::UserRaised => "user raised",
            Self::Interrupted => "interrupted",
        }
    }
}

// ---------------------------------------------------------------------------
// Fault record
// ---------------------------------------------------------------------------

/// A detected fault, carrying its category and optional diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct Fault {
    /// Category of the violation.
    pub kind: FaultKind,
    /// Optional diagnostic message (assertion text, user payload).
    pub message: Option<String>,
    /// Offending index and container length for bounds faults.
    pub bounds: Option<(usize, usize)>,
}

impl Fault {
    /// Fault for a null-reference dereference.
    #[must_use]
    pub const fn null_dereference() -> Self {
        Self {
            kind: FaultKind::NullDereference,
            message: None,
            bounds: None,
        }
    }

    /// Fault for an index outside `[0, len)`.
    #[must_use]
    pub const fn out_of_bounds(index: usize, len: usize) -> Self {
        Self {
            kind: FaultKind::OutOfBounds,
            message: None,
            bounds: Some((index, len)),
        }
    }

    /// Fault for a failed assertion check.
    #[must_use]
    pub fn assertion(message: Option<&str>) -> Self {
        Self {
            kind: FaultKind::AssertionFailure,
            message: message.map(str::to_owned),
            bounds: None,
        }
    }

    /// Fault raised deliberately by scenario code.
    #[must_use]
    pub fn user_raised(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::UserRaised,
            message: Some(message.into()),
            bounds: None,
        }
    }

    /// Fault delivered to a task interrupted during `sleep`.
    #[must_use]
    pub const fn interrupted() -> Self {
        Self {
            kind: FaultKind::Interrupted,
            message: None,
            bounds: None,
        }
    }

    fn render(&self) -> String {
        match (&self.message, self.bounds) {
            (Some(msg), _) => format!("{}: {msg}", self.kind.label()),
            (None, Some((index, len))) => {
                format!("{}: index {index}, length {len}", self.kind.label())
            }
            (None, None) => self.kind.label().to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handler classes
// ---------------------------------------------------------------------------

/// Category matcher declared by a fault handler.
///
/// Scope-ordered handler selection uses `matches`: the first handler
/// whose class is a supertype (or exact match) of the raised kind wins,
/// so a broad handler registered later never masks a specific one
/// registered earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// Matches exactly one kind.
    Exact(FaultKind),
    /// Matches the unchecked runtime categories: null dereference,
    /// out of bounds, and user-raised faults.
    Runtime,
    /// Matches every fault kind.
    Any,
}

impl FaultClass {
    /// Returns true when this class covers `kind`.
    #[must_use]
    pub const fn matches(self, kind: FaultKind) -> bool {
        match self {
            Self::Exact(own) => own as u8 == kind as u8,
            Self::Runtime => matches!(
                kind,
                FaultKind::NullDereference | FaultKind::OutOfBounds | FaultKind::UserRaised
            ),
            Self::Any => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
