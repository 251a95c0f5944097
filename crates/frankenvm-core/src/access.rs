//! Member visibility binding matrix.
//!
//! Each member of an object carries exactly one access level; whether a
//! call site may bind to it is a static-structure property decided at
//! binding time. Violations are binding rejections, not runtime faults,
//! so this model is a pure predicate: it never simulates an
//! illegal-access error at run time.

use serde::{Deserialize, Serialize};

/// Access level tag carried by a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Reachable from any call site.
    Public,
    /// Reachable from the declaring object's own code and derivers.
    Protected,
    /// Reachable from co-located (same package/module) code.
    Package,
    /// Reachable only from the declaring object's own implementation.
    Private,
}

/// Position of a call site relative to the declaring object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// Inside the declaring object's own implementation.
    OwnImpl,
    /// Inside a deriver of the declaring object.
    Derived,
    /// Co-located code in the same package/module boundary.
    SamePackage,
    /// An unrelated external caller.
    External,
}

/// Binding-time access decision: may `site` bind to a member at `level`?
#[must_use]
pub const fn permits(level: AccessLevel, site: CallSite) -> bool {
    match level {
        AccessLevel::Public => true,
        AccessLevel::Protected => matches!(
            site,
            CallSite::OwnImpl | CallSite::Derived | CallSite::SamePackage
        ),
        AccessLevel::Package => matches!(site, CallSite::OwnImpl | CallSite::SamePackage),
        AccessLevel::Private => matches!(site, CallSite::OwnImpl),
    }
}
