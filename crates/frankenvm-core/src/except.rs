//! Structured fault propagation: scopes, handlers, finally blocks.
//!
//! Per-scope state machine: `Normal → (raise) → Unwinding → (handler
//! matched) → Handled`, or `Unwinding → (no handler) → propagate to the
//! enclosing scope`. A finally block attached to a scope runs exactly
//! once on every exit path (normal completion, a handled fault, a
//! propagating fault, or a re-throw from a handler) before control
//! leaves the scope.

use crate::fault::{Fault, FaultClass};

// ---------------------------------------------------------------------------
// Scope state machine contract
// ---------------------------------------------------------------------------

/// Abstract state of a protected scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// Executing the body, no fault in flight.
    Normal,
    /// A fault has been raised and is searching for a handler.
    Unwinding,
    /// A handler matched and consumed the fault.
    Handled,
}

/// Contract-level event set for scope transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeEvent {
    /// A fault was raised inside the body (or re-thrown by a handler).
    Raise,
    /// The first scope-ordered handler covering the fault matched.
    HandlerMatched,
    /// No handler in this scope covers the fault.
    NoHandler,
    /// The body completed without a fault.
    Complete,
}

/// Deterministic transition function for the scope state machine.
///
/// An `Unwinding` scope that sees `NoHandler` stays `Unwinding`: the
/// fault leaves this scope and the enclosing scope observes its own
/// `Raise` event.
#[must_use]
pub const fn scope_transition(state: ScopeState, event: ScopeEvent) -> ScopeState {
    match (state, event) {
        (ScopeState::Normal, ScopeEvent::Raise) => ScopeState::Unwinding,
        (ScopeState::Normal, ScopeEvent::Complete) => ScopeState::Normal,
        (ScopeState::Unwinding, ScopeEvent::HandlerMatched) => ScopeState::Handled,
        (ScopeState::Unwinding, ScopeEvent::NoHandler | ScopeEvent::Raise) => ScopeState::Unwinding,
        (ScopeState::Handled, ScopeEvent::Raise) => ScopeState::Unwinding,
        (state, _) => state,
    }
}

// ---------------------------------------------------------------------------
// Scoped execution
// ---------------------------------------------------------------------------

type Handler<'a> = Box<dyn FnMut(&Fault) -> Result<(), Fault> + 'a>;

/// A protected scope with scope-ordered handlers and an optional
/// finally block.
///
/// Handlers are consulted in registration order; the first whose
/// [`FaultClass`] covers the raised kind wins, so a specific handler
/// registered before a broad one is never masked. A handler returning
/// `Err` models a re-throw: the new fault propagates out of the scope
/// as a second, independent raise.
#[derive(Default)]
pub struct Scope<'a> {
    handlers: Vec<(FaultClass, Handler<'a>)>,
    cleanup: Option<Box<dyn FnMut() + 'a>>,
}

impl<'a> Scope<'a> {
    /// Create an empty scope with no handlers and no finally block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for faults covered by `class`.
    #[must_use]
    pub fn on(
        mut self,
        class: FaultClass,
        handler: impl FnMut(&Fault) -> Result<(), Fault> + 'a,
    ) -> Self {
        self.handlers.push((class, Box::new(handler)));
        self
    }

    /// Attach a finally block, run exactly once on every exit path.
    #[must_use]
    pub fn finally(mut self, cleanup: impl FnMut() + 'a) -> Self {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// Execute `body` under this scope's handlers.
    ///
    /// Returns `Ok(ScopeState::Normal)` on clean completion,
    /// `Ok(ScopeState::Handled)` when a handler consumed the fault, and
    /// `Err` when the fault (or a handler's re-throw) propagates.
    pub fn run(mut self, body: impl FnOnce() -> Result<(), Fault>) -> Result<ScopeState, Fault> {
        let mut state = ScopeState::Normal;
        let outcome = match body() {
            Ok(()) => {
                state = scope_transition(state, ScopeEvent::Complete);
                Ok(state)
            }
            Err(fault) => {
                state = scope_transition(state, ScopeEvent::Raise);
                match self
                    .handlers
                    .iter_mut()
                    .find(|(class, _)| class.matches(fault.kind))
                {
                    Some((_, handler)) => {
                        state = scope_transition(state, ScopeEvent::HandlerMatched);
                        match handler(&fault) {
                            Ok(()) => Ok(state),
                            // Re-throw: a second, independent raise.
                            Err(rethrown) => {
                                state = scope_transition(state, ScopeEvent::Raise);
                                debug_assert_eq!(state, ScopeState::Unwinding);
                                Err(rethrown)
                            }
                        }
                    }
                    None => {
                        state = scope_transition(state, ScopeEvent::NoHandler);
                        debug_assert_eq!(state, ScopeState::Unwinding);
                        Err(fault)
                    }
                }
            }
        };
        if let Some(cleanup) = self.cleanup.as_mut() {
            cleanup();
        }
        outcome
    }
}

/// Assertion-style check: raises an `AssertionFailure` fault carrying
/// the optional diagnostic whenever `cond` is false. Never compiled out.
pub fn check(cond: bool, message: Option<&str>) -> Result<(), Fault> {
    if cond {
        Ok(())
    } else {
        Err(Fault::assertion(message))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;
    use std::cell::Cell;

    #[test]
    fn transition_matrix_basics() {
        assert_eq!(
            scope_transition(ScopeState::Normal, ScopeEvent::Raise),
            ScopeState::Unwinding
        );
        assert_eq!(
            scope_transition(ScopeState::Unwinding, ScopeEvent::HandlerMatched),
            ScopeState::Handled
        );
        assert_eq!(
            scope_transition(ScopeState::Unwinding, ScopeEvent::NoHandler),
            ScopeState::Unwinding
        );
        assert_eq!(
            scope_transition(ScopeState::Handled, ScopeEvent::Raise),
            ScopeState::Unwinding
        );
        assert_eq!(
            scope_transition(ScopeState::Normal, ScopeEvent::Complete),
            ScopeState::Normal
        );
    }

    #[test]
    fn clean_body_completes_normal_and_runs_finally_once() {
        let runs = Cell::new(0u32);
        let result = Scope::new()
            .finally(|| runs.set(runs.get() + 1))
            .run(|| Ok(()));
        assert_eq!(result, Ok(ScopeState::Normal));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn matching_handler_consumes_fault() {
        let caught = Cell::new(false);
        let result = Scope::new()
            .on(FaultClass::Exact(FaultKind::NullDereference), |_| {
                caught.set(true);
                Ok(())
            })
            .run(|| Err(Fault::null_dereference()));
        assert_eq!(result, Ok(ScopeState::Handled));
        assert!(caught.get());
    }

    #[test]
    fn finally_runs_once_on_handled_and_propagating_paths() {
        let runs = Cell::new(0u32);
        let handled = Scope::new()
            .on(FaultClass::Any, |_| Ok(()))
            .finally(|| runs.set(runs.get() + 1))
            .run(|| Err(Fault::user_raised("boom")));
        assert_eq!(handled, Ok(ScopeState::Handled));
        assert_eq!(runs.get(), 1);

        let propagated = Scope::new()
            .finally(|| runs.set(runs.get() + 1))
            .run(|| Err(Fault::user_raised("boom")));
        assert!(propagated.is_err());
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn specific_handler_registered_first_wins_over_broad() {
        let winner = Cell::new("");
        let result = Scope::new()
            .on(FaultClass::Exact(FaultKind::NullDereference), |_| {
                winner.set("specific");
                Ok(())
            })
            .on(FaultClass::Runtime, |_| {
                winner.set("broad");
                Ok(())
            })
            .run(|| Err(Fault::null_dereference()));
        assert_eq!(result, Ok(ScopeState::Handled));
        assert_eq!(winner.get(), "specific");
    }

    #[test]
    fn unmatched_fault_propagates_to_enclosing_scope() {
        let outer_caught = Cell::new(false);
        let result = Scope::new()
            .on(FaultClass::Runtime, |_| {
                outer_caught.set(true);
                Ok(())
            })
            .run(|| {
                // Inner scope only handles interruption; the bounds
                // fault must pass through untouched.
                Scope::new()
                    .on(FaultClass::Exact(FaultKind::Interrupted), |_| Ok(()))
                    .run(|| Err(Fault::out_of_bounds(3, 2)))
                    .map(|_| ())
            });
        assert_eq!(result, Ok(ScopeState::Handled));
        assert!(outer_caught.get());
    }

    #[test]
    fn rethrow_from_handler_propagates_and_runs_finally() {
        let runs = Cell::new(0u32);
        let result = Scope::new()
            .on(FaultClass::Exact(FaultKind::NullDereference), |_| {
                Err(Fault::user_raised("second raise"))
            })
            .finally(|| runs.set(runs.get() + 1))
            .run(|| Err(Fault::null_dereference()));
        let fault = result.unwrap_err();
        assert_eq!(fault.kind, FaultKind::UserRaised);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn check_raises_assertion_failure_with_message() {
        assert!(check(true, None).is_ok());
        let fault = check(false, Some("empty message!")).unwrap_err();
        assert_eq!(fault.kind, FaultKind::AssertionFailure);
        assert_eq!(fault.to_string(), "assertion failure: empty message!");
        let bare = check(false, None).unwrap_err();
        assert_eq!(bare.to_string(), "assertion failure");
    }
}
