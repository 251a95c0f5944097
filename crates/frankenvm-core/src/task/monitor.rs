//! Explicit mutual-exclusion primitive for a shared resource.
//!
//! Generalizes a lock-per-object monitor: the [`Monitor`] owns the
//! resource it protects and hands out scoped access. At most one thread
//! holds the monitor at a time; release is automatic and unconditional
//! when the protected scope exits, normal or unwinding, because the
//! guard is RAII. Re-entrant acquisition by the thread already holding
//! the monitor does not self-deadlock.

use parking_lot::ReentrantMutex;
use std::cell::RefCell;

/// A mutual-exclusion monitor protecting a value of type `T`.
#[derive(Debug, Default)]
pub struct Monitor<T> {
    inner: ReentrantMutex<RefCell<T>>,
}

impl<T> Monitor<T> {
    /// Wrap `value` in a monitor.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            inner: ReentrantMutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with the monitor held, giving it the protected cell.
    ///
    /// Nested `enter` calls from the holding thread are permitted; the
    /// cell's borrow rules still apply within the scope.
    pub fn enter<R>(&self, f: impl FnOnce(&RefCell<T>) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }

    /// Run `f` with the monitor held and the value mutably borrowed
    /// for the whole scope.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.enter(|cell| f(&mut cell.borrow_mut()))
    }
}
