//! Thread lifecycle, interruptible sleep, and mutual exclusion.
//!
//! A [`Task`] is one concurrently-scheduled unit of work with the
//! lifecycle `New → Runnable (on start) → Terminated (on run-body
//! completion)`. Tasks run on real OS threads, so the mutual-exclusion
//! property checked by the concurrency scenarios holds under genuine
//! preemptive interleaving, not a cooperative simulation.
//!
//! Ordering guarantees:
//! - `join` returns only after the target is Terminated and establishes
//!   a happens-before edge from the joined body to the joiner;
//! - a released [`Monitor`] establishes a happens-before edge to the
//!   next acquirer.

pub mod monitor;

pub use monitor::Monitor;

use crate::fault::Fault;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Lifecycle contract
// ---------------------------------------------------------------------------

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    /// Created, not yet eligible for scheduling.
    #[default]
    New,
    /// Started and eligible for scheduling concurrently with the caller.
    Runnable,
    /// Run body completed.
    Terminated,
}

/// Lifecycle operations subject to the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOp {
    Start,
    Finish,
}

/// Deterministic lifecycle transition; `None` is a contract violation
/// (starting a task twice, finishing one that never ran).
#[must_use]
pub const fn lifecycle_transition(state: TaskState, op: TaskOp) -> Option<TaskState> {
    match (state, op) {
        (TaskState::New, TaskOp::Start) => Some(TaskState::Runnable),
        (TaskState::Runnable, TaskOp::Finish) => Some(TaskState::Terminated),
        _ => None,
    }
}

/// Programming-contract violations and spawn failures.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// `start` was invoked twice on the same handle. Fatal, not retried.
    #[error("task '{0}' already started")]
    AlreadyStarted(String),
    /// The underlying OS thread could not be spawned.
    #[error("task '{name}' failed to spawn")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// The run body panicked instead of completing.
    #[error("task '{0}' body panicked")]
    BodyPanicked(String),
}

// ---------------------------------------------------------------------------
// Shared control block
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Control {
    state: Mutex<TaskState>,
    interrupted: Mutex<bool>,
    interrupt_cv: Condvar,
}

// ---------------------------------------------------------------------------
// Task context (visible to the run body)
// ---------------------------------------------------------------------------

/// Capabilities a run body may use on its own behalf.
pub struct TaskContext {
    control: Arc<Control>,
}

impl TaskContext {
    /// Suspend the calling task for at least `duration`.
    ///
    /// An interruption delivered while suspended wakes the task early
    /// and raises an `interrupted` fault, which the body observes and
    /// handles locally. A pending interruption (delivered while the
    /// task was running) is consumed by the next `sleep`.
    pub fn sleep(&self, duration: Duration) -> Result<(), Fault> {
        let deadline = Instant::now() + duration;
        let mut interrupted = self.control.interrupted.lock();
        loop {
            if *interrupted {
                *interrupted = false;
                return Err(Fault::interrupted());
            }
            if Instant::now() >= deadline {
                return Ok(());
            }
            let _ = self
                .control
                .interrupt_cv
                .wait_until(&mut interrupted, deadline);
        }
    }

    /// Cooperative scheduling hint; result-neutral without shared state.
    pub fn yield_now(&self) {
        std::thread::yield_now();
    }
}

// ---------------------------------------------------------------------------
// Task handle
// ---------------------------------------------------------------------------

/// One concurrently-scheduled unit of work.
///
/// Created by the scheduling caller, jointly observed by the caller
/// (via `join`) and the scheduler, done once joined.
pub struct Task {
    name: String,
    control: Arc<Control>,
    body: Option<Box<dyn FnOnce(&TaskContext) + Send + 'static>>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Task {
    /// Create a task around a run body. The body runs with no external
    /// synchronization unless it explicitly acquires a shared
    /// [`Monitor`].
    #[must_use]
    pub fn new(name: impl Into<String>, body: impl FnOnce(&TaskContext) + Send + 'static) -> Self {
        Self {
            name: name.into(),
            control: Arc::new(Control::default()),
            body: Some(Box::new(body)),
            join_handle: None,
        }
    }

    /// Task name, as given at creation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TaskState {
        *self.control.state.lock()
    }

    /// Transition New → Runnable and make the run body eligible for
    /// scheduling. A second `start` on the same handle is a fatal
    /// contract violation.
    pub fn start(&mut self) -> Result<(), TaskError> {
        {
            let mut state = self.control.state.lock();
            match lifecycle_transition(*state, TaskOp::Start) {
                Some(next) => *state = next,
                None => return Err(TaskError::AlreadyStarted(self.name.clone())),
            }
        }
        // State says New exactly once, so the body must still be here.
        let body = self
            .body
            .take()
            .ok_or_else(|| TaskError::AlreadyStarted(self.name.clone()))?;
        let control = Arc::clone(&self.control);
        let handle = std::thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                let cx = TaskContext {
                    control: Arc::clone(&control),
                };
                body(&cx);
                let mut state = control.state.lock();
                if let Some(next) = lifecycle_transition(*state, TaskOp::Finish) {
                    *state = next;
                }
            })
            .map_err(|source| TaskError::Spawn {
                name: self.name.clone(),
                source,
            })?;
        self.join_handle = Some(handle);
        Ok(())
    }

    /// Block until the task is Terminated. Returns immediately if it
    /// already is (or was already joined); all effects of the joined
    /// body are visible to the caller afterward.
    pub fn join(&mut self) -> Result<(), TaskError> {
        if let Some(handle) = self.join_handle.take() {
            handle
                .join()
                .map_err(|_| TaskError::BodyPanicked(self.name.clone()))?;
        }
        Ok(())
    }

    /// Deliver an interruption. Observable only inside a suspended
    /// `sleep`; a running body is not forcibly preempted.
    pub fn interrupt(&self) {
        let mut interrupted = self.control.interrupted.lock();
        *interrupted = true;
        self.control.interrupt_cv.notify_all();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;
    use crate::trace::TraceSink;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn lifecycle_contract_matrix() {
        assert_eq!(
            lifecycle_transition(TaskState::New, TaskOp::Start),
            Some(TaskState::Runnable)
        );
        assert_eq!(
            lifecycle_transition(TaskState::Runnable, TaskOp::Finish),
            Some(TaskState::Terminated)
        );
        assert_eq!(lifecycle_transition(TaskState::Runnable, TaskOp::Start), None);
        assert_eq!(lifecycle_transition(TaskState::Terminated, TaskOp::Start), None);
        assert_eq!(lifecycle_transition(TaskState::New, TaskOp::Finish), None);
    }

    #[test]
    fn start_join_reaches_terminated() {
        let hits = Arc::new(AtomicU32::new(0));
        let hits_in_body = Arc::clone(&hits);
        let mut task = Task::new("t", move |_| {
            hits_in_body.store(42, Ordering::Release);
        });
        assert_eq!(task.state(), TaskState::New);
        task.start().unwrap();
        task.join().unwrap();
        assert_eq!(task.state(), TaskState::Terminated);
        // join is the happens-before edge for this load.
        assert_eq!(hits.load(Ordering::Acquire), 42);
    }

    #[test]
    fn second_start_is_contract_violation() {
        let mut task = Task::new("twice", |_| {});
        task.start().unwrap();
        let err = task.start().unwrap_err();
        assert!(matches!(err, TaskError::AlreadyStarted(_)));
        task.join().unwrap();
    }

    #[test]
    fn join_is_idempotent_and_immediate_once_terminated() {
        let mut task = Task::new("j", |_| {});
        task.start().unwrap();
        task.join().unwrap();
        task.join().unwrap();
        assert_eq!(task.state(), TaskState::Terminated);
    }

    #[test]
    fn sleep_lasts_at_least_the_requested_duration() {
        let mut task = Task::new("sleeper", |cx| {
            let before = Instant::now();
            cx.sleep(Duration::from_millis(20)).unwrap();
            assert!(before.elapsed() >= Duration::from_millis(20));
        });
        task.start().unwrap();
        task.join().unwrap();
    }

    #[test]
    fn interrupt_during_sleep_raises_interrupted_fault() {
        let sink = TraceSink::new();
        let body_sink = sink.clone();
        let mut task = Task::new("interruptee", move |cx| {
            match cx.sleep(Duration::from_secs(60)) {
                Err(fault) if fault.kind == FaultKind::Interrupted => {
                    body_sink.emit("sleep interrupted");
                }
                other => body_sink.emit(format!("unexpected: {other:?}")),
            }
        });
        task.start().unwrap();
        // Give the body a moment to reach the sleep, then interrupt.
        std::thread::sleep(Duration::from_millis(10));
        task.interrupt();
        task.join().unwrap();
        assert_eq!(sink.snapshot(), vec!["sleep interrupted"]);
    }

    #[test]
    fn pending_interrupt_is_consumed_by_next_sleep() {
        let observed = Arc::new(AtomicU32::new(0));
        let observed_in_body = Arc::clone(&observed);
        let mut task = Task::new("pending", move |cx| {
            if cx.sleep(Duration::from_millis(1)).is_err() {
                observed_in_body.fetch_add(1, Ordering::AcqRel);
            }
            // Flag was consumed; a second sleep completes normally.
            if cx.sleep(Duration::from_millis(1)).is_err() {
                observed_in_body.fetch_add(100, Ordering::AcqRel);
            }
        });
        task.interrupt();
        task.start().unwrap();
        task.join().unwrap();
        assert_eq!(observed.load(Ordering::Acquire), 1);
    }

    #[test]
    fn monitored_counter_has_no_lost_updates() {
        let counter = Arc::new(Monitor::new(0u32));
        let mut tasks = Vec::new();
        for name in ["run1", "run2"] {
            let counter = Arc::clone(&counter);
            let mut task = Task::new(name, move |cx| {
                for _ in 0..10 {
                    counter.with(|value| *value += 1);
                    cx.yield_now();
                }
            });
            task.start().unwrap();
            tasks.push(task);
        }
        for task in &mut tasks {
            task.join().unwrap();
        }
        assert_eq!(counter.with(|value| *value), 20);
    }
}
