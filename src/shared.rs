//! Serialized access to a state machine from several threads.
//!
//! [`StateMachine`] itself does no locking. Wrapping it in a
//! [`SharedStateMachine`] puts every operation, hooks included, behind one
//! mutex so that registrations and transitions from different threads never
//! interleave.
//!
//! A hook must not call back into the same `SharedStateMachine`: the lock is
//! held while hooks run, so doing so deadlocks. Formatting the handle with
//! `{:?}` is the exception; it never waits and shows `<locked>` instead.

use crate::core::State;
use crate::machine::{MachineError, StateMachine};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

/// Cloneable handle to a mutex-guarded [`StateMachine`].
///
/// ```rust
/// use waypoint::{SharedStateMachine, StateId, StateMachine};
/// use std::thread;
///
/// let mut machine = StateMachine::<StateId>::new();
/// machine.add_transition("idle", "busy");
/// machine.add_transition("busy", "idle");
/// machine.start("idle").unwrap();
///
/// let shared = SharedStateMachine::new(machine);
/// let worker = shared.clone();
/// thread::spawn(move || worker.transition("busy").unwrap())
///     .join()
///     .unwrap();
///
/// assert_eq!(shared.current_state(), Some(StateId::from("busy")));
/// ```
pub struct SharedStateMachine<S: State> {
    inner: Arc<Mutex<StateMachine<S>>>,
}

impl<S: State> Clone for SharedStateMachine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State> From<StateMachine<S>> for SharedStateMachine<S> {
    fn from(machine: StateMachine<S>) -> Self {
        Self::new(machine)
    }
}

impl<S: State> SharedStateMachine<S> {
    pub fn new(machine: StateMachine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    /// Lock the machine.
    ///
    /// A panic inside a hook poisons the mutex. The machine only commits a
    /// new state after its hooks return, so the guarded value is still
    /// consistent and the poison is cleared.
    fn lock(&self) -> MutexGuard<'_, StateMachine<S>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::debug!("recovering state machine lock after a panicking hook");
            self.inner.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Run `f` with exclusive access to the machine.
    pub fn with<R>(&self, f: impl FnOnce(&mut StateMachine<S>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn start(&self, initial: impl Into<S>) -> Result<(), MachineError<S>> {
        self.lock().start(initial)
    }

    pub fn transition(&self, target: impl Into<S>) -> Result<(), MachineError<S>> {
        self.lock().transition(target)
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> Option<S> {
        self.lock().current_state().cloned()
    }
}

impl<S: State> std::fmt::Debug for SharedStateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("SharedStateMachine");
        // never block here: the caller may already hold the lock
        match self.inner.try_lock() {
            Ok(machine) => d.field("current", &machine.current_state()),
            Err(TryLockError::Poisoned(poisoned)) => {
                d.field("current", &poisoned.get_ref().current_state())
            }
            Err(TryLockError::WouldBlock) => d.field("current", &format_args!("<locked>")),
        };
        d.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn ping_pong() -> StateMachine<StateId> {
        let mut machine = StateMachine::new();
        machine.add_transition("ping", "pong");
        machine.add_transition("pong", "ping");
        machine
    }

    #[test]
    fn concurrent_transitions_are_serialized() {
        let entered = Arc::new(AtomicUsize::new(0));
        let mut machine = ping_pong();
        let counter = Arc::clone(&entered);
        machine.on_enter("pong", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let shared = SharedStateMachine::new(machine);
        shared.start("ping").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.with(|m| {
                            let next = if m.current_state() == Some(&StateId::from("ping")) {
                                "pong"
                            } else {
                                "ping"
                            };
                            m.transition(next).unwrap();
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // 400 alternating moves starting from ping: 200 of them enter pong
        assert_eq!(entered.load(Ordering::SeqCst), 200);
        assert_eq!(shared.current_state(), Some(StateId::from("ping")));
        assert_eq!(shared.with(|m| m.history().len()), 400);
    }

    #[test]
    fn panicking_hook_does_not_wedge_the_machine() {
        let mut machine = ping_pong();
        machine.on_exit("ping", || panic!("hook exploded"));

        let shared = SharedStateMachine::new(machine);
        shared.start("ping").unwrap();

        let worker = shared.clone();
        let result = thread::spawn(move || worker.transition("pong")).join();
        assert!(result.is_err());

        assert_eq!(shared.current_state(), Some(StateId::from("ping")));
    }

    #[test]
    fn debug_does_not_block_while_locked() {
        let shared = SharedStateMachine::from(ping_pong());
        shared.start("ping").unwrap();

        let inside = shared.with(|_| format!("{:?}", shared));
        assert_eq!(inside, "SharedStateMachine { current: <locked> }");

        let outside = format!("{:?}", shared);
        assert!(outside.contains("ping"));
    }

    #[test]
    fn validation_errors_pass_through() {
        let shared = SharedStateMachine::from(ping_pong());
        shared.start("ping").unwrap();

        let err = shared.transition("ping").unwrap_err();
        assert!(matches!(err, MachineError::InvalidTransition { .. }));
    }
}
