//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::machine::{CallbackError, MachineOptions, StateMachine};

/// Builder for constructing state machines with a fluent API.
///
/// ```rust
/// use waypoint::builder::StateMachineBuilder;
/// use waypoint::StateId;
///
/// let machine = StateMachineBuilder::<StateId>::new()
///     .transition("draft", "review")
///     .transition("review", "published")
///     .on_enter("review", || Ok(()))
///     .initial("draft")
///     .start()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), Some(&StateId::from("draft")));
/// ```
pub struct StateMachineBuilder<S: State> {
    initial: Option<S>,
    machine: StateMachine<S>,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            initial: None,
            machine: StateMachine::new(),
        }
    }

    /// Create a builder whose machine uses `options`.
    pub fn with_options(options: MachineOptions) -> Self {
        Self {
            initial: None,
            machine: StateMachine::with_options(options),
        }
    }

    /// Set the state [`start`](Self::start) puts the machine in.
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Allow moving from `from` to `to`.
    pub fn transition(mut self, from: impl Into<S>, to: impl Into<S>) -> Self {
        self.machine.add_transition(from, to);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions<I, F, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<S>,
        T: Into<S>,
    {
        for (from, to) in transitions {
            self.machine.add_transition(from, to);
        }
        self
    }

    pub fn on_enter<F>(mut self, state: impl Into<S>, hook: F) -> Self
    where
        F: FnMut() -> Result<(), CallbackError> + Send + 'static,
    {
        self.machine.on_enter(state, hook);
        self
    }

    pub fn on_exit<F>(mut self, state: impl Into<S>, hook: F) -> Self
    where
        F: FnMut() -> Result<(), CallbackError> + Send + 'static,
    {
        self.machine.on_exit(state, hook);
        self
    }

    /// Build the machine without starting it.
    pub fn build(self) -> StateMachine<S> {
        self.machine
    }

    /// Build the machine and start it in the initial state.
    /// Returns an error if no initial state was set or its enter hook fails.
    pub fn start(self) -> Result<StateMachine<S>, BuildError<S>> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let mut machine = self.machine;
        machine.start(initial)?;
        Ok(machine)
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use crate::machine::{HookPhase, MachineError};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Complete,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Complete => "Complete",
            }
        }
    }

    #[test]
    fn start_requires_initial_state() {
        let result = StateMachineBuilder::<TestState>::new()
            .transition(TestState::Initial, TestState::Processing)
            .start();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn build_leaves_machine_unstarted() {
        let machine = StateMachineBuilder::<TestState>::new()
            .initial(TestState::Initial)
            .transition(TestState::Initial, TestState::Processing)
            .build();

        assert!(!machine.is_started());
        assert_eq!(machine.table().len(), 1);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let mut machine = StateMachineBuilder::<TestState>::new()
            .initial(TestState::Initial)
            .transitions([
                (TestState::Initial, TestState::Processing),
                (TestState::Processing, TestState::Complete),
            ])
            .start()
            .unwrap();

        assert_eq!(machine.current_state(), Some(&TestState::Initial));
        machine.transition(TestState::Processing).unwrap();
        machine.transition(TestState::Complete).unwrap();
        assert!(machine.is_terminal());
    }

    #[test]
    fn failing_initial_enter_hook_surfaces_as_start_error() {
        let result = StateMachineBuilder::<StateId>::new()
            .transition("a", "b")
            .on_enter("a", || Err("boom".into()))
            .initial("a")
            .start();

        match result {
            Err(BuildError::Start(MachineError::HookFailed { phase, state, .. })) => {
                assert_eq!(phase, HookPhase::Enter);
                assert_eq!(state, StateId::from("a"));
            }
            other => panic!("Expected start failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn options_reach_the_machine() {
        let machine = StateMachineBuilder::<TestState>::with_options(
            MachineOptions::default().history_capacity(4),
        )
        .build();

        assert_eq!(machine.options().history_capacity, Some(4));
        assert_eq!(machine.history().capacity(), Some(4));
    }

    #[test]
    fn builder_hooks_run_on_transition() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let exited = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&exited);

        let mut machine = StateMachineBuilder::<StateId>::new()
            .transition("a", "b")
            .on_exit("a", move || {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            })
            .initial("a")
            .start()
            .unwrap();

        machine.transition("b").unwrap();
        assert!(exited.load(Ordering::SeqCst));
    }
}
