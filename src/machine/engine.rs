//! The transition engine.

use super::error::MachineError;
use super::hooks::{CallbackError, HookPhase, HookRegistry};
use super::options::MachineOptions;
use crate::core::{State, StateHistory, StateTransition, TransitionTable};

/// Finite state machine with a declared transition table and enter/exit
/// hooks.
///
/// A machine is created empty and unstarted. Transitions and hooks are
/// registered up front, then [`start`](Self::start) sets the initial state
/// and [`transition`](Self::transition) moves between states.
///
/// All operations run to completion on the caller's thread, hooks included.
/// The machine does no locking of its own; see
/// [`SharedStateMachine`](crate::SharedStateMachine) for serialized access
/// from several threads.
///
/// # Example
///
/// ```rust
/// use waypoint::{StateId, StateMachine};
///
/// let mut machine = StateMachine::<StateId>::new();
/// machine.add_transition("sharing", "liking");
/// machine.add_transition("liking", "discovering");
///
/// machine.start("sharing").unwrap();
/// machine.transition("liking").unwrap();
/// assert_eq!(machine.current_state(), Some(&StateId::from("liking")));
///
/// assert!(machine.transition("sharing").is_err());
/// ```
pub struct StateMachine<S: State> {
    current: Option<S>,
    table: TransitionTable<S>,
    hooks: HookRegistry<S>,
    history: StateHistory<S>,
    options: MachineOptions,
}

impl<S: State> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateMachine<S> {
    /// Create an empty, unstarted machine with default options.
    pub fn new() -> Self {
        Self::with_options(MachineOptions::default())
    }

    /// Create an empty, unstarted machine with the given options.
    pub fn with_options(options: MachineOptions) -> Self {
        let history = match options.history_capacity {
            Some(capacity) => StateHistory::bounded(capacity),
            None => StateHistory::new(),
        };
        Self {
            current: None,
            table: TransitionTable::new(),
            hooks: HookRegistry::new(),
            history,
            options,
        }
    }

    /// Allow moving from `from` to `to`.
    ///
    /// Self-transitions are allowed, and neither state has to be known
    /// yet. Registering a pair twice has no further effect.
    pub fn add_transition(&mut self, from: impl Into<S>, to: impl Into<S>) {
        let (from, to) = (from.into(), to.into());
        if self.table.add(from.clone(), to.clone()) {
            tracing::trace!(from = from.name(), to = to.name(), "registered transition");
        }
    }

    /// Run `hook` whenever `state` becomes current. Replaces any previous
    /// enter hook for `state` and returns `true` if one was replaced.
    pub fn on_enter<F>(&mut self, state: impl Into<S>, hook: F) -> bool
    where
        F: FnMut() -> Result<(), CallbackError> + Send + 'static,
    {
        self.register_hook(HookPhase::Enter, state.into(), hook)
    }

    /// Run `hook` whenever `state` stops being current. Replaces any
    /// previous exit hook for `state` and returns `true` if one was
    /// replaced.
    pub fn on_exit<F>(&mut self, state: impl Into<S>, hook: F) -> bool
    where
        F: FnMut() -> Result<(), CallbackError> + Send + 'static,
    {
        self.register_hook(HookPhase::Exit, state.into(), hook)
    }

    fn register_hook<F>(&mut self, phase: HookPhase, state: S, hook: F) -> bool
    where
        F: FnMut() -> Result<(), CallbackError> + Send + 'static,
    {
        tracing::trace!(state = state.name(), %phase, "registered hook");
        self.hooks.register(phase, state, Box::new(hook))
    }

    /// Put the machine in `initial`, running its enter hook first.
    ///
    /// If the enter hook fails the error is returned and the current state
    /// is left as it was (unset on a fresh machine).
    ///
    /// Calling this on a machine that is already started replaces the
    /// current state without running the old state's exit hook.
    pub fn start(&mut self, initial: impl Into<S>) -> Result<(), MachineError<S>> {
        let initial = initial.into();

        if let Err(source) = self.hooks.run(HookPhase::Enter, &initial) {
            return Err(MachineError::HookFailed {
                phase: HookPhase::Enter,
                state: initial.clone(),
                target: initial,
                source,
            });
        }

        match &self.current {
            Some(previous) => tracing::debug!(
                previous = previous.name(),
                state = initial.name(),
                "restarted state machine"
            ),
            None => tracing::debug!(state = initial.name(), "started state machine"),
        }
        self.current = Some(initial);
        Ok(())
    }

    /// Move from the current state to `target`.
    ///
    /// The move must have been registered with
    /// [`add_transition`](Self::add_transition). The current state's exit
    /// hook runs first, then the target's enter hook, and only when both
    /// succeed does `target` become current.
    ///
    /// # Errors
    ///
    /// - [`MachineError::NotStarted`] before a successful `start`.
    /// - [`MachineError::UnknownSourceState`] when nothing was registered
    ///   from the current state.
    /// - [`MachineError::InvalidTransition`] when `target` is not reachable
    ///   from the current state.
    /// - [`MachineError::HookFailed`] when a hook fails. An exit failure
    ///   stops before the enter hook runs. An enter failure happens after
    ///   the exit hook already ran, but the current state is still not
    ///   advanced, so the caller has to reconcile the exit hook's effects.
    ///
    /// Validation errors have no side effects.
    pub fn transition(&mut self, target: impl Into<S>) -> Result<(), MachineError<S>> {
        let target = target.into();
        let from = self.validate(&target).inspect_err(|err| {
            tracing::debug!(to = target.name(), error = %err, "rejected transition");
        })?;

        if let Err(source) = self.hooks.run(HookPhase::Exit, &from) {
            return Err(MachineError::HookFailed {
                phase: HookPhase::Exit,
                state: from,
                target,
                source,
            });
        }

        if let Err(source) = self.hooks.run(HookPhase::Enter, &target) {
            return Err(MachineError::HookFailed {
                phase: HookPhase::Enter,
                state: target.clone(),
                target,
                source,
            });
        }

        tracing::debug!(from = from.name(), to = target.name(), "transitioned");
        if self.options.record_history {
            self.history.record(StateTransition::new(from, target.clone()));
        }
        self.current = Some(target);
        Ok(())
    }

    /// Check the table for a move to `target`, returning the current state.
    fn validate(&self, target: &S) -> Result<S, MachineError<S>> {
        let Some(current) = &self.current else {
            return Err(MachineError::NotStarted { to: target.clone() });
        };

        let Some(targets) = self.table.targets(current) else {
            return Err(MachineError::UnknownSourceState {
                from: current.clone(),
                to: target.clone(),
            });
        };

        if !targets.contains(target) {
            return Err(MachineError::InvalidTransition {
                from: current.clone(),
                to: target.clone(),
            });
        }

        Ok(current.clone())
    }

    /// Whether [`transition`](Self::transition) to `target` would pass
    /// validation. Runs no hooks.
    pub fn can_transition(&self, target: &S) -> bool {
        self.validate(target).is_ok()
    }

    /// Current state, or `None` before the machine is started.
    pub fn current_state(&self) -> Option<&S> {
        self.current.as_ref()
    }

    /// True once `start` has succeeded.
    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    /// True when started and no transition is registered from the current
    /// state, so every further `transition` call fails.
    pub fn is_terminal(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| !self.table.has_source(current))
    }

    /// Targets reachable from `state`, in registration order.
    pub fn targets(&self, state: &S) -> &[S] {
        self.table.targets(state).unwrap_or_default()
    }

    /// Whether a hook is registered for `state` in `phase`.
    pub fn has_hook(&self, phase: HookPhase, state: &S) -> bool {
        self.hooks.contains(phase, state)
    }

    pub fn table(&self) -> &TransitionTable<S> {
        &self.table
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn options(&self) -> &MachineOptions {
        &self.options
    }
}

impl<S: State> std::fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("table", &self.table)
            .field("hooks", &self.hooks)
            .field("history_len", &self.history.len())
            .finish()
    }
}
