//! Enter/exit hook registry.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Error type returned by hooks. Passed through the engine unchanged.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// A zero-argument, fallible side effect attached to a state.
pub type Hook = Box<dyn FnMut() -> Result<(), CallbackError> + Send>;

/// Which side of a state change a hook runs on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum HookPhase {
    /// Runs when the state becomes current.
    Enter,
    /// Runs when the state stops being current.
    Exit,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// At most one hook per state per phase. Registering again replaces the
/// previous hook.
pub struct HookRegistry<S: State> {
    on_enter: HashMap<S, Hook>,
    on_exit: HashMap<S, Hook>,
}

impl<S: State> Default for HookRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> HookRegistry<S> {
    pub fn new() -> Self {
        Self {
            on_enter: HashMap::new(),
            on_exit: HashMap::new(),
        }
    }

    /// Store `hook` for `state`, returning `true` if it replaced one.
    pub fn register(&mut self, phase: HookPhase, state: S, hook: Hook) -> bool {
        self.hooks_mut(phase).insert(state, hook).is_some()
    }

    pub fn contains(&self, phase: HookPhase, state: &S) -> bool {
        self.hooks(phase).contains_key(state)
    }

    /// Run the hook for `state`, if one is registered.
    ///
    /// A missing hook counts as success.
    pub fn run(&mut self, phase: HookPhase, state: &S) -> Result<(), CallbackError> {
        match self.hooks_mut(phase).get_mut(state) {
            Some(hook) => {
                tracing::trace!(state = state.name(), %phase, "running hook");
                hook()
            }
            None => Ok(()),
        }
    }

    fn hooks(&self, phase: HookPhase) -> &HashMap<S, Hook> {
        match phase {
            HookPhase::Enter => &self.on_enter,
            HookPhase::Exit => &self.on_exit,
        }
    }

    fn hooks_mut(&mut self, phase: HookPhase) -> &mut HashMap<S, Hook> {
        match phase {
            HookPhase::Enter => &mut self.on_enter,
            HookPhase::Exit => &mut self.on_exit,
        }
    }
}

impl<S: State> fmt::Debug for HookRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("on_enter", &self.on_enter.keys().collect::<Vec<_>>())
            .field("on_exit", &self.on_exit.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_hook(counter: &Arc<AtomicUsize>) -> Hook {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn missing_hook_succeeds() {
        let mut registry: HookRegistry<StateId> = HookRegistry::new();
        assert!(registry.run(HookPhase::Enter, &"a".into()).is_ok());
        assert!(!registry.contains(HookPhase::Enter, &"a".into()));
    }

    #[test]
    fn last_registration_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut registry = HookRegistry::new();

        assert!(!registry.register(HookPhase::Enter, StateId::from("a"), counting_hook(&first)));
        assert!(registry.register(HookPhase::Enter, StateId::from("a"), counting_hook(&second)));

        registry.run(HookPhase::Enter, &"a".into()).unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn phases_are_independent() {
        let enter = Arc::new(AtomicUsize::new(0));
        let mut registry = HookRegistry::new();
        registry.register(HookPhase::Enter, StateId::from("a"), counting_hook(&enter));

        registry.run(HookPhase::Exit, &"a".into()).unwrap();
        assert_eq!(enter.load(Ordering::SeqCst), 0);
        assert!(!registry.contains(HookPhase::Exit, &"a".into()));
    }

    #[test]
    fn hook_error_is_returned_unchanged() {
        let mut registry = HookRegistry::new();
        registry.register(
            HookPhase::Exit,
            StateId::from("a"),
            Box::new(|| Err(CallbackError::from("nope"))),
        );

        let err = registry.run(HookPhase::Exit, &"a".into()).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn phase_display() {
        assert_eq!(HookPhase::Enter.to_string(), "enter");
        assert_eq!(HookPhase::Exit.to_string(), "exit");
    }
}
