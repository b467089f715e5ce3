//! Errors returned by the state machine engine.

use super::hooks::{CallbackError, HookPhase};
use crate::core::State;
use thiserror::Error;

/// Errors that can occur when starting or transitioning a machine.
///
/// Validation errors (`NotStarted`, `UnknownSourceState`,
/// `InvalidTransition`) are raised before any hook runs and leave the
/// machine untouched. `HookFailed` carries the hook's own error unchanged
/// as its [`source`](std::error::Error::source).
#[derive(Debug, Error)]
pub enum MachineError<S: State> {
    #[error("Could not transition to '{}': machine has not been started", .to.name())]
    NotStarted { to: S },

    #[error(
        "Could not transition to '{}': no transitions defined from '{}'",
        .to.name(),
        .from.name()
    )]
    UnknownSourceState { from: S, to: S },

    #[error("Invalid transition from '{}' to '{}'", .from.name(), .to.name())]
    InvalidTransition { from: S, to: S },

    #[error("{phase} hook for '{}' failed while moving to '{}'", .state.name(), .target.name())]
    HookFailed {
        phase: HookPhase,
        /// State whose hook failed
        state: S,
        /// State the machine was moving to (the start state for `start`)
        target: S,
        #[source]
        source: CallbackError,
    },
}

impl<S: State> MachineError<S> {
    /// True for errors raised before any hook ran; the machine is exactly
    /// as it was and the call can be retried with a corrected target.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::HookFailed { .. })
    }

    /// The hook phase that failed, if this is a hook failure.
    pub fn hook_phase(&self) -> Option<HookPhase> {
        match self {
            Self::HookFailed { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// The state the failed call was trying to reach.
    pub fn target(&self) -> &S {
        match self {
            Self::NotStarted { to }
            | Self::UnknownSourceState { to, .. }
            | Self::InvalidTransition { to, .. } => to,
            Self::HookFailed { target, .. } => target,
        }
    }
}
