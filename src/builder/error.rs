//! Build errors for the state machine builder.

use crate::core::State;
use crate::machine::MachineError;
use thiserror::Error;

/// Errors that can occur when building and starting a state machine.
#[derive(Debug, Error)]
pub enum BuildError<S: State> {
    #[error("Initial state not specified. Call .initial(state) before .start()")]
    MissingInitialState,

    #[error("Failed to start state machine: {0}")]
    Start(#[from] MachineError<S>),
}
