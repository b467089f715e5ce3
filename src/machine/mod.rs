//! The transition engine.
//!
//! [`StateMachine`] owns the current state, the transition table and the
//! enter/exit hook registries, and runs the transition algorithm:
//! validate against the table, run the current state's exit hook, run the
//! target's enter hook, then commit.
//!
//! Hooks are plain closures returning `Result<(), CallbackError>`. A
//! failing hook aborts the call and its error is handed back inside
//! [`MachineError::HookFailed`] without being inspected.

mod engine;
mod error;
mod hooks;
mod options;

pub use engine::StateMachine;
pub use error::MachineError;
pub use hooks::{CallbackError, Hook, HookPhase, HookRegistry};
pub use options::MachineOptions;
