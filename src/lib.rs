//! Waypoint: a small finite state machine engine.
//!
//! A [`StateMachine`] tracks a current state, only allows the transitions
//! declared for it, and runs user-supplied hooks when states are exited and
//! entered. It is meant to be embedded in application logic that moves
//! through a known set of steps: workflow stages, protocol phases, UI modes.
//!
//! # Core Concepts
//!
//! - **State**: any identifier implementing the [`State`] trait, either a
//!   closed enum (see [`state_enum!`]) or a dynamic [`StateId`]
//! - **Transition table**: the directed moves allowed from each state
//! - **Hooks**: fallible closures run on exit from and entry into a state
//! - **History**: every committed transition, with its timestamp
//!
//! A transition is validated against the table, then the current state's
//! exit hook runs, then the target's enter hook, and only then is the target
//! committed as the current state. Any failure is returned to the caller.
//!
//! # Example
//!
//! ```rust
//! use waypoint::{MachineError, StateId, StateMachine};
//!
//! let mut machine = StateMachine::<StateId>::new();
//! machine.add_transition("sharing", "liking");
//! machine.add_transition("sharing", "uploading");
//! machine.add_transition("liking", "discovering");
//! machine.add_transition("discovering", "sharing");
//!
//! machine.on_exit("sharing", || {
//!     println!("leaving sharing");
//!     Ok(())
//! });
//!
//! machine.start("sharing").unwrap();
//! machine.transition("liking").unwrap();
//! machine.transition("discovering").unwrap();
//!
//! let err = machine.transition("uploading").unwrap_err();
//! assert!(matches!(err, MachineError::InvalidTransition { .. }));
//! assert_eq!(machine.current_state(), Some(&StateId::from("discovering")));
//! ```

pub mod builder;
pub mod core;
pub mod machine;
pub mod shared;

// Re-export commonly used types
pub use crate::builder::{BuildError, StateMachineBuilder};
pub use crate::core::{State, StateHistory, StateId, StateTransition, TransitionTable};
pub use crate::machine::{CallbackError, HookPhase, MachineError, MachineOptions, StateMachine};
pub use crate::shared::SharedStateMachine;
