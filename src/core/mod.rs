//! Core state machine data.
//!
//! This module contains the plain data the engine operates on:
//! - State identifiers via the `State` trait and `StateId`
//! - The append-only transition table
//! - History of committed transitions
//!
//! Nothing in here runs callbacks; see [`crate::machine`] for the engine.

mod history;
mod state;
mod table;

pub use history::{StateHistory, StateTransition};
pub use state::{State, StateId};
pub use table::TransitionTable;
