//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`StateMachine`](super::StateMachine).
///
/// Deserializable so embedding applications can keep it alongside their
/// own configuration.
///
/// ```rust
/// use waypoint::machine::MachineOptions;
///
/// let options = MachineOptions::default().history_capacity(64);
/// assert!(options.record_history);
/// assert_eq!(options.history_capacity, Some(64));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Record committed transitions in the machine's history.
    pub record_history: bool,

    /// Keep at most this many transitions; `None` keeps all of them.
    pub history_capacity: Option<usize>,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            record_history: true,
            history_capacity: None,
        }
    }
}

impl MachineOptions {
    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }
}
