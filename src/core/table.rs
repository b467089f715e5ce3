//! Transition table: which targets are reachable directly from each source.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from a source state to the ordered set of states reachable
/// directly from it.
///
/// The table only grows. A source with no entry has no outgoing
/// transitions; registering the same pair twice is a no-op.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{StateId, TransitionTable};
///
/// let mut table = TransitionTable::new();
/// assert!(table.add(StateId::from("sharing"), StateId::from("liking")));
/// assert!(!table.add(StateId::from("sharing"), StateId::from("liking")));
///
/// assert!(table.contains(&"sharing".into(), &"liking".into()));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionTable<S: State> {
    targets: HashMap<S, Vec<S>>,
}

impl<S: State> Default for TransitionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionTable<S> {
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }

    /// Register `from -> to`. Returns `true` if the pair was not already
    /// present.
    pub fn add(&mut self, from: S, to: S) -> bool {
        let targets = self.targets.entry(from).or_default();
        if targets.contains(&to) {
            return false;
        }
        targets.push(to);
        true
    }

    /// Targets reachable from `from`, in registration order.
    ///
    /// `None` means the source has never been registered, which the
    /// machine reports differently from an unreachable target.
    pub fn targets(&self, from: &S) -> Option<&[S]> {
        self.targets.get(from).map(Vec::as_slice)
    }

    pub fn has_source(&self, from: &S) -> bool {
        self.targets.contains_key(from)
    }

    pub fn contains(&self, from: &S, to: &S) -> bool {
        self.targets(from).is_some_and(|targets| targets.contains(to))
    }

    /// Every source state with at least one registered transition.
    pub fn sources(&self) -> impl Iterator<Item = &S> {
        self.targets.keys()
    }

    /// Number of registered (source, target) pairs.
    pub fn len(&self) -> usize {
        self.targets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
