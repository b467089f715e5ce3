//! State identifiers.
//!
//! Every state the machine can be in is identified by a value implementing
//! [`State`]. Identifiers are only ever compared and hashed, never mutated.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Closed sets of states are best modelled as an enum (see
/// [`state_enum!`](crate::state_enum)); dynamic sets use [`StateId`].
///
/// # Required Traits
///
/// - `Clone`: the machine keeps its own copy of the current state
/// - `Eq` + `Hash`: states key the transition table and hook registries
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: tables and histories can be exported
///
/// # Example
///
/// ```rust
/// use waypoint::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}

/// String-backed state identifier for machines whose states are only
/// known at runtime.
///
/// ```rust
/// use waypoint::core::{State, StateId};
///
/// let sharing = StateId::from("sharing");
/// assert_eq!(sharing.name(), "sharing");
/// assert_eq!(sharing, StateId::new("sharing"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl State for StateId {
    fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
