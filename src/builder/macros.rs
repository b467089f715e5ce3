//! Macros for ergonomic state machine construction.

/// Declare a closed set of states as an enum and implement
/// [`State`](crate::core::State) for it.
///
/// The generated enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
/// `Debug`, `Serialize` and `Deserialize`; each variant's name is its
/// identifier. The calling crate needs `serde` as a dependency.
///
/// # Example
///
/// ```
/// use waypoint::state_enum;
/// use waypoint::StateMachine;
///
/// state_enum! {
///     pub enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// let mut machine = StateMachine::<Light>::new();
/// machine.add_transition(Light::Red, Light::Green);
/// machine.start(Light::Red).unwrap();
/// machine.transition(Light::Green).unwrap();
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;
    use crate::machine::StateMachine;

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            /// Doc comments pass through.
            pub enum PublicState {
                A,
                B,
            }
        }

        let mut machine = StateMachine::<PublicState>::new();
        machine.add_transition(PublicState::A, PublicState::B);
        machine.start(PublicState::A).unwrap();
        machine.transition(PublicState::B).unwrap();
        assert_eq!(machine.current_state(), Some(&PublicState::B));
    }

    #[test]
    fn state_enum_serializes_by_variant_name() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
    }
}
