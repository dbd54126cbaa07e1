//! This module derives a machine `Configuration` from an ordered list of transitions.
//!
//! Nothing in the transition table marks a state as accepting. Finality is structural:
//! a state is final when some transition targets it and no transition leaves it.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::types::{ConfigError, State, Transition, INITIAL_STATE};

/// The immutable description of a machine, derived once from its transitions.
///
/// A `Configuration` is never mutated after construction, so any number of
/// machines may borrow the same one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    active_states: BTreeSet<State>,
    final_states: BTreeSet<State>,
    transitions: Vec<Transition>,
    #[serde(skip)]
    index: HashMap<(State, char), usize>,
}

impl Configuration {
    /// Builds a configuration from `transitions`, keeping their order.
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError::Empty)` if `transitions` is empty.
    /// * `Err(ConfigError::MissingInitialState)` if the smallest source state is not `0`.
    pub fn new(transitions: Vec<Transition>) -> Result<Self, ConfigError> {
        let active_states: BTreeSet<State> =
            transitions.iter().map(|t| t.source_state).collect();

        match active_states.first() {
            None => return Err(ConfigError::Empty),
            Some(&first) if first != INITIAL_STATE => {
                return Err(ConfigError::MissingInitialState)
            }
            Some(_) => {}
        }

        // An outgoing edge always wins over being a target.
        let final_states: BTreeSet<State> = transitions
            .iter()
            .map(|t| t.target_state)
            .filter(|state| !active_states.contains(state))
            .collect();

        let mut index = HashMap::with_capacity(transitions.len());
        for (position, t) in transitions.iter().enumerate() {
            index.entry((t.source_state, t.read_symbol)).or_insert(position);
        }

        debug!(
            active = ?active_states,
            finals = ?final_states,
            transitions = transitions.len(),
            "derived configuration"
        );

        Ok(Self {
            active_states,
            final_states,
            transitions,
            index,
        })
    }

    /// States with at least one outgoing transition, ascending.
    pub fn active_states(&self) -> &BTreeSet<State> {
        &self.active_states
    }

    /// States that are targeted but never left, ascending.
    pub fn final_states(&self) -> &BTreeSet<State> {
        &self.final_states
    }

    /// The transitions in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn is_final(&self, state: State) -> bool {
        self.final_states.contains(&state)
    }

    /// Finds the transition for `state` reading `symbol`.
    ///
    /// When several transitions share the same `(state, symbol)` pair the table is not
    /// deterministic. This is resolved silently: the one declared first wins.
    pub fn transition(&self, state: State, symbol: char) -> Option<&Transition> {
        self.index
            .get(&(state, symbol))
            .map(|&position| &self.transitions[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn t(source: State, read: char, write: char, dir: Direction, target: State) -> Transition {
        Transition::new(source, read, write, dir, target)
    }

    #[test]
    fn test_empty_transitions() {
        assert_eq!(Configuration::new(vec![]), Err(ConfigError::Empty));
    }

    #[test]
    fn test_missing_initial_state() {
        let transitions = vec![
            t(1, 'a', 'b', Direction::Right, 2),
            t(3, 'b', 'a', Direction::Left, 0),
        ];

        assert_eq!(
            Configuration::new(transitions),
            Err(ConfigError::MissingInitialState)
        );
    }

    #[test]
    fn test_initial_state_as_target_only_is_not_enough() {
        // State 0 is reachable but never a source.
        let transitions = vec![t(1, 'a', 'a', Direction::Right, 0)];

        assert_eq!(
            Configuration::new(transitions),
            Err(ConfigError::MissingInitialState)
        );
    }

    #[test]
    fn test_states_are_sorted_and_deduplicated() {
        let transitions = vec![
            t(3, 'a', 'a', Direction::Right, 9),
            t(0, 'a', 'b', Direction::Right, 3),
            t(3, 'b', 'b', Direction::Left, 7),
            t(0, 'b', 'b', Direction::Right, 9),
            t(2, '_', '_', Direction::Left, 7),
        ];

        let config = Configuration::new(transitions).unwrap();

        assert_eq!(
            config.active_states().iter().copied().collect::<Vec<_>>(),
            vec![0, 2, 3]
        );
        assert_eq!(
            config.final_states().iter().copied().collect::<Vec<_>>(),
            vec![7, 9]
        );
        assert_eq!(config.transitions().len(), 5);
    }

    #[test]
    fn test_source_and_target_is_never_final() {
        // State 1 is targeted before it is seen as a source.
        let transitions = vec![
            t(0, 'a', 'a', Direction::Right, 1),
            t(1, 'a', 'a', Direction::Right, 2),
        ];

        let config = Configuration::new(transitions).unwrap();

        assert!(!config.is_final(1));
        assert!(config.is_final(2));
        assert!(!config.is_final(0));
        assert!(config.active_states().is_disjoint(config.final_states()));
    }

    #[test]
    fn test_self_loop_has_no_final_states() {
        let config = Configuration::new(vec![t(0, 'a', 'a', Direction::Left, 0)]).unwrap();

        assert!(config.final_states().is_empty());
        assert_eq!(config.active_states().len(), 1);
    }

    #[test]
    fn test_first_declared_transition_wins() {
        let transitions = vec![
            t(0, 'a', 'x', Direction::Right, 1),
            t(0, 'b', 'y', Direction::Right, 1),
            t(0, 'a', 'z', Direction::Left, 2),
        ];

        let config = Configuration::new(transitions).unwrap();

        let found = config.transition(0, 'a').unwrap();
        assert_eq!(found.write_symbol, 'x');
        assert_eq!(found.direction, Direction::Right);
        assert_eq!(config.transition(0, 'b').unwrap().write_symbol, 'y');
        assert!(config.transition(0, 'c').is_none());
        assert!(config.transition(1, 'a').is_none());
    }

    #[test]
    fn test_transitions_keep_declaration_order() {
        let transitions = vec![
            t(0, 'b', 'b', Direction::Right, 0),
            t(0, 'a', 'a', Direction::Right, 1),
        ];

        let config = Configuration::new(transitions.clone()).unwrap();

        assert_eq!(config.transitions(), transitions.as_slice());
    }
}
