//! Deterministic Finite Automaton (DFA) implementation and matching.

use crate::state::{StateId, StateSet};
use crate::symbol::{symbol, SymbolId};
use std::collections::HashMap;

/// A Deterministic Finite Automaton.
#[derive(Debug, Clone)]
pub struct DFA {
    /// Number of states
    num_states: StateId,
    /// Start state (None if no states exist)
    start_state: Option<StateId>,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, SymbolId), StateId>,
    /// Mapping from DFA states to original NFA states (if created via
    /// subset construction)
    state_mapping: Option<HashMap<StateId, Vec<StateId>>>,
}

impl DFA {
    /// Create a new empty DFA.
    pub fn new() -> Self {
        Self {
            num_states: 0,
            start_state: None,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            state_mapping: None,
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add a transition.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.transitions.insert((source, symbol), destination);
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state.
    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Set the state mapping from original NFA states.
    pub fn set_state_mapping(&mut self, mapping: HashMap<StateId, Vec<StateId>>) {
        self.state_mapping = Some(mapping);
    }

    /// Get the state mapping.
    pub fn state_mapping(&self) -> Option<&HashMap<StateId, Vec<StateId>>> {
        self.state_mapping.as_ref()
    }

    /// Run the DFA over an input string and report acceptance.
    ///
    /// One table lookup per input character, no backtracking. A missing
    /// transition rejects immediately; reaching an accepting state
    /// mid-input does not stop the scan.
    pub fn accepts(&self, input: &str) -> bool {
        let Some(mut current) = self.start_state else {
            return false;
        };

        for c in input.chars() {
            match self.transition(current, symbol(c)) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.final_states.contains(current)
    }
}

impl Default for DFA {
    fn default() -> Self {
        Self::new()
    }
}
