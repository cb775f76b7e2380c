//! Subset construction algorithm for converting an ε-NFA to a DFA.

use crate::dfa::DFA;
use crate::nfa::{EpsilonNFA, TransitionTable};
use crate::state::{StateId, StateSet};
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};

/// Determinize an NFA using the powerset construction.
///
/// Symbol moves are looked up in the epsilon-free `eliminated` table;
/// epsilon closures (for the seed state and after each consumed symbol)
/// traverse the original NFA's epsilon edges. Each composite state is a
/// set of NFA states, interned once under its canonical sorted rendering
/// so that structurally identical sets always collide to the same DFA
/// state.
pub fn subset_construction(nfa: &EpsilonNFA, eliminated: &TransitionTable) -> DFA {
    // Interning arena: canonical NFA state set -> small DFA state id
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = DFA::new();

    // The initial DFA state is the epsilon closure of the NFA start
    // state. Closures are reflexive, so it is never empty.
    let initial_set = nfa.start_closure();
    let initial_dfa_state = dfa.add_state();
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);
    dfa.set_start_state(initial_dfa_state);

    if initial_set.intersects(nfa.final_states()) {
        dfa.add_final_state(initial_dfa_state);
    }

    // Breadth-first worklist of unexplored composite states
    let mut worklist: VecDeque<(StateSet, StateId)> = VecDeque::new();
    worklist.push_back((initial_set, initial_dfa_state));

    while let Some((current_nfa_set, current_dfa_state)) = worklist.pop_front() {
        for &symbol in nfa.alphabet() {
            // Union of the eliminated table's moves over all members
            let mut reached = StateSet::with_capacity(nfa.num_states() as usize);
            for state in current_nfa_set.iter() {
                if let Some(destinations) = eliminated.get(&(state, symbol)) {
                    reached.union_with(destinations);
                }
            }

            if reached.is_empty() {
                // No transition on this symbol; the DFA entry stays absent
                continue;
            }

            // Extend by epsilon moves taken after the consumed symbol
            let next_nfa_set = nfa.epsilon_closure(&reached);
            let next_vec = next_nfa_set.to_vec();

            let next_dfa_state = if let Some(&existing) = state_mapping.get(&next_vec) {
                existing
            } else {
                let new_state = dfa.add_state();
                state_mapping.insert(next_vec, new_state);

                if next_nfa_set.intersects(nfa.final_states()) {
                    dfa.add_final_state(new_state);
                }

                worklist.push_back((next_nfa_set, new_state));
                new_state
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
        }
    }

    // Record which NFA states each DFA state stands for
    let inverse_mapping: HashMap<StateId, Vec<StateId>> = state_mapping
        .into_iter()
        .map(|(nfa_states, dfa_state)| (dfa_state, nfa_states))
        .collect();
    dfa.set_state_mapping(inverse_mapping);

    dfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elimination::remove_epsilon_transitions;
    use crate::parser::parse;
    use crate::symbol::symbol;

    fn determinize(pattern: &str) -> DFA {
        let nfa = EpsilonNFA::from_tokens(&parse(pattern).unwrap()).unwrap();
        let eliminated = remove_epsilon_transitions(&nfa);
        subset_construction(&nfa, &eliminated)
    }

    #[test]
    fn test_subset_construction_basic() {
        // NFA: 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
        let mut nfa = EpsilonNFA::new();
        nfa.add_transition(0, symbol('a'), 1);
        nfa.add_transition(0, symbol('a'), 2);
        nfa.add_transition(1, symbol('b'), 3);
        nfa.add_transition(2, symbol('b'), 3);
        nfa.add_final_state(3);

        let eliminated = remove_epsilon_transitions(&nfa);
        let dfa = subset_construction(&nfa, &eliminated);

        // {0} -a-> {1,2} -b-> {3}: three composite states
        assert_eq!(dfa.num_states(), 3);
        assert!(dfa.accepts("ab"));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.accepts("abb"));
    }

    #[test]
    fn test_subset_construction_with_epsilon() {
        // NFA: 0 -ε-> 1 -a-> 2(final)
        let mut nfa = EpsilonNFA::new();
        nfa.add_epsilon_transition(0, 1);
        nfa.add_transition(1, symbol('a'), 2);
        nfa.add_final_state(2);

        let eliminated = remove_epsilon_transitions(&nfa);
        let dfa = subset_construction(&nfa, &eliminated);

        // Initial DFA state is the closure {0, 1}
        let mapping = dfa.state_mapping().unwrap();
        assert_eq!(mapping[&dfa.start_state().unwrap()], vec![0, 1]);
        assert!(dfa.accepts("a"));
        assert!(!dfa.accepts(""));
    }

    #[test]
    fn test_same_subset_interns_to_same_state() {
        // (a|b)*: both branches converge on the same composite states,
        // so the DFA stays small instead of re-exploring
        let dfa = determinize("(a|b)*");

        assert!(dfa.num_states() <= 3);
        assert!(dfa.accepts(""));
        assert!(dfa.accepts("abba"));
        assert!(!dfa.accepts("abc"));
    }

    #[test]
    fn test_determinization_idempotent_behavior() {
        let nfa = EpsilonNFA::from_tokens(&parse("a+b+c").unwrap()).unwrap();
        let eliminated = remove_epsilon_transitions(&nfa);

        let first = subset_construction(&nfa, &eliminated);
        let second = subset_construction(&nfa, &eliminated);

        for input in ["", "abc", "aaabbc", "aaaaaa", "aabbbd", "abbbbcdddddd"] {
            assert_eq!(first.accepts(input), second.accepts(input));
        }
        assert_eq!(first.num_states(), second.num_states());
    }

    #[test]
    fn test_accepting_states_contain_nfa_final() {
        let dfa = determinize("a+b+c");
        let mapping = dfa.state_mapping().unwrap();

        // Every accepting DFA state includes NFA final state 5
        for state in dfa.final_states().iter() {
            assert!(mapping[&state].contains(&5));
        }
        assert!(!dfa.final_states().is_empty());
    }
}
