//! Epsilon-transition removal.

use crate::nfa::{EpsilonNFA, TransitionTable};
use crate::state::{StateId, StateSet};

/// Rewrite the NFA's transition table so that every entry is keyed by a
/// real symbol.
///
/// For every state `s` that appears as a transition source, and every
/// member `m` of its (reflexive) epsilon closure, each non-epsilon
/// transition out of `m` is folded into the output entry for `s`. The
/// result describes exactly the states reachable from `s` after any
/// number of epsilon moves followed by one symbol.
///
/// States with no outgoing transitions produce no entries; they are
/// implicit dead ends.
pub fn remove_epsilon_transitions(nfa: &EpsilonNFA) -> TransitionTable {
    let mut eliminated = TransitionTable::new();

    let mut sources: Vec<StateId> = nfa.transitions().keys().map(|&(src, _)| src).collect();
    sources.sort_unstable();
    sources.dedup();

    for &source in &sources {
        let closure =
            nfa.epsilon_closure(&StateSet::singleton(source, nfa.num_states() as usize));

        for member in closure.iter() {
            for &sym in nfa.alphabet() {
                if let Some(destinations) = nfa.transitions().get(&(member, sym)) {
                    eliminated
                        .entry((source, sym))
                        .or_insert_with(|| StateSet::with_capacity(nfa.num_states() as usize))
                        .union_with(destinations);
                }
            }
        }
    }

    eliminated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::symbol::{is_epsilon, symbol};

    fn build(pattern: &str) -> EpsilonNFA {
        EpsilonNFA::from_tokens(&parse(pattern).unwrap()).unwrap()
    }

    #[test]
    fn test_no_epsilon_entries_remain() {
        let nfa = build("a*b+c?");
        let eliminated = remove_epsilon_transitions(&nfa);

        assert!(!eliminated.is_empty());
        for &(_, sym) in eliminated.keys() {
            assert!(!is_epsilon(sym));
        }
    }

    #[test]
    fn test_plus_chain_table() {
        // a+b+c: the `+` loop epsilons fold into symbol moves
        let nfa = build("a+b+c");
        let eliminated = remove_epsilon_transitions(&nfa);

        let entry = |s, c| {
            eliminated
                .get(&(s, symbol(c)))
                .map(|set| set.to_vec())
                .unwrap_or_default()
        };

        assert_eq!(entry(0, 'a'), vec![1]);
        // State 1 reaches 0 and 2 via epsilon, so it moves on both a and b
        assert_eq!(entry(1, 'a'), vec![1]);
        assert_eq!(entry(1, 'b'), vec![3]);
        assert_eq!(entry(2, 'b'), vec![3]);
        assert_eq!(entry(3, 'b'), vec![3]);
        assert_eq!(entry(3, 'c'), vec![5]);
        assert_eq!(entry(4, 'c'), vec![5]);
    }

    #[test]
    fn test_dead_end_state_absent() {
        // The accepting state of `ab` has no outgoing transitions
        let nfa = build("ab");
        let eliminated = remove_epsilon_transitions(&nfa);

        assert!(eliminated.keys().all(|&(src, _)| src != 2));
    }
}
