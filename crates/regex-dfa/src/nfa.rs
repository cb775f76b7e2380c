//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation and
//! the token-driven builder that constructs one from a parsed pattern.

use crate::parser::{PatternError, Token};
use crate::state::{StateId, StateSet};
use crate::symbol::{is_epsilon, symbol, SymbolId, EPSILON};
use indexmap::IndexSet;
use std::collections::HashMap;

/// Transitions: (source, symbol) -> set of destination states.
/// For epsilon transitions, symbol == EPSILON.
pub type TransitionTable = HashMap<(StateId, SymbolId), StateSet>;

/// An Epsilon Non-deterministic Finite Automaton.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    /// The designated initial state (always 0 for built patterns)
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// The transition table
    transitions: TransitionTable,
    /// All symbols used (excluding epsilon), in insertion order
    alphabet: IndexSet<SymbolId>,
    /// Cached epsilon closures for each state
    epsilon_closures: Option<Vec<StateSet>>,
}

impl EpsilonNFA {
    /// Create a new empty epsilon-NFA with the single state 0.
    pub fn new() -> Self {
        Self {
            num_states: 1,
            start_state: 0,
            final_states: StateSet::with_capacity(16),
            transitions: TransitionTable::new(),
            alphabet: IndexSet::new(),
            epsilon_closures: None,
        }
    }

    /// Build an NFA from a parsed token sequence.
    ///
    /// State ids are allocated by a single counter threaded through the
    /// recursion: one fresh state per literal, per quantifier, and per
    /// alternation fork/join point. The state reached after the last
    /// token becomes the sole accepting state.
    pub fn from_tokens(tokens: &[Token]) -> Result<Self, PatternError> {
        let mut builder = Builder {
            nfa: EpsilonNFA::new(),
            next: 1,
        };
        let last = builder.sequence(tokens, 0)?;
        let mut nfa = builder.nfa;
        nfa.add_final_state(last);
        nfa.compute_epsilon_closures();
        Ok(nfa)
    }

    /// Ensure a state exists, expanding num_states if needed.
    fn ensure_state(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
            // Invalidate cached epsilon closures
            self.epsilon_closures = None;
        }
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.ensure_state(source);
        self.ensure_state(destination);

        if !is_epsilon(symbol) {
            self.alphabet.insert(symbol);
        }

        self.transitions
            .entry((source, symbol))
            .or_insert_with(|| StateSet::with_capacity(self.num_states as usize))
            .insert(destination);

        // Invalidate cached epsilon closures
        self.epsilon_closures = None;
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.final_states.insert(state);
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the initial state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet (all symbols except epsilon).
    pub fn alphabet(&self) -> &IndexSet<SymbolId> {
        &self.alphabet
    }

    /// Get the raw transition table.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Compute the epsilon closure of a single state using DFS.
    fn epsilon_closure_single(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if closure.contains(s) {
                continue;
            }
            closure.insert(s);

            // Follow epsilon transitions
            if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                for dest in destinations.iter() {
                    if !closure.contains(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Compute epsilon closures for all states (cached).
    pub fn compute_epsilon_closures(&mut self) {
        if self.epsilon_closures.is_some() {
            return;
        }

        let mut closures = Vec::with_capacity(self.num_states as usize);
        for state in 0..self.num_states {
            closures.push(self.epsilon_closure_single(state));
        }
        self.epsilon_closures = Some(closures);
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);

        if let Some(cached) = &self.epsilon_closures {
            // Use cached closures
            for state in states.iter() {
                if (state as usize) < cached.len() {
                    closure.union_with(&cached[state as usize]);
                }
            }
        } else {
            // Compute on-the-fly using DFS
            let mut stack: Vec<StateId> = states.iter().collect();

            while let Some(s) = stack.pop() {
                if closure.contains(s) {
                    continue;
                }
                closure.insert(s);

                if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                    for dest in destinations.iter() {
                        if !closure.contains(dest) {
                            stack.push(dest);
                        }
                    }
                }
            }
        }

        closure
    }

    /// Get the epsilon closure of the initial state.
    pub fn start_closure(&self) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(
            self.start_state,
            self.num_states as usize,
        ))
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        assert!(!is_epsilon(symbol), "Use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states as usize);

        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }

        self.epsilon_closure(&reached)
    }

    /// Simulate the NFA directly against an input string.
    ///
    /// Tracks the set of currently possible states (closure / move /
    /// closure) one character at a time.
    pub fn simulate(&self, input: &str) -> bool {
        let mut current = self.start_closure();

        for c in input.chars() {
            current = self.move_on_symbol(&current, symbol(c));
            if current.is_empty() {
                return false;
            }
        }

        current.intersects(&self.final_states)
    }
}

impl Default for EpsilonNFA {
    fn default() -> Self {
        Self::new()
    }
}

/// Incrementally allocates states and transitions while walking a token
/// sequence. `next` is the next free state id, shared across recursion.
struct Builder {
    nfa: EpsilonNFA,
    next: StateId,
}

impl Builder {
    fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Build a full sequence, splitting on top-level alternation markers.
    ///
    /// With alternation, `start` acts as the shared epsilon-predecessor:
    /// it fans out to a fresh entry state per branch, and all branch ends
    /// converge on a fresh join state, which becomes the reached state.
    fn sequence(&mut self, tokens: &[Token], start: StateId) -> Result<StateId, PatternError> {
        if !tokens.iter().any(|t| matches!(t, Token::Alternation)) {
            return self.concat(tokens, start);
        }

        let mut ends = Vec::new();
        for branch in tokens.split(|t| matches!(t, Token::Alternation)) {
            let entry = self.fresh();
            self.nfa.add_epsilon_transition(start, entry);
            ends.push(self.concat(branch, entry)?);
        }

        let join = self.fresh();
        for end in ends {
            self.nfa.add_epsilon_transition(end, join);
        }
        Ok(join)
    }

    /// Build an alternation-free run of tokens, returning the reached state.
    ///
    /// `elem_start` tracks where the most recent literal or group element
    /// began; quantifiers loop back to and skip from that state, so a
    /// quantified group repeats as a whole. For a single literal this is
    /// simply the previous state.
    fn concat(&mut self, tokens: &[Token], start: StateId) -> Result<StateId, PatternError> {
        let mut current = start;
        let mut elem_start: Option<StateId> = None;

        for token in tokens {
            match token {
                Token::Literal(c) | Token::Escaped(c) => {
                    let next = self.fresh();
                    self.nfa.add_transition(current, symbol(*c), next);
                    elem_start = Some(current);
                    current = next;
                }
                Token::Group(inner) => {
                    elem_start = Some(current);
                    current = self.sequence(inner, current)?;
                }
                Token::Quantifier(q) => {
                    let Some(entry) = elem_start else {
                        return Err(PatternError::DanglingQuantifier { quantifier: *q });
                    };
                    let next = self.fresh();
                    match q {
                        '+' => {
                            // repeat the element, or continue
                            self.nfa.add_epsilon_transition(current, entry);
                            self.nfa.add_epsilon_transition(current, next);
                        }
                        '?' => {
                            // skip the element, or continue after it
                            self.nfa.add_epsilon_transition(entry, next);
                            self.nfa.add_epsilon_transition(current, next);
                        }
                        '*' => {
                            self.nfa.add_epsilon_transition(current, entry);
                            self.nfa.add_epsilon_transition(current, next);
                            self.nfa.add_epsilon_transition(entry, next);
                        }
                        _ => unreachable!("parser emits only *, + and ?"),
                    }
                    current = next;
                }
                Token::Alternation => {
                    unreachable!("alternation branches are split before concatenation")
                }
            }
        }

        Ok(current)
    }
}
