//! Compiles a restricted regular-expression syntax into a finite-state
//! matcher through the classic automata pipeline:
//! - Parsing into a token tree (literals, `*` `+` `?`, groups,
//!   alternation, backslash escapes)
//! - NFA construction with epsilon transitions
//! - Epsilon-transition removal
//! - Determinization via subset construction
//! - Linear DFA-driven matching
//!
//! Each stage consumes only the previous stage's output, and every table
//! is immutable once built; a [`DFA`] can be shared freely across threads
//! for matching.
//!
//! ```
//! use regex_dfa::Regex;
//!
//! let re = Regex::new("a+b+c").unwrap();
//! assert!(re.is_match("aaabbc"));
//! assert!(!re.is_match("aabbbd"));
//! ```

pub mod dfa;
pub mod elimination;
pub mod nfa;
pub mod parser;
pub mod state;
pub mod subset_construction;
pub mod symbol;

pub use dfa::DFA;
pub use nfa::EpsilonNFA;
pub use parser::{parse, PatternError, Token};

use log::debug;

/// A pattern compiled down to a DFA, ready for matching.
#[derive(Debug, Clone)]
pub struct Regex {
    dfa: DFA,
}

impl Regex {
    /// Compile a pattern through the full pipeline.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let tokens = parser::parse(pattern)?;
        debug!("parsed {pattern:?} into {} top-level tokens", tokens.len());

        let nfa = EpsilonNFA::from_tokens(&tokens)?;
        debug!("built NFA with {} states", nfa.num_states());

        let eliminated = elimination::remove_epsilon_transitions(&nfa);
        let dfa = subset_construction::subset_construction(&nfa, &eliminated);
        debug!("determinized into DFA with {} states", dfa.num_states());

        Ok(Self { dfa })
    }

    /// Test whether the whole input belongs to the pattern's language.
    pub fn is_match(&self, input: &str) -> bool {
        self.dfa.accepts(input)
    }

    /// Access the underlying DFA.
    pub fn dfa(&self) -> &DFA {
        &self.dfa
    }
}
