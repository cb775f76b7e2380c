//! Symbol types for automata transitions.

/// A symbol identifier represented as a u32.
/// The special value `EPSILON` represents an epsilon (empty) transition.
pub type SymbolId = u32;

/// Special symbol ID representing epsilon (empty) transitions.
/// We use u32::MAX as the epsilon marker; it is above the highest
/// Unicode scalar value, so it can never collide with a real symbol.
pub const EPSILON: SymbolId = u32::MAX;

/// Check if a symbol is an epsilon transition.
#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Map an input character to its symbol ID.
#[inline]
pub fn symbol(c: char) -> SymbolId {
    c as SymbolId
}
