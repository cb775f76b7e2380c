//! Pattern parser: turns a regex string into a token sequence.

use thiserror::Error;

/// Errors produced while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// An opening `(` with no matching `)`.
    #[error("unterminated group opened at position {position}")]
    UnterminatedGroup { position: usize },
    /// A `*`, `+` or `?` with no literal or group in front of it.
    #[error("quantifier `{quantifier}` has no preceding element")]
    DanglingQuantifier { quantifier: char },
}

/// One element of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Matches exactly one occurrence of the character.
    Literal(char),
    /// One of `*`, `+`, `?`; modifies the element immediately before it.
    Quantifier(char),
    /// A parenthesized sub-pattern.
    Group(Vec<Token>),
    /// The `|` marker separating alternative branches.
    Alternation,
    /// A literal produced by a preceding backslash.
    Escaped(char),
}

/// Parse a pattern into a token sequence.
///
/// Scans left to right with a single cursor and no backtracking.
/// Parenthesized groups are matched by bracket-depth counting and parsed
/// recursively. An unterminated group is an error.
pub fn parse(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    parse_chars(&chars, 0)
}

/// `offset` is the position of `chars[0]` in the original pattern, used
/// for error reporting from recursive group parses.
fn parse_chars(chars: &[char], offset: usize) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c @ ('*' | '+' | '?') => tokens.push(Token::Quantifier(c)),
            '(' => {
                let mut depth = 1;
                let mut j = i + 1;
                while j < chars.len() && depth > 0 {
                    match chars[j] {
                        '(' => depth += 1,
                        ')' => depth -= 1,
                        _ => {}
                    }
                    j += 1;
                }
                if depth > 0 {
                    return Err(PatternError::UnterminatedGroup {
                        position: offset + i,
                    });
                }
                // The matching `)` sits at j - 1; the group body is the
                // substring strictly between the parentheses.
                let inner = parse_chars(&chars[i + 1..j - 1], offset + i + 1)?;
                tokens.push(Token::Group(inner));
                i = j - 1;
            }
            '|' => tokens.push(Token::Alternation),
            '\\' => {
                if i + 1 < chars.len() {
                    tokens.push(Token::Escaped(chars[i + 1]));
                    i += 1;
                } else {
                    // A trailing backslash degrades to a literal one.
                    tokens.push(Token::Literal('\\'));
                }
            }
            c => tokens.push(Token::Literal(c)),
        }
        i += 1;
    }

    Ok(tokens)
}
