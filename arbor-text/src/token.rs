//! Delimiter-based tokenization with character positions

use std::fmt;

/// A run of non-delimiter characters and where it sits in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The characters of the token
    pub text: String,
    /// Character index of the first character
    pub start: usize,
    /// Character index one past the last character
    pub end: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]\"{}\"", self.start, self.text)
    }
}

/// Split `text` into maximal runs of characters not found in `delimiters`.
///
/// Delimiter runs of any length separate tokens and never produce empty
/// tokens. Positions are character indices into `text`.
pub fn tokenize_with_positions(text: &str, delimiters: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<Token> = None;

    for (pos, ch) in text.chars().enumerate() {
        if delimiters.contains(ch) {
            tokens.extend(current.take());
            continue;
        }
        let token = current.get_or_insert_with(|| Token {
            text: String::new(),
            start: pos,
            end: pos,
        });
        token.text.push(ch);
        token.end = pos + 1;
    }
    tokens.extend(current);

    tokens
}
