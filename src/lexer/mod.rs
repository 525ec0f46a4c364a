//! Support for splitting assignment-language source into classified characters.

pub use lexeme::{merge, Lexeme};
pub use token::{normalize, scan, tokenize, Scan, Scanner, Step, Token, TokenKind};

mod lexeme;
mod token;


/// Error type if a tokenize call does not complete.
///
/// The scanner itself never fails; every character either maps to a token or is dropped.
/// The one condition it reports is reaching the end of input with a string still open.
/// Like a reader that runs out of input mid-expression, more input may fix this,
/// so the tokens scanned so far are handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErr {
    Unterminated {
        /// Index of the opening quote in the normalized source.
        start: usize,
        tokens: Vec<Token>,
    },
}

impl std::fmt::Display for LexErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            LexErr::Unterminated { start, .. } => {
                write!(f, "incomplete input: unterminated string literal starting at index {start}")
            }
        }
    }
}

impl std::error::Error for LexErr {}

impl LexErr {
    /// Whether more input could complete the read.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, LexErr::Unterminated { .. })
    }

    /// Recover the tokens scanned before the error, discarding the diagnosis.
    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            LexErr::Unterminated { tokens, .. } => tokens,
        }
    }
}

/// The main result type for this module.
pub type LexResult<T> = Result<T, LexErr>;
