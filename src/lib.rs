//! Per-character tokenizer for a small assignment language, plus a variable runtime.
//!

pub mod lexer;

pub mod runtime;

pub use lexer::{merge, normalize, scan, tokenize, LexErr, LexResult, Lexeme, Token, TokenKind};
pub use runtime::{Declaration, Runtime, RuntimeErr, RuntimeResult, VariableType};

/// Install a `tracing_subscriber::fmt` subscriber as the global default.
///
/// Does nothing if a global subscriber is already set.
#[cfg(feature = "tracing-subscriber")]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().try_init();
}

#[cfg(test)]
pub(crate) fn test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
