//! Re-joining one-character tokens into multi-character lexemes.
//!
//! The scanner never merges: `abc` is three `Word` tokens. A parser downstream
//! wants `abc` as one identifier, so it runs the tokens through [`merge`] first.
//! Two tokens join when they have the same kind and sit at adjacent indices.
//! An opening quote or a dropped character produces no token, which leaves a gap,
//! so `x "a"` yields `Word`, `Space`, `String` and not a single run.

use crate::lexer::{Token, TokenKind};

/// A run of same-kind tokens at contiguous indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub text: String,
    /// Index of the first character, in the normalized source.
    pub start: usize,
    /// One past the index of the last character.
    pub end: usize,
}

impl Lexeme {
    /// Contents of a string lexeme, without its closing quote.
    ///
    /// Returns None for non-string lexemes.
    pub fn string_value(&self) -> Option<&str> {
        if self.kind != TokenKind::String {
            return None;
        }
        Some(
            self.text
                .strip_suffix(|c: char| c == '"' || c == '\'')
                .unwrap_or(&self.text),
        )
    }

    fn extends_with(&self, token: &Token) -> bool {
        self.kind == token.kind && self.end == token.index
    }
}

impl From<&Token> for Lexeme {
    fn from(token: &Token) -> Self {
        Lexeme {
            kind: token.kind,
            text: token.content.to_string(),
            start: token.index,
            end: token.index + 1,
        }
    }
}

/// Merge tokens into lexemes, preserving order.
pub fn merge(tokens: &[Token]) -> Vec<Lexeme> {
    let mut lexemes: Vec<Lexeme> = Vec::new();
    for token in tokens {
        match lexemes.last_mut() {
            Some(last) if last.extends_with(token) => {
                last.text.push(token.content);
                last.end += 1;
            }
            _ => lexemes.push(Lexeme::from(token)),
        }
    }
    tracing::trace!("merged {} tokens into {} lexemes", tokens.len(), lexemes.len());
    lexemes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, LexResult};

    fn summary(lexemes: &[Lexeme]) -> Vec<(TokenKind, &str)> {
        lexemes.iter().map(|l| (l.kind, l.text.as_str())).collect()
    }

    #[test]
    fn merge_assignment() -> LexResult<()> {
        let lexemes = merge(&tokenize("x = 10")?);
        assert_eq!(
            summary(&lexemes),
            vec![
                (TokenKind::Word, "x"),
                (TokenKind::Space, " "),
                (TokenKind::Equals, "="),
                (TokenKind::Space, " "),
                (TokenKind::Word, "10"),
            ]
        );
        assert_eq!((lexemes[4].start, lexemes[4].end), (4, 6));
        Ok(())
    }

    #[test]
    fn merge_string_declaration() -> LexResult<()> {
        let lexemes = merge(&tokenize(r#"first_name = "Ada Lovelace""#)?);
        assert_eq!(lexemes.len(), 5);
        assert_eq!(lexemes[0].text, "first_name");
        let value = &lexemes[4];
        assert_eq!(value.kind, TokenKind::String);
        assert_eq!(value.text, "Ada Lovelace\"");
        assert_eq!(value.string_value(), Some("Ada Lovelace"));
        // The opening quote sits at 13 and has no token.
        assert_eq!(value.start, 14);
        Ok(())
    }

    #[test]
    fn adjacent_strings_stay_separate() -> LexResult<()> {
        let lexemes = merge(&tokenize(r#""a""b""#)?);
        assert_eq!(
            summary(&lexemes),
            vec![(TokenKind::String, "a\""), (TokenKind::String, "b\"")]
        );
        Ok(())
    }

    #[test]
    fn empty_string_value() -> LexResult<()> {
        let lexemes = merge(&tokenize("s = ''")?);
        assert_eq!(lexemes.last().and_then(Lexeme::string_value), Some(""));
        Ok(())
    }

    #[test]
    fn dropped_characters_split_runs() -> LexResult<()> {
        let lexemes = merge(&tokenize("a.b\nc")?);
        assert_eq!(
            summary(&lexemes),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Word, "b"),
                (TokenKind::Word, "c"),
            ]
        );
        Ok(())
    }

    #[test]
    fn merge_nothing() {
        assert!(merge(&[]).is_empty());
        assert_eq!(Lexeme::from(&Token::new('=', 3, TokenKind::Equals)).string_value(), None);
    }
}
