//! Module for classifying source characters into tokens.
//!
//! Tokens are exactly one character wide: consecutive word characters are _not_ merged
//! into an identifier here. See [`merge`](super::merge) for the re-joining step.

use std::iter::Enumerate;

use crate::lexer::{LexErr, LexResult};

/// The category of a single source character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Equals,
    Space,
    String,
    Word,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Equals => "EQUALS",
            TokenKind::Space => "SPACE",
            TokenKind::String => "STRING",
            TokenKind::Word => "WORD",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified character along with its position in the normalized source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    pub content: char,
    /// Offset in `char`s from the start of the normalized source.
    pub index: usize,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(content: char, index: usize, kind: TokenKind) -> Self {
        Token {
            content,
            index,
            kind,
        }
    }
}

/// What the scanner did with one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The character produced a token.
    Emit(Token),
    /// The character is a quote that opened a string. No token is produced for it.
    Open { content: char, index: usize },
    /// The character matched no class and was discarded.
    Drop { content: char, index: usize },
}

/// Trim each line of the source, then rejoin the lines.
///
/// Token indices refer to positions in this string, not in the original input.
pub fn normalize(source: &str) -> String {
    source.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    pub(super) fn word() -> &'static Regex {
        static WORD: OnceLock<Regex> = OnceLock::new();
        WORD.get_or_init(|| {
            // ASCII letters, digits, underscore.
            Regex::new(r"\A[[:word:]]\z").expect("could not compile regex for word character")
        })
    }
}

fn is_word(ch: char) -> bool {
    let mut buf = [0u8; 4];
    regex::word().is_match(ch.encode_utf8(&mut buf))
}

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Single-pass character classifier.
///
/// The only state carried between characters is whether a string is open
/// (and, for diagnostics, where it was opened).
pub struct Scanner<I>
where
    I: Iterator<Item = char>,
{
    input: Enumerate<I>,
    open_quote: Option<usize>,
}

impl<I> Scanner<I>
where
    I: Iterator<Item = char>,
{
    pub fn new(input: I) -> Self {
        Scanner {
            input: input.enumerate(),
            open_quote: None,
        }
    }

    /// Index of the quote that opened the current string, if one is open.
    pub fn open_string(&self) -> Option<usize> {
        self.open_quote
    }

    fn classify(&mut self, index: usize, ch: char) -> Step {
        if is_quote(ch) {
            // Any quote closes a string, whichever quote opened it.
            // A closing quote is not a word, space or equals, so it yields exactly one token.
            return match self.open_quote.take() {
                None => {
                    self.open_quote = Some(index);
                    Step::Open { content: ch, index }
                }
                Some(_) => Step::Emit(Token::new(ch, index, TokenKind::String)),
            };
        }

        let inside_string = self.open_quote.is_some();
        let kind = if is_word(ch) && !inside_string {
            Some(TokenKind::Word)
        } else if inside_string {
            Some(TokenKind::String)
        } else if ch == ' ' {
            Some(TokenKind::Space)
        } else if ch == '=' {
            Some(TokenKind::Equals)
        } else {
            None
        };

        match kind {
            Some(kind) => Step::Emit(Token::new(ch, index, kind)),
            None => Step::Drop { content: ch, index },
        }
    }
}

impl<I> Iterator for Scanner<I>
where
    I: Iterator<Item = char>,
{
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, ch) = self.input.next()?;
        Some(self.classify(index, ch))
    }
}

/// The complete outcome of scanning a source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub normalized: String,
    pub steps: Vec<Step>,
    /// Index of the opening quote, if the input ended inside a string.
    pub unterminated: Option<usize>,
}

impl Scan {
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Emit(token) => Some(*token),
            _ => None,
        })
    }

    /// Characters that matched no class, with their indices.
    pub fn dropped(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Drop { content, index } => Some((*index, *content)),
            _ => None,
        })
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens().collect()
    }
}

/// Normalize and classify every character of the source. Never fails.
pub fn scan(source: &str) -> Scan {
    let normalized = normalize(source);
    let mut scanner = Scanner::new(normalized.chars());
    let steps: Vec<Step> = scanner.by_ref().collect();
    let unterminated = scanner.open_string();
    Scan {
        normalized,
        steps,
        unterminated,
    }
}

/// Split the source into its constituent one-character tokens.
///
/// Fails only if the input ends with a string literal still open.
pub fn tokenize(source: &str) -> LexResult<Vec<Token>> {
    let scan = scan(source);
    tracing::trace!(
        "scanned {} characters: {} tokens, {} dropped",
        scan.steps.len(),
        scan.tokens().count(),
        scan.dropped().count()
    );

    match scan.unterminated {
        None => Ok(scan.into_tokens()),
        Some(start) => {
            tracing::debug!("string opened at index {} was never closed", start);
            Err(LexErr::Unterminated {
                start,
                tokens: scan.into_tokens(),
            })
        }
    }
}
