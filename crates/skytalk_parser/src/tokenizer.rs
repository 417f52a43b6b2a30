//! Input tokenization.
//!
//! Converts a raw transmission into a [`TokenCursor`] of lowercase words.

use std::borrow::Cow;

use skytalk_foundation::ControlGlyphs;

/// An explicit read position over an immutable token sequence.
///
/// Tokens are consumed front to back. The parser may push a token back
/// (the digits split off a condensed command); pushed-back tokens are read
/// before the next token of the sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenCursor {
    tokens: Vec<String>,
    position: usize,
    pushed_back: Vec<String>,
}

impl TokenCursor {
    /// Creates a cursor at the start of `tokens`.
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            position: 0,
            pushed_back: Vec::new(),
        }
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Option<String> {
        if let Some(token) = self.pushed_back.pop() {
            return Some(token);
        }
        let token = self.tokens.get(self.position)?.clone();
        self.position += 1;
        Some(token)
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.pushed_back
            .last()
            .or_else(|| self.tokens.get(self.position))
            .map(String::as_str)
    }

    /// Makes `token` the next token to be read.
    pub fn push_back(&mut self, token: String) {
        self.pushed_back.push(token);
    }

    /// Returns true once every token has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pushed_back.is_empty() && self.position == self.tokens.len()
    }

    /// Number of tokens of the token sequence consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Length of the token sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the token sequence had no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token sequence.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Tokenizes operator input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw line into a cursor.
    ///
    /// - Separates a leading control glyph from the word glued to it
    /// - Converts everything to lowercase
    /// - Splits on any run of whitespace
    #[must_use]
    pub fn tokenize(input: &str, glyphs: &ControlGlyphs) -> TokenCursor {
        let separated = Self::separate_glyph(input, glyphs);
        let tokens = separated
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        TokenCursor::new(tokens)
    }

    /// Inserts a space after a leading control glyph that is immediately
    /// followed by non-space content, so `.abc1234` reads as `. abc1234`.
    #[must_use]
    pub fn separate_glyph<'a>(input: &'a str, glyphs: &ControlGlyphs) -> Cow<'a, str> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(first), Some(second)) if glyphs.is_control(first) && !second.is_whitespace() => {
                let rest = &input[first.len_utf8()..];
                Cow::Owned(format!("{first} {rest}"))
            }
            _ => Cow::Borrowed(input),
        }
    }
}
