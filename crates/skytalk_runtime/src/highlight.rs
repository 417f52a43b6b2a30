//! Syntax highlighting for the REPL.

use std::borrow::Cow;

use skytalk_foundation::ControlGlyphs;
use skytalk_parser::{CommandRegistry, validators};

/// Highlighter for operator transmissions.
#[derive(Clone, Debug, Default)]
pub struct TransmissionHighlighter {
    registry: CommandRegistry,
    glyphs: ControlGlyphs,
}

impl TransmissionHighlighter {
    /// Creates a highlighter.
    #[must_use]
    pub const fn new(registry: CommandRegistry, glyphs: ControlGlyphs) -> Self {
        Self { registry, glyphs }
    }

    /// Highlight a line of input.
    ///
    /// Whitespace is kept as typed so cursor positions stay valid.
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut word = String::new();
        let mut first = true;

        for c in line.chars() {
            if c.is_whitespace() {
                self.push_word(&mut result, &word, first);
                if !word.is_empty() {
                    first = false;
                }
                word.clear();
                result.push(c);
            } else {
                word.push(c);
            }
        }
        self.push_word(&mut result, &word, first);

        Cow::Owned(result)
    }

    fn push_word(&self, result: &mut String, word: &str, first: bool) {
        if word.is_empty() {
            return;
        }

        // a control glyph may be glued to the identifier that follows it
        let mut rest = word;
        if first {
            if let Some(glyph) = word.chars().next().filter(|c| self.glyphs.is_control(*c)) {
                result.push_str("\x1b[1;33m"); // bold yellow
                result.push(glyph);
                result.push_str("\x1b[0m");
                rest = &word[glyph.len_utf8()..];
            }
        }
        if rest.is_empty() {
            return;
        }

        let lowered = rest.to_lowercase();
        let color = if validators::identifier(rest).is_some() {
            "\x1b[1;36m" // bold cyan
        } else if self.registry.lookup(&lowered).is_some() {
            "\x1b[32m" // green
        } else if rest.chars().all(|c| c.is_ascii_digit()) {
            "\x1b[35m" // magenta
        } else {
            ""
        };

        if color.is_empty() {
            result.push_str(rest);
        } else {
            result.push_str(color);
            result.push_str(rest);
            result.push_str("\x1b[0m");
        }
    }
}
