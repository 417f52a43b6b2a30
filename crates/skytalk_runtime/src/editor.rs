//! The operator's terminal.
//!
//! The console's own keystroke handling models a bare terminal. On a real
//! terminal rustyline does the editing, so this module hands it the
//! interpreter's completion and highlighting. The REPL only talks to the
//! [`OperatorTerminal`] trait so scripted tests can stand in for a person.

use std::borrow::Cow;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::history::DefaultHistory;
use rustyline::{Config, Context, Editor, Helper, Hinter, Validator};
use skytalk_foundation::{ControlGlyphs, Error, Result};
use skytalk_parser::{Autocompleter, CommandRegistry, StaticDirectory};

use crate::highlight::TransmissionHighlighter;

/// Recall depth when the console config leaves history unbounded.
const UNBOUNDED_RECALL: usize = 1000;

/// What the operator did at the prompt.
#[derive(Debug)]
pub enum OperatorInput {
    /// A finished line, not yet parsed.
    Line(String),
    /// Ctrl+C: clear the buffer and keep going.
    Cancel,
    /// Ctrl+D or a closed stdin: the shift is over.
    Closed,
}

/// Where transmissions come from.
pub trait OperatorTerminal {
    /// Shows `prompt` and waits for the operator.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Terminal`](skytalk_foundation::ErrorKind::Terminal)
    /// if the terminal cannot be read.
    fn prompt(&mut self, prompt: &str) -> Result<OperatorInput>;

    /// Makes a submitted line available for recall.
    fn recall(&mut self, line: &str);

    /// Swaps in a fresh snapshot of callsigns, airports and beacons.
    fn refresh_directory(&mut self, directory: StaticDirectory);
}

#[derive(Helper, Hinter, Validator)]
struct TowerHelper {
    autocompleter: Autocompleter,
    directory: StaticDirectory,
    highlighter: TransmissionHighlighter,
}

impl TowerHelper {
    /// Suffix to insert at the cursor; text after the cursor is ignored.
    fn suggestions(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let head = line.get(..pos).unwrap_or(line);
        let pairs = self
            .autocompleter
            .complete(head, &self.directory)
            .map(|suffix| Pair {
                display: suffix.clone(),
                replacement: suffix,
            })
            .into_iter()
            .collect();
        (pos, pairs)
    }
}

impl Completer for TowerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.suggestions(line, pos))
    }
}

impl Highlighter for TowerHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    // Colours depend on whole words, so every keystroke repaints.
    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// The interactive terminal, backed by rustyline.
pub struct RustylineTerminal {
    editor: Editor<TowerHelper, DefaultHistory>,
}

impl RustylineTerminal {
    /// Sets up completion for `registry` and recall of `history_capacity`
    /// lines.
    ///
    /// # Errors
    ///
    /// Returns a terminal error if rustyline cannot attach to the tty.
    pub fn new(
        registry: CommandRegistry,
        glyphs: ControlGlyphs,
        history_capacity: Option<usize>,
    ) -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(history_capacity.unwrap_or(UNBOUNDED_RECALL))
            .map_err(|e| Error::terminal(e.to_string()))?
            .build();

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::terminal(e.to_string()))?;
        editor.set_helper(Some(TowerHelper {
            autocompleter: Autocompleter::new(registry, glyphs),
            directory: StaticDirectory::new(),
            highlighter: TransmissionHighlighter::new(registry, glyphs),
        }));

        Ok(Self { editor })
    }
}

impl OperatorTerminal for RustylineTerminal {
    fn prompt(&mut self, prompt: &str) -> Result<OperatorInput> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(OperatorInput::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(OperatorInput::Cancel),
            Err(ReadlineError::Eof) => Ok(OperatorInput::Closed),
            Err(e) => Err(Error::terminal(e.to_string())),
        }
    }

    fn recall(&mut self, line: &str) {
        // Duplicate or blank entries are refused silently.
        let _ = self.editor.add_history_entry(line);
    }

    fn refresh_directory(&mut self, directory: StaticDirectory) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.directory = directory;
        }
    }
}
