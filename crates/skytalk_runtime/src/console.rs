//! The operator console.
//!
//! Owns the line being typed, the history of submitted lines and the
//! transcript. Keystrokes edit the buffer; submitting it parses the line
//! and dispatches the result to the airspace.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use skytalk_foundation::{ConsoleConfig, Result};
use skytalk_parser::{
    Autocompleter, CommandParser, DispatchMode, ParseOutcome, SystemCommandName, Transmission,
};
use tracing::{debug, info};

use crate::dispatch::{Airspace, Rejection, StandardSystem, SystemReply, SystemTarget};
use crate::transcript::{Severity, Transcript, TranscriptEntry};

/// Prefix for lines the interpreter refused.
pub const REJECTION_PREFIX: &str = "You are doing it wrong! ";

/// Separates the speaker from what was said.
pub const PROMPT_SEPARATOR: &str = ">";

const EXECUTE_REPLIES: [&str; 5] = [
    "Roger that. Executing.",
    "Affirmative, initiating maneuver now.",
    "Roger, we're on it.",
    "Copy that.",
    "Okie dokie artichokie!",
];

const ENQUEUE_REPLIES: [&str; 4] = [
    "Roger that. Queued.",
    "Affirmative, command queued for execution.",
    "We'll do that as soon as possible.",
    "Copy that, command queued",
];

/// One editing event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Keystroke {
    /// Parse and dispatch the buffer.
    Submit,
    /// Clear the buffer.
    Cancel,
    /// Delete the last glyph, or with `word` the whole last word.
    Backspace {
        /// Keep deleting through the previous space
        word: bool,
    },
    /// Recall an older history entry.
    HistoryUp,
    /// Recall a newer history entry.
    HistoryDown,
    /// Append the autocompletion of the buffer.
    Complete,
    /// Typed text; only a single accepted character has any effect.
    Glyph(String),
}

/// Whether the session should go on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleSignal {
    /// Keep reading keystrokes.
    Continue,
    /// The operator asked to quit.
    Quit,
}

/// Picks affirmative radio replies.
#[derive(Clone, Debug)]
struct ReplyPicker {
    rng: ChaCha8Rng,
}

impl ReplyPicker {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, mode: DispatchMode) -> &'static str {
        let pool: &[&'static str] = match mode {
            DispatchMode::Enqueue => &ENQUEUE_REPLIES,
            DispatchMode::Execute | DispatchMode::System => &EXECUTE_REPLIES,
        };
        pool.choose(&mut self.rng).copied().unwrap_or("Roger.")
    }
}

/// Line editor state plus the interpreter it feeds.
pub struct Console {
    config: ConsoleConfig,
    parser: CommandParser,
    completer: Autocompleter,
    system: Box<dyn SystemTarget>,
    buffer: Vec<char>,
    history: VecDeque<String>,
    history_cursor: usize,
    transcript: Transcript,
    replies: ReplyPicker,
}

impl Console {
    /// Creates a console.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        config.validate()?;
        let parser = CommandParser::new(config.parser.clone());
        let registry = *parser.registry();
        let glyphs = config.parser.glyphs;
        Ok(Self {
            completer: Autocompleter::new(registry, glyphs),
            system: Box::new(StandardSystem::new(&registry, &glyphs)),
            transcript: Transcript::new(config.transcript_capacity),
            replies: ReplyPicker::new(config.seed),
            buffer: Vec::new(),
            history: VecDeque::new(),
            history_cursor: 0,
            parser,
            config,
        })
    }

    /// Replaces the system command handler.
    #[must_use]
    pub fn with_system_target(mut self, system: Box<dyn SystemTarget>) -> Self {
        self.system = system;
        self
    }

    /// The line being typed.
    #[must_use]
    pub fn buffer(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Submitted lines, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Position while browsing history; zero when not browsing.
    #[must_use]
    pub const fn history_cursor(&self) -> usize {
        self.history_cursor
    }

    /// The transcript.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The interpreter.
    #[must_use]
    pub const fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Handles one keystroke.
    pub fn handle_keystroke(
        &mut self,
        keystroke: Keystroke,
        airspace: &mut dyn Airspace,
    ) -> ConsoleSignal {
        match keystroke {
            Keystroke::Submit => return self.submit(airspace),
            Keystroke::Cancel => self.buffer.clear(),
            Keystroke::Backspace { word } => self.backspace(word),
            Keystroke::HistoryUp => self.history_up(),
            Keystroke::HistoryDown => self.history_down(),
            Keystroke::Complete => self.complete(airspace),
            Keystroke::Glyph(text) => self.type_text(&text),
        }
        ConsoleSignal::Continue
    }

    /// Replaces the buffer with `line` and submits it.
    ///
    /// Used by hosts whose line editing happens elsewhere.
    pub fn submit_line(&mut self, line: &str, airspace: &mut dyn Airspace) -> ConsoleSignal {
        self.buffer = line.chars().collect();
        self.submit(airspace)
    }

    fn submit(&mut self, airspace: &mut dyn Airspace) -> ConsoleSignal {
        let line = self.buffer();
        let transmission = match self.parser.parse(&line) {
            ParseOutcome::Empty => return ConsoleSignal::Continue,
            ParseOutcome::Rejected(err) => {
                debug!(%line, reason = %err, "line refused");
                self.write(Severity::Error, format!("{REJECTION_PREFIX}{err}"));
                None
            }
            ParseOutcome::Accepted(transmission) => Some(transmission),
        };

        self.remember(line.clone());
        self.buffer.clear();

        let Some(transmission) = transmission else {
            return ConsoleSignal::Continue;
        };
        self.write(
            Severity::Echo,
            format!("{} {PROMPT_SEPARATOR} {line}", self.config.callsign),
        );
        self.dispatch(&transmission, airspace)
    }

    fn dispatch(&mut self, transmission: &Transmission, airspace: &mut dyn Airspace) -> ConsoleSignal {
        match transmission {
            Transmission::System(command) => self.dispatch_system(*command),
            Transmission::Aircraft {
                mode,
                target,
                commands,
            } => {
                info!(%target, ?mode, commands = commands.len(), "dispatching");
                let result = match airspace.resolve(target) {
                    None => Err(Rejection::unknown_aircraft()),
                    Some(aircraft) if *mode == DispatchMode::Enqueue => aircraft.enqueue(commands),
                    Some(aircraft) => aircraft.execute(commands),
                };
                match result {
                    Ok(()) => {
                        let answer = self.replies.pick(*mode);
                        self.write(Severity::Reply, format!("{target} {PROMPT_SEPARATOR} {answer}"));
                    }
                    Err(rejection) => {
                        debug!(%target, reason = %rejection, "aircraft refused");
                        self.write(
                            Severity::Error,
                            format!("{target} {PROMPT_SEPARATOR} {rejection}"),
                        );
                    }
                }
                ConsoleSignal::Continue
            }
        }
    }

    fn dispatch_system(&mut self, command: SystemCommandName) -> ConsoleSignal {
        info!(%command, "system command");
        match self.system.handle(command) {
            SystemReply::Quit => ConsoleSignal::Quit,
            SystemReply::Lines(lines) => {
                for line in lines {
                    self.write(Severity::Info, line);
                }
                ConsoleSignal::Continue
            }
        }
    }

    fn write(&mut self, severity: Severity, text: String) {
        self.transcript.push(TranscriptEntry::new(severity, text));
    }

    fn remember(&mut self, line: String) {
        self.history.push_front(line);
        if let Some(capacity) = self.config.history_capacity {
            self.history.truncate(capacity);
        }
        self.history_cursor = 0;
    }

    fn backspace(&mut self, word: bool) {
        if self.buffer.pop().is_none() || !word {
            return;
        }
        while let Some(ch) = self.buffer.pop() {
            if ch == ' ' {
                break;
            }
        }
    }

    fn history_up(&mut self) {
        if let Some(entry) = self.history.get(self.history_cursor) {
            self.buffer = entry.chars().collect();
            self.history_cursor += 1;
        }
    }

    fn history_down(&mut self) {
        match self.history_cursor {
            0 => {}
            1 => {
                self.buffer.clear();
                self.history_cursor = 0;
            }
            cursor => {
                self.history_cursor = cursor - 1;
                if let Some(entry) = self.history.get(self.history_cursor - 1) {
                    self.buffer = entry.chars().collect();
                }
            }
        }
    }

    fn complete(&mut self, airspace: &dyn Airspace) {
        if let Some(suffix) = self.completer.complete(&self.buffer(), airspace) {
            self.buffer.extend(suffix.chars());
        }
    }

    fn type_text(&mut self, text: &str) {
        let mut chars = text.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return;
        };
        let glyphs = self.config.parser.glyphs;
        if !(ch.is_ascii_alphanumeric() || ch == ' ' || glyphs.is_control(ch)) {
            return;
        }
        if ch == ' ' && self.buffer.last().is_none_or(|last| *last == ' ') {
            return;
        }
        self.buffer.push(ch.to_ascii_uppercase());
        if glyphs.is_control(ch) {
            self.buffer.push(' ');
        }
    }
}
