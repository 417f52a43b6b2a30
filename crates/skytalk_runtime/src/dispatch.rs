//! Where accepted transmissions go.
//!
//! The console hands aircraft commands to a [`DispatchTarget`] found through
//! an [`Airspace`], and system commands to a [`SystemTarget`].

use skytalk_foundation::ControlGlyphs;
use skytalk_parser::{CommandRegistry, EntityDirectory, ParsedCommand, SystemCommandName};
use thiserror::Error;

/// A refusal from the addressed party after the line parsed cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Rejection {
    message: String,
}

impl Rejection {
    /// Creates a rejection with the text to show the operator.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The addressed aircraft is not in the airspace.
    #[must_use]
    pub fn unknown_aircraft() -> Self {
        Self::new("No such aircraft in the airspace.")
    }

    /// The text shown to the operator.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Something that can be commanded, typically an aircraft.
pub trait DispatchTarget {
    /// Acts on the commands now.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the commands cannot be carried out.
    fn execute(&mut self, commands: &[ParsedCommand]) -> Result<(), Rejection>;

    /// Appends the commands to the pending queue.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the commands cannot be queued.
    fn enqueue(&mut self, commands: &[ParsedCommand]) -> Result<(), Rejection>;
}

/// The world the console talks to.
pub trait Airspace: EntityDirectory {
    /// Finds the target with the given upper-case identifier.
    fn resolve(&mut self, identifier: &str) -> Option<&mut dyn DispatchTarget>;

    /// Advances the world by one step. Called once per submitted line.
    fn tick(&mut self) {}
}

/// What a system command asks of the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystemReply {
    /// End the session.
    Quit,
    /// Write these lines to the transcript.
    Lines(Vec<String>),
}

/// Handles system commands.
pub trait SystemTarget {
    /// Carries out a system command.
    fn handle(&mut self, command: SystemCommandName) -> SystemReply;
}

/// The built-in handling: `quit` ends the session, `help` lists commands.
#[derive(Clone, Debug)]
pub struct StandardSystem {
    help: Vec<String>,
}

impl StandardSystem {
    /// Creates the handler, building the help text from `registry`.
    #[must_use]
    pub fn new(registry: &CommandRegistry, glyphs: &ControlGlyphs) -> Self {
        Self {
            help: help_text(registry, glyphs),
        }
    }

    /// The lines written by `help`.
    #[must_use]
    pub fn help(&self) -> &[String] {
        &self.help
    }
}

impl Default for StandardSystem {
    fn default() -> Self {
        Self::new(&CommandRegistry::standard(), &ControlGlyphs::default())
    }
}

impl SystemTarget for StandardSystem {
    fn handle(&mut self, command: SystemCommandName) -> SystemReply {
        match command {
            SystemCommandName::Quit => SystemReply::Quit,
            SystemCommandName::Help => SystemReply::Lines(self.help.clone()),
        }
    }
}

/// One line per command: usage, then the other spellings.
#[must_use]
pub fn help_text(registry: &CommandRegistry, glyphs: &ControlGlyphs) -> Vec<String> {
    let mut lines = vec![format!(
        "<ICAO> <commands> executes, {}<ICAO> <commands> queues",
        glyphs.queue
    )];
    for spec in registry.commands() {
        let others: Vec<String> = spec
            .aliases
            .iter()
            .skip(1)
            .map(|alias| alias.to_uppercase())
            .collect();
        lines.push(format!("  {} ({})", spec.usage, others.join(", ")));
    }
    for spec in registry.system_commands() {
        let spellings: Vec<String> = spec.aliases.iter().map(|a| a.to_uppercase()).collect();
        lines.push(format!(
            "  {}{} {}",
            glyphs.system,
            spellings.join("|"),
            spec.summary
        ));
    }
    lines
}
