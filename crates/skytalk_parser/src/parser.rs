//! Main parser pipeline.
//!
//! Resolves the addressee of a transmission, then reads commands left to
//! right: alias lookup, fixed-arity arguments, validation, trailing flags.
//! Any failure rejects the whole line.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use skytalk_foundation::ParserConfig;
use thiserror::Error;
use tracing::debug;

use crate::command::{DispatchMode, ParsedCommand, Transmission};
use crate::registry::{CommandName, CommandRegistry, CommandSpec};
use crate::tokenizer::{InputTokenizer, TokenCursor};
use crate::validators;

static CONDENSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z])([0-9]{2,})$").expect("condensed pattern"));

/// Result of parsing one line of operator input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Blank line; nothing to do
    Empty,
    /// A valid transmission
    Accepted(Transmission),
    /// The line was refused
    Rejected(ParseError),
}

impl ParseOutcome {
    /// Returns true for an accepted transmission.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Returns the transmission, if accepted.
    #[must_use]
    pub fn transmission(&self) -> Option<&Transmission> {
        match self {
            Self::Accepted(tx) => Some(tx),
            _ => None,
        }
    }

    /// Returns the rejection, if refused.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Result<Transmission, ParseError>> for ParseOutcome {
    fn from(result: Result<Transmission, ParseError>) -> Self {
        match result {
            Ok(tx) => Self::Accepted(tx),
            Err(err) => Self::Rejected(err),
        }
    }
}

/// Why a line was refused. The `Display` form is shown to the operator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The addressee is not an aircraft identifier or control glyph.
    #[error("\"{0}\" is not a valid ICAO reference.")]
    InvalidTargetReference(String),
    /// A word is neither a command nor a flag of the preceding command.
    #[error("\"{0}\" is neither a command nor a flag.")]
    UnresolvedAlias(String),
    /// The line ended before all of a command's arguments were given.
    #[error("Not enough arguments for command \"{}\".", .0.as_str().to_uppercase())]
    ArgumentCountShortfall(CommandName),
    /// A command's arguments were refused by its validator.
    #[error("Parameters for \"{}\" command failed validation.", .0.as_str().to_uppercase())]
    ArgumentValidationFailure(CommandName),
    /// An aircraft was addressed but given no commands.
    #[error("No commands were issued to the aircraft.")]
    EmptyTransmission,
    /// `abort` cannot be queued.
    #[error("You can't queue abortion of a command.")]
    QueueAbortConflict,
    /// The same command appears twice in one transmission.
    #[error("You can't repeat commands in the same transmission.")]
    DuplicateCommandInTransmission,
    /// The commands are not a declared compatible combination.
    #[error("These commands cannot be performed at the same time.")]
    IncompatibleCommandCombination,
    /// The word after the system glyph is not a system command.
    #[error("Invalid system command! ({0})")]
    UnknownSystemCommand(String),
}

/// The command interpreter.
#[derive(Clone, Debug, Default)]
pub struct CommandParser {
    registry: CommandRegistry,
    config: ParserConfig,
}

impl CommandParser {
    /// Creates a parser over the standard registry.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            registry: CommandRegistry::standard(),
            config,
        }
    }

    /// Replaces the command registry.
    #[must_use]
    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Gets the command registry.
    #[must_use]
    pub const fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Gets the parser configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one line of operator input.
    #[must_use]
    pub fn parse(&self, input: &str) -> ParseOutcome {
        let mut tokens = InputTokenizer::tokenize(input, &self.config.glyphs);
        let outcome = self.parse_tokens(&mut tokens);
        match &outcome {
            ParseOutcome::Accepted(tx) => debug!(input, mode = ?tx.mode(), "transmission accepted"),
            ParseOutcome::Rejected(err) => debug!(input, reason = %err, "transmission rejected"),
            ParseOutcome::Empty => {}
        }
        outcome
    }

    /// Parses an already tokenized line.
    ///
    /// On acceptance the cursor is exhausted.
    pub fn parse_tokens(&self, tokens: &mut TokenCursor) -> ParseOutcome {
        let Some(first) = tokens.next_token() else {
            return ParseOutcome::Empty;
        };
        self.parse_transmission(first, tokens).into()
    }

    fn parse_transmission(
        &self,
        first: String,
        tokens: &mut TokenCursor,
    ) -> Result<Transmission, ParseError> {
        let glyphs = &self.config.glyphs;

        if let Some(target) = validators::identifier(&first) {
            return self.parse_aircraft_commands(DispatchMode::Execute, target, tokens);
        }
        if first.starts_with(glyphs.queue) {
            let reference = tokens.next_token().unwrap_or_default();
            let target = validators::identifier(&reference)
                .ok_or_else(|| ParseError::InvalidTargetReference(reference.to_uppercase()))?;
            return self.parse_aircraft_commands(DispatchMode::Enqueue, target, tokens);
        }
        if first.chars().eq(std::iter::once(glyphs.system)) {
            return self.parse_system_command(tokens);
        }
        Err(ParseError::InvalidTargetReference(first.to_uppercase()))
    }

    fn parse_system_command(&self, tokens: &mut TokenCursor) -> Result<Transmission, ParseError> {
        let issued = tokens.next_token().unwrap_or_default();
        let spec = self
            .registry
            .lookup_system(&issued)
            .ok_or_else(|| ParseError::UnknownSystemCommand(issued.to_uppercase()))?;
        if let Some(extra) = tokens.next_token() {
            return Err(ParseError::UnresolvedAlias(extra.to_uppercase()));
        }
        Ok(Transmission::System(spec.name))
    }

    fn parse_aircraft_commands(
        &self,
        mode: DispatchMode,
        target: String,
        tokens: &mut TokenCursor,
    ) -> Result<Transmission, ParseError> {
        let mut commands = Vec::new();

        while let Some(token) = tokens.next_token() {
            let issued = self.expand_condensed(token, tokens);
            let spec = self
                .registry
                .lookup(&issued)
                .ok_or_else(|| ParseError::UnresolvedAlias(issued.to_uppercase()))?;
            commands.push(self.parse_command(spec, tokens)?);
        }

        self.check_transmission(mode, &commands)?;
        Ok(Transmission::Aircraft {
            mode,
            target,
            commands,
        })
    }

    /// Rewrites condensed syntax (`h090`) into the command letter, pushing
    /// the digits back as its argument. Tokens whose digits would not pass
    /// the command's validator are left alone.
    fn expand_condensed(&self, issued: String, tokens: &mut TokenCursor) -> String {
        let Some(caps) = CONDENSED.captures(&issued) else {
            return issued;
        };
        let letter = caps[1].chars().next();
        let digits = caps[2].to_string();

        let Some(spec) = letter.and_then(|l| self.registry.lookup_condensed(l)) else {
            return issued;
        };
        let accepted = spec.validator.is_some_and(|validator| {
            validator
                .apply(std::slice::from_ref(&digits), &self.config)
                .is_some()
        });
        if !accepted {
            return issued;
        }

        tokens.push_back(digits);
        caps[1].to_string()
    }

    fn parse_command(
        &self,
        spec: &'static CommandSpec,
        tokens: &mut TokenCursor,
    ) -> Result<ParsedCommand, ParseError> {
        let mut raw = Vec::with_capacity(spec.arguments);
        for _ in 0..spec.arguments {
            let arg = tokens
                .next_token()
                .ok_or(ParseError::ArgumentCountShortfall(spec.name))?;
            raw.push(arg);
        }

        let args = match spec.validator {
            Some(validator) => validator
                .apply(&raw, &self.config)
                .ok_or(ParseError::ArgumentValidationFailure(spec.name))?,
            None => raw.into_iter().map(validators::ArgValue::Text).collect(),
        };

        let mut command = ParsedCommand::new(spec.name).with_args(args);
        while let Some(flag) = tokens.peek().and_then(|word| spec.flag_for(word)) {
            tokens.next_token();
            command = command.with_flag(flag);
        }
        Ok(command)
    }

    fn check_transmission(
        &self,
        mode: DispatchMode,
        commands: &[ParsedCommand],
    ) -> Result<(), ParseError> {
        if commands.is_empty() {
            return Err(ParseError::EmptyTransmission);
        }
        if mode == DispatchMode::Enqueue && commands.iter().any(|c| c.name == CommandName::Abort)
        {
            return Err(ParseError::QueueAbortConflict);
        }
        if commands.len() > 1 {
            let names: BTreeSet<CommandName> = commands.iter().map(|c| c.name).collect();
            if names.len() != commands.len() {
                return Err(ParseError::DuplicateCommandInTransmission);
            }
            if !self.registry.is_compatible(&names) {
                return Err(ParseError::IncompatibleCommandCombination);
            }
        }
        Ok(())
    }
}
