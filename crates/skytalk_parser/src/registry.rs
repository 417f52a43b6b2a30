//! Command registry.
//!
//! Declares every command the interpreter understands: its alias set, how
//! many positional arguments it takes, which validator applies to them, and
//! which boolean flags may trail it. The tables are `'static` and never
//! mutated; [`CommandRegistry`] is a cheap, copyable view over them.

use std::collections::BTreeSet;
use std::fmt;

/// Canonical name of an aircraft command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandName {
    /// Turn to a heading.
    Heading,
    /// Climb or descend to an altitude.
    Altitude,
    /// Change speed.
    Speed,
    /// Take off and climb to an altitude.
    Takeoff,
    /// Land on a runway.
    Land,
    /// Hold in a circle.
    Circle,
    /// Abort the current maneuver or queued transmissions.
    Abort,
}

impl CommandName {
    /// Returns the canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Altitude => "altitude",
            Self::Speed => "speed",
            Self::Takeoff => "takeoff",
            Self::Land => "land",
            Self::Circle => "circle",
            Self::Abort => "abort",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a boolean modifier flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlagName {
    /// Perform the maneuver at the aircraft's maximum rate.
    Expedite,
    /// Turn the long way round.
    LongTurn,
    /// Only drop the most recently queued transmission.
    LastOnly,
}

impl FlagName {
    /// Returns the canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expedite => "expedite",
            Self::LongTurn => "long_turn",
            Self::LastOnly => "lastonly",
        }
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a system (non-aircraft) command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemCommandName {
    /// End the session.
    Quit,
    /// Show the command summary.
    Help,
}

impl SystemCommandName {
    /// Returns the canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Help => "help",
        }
    }
}

impl fmt::Display for SystemCommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The semantic kind of a command's positional arguments.
///
/// Each kind is dispatched to one function in [`crate::validators`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidatorKind {
    /// `XXX0000` aircraft identifier.
    Identifier,
    /// Compass heading in degrees.
    Heading,
    /// Altitude in hundreds of metres.
    Altitude,
    /// Speed in hundreds of km/h.
    Speed,
    /// Facility code plus runway code.
    Landing,
    /// Left or right.
    TurnDirection,
}

/// A boolean flag and its spellings.
#[derive(Clone, Copy, Debug)]
pub struct FlagSpec {
    /// Flag name
    pub name: FlagName,
    /// Spellings that map to this flag
    pub aliases: &'static [&'static str],
}

/// An aircraft command definition.
#[derive(Clone, Copy, Debug)]
pub struct CommandSpec {
    /// Canonical name
    pub name: CommandName,
    /// Spellings that map to this command, canonical first
    pub aliases: &'static [&'static str],
    /// Number of positional arguments
    pub arguments: usize,
    /// Validator applied to the positional arguments
    pub validator: Option<ValidatorKind>,
    /// Flags that may trail the arguments
    pub flags: &'static [FlagSpec],
    /// Letter usable in condensed form (`h090` for `heading 090`)
    pub condensed: Option<char>,
    /// Argument synopsis for the help text
    pub usage: &'static str,
}

impl CommandSpec {
    /// Returns true if `word` is one of this command's spellings.
    #[must_use]
    pub fn is_spelled(&self, word: &str) -> bool {
        self.aliases.contains(&word)
    }

    /// Finds the flag spelled `word`, if this command declares one.
    #[must_use]
    pub fn flag_for(&self, word: &str) -> Option<FlagName> {
        self.flags
            .iter()
            .find(|flag| flag.aliases.contains(&word))
            .map(|flag| flag.name)
    }
}

/// A system command definition. System commands take no arguments or flags.
#[derive(Clone, Copy, Debug)]
pub struct SystemCommandSpec {
    /// Canonical name
    pub name: SystemCommandName,
    /// Spellings that map to this command
    pub aliases: &'static [&'static str],
    /// One-line description for the help text
    pub summary: &'static str,
}

const EXPEDITE: FlagSpec = FlagSpec {
    name: FlagName::Expedite,
    aliases: &["expedite", "x"],
};

/// Aircraft commands, in lookup order.
pub static AIRCRAFT_COMMANDS: [CommandSpec; 7] = [
    CommandSpec {
        name: CommandName::Heading,
        aliases: &["heading", "h", "head"],
        arguments: 1,
        validator: Some(ValidatorKind::Heading),
        flags: &[
            EXPEDITE,
            FlagSpec {
                name: FlagName::LongTurn,
                aliases: &["l", "long"],
            },
        ],
        condensed: Some('h'),
        usage: "HEADING 000-360 [EXPEDITE] [LONG]",
    },
    CommandSpec {
        name: CommandName::Altitude,
        aliases: &["altitude", "a", "alt"],
        arguments: 1,
        validator: Some(ValidatorKind::Altitude),
        flags: &[EXPEDITE],
        condensed: Some('a'),
        usage: "ALTITUDE <hundreds of metres> [EXPEDITE]",
    },
    CommandSpec {
        name: CommandName::Speed,
        aliases: &["speed", "s", "sp"],
        arguments: 1,
        validator: Some(ValidatorKind::Speed),
        flags: &[EXPEDITE],
        condensed: Some('s'),
        usage: "SPEED <hundreds of km/h> [EXPEDITE]",
    },
    CommandSpec {
        name: CommandName::Takeoff,
        aliases: &["takeoff", "to", "up", "fly"],
        arguments: 1,
        validator: Some(ValidatorKind::Altitude),
        flags: &[EXPEDITE],
        condensed: None,
        usage: "TAKEOFF <hundreds of metres> [EXPEDITE]",
    },
    CommandSpec {
        name: CommandName::Land,
        aliases: &["land", "l", "down"],
        arguments: 2,
        validator: Some(ValidatorKind::Landing),
        flags: &[],
        condensed: None,
        usage: "LAND <airport> <runway>",
    },
    CommandSpec {
        name: CommandName::Circle,
        aliases: &["circle", "c", "hold"],
        arguments: 1,
        validator: Some(ValidatorKind::TurnDirection),
        flags: &[],
        condensed: None,
        usage: "CIRCLE LEFT|RIGHT",
    },
    CommandSpec {
        name: CommandName::Abort,
        aliases: &["abort", "purge"],
        arguments: 0,
        validator: None,
        flags: &[FlagSpec {
            name: FlagName::LastOnly,
            aliases: &["lastonly", "last", "l"],
        }],
        condensed: None,
        usage: "ABORT [LASTONLY]",
    },
];

/// System commands, in lookup order.
pub static SYSTEM_COMMANDS: [SystemCommandSpec; 2] = [
    SystemCommandSpec {
        name: SystemCommandName::Quit,
        aliases: &["quit", "q"],
        summary: "end the session",
    },
    SystemCommandSpec {
        name: SystemCommandName::Help,
        aliases: &["help", "h", "man"],
        summary: "show this summary",
    },
];

/// Sets of commands that may be chained in one transmission.
pub static COMPATIBLE_COMBINATIONS: [&[CommandName]; 2] = [
    &[CommandName::Heading, CommandName::Altitude, CommandName::Speed],
    &[CommandName::Circle, CommandName::Altitude, CommandName::Speed],
];

/// Read-only view over the command tables.
#[derive(Clone, Copy, Debug)]
pub struct CommandRegistry {
    commands: &'static [CommandSpec],
    system: &'static [SystemCommandSpec],
    combinations: &'static [&'static [CommandName]],
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandRegistry {
    /// The built-in command set.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            commands: &AIRCRAFT_COMMANDS,
            system: &SYSTEM_COMMANDS,
            combinations: &COMPATIBLE_COMBINATIONS,
        }
    }

    /// All aircraft command specs, in lookup order.
    #[must_use]
    pub const fn commands(&self) -> &'static [CommandSpec] {
        self.commands
    }

    /// All system command specs, in lookup order.
    #[must_use]
    pub const fn system_commands(&self) -> &'static [SystemCommandSpec] {
        self.system
    }

    /// Looks up an aircraft command by any of its spellings.
    ///
    /// The first spec whose alias set contains `word` wins.
    #[must_use]
    pub fn lookup(&self, word: &str) -> Option<&'static CommandSpec> {
        self.commands.iter().find(|spec| spec.is_spelled(word))
    }

    /// Returns the table entry for a canonical name.
    #[must_use]
    pub fn spec(&self, name: CommandName) -> Option<&'static CommandSpec> {
        self.commands.iter().find(|spec| spec.name == name)
    }

    /// Looks up the command whose condensed-form letter is `letter`.
    #[must_use]
    pub fn lookup_condensed(&self, letter: char) -> Option<&'static CommandSpec> {
        self.commands
            .iter()
            .find(|spec| spec.condensed == Some(letter))
    }

    /// Looks up a system command by any of its spellings.
    #[must_use]
    pub fn lookup_system(&self, word: &str) -> Option<&'static SystemCommandSpec> {
        self.system.iter().find(|spec| spec.aliases.contains(&word))
    }

    /// Returns true if `word` is a spelling of the command `name`.
    #[must_use]
    pub fn is_alias_of(&self, word: &str, name: CommandName) -> bool {
        self.spec(name).is_some_and(|spec| spec.is_spelled(word))
    }

    /// Returns true if `word` is the canonical spelling of some aircraft command.
    #[must_use]
    pub fn is_canonical_name(&self, word: &str) -> bool {
        self.commands.iter().any(|spec| spec.name.as_str() == word)
    }

    /// Canonical aircraft command spellings, in lookup order.
    pub fn command_names(&self) -> impl Iterator<Item = &'static str> {
        self.commands.iter().map(|spec| spec.name.as_str())
    }

    /// Canonical system command spellings, in lookup order.
    pub fn system_command_names(&self) -> impl Iterator<Item = &'static str> {
        self.system.iter().map(|spec| spec.name.as_str())
    }

    /// Returns true if `names` fits inside at least one declared combination.
    #[must_use]
    pub fn is_compatible(&self, names: &BTreeSet<CommandName>) -> bool {
        self.combinations
            .iter()
            .any(|combo| names.iter().all(|name| combo.contains(name)))
    }
}
