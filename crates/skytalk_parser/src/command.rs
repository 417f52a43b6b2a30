//! Parsed commands and transmissions.
//!
//! These are the values the parser hands to whoever dispatches them.

use std::fmt;

use crate::registry::{CommandName, FlagName, SystemCommandName};
use crate::validators::ArgValue;

/// One command of a transmission, with validated arguments and flags.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedCommand {
    /// The canonical command
    pub name: CommandName,
    /// Normalized arguments, in positional order
    pub args: Vec<ArgValue>,
    /// Flags that trailed the command, without repeats
    pub flags: Vec<FlagName>,
}

impl ParsedCommand {
    /// Creates a command with no arguments or flags.
    #[must_use]
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            args: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Sets the arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<ArgValue>) -> Self {
        self.args = args;
        self
    }

    /// Adds a flag.
    #[must_use]
    pub fn with_flag(mut self, flag: FlagName) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    /// Returns true if `flag` was given.
    #[must_use]
    pub fn has_flag(&self, flag: FlagName) -> bool {
        self.flags.contains(&flag)
    }

    /// Returns the numeric argument at `index`.
    #[must_use]
    pub fn int_arg(&self, index: usize) -> Option<i64> {
        self.args.get(index).and_then(ArgValue::as_int)
    }

    /// Returns the textual argument at `index`.
    #[must_use]
    pub fn text_arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(ArgValue::as_text)
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            match arg {
                ArgValue::Int(n) => write!(f, " {n}")?,
                ArgValue::Text(s) => write!(f, " {s}")?,
            }
        }
        for flag in &self.flags {
            write!(f, " +{flag}")?;
        }
        Ok(())
    }
}

/// How a transmission is to be dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchMode {
    /// The aircraft acts on the commands now.
    Execute,
    /// The commands join the aircraft's pending queue.
    Enqueue,
    /// The transmission addresses the system.
    System,
}

/// A fully validated transmission.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transmission {
    /// Commands for one aircraft.
    Aircraft {
        /// `Execute` or `Enqueue`
        mode: DispatchMode,
        /// Upper-case aircraft identifier
        target: String,
        /// Commands in the order they were given
        commands: Vec<ParsedCommand>,
    },
    /// A system command.
    System(SystemCommandName),
}

impl Transmission {
    /// The dispatch mode decided during target resolution.
    #[must_use]
    pub fn mode(&self) -> DispatchMode {
        match self {
            Self::Aircraft { mode, .. } => *mode,
            Self::System(_) => DispatchMode::System,
        }
    }

    /// The addressed aircraft, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Aircraft { target, .. } => Some(target),
            Self::System(_) => None,
        }
    }

    /// The aircraft commands (empty for system transmissions).
    #[must_use]
    pub fn commands(&self) -> &[ParsedCommand] {
        match self {
            Self::Aircraft { commands, .. } => commands,
            Self::System(_) => &[],
        }
    }
}
