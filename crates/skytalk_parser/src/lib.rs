//! Command interpreter for the skytalk operator console.
//!
//! This crate turns a line typed by the air-traffic operator, such as
//! `ABC1234 heading 090 expedite altitude 35`, into a validated
//! [`Transmission`], or into a [`ParseError`] whose text tells the
//! operator what was wrong. It also completes partially typed lines.
//!
//! # Architecture
//!
//! ```text
//! ".abc1234 h090 x a35"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → [".", "abc1234", "h090", "x", "a35"]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RESOLVE TARGET  │  → Enqueue to ABC1234
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ COMMAND LOOP    │  → heading 90 +expedite, altitude 3500
//! │ (registry,      │
//! │  validators)    │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ FINAL CHECKS    │  → Accepted(Transmission) or Rejected(ParseError)
//! └─────────────────┘
//! ```
//!
//! Dispatching an accepted transmission is left to the caller.
//!
//! # Modules
//!
//! - [`registry`] - Static command, flag and combination tables
//! - [`validators`] - Argument checks and unit conversions
//! - [`tokenizer`] - Raw input to token cursor
//! - [`command`] - Parsed commands and transmissions
//! - [`parser`] - The parsing state machine
//! - [`directory`] - Candidate pools seen by completion
//! - [`completion`] - Context-sensitive autocompletion

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod completion;
pub mod directory;
pub mod parser;
pub mod registry;
pub mod tokenizer;
pub mod validators;

pub use command::{DispatchMode, ParsedCommand, Transmission};
pub use completion::{Autocompleter, CandidatePool, CompletionContext, longest_common_prefix};
pub use directory::{EntityDirectory, StaticDirectory};
pub use parser::{CommandParser, ParseError, ParseOutcome};
pub use registry::{
    CommandName, CommandRegistry, CommandSpec, FlagName, FlagSpec, SystemCommandName,
    SystemCommandSpec, ValidatorKind,
};
pub use tokenizer::{InputTokenizer, TokenCursor};
pub use validators::ArgValue;
