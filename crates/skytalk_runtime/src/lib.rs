//! Operator console, demo airspace and terminal REPL for skytalk.
//!
//! This crate provides:
//! - [`Console`] - Keystroke handling, history and the transcript
//! - [`Airspace`] / [`DispatchTarget`] - Where accepted transmissions go
//! - [`DemoAirspace`] - A small in-memory airspace for the binary and tests
//! - [`Repl`] - Interactive read-eval-print loop on top of rustyline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod airspace;
pub mod console;
pub mod dispatch;
pub mod editor;
pub mod highlight;
pub mod repl;
pub mod transcript;

pub use airspace::{
    APPROACH_TICKS, Aircraft, DemoAirspace, FlightState, MANEUVER_TICKS, Performance, RunwayChart,
};
pub use console::{Console, ConsoleSignal, Keystroke, PROMPT_SEPARATOR, REJECTION_PREFIX};
pub use dispatch::{
    Airspace, DispatchTarget, Rejection, StandardSystem, SystemReply, SystemTarget, help_text,
};
pub use editor::{OperatorInput, OperatorTerminal, RustylineTerminal};
pub use highlight::TransmissionHighlighter;
pub use repl::Repl;
pub use transcript::{
    AnsiRenderer, CachedTranscript, Severity, Transcript, TranscriptEntry, TranscriptRenderer,
};
