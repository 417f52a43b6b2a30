//! Core error types and configuration for skytalk.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`ConsoleConfig`] - Operator console configuration
//! - [`ParserConfig`] - Interpreter configuration (altitude envelope, control glyphs)
//! - [`BoundaryPolicy`] - How numeric argument validators gate acceptance

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;

pub use config::{AltitudeEnvelope, BoundaryPolicy, ConsoleConfig, ControlGlyphs, ParserConfig};
pub use error::{Error, ErrorKind, Result};
