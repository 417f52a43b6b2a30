//! skytalk - Air-traffic command interpreter
//!
//! This crate re-exports all layers of the skytalk system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: skytalk_runtime    - Console, transcript, demo airspace, REPL
//! Layer 1: skytalk_parser     - Registry, validators, parser, autocompletion
//! Layer 0: skytalk_foundation - Error types and configuration
//! ```

pub use skytalk_foundation as foundation;
pub use skytalk_parser as parser;
pub use skytalk_runtime as runtime;
