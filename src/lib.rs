//! This crate provides the core logic for a bounded-tape, single-tape Turing Machine.
//! It includes modules for parsing transition tables, deriving the machine configuration
//! (including its implicit accepting states), laying out the tape, and executing steps.

pub mod config;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `Configuration` struct from the config module.
pub use config::Configuration;
/// Re-exports the loading entry points from the loader module.
pub use loader::{parse_input, ProgramLoader};
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_configuration};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the types describing transitions, outcomes and errors.
pub use types::{ConfigError, Direction, Outcome, State, Transition, TuringMachineError};
