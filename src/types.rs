//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including transitions, step outcomes, symbol classes, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// A machine state. States are plain non-negative integers; `0` is the initial state.
pub type State = usize;

/// The state every machine starts in.
pub const INITIAL_STATE: State = 0;
/// The symbol written into cell `0` of every tape.
pub const LEFT_SENTINEL: char = '<';
/// The symbol written into the last cell of every tape.
pub const RIGHT_SENTINEL: char = '>';
/// The symbol filling the tape cells not covered by the input.
pub const BLANK_SYMBOL: char = '_';

/// Returns `true` if `symbol` may appear in the input laid out on the tape.
pub fn is_input_symbol(symbol: char) -> bool {
    symbol.is_ascii_alphanumeric() || symbol == '*' || symbol == '#'
}

/// Returns `true` if `symbol` may be read or written by a transition.
///
/// This is the input alphabet extended with the blank `_` and the marker `$`.
pub fn is_tape_symbol(symbol: char) -> bool {
    is_input_symbol(symbol) || symbol == BLANK_SYMBOL || symbol == '$'
}

/// Represents a single transition rule: `source: read write direction target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this rule applies in.
    pub source_state: State,
    /// The symbol that must be under the head.
    pub read_symbol: char,
    /// The symbol written over the cell under the head.
    pub write_symbol: char,
    /// Where the head moves after writing.
    pub direction: Direction,
    /// The state the machine enters after a successful move.
    pub target_state: State,
}

impl Transition {
    pub fn new(
        source_state: State,
        read_symbol: char,
        write_symbol: char,
        direction: Direction,
        target_state: State,
    ) -> Self {
        Self {
            source_state,
            read_symbol,
            write_symbol,
            direction,
            target_state,
        }
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A transition was applied and the machine can keep going.
    Running,
    /// The machine is in a final state.
    HaltAccept,
    /// A transition tried to move the head left of cell `0`.
    HaltRejectLeftBound,
    /// A transition tried to move the head right of the last cell.
    HaltRejectRightBound,
    /// No transition exists for the current state and symbol.
    HaltRejectNoTransition,
}

impl Outcome {
    /// Returns `true` for every outcome except `Running`.
    pub fn is_halted(&self) -> bool {
        !matches!(self, Outcome::Running)
    }

    /// Returns `true` only for `HaltAccept`.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::HaltAccept)
    }
}

/// Errors raised while deriving a configuration from a transition list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No transitions were supplied.
    #[error("configuration is empty or contains only whitespace")]
    Empty,
    /// The smallest state with an outgoing transition is not the initial state.
    #[error("initial state must be 0")]
    MissingInitialState,
}

/// Represents various errors that can occur while building a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The transition list does not describe a valid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Indicates an error during the parsing of a transition table.
    #[error("Configuration parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// The input contains a symbol outside the input alphabet.
    #[error("Invalid symbol '{0}' at input")]
    InvalidInputSymbol(char),
    /// The requested tape cannot hold the input and both sentinels.
    #[error("Tape of length {length} is too small to fit the input and the sentinels (need {required})")]
    TapeTooSmall { length: usize, required: usize },
    /// The requested tape cannot be allocated.
    #[error("Tape of length {0} is too large to allocate")]
    TapeTooLarge(usize),
    /// Indicates a head position outside the tape.
    #[error("Invalid head position {position} for a tape of length {length}")]
    InvalidHeadPosition { position: usize, length: usize },
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}
