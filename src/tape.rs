//! The bounded tape a machine reads and writes.
//!
//! ```text
//! | < | a | b | _ | _ | > |
//!   0   1   2   3   4   5
//! ```
//!
//! The sentinels only mark the physical ends for display. Bounds are enforced by index,
//! and a transition may overwrite a sentinel cell like any other.

use std::fmt;

use serde::Serialize;

use crate::types::{TuringMachineError, BLANK_SYMBOL, LEFT_SENTINEL, RIGHT_SENTINEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tape {
    cells: Vec<char>,
}

impl Tape {
    /// The length used when no explicit size is requested: twice the input plus both sentinels.
    pub fn default_length(input_len: usize) -> usize {
        input_len * 2 + 2
    }

    /// Lays out `input` on a tape of the default length.
    pub fn new(input: &[char]) -> Self {
        let length = Self::default_length(input.len());
        Self::layout(Vec::with_capacity(length), input, length)
    }

    /// Lays out `input` on a tape of exactly `length` cells.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::TapeTooSmall)` if `length` cannot hold the input and both sentinels.
    /// * `Err(TuringMachineError::TapeTooLarge)` if `length` cells cannot be allocated.
    pub fn with_length(input: &[char], length: usize) -> Result<Self, TuringMachineError> {
        let required = input.len() + 2;
        if length < required {
            return Err(TuringMachineError::TapeTooSmall { length, required });
        }

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(length)
            .map_err(|_| TuringMachineError::TapeTooLarge(length))?;

        Ok(Self::layout(cells, input, length))
    }

    fn layout(mut cells: Vec<char>, input: &[char], length: usize) -> Self {
        cells.push(LEFT_SENTINEL);
        cells.extend_from_slice(input);
        cells.resize(length - 1, BLANK_SYMBOL);
        cells.push(RIGHT_SENTINEL);

        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: even an empty input leaves the two sentinel cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the last cell.
    pub fn last(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<char> {
        self.cells.get(position).copied()
    }

    /// Overwrites the cell at `position`. The caller guarantees `position` is on the tape.
    pub(crate) fn write(&mut self, position: usize, symbol: char) {
        self.cells[position] = symbol;
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells.iter().try_for_each(|cell| write!(f, "{cell}"))
    }
}
