//! This module defines the `TuringMachine` struct, which executes a `Configuration` against a
//! bounded tape. It owns the tape, the head position and the current state, and classifies
//! every step as running, accepting, or one of the rejecting outcomes.

use tracing::{debug, trace};

use crate::config::Configuration;
use crate::tape::Tape;
use crate::types::{Direction, Outcome, State, TuringMachineError, INITIAL_STATE};

/// The head starts on the first input cell, right of the left sentinel.
pub const INITIAL_HEAD_POSITION: usize = 1;

/// Represents a single-tape Turing Machine executing a borrowed `Configuration`.
///
/// The configuration is read-only, so several machines can run different inputs
/// against the same one.
#[derive(Debug, Clone)]
pub struct TuringMachine<'a> {
    config: &'a Configuration,
    state: State,
    head: usize,
    tape: Tape,
    initial_tape: Tape,
    step_count: usize,
    halted: Option<Outcome>,
}

impl<'a> TuringMachine<'a> {
    /// Creates a machine for `input` laid out on a tape of the default length.
    pub fn new(config: &'a Configuration, input: &[char]) -> Self {
        Self::with_tape(config, Tape::new(input))
    }

    /// Creates a machine running on an already laid out `tape`.
    pub fn with_tape(config: &'a Configuration, tape: Tape) -> Self {
        debug!(tape = %tape, length = tape.len(), "machine created");

        Self {
            config,
            state: INITIAL_STATE,
            head: INITIAL_HEAD_POSITION,
            initial_tape: tape.clone(),
            tape,
            step_count: 0,
            halted: None,
        }
    }

    /// Executes a single step.
    ///
    /// Acceptance is checked before any lookup. When a transition matches, its symbol is
    /// written first and the head is moved afterwards, so a bound rejection leaves the
    /// written symbol on the tape while the head and the state stay untouched.
    ///
    /// Once a halting outcome was returned the machine is frozen: further calls return
    /// the same outcome and change nothing.
    pub fn step(&mut self) -> Outcome {
        if let Some(outcome) = self.halted {
            return outcome;
        }

        let outcome = self.apply();

        if outcome.is_halted() {
            debug!(
                ?outcome,
                state = self.state,
                head = self.head,
                steps = self.step_count,
                "machine halted"
            );
            self.halted = Some(outcome);
        }

        outcome
    }

    fn apply(&mut self) -> Outcome {
        if self.config.is_final(self.state) {
            return Outcome::HaltAccept;
        }

        let config = self.config;
        let symbol = self.symbol();
        let Some(transition) = config.transition(self.state, symbol) else {
            return Outcome::HaltRejectNoTransition;
        };

        trace!(
            step = self.step_count,
            state = self.state,
            head = self.head,
            %symbol,
            write = %transition.write_symbol,
            direction = ?transition.direction,
            next = transition.target_state,
            "applying transition"
        );

        self.tape.write(self.head, transition.write_symbol);

        match transition.direction {
            Direction::Right if self.head < self.tape.last() => self.head += 1,
            Direction::Right => return Outcome::HaltRejectRightBound,
            Direction::Left if self.head > 0 => self.head -= 1,
            Direction::Left => return Outcome::HaltRejectLeftBound,
        }

        self.state = transition.target_state;
        self.step_count += 1;

        Outcome::Running
    }

    /// Steps until the machine halts. This never returns for a machine that loops forever.
    pub fn run(&mut self) -> Outcome {
        loop {
            let outcome = self.step();
            if outcome.is_halted() {
                return outcome;
            }
        }
    }

    /// Steps at most `limit` times.
    ///
    /// # Returns
    ///
    /// * `Some(outcome)` with the halting outcome if the machine halted within the limit.
    /// * `None` if it was still running after `limit` steps.
    pub fn run_with_limit(&mut self, limit: usize) -> Option<Outcome> {
        for _ in 0..limit {
            let outcome = self.step();
            if outcome.is_halted() {
                return Some(outcome);
            }
        }

        None
    }

    /// Restores the initial state, head position and tape.
    pub fn reset(&mut self) {
        self.state = INITIAL_STATE;
        self.head = INITIAL_HEAD_POSITION;
        self.tape = self.initial_tape.clone();
        self.step_count = 0;
        self.halted = None;
    }

    /// Moves the head to `position` without executing anything.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidHeadPosition)` if `position` is off the tape.
    pub fn set_head_position(&mut self, position: usize) -> Result<(), TuringMachineError> {
        if position >= self.tape.len() {
            return Err(TuringMachineError::InvalidHeadPosition {
                position,
                length: self.tape.len(),
            });
        }

        self.head = position;
        Ok(())
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> State {
        self.state
    }

    pub fn head_position(&self) -> usize {
        self.head
    }

    /// Returns the symbol under the head.
    pub fn symbol(&self) -> char {
        self.tape.cells()[self.head]
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the halting outcome, if the machine has halted.
    pub fn outcome(&self) -> Option<Outcome> {
        self.halted
    }
}
