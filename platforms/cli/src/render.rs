//! Human-readable rendering of a configuration, a tape, the steps and the halting outcome.

use btm::{Configuration, Direction, Outcome, TuringMachine};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

fn join_states<'a>(states: impl Iterator<Item = &'a usize>) -> String {
    states
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn configuration(config: &Configuration) -> String {
    let mut out = String::from("Machine configuration: {\n");

    out += &format!(
        "  Non-final states: [{}]\n",
        join_states(config.active_states().iter())
    );
    out += &format!(
        "  Non-final states count: {}\n",
        config.active_states().len()
    );
    out += &format!(
        "  Final states: [{}]\n",
        join_states(config.final_states().iter())
    );
    out += &format!("  Final states count: {}\n", config.final_states().len());
    out += "  Transitions: [\n";
    for t in config.transitions() {
        let arrow = match t.direction {
            Direction::Right => "->",
            Direction::Left => "<-",
        };
        out += &format!(
            "    ({} -> {}): ({}, {}, {})\n",
            t.source_state, t.target_state, t.read_symbol, t.write_symbol, arrow
        );
    }
    out += "  ]\n";
    out += &format!("  Transitions count: {}\n", config.transitions().len());
    out += "}\n";

    out
}

/// Draws `cells` as a row of boxes:
///
/// ```text
/// -------------
/// | < | a | > |
/// -------------
/// ```
pub fn cells(cells: &[char]) -> String {
    let rule = "-".repeat(cells.len() * 4 + 1);
    let row: String = cells.iter().map(|c| format!(" {c} |")).collect();

    format!("{rule}\n|{row}\n{rule}\n")
}

pub fn input(input: &[char]) -> String {
    let header = format!("Input ({} symbols):\n", input.len());
    if input.is_empty() {
        return header + " (empty)\n";
    }

    header + &cells(input)
}

pub fn tape(machine: &TuringMachine) -> String {
    let tape = machine.tape();
    format!("Tape ({} symbols):\n{}", tape.len(), cells(tape.cells()))
}

/// Formats one step as `NNN. (<left of head>,<state>,<from head on>)`.
pub fn step(number: usize, machine: &TuringMachine) -> String {
    let (left, right) = machine.tape().cells().split_at(machine.head_position());
    let left: String = left.iter().collect();
    let right: String = right.iter().collect();

    format!("{number:03}. ({left},{},{right})", machine.state())
}

/// Section banner around the step listing, sized to the tape.
pub fn banner(title: &str, tape_len: usize) -> String {
    let rule = "=".repeat((tape_len + 3) / 2);
    format!("{rule} {title} {rule}")
}

pub fn outcome(outcome: Outcome, color: bool) -> String {
    let message = match outcome {
        Outcome::HaltAccept => "Machine halted in ACCEPTING state.",
        Outcome::HaltRejectLeftBound => {
            "Machine halted in REJECTING state: head moved out of bounds to the left."
        }
        Outcome::HaltRejectRightBound => {
            "Machine halted in REJECTING state: head moved out of bounds to the right."
        }
        Outcome::HaltRejectNoTransition => {
            "Machine halted in REJECTING state: no transition found for current state and symbol."
        }
        Outcome::Running => "Machine is still running.",
    };

    let code = if outcome.is_accepted() {
        GREEN
    } else if outcome.is_halted() {
        RED
    } else {
        RESET
    };

    if color {
        format!("{code}{message}{RESET}")
    } else {
        message.to_string()
    }
}
