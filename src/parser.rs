//! This module provides the parser for transition tables, utilizing the `pest` crate.
//! The grammar lives in `grammar.pest`; this module turns its parse tree into `Transition`s
//! and checks symbols, directions and state numbers along the way.

use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use tracing::debug;

use crate::{
    config::Configuration,
    types::{is_tape_symbol, Direction, State, Transition, TuringMachineError},
};

/// Derives a `PestParser` for the transition table grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TransitionTableParser;

/// Parses a transition table into its ordered list of transitions.
///
/// Blank lines are skipped. Every error carries the line (and column) it was found on.
///
/// # Returns
///
/// * `Ok(Vec<Transition>)` in declaration order, possibly empty.
/// * `Err(TuringMachineError::ParseError)` for a malformed line, a symbol outside the tape
///   alphabet, a direction other than `L`/`R`, or a state number that does not fit.
pub fn parse(input: &str) -> Result<Vec<Transition>, TuringMachineError> {
    let root = TransitionTableParser::parse(Rule::config, input).map_err(Box::new)?;

    let transitions = root
        .flat_map(Pair::into_inner)
        .filter(|pair| pair.as_rule() == Rule::transition)
        .map(parse_transition)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(transitions = transitions.len(), "parsed transition table");

    Ok(transitions)
}

/// Parses a transition table and derives its `Configuration`.
pub fn parse_configuration(input: &str) -> Result<Configuration, TuringMachineError> {
    Ok(Configuration::new(parse(input)?)?)
}

/// Parses one `<state>: <read> <write> <dir> <next>` line.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, TuringMachineError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();

    let source = next_pair(&mut pairs, span)?;
    let source_state = parse_state(next_pair(&mut source.into_inner(), span)?)?;
    let read_symbol = parse_symbol(next_pair(&mut pairs, span)?)?;
    let write_symbol = parse_symbol(next_pair(&mut pairs, span)?)?;
    let direction = parse_direction(next_pair(&mut pairs, span)?)?;
    let target_state = parse_state(next_pair(&mut pairs, span)?)?;

    Ok(Transition {
        source_state,
        read_symbol,
        write_symbol,
        direction,
        target_state,
    })
}

/// Parses a state number, rejecting values that overflow a `State`.
fn parse_state(pair: Pair<Rule>) -> Result<State, TuringMachineError> {
    pair.as_str().parse::<State>().map_err(|_| {
        parse_error(
            &format!("State number '{}' is too large", pair.as_str()),
            pair.as_span(),
        )
    })
}

/// Parses a read or write symbol, which must belong to the tape alphabet.
fn parse_symbol(pair: Pair<Rule>) -> Result<char, TuringMachineError> {
    let span = pair.as_span();
    match pair.as_str().chars().next() {
        Some(symbol) if is_tape_symbol(symbol) => Ok(symbol),
        _ => Err(parse_error(
            &format!("Invalid symbol '{}' in transition", pair.as_str()),
            span,
        )),
    }
}

/// Parses a head direction. Only `L` and `R` are supported.
fn parse_direction(pair: Pair<Rule>) -> Result<Direction, TuringMachineError> {
    match pair.as_str() {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        other => Err(parse_error(
            &format!("Invalid head movement direction '{other}' in transition"),
            pair.as_span(),
        )),
    }
}

/// Takes the next component of a transition, failing on the whole transition's span.
fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    span: Span<'i>,
) -> Result<Pair<'i, Rule>, TuringMachineError> {
    pairs
        .next()
        .ok_or_else(|| parse_error("Incomplete transition", span))
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
