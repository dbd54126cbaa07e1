mod render;

use btm::{Configuration, Outcome, ProgramLoader, State, Tape, TuringMachine};
use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Runs a bounded-tape Turing machine described by a transition table.
#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  btm machine.txt input.txt
  btm --steps --tape-size 32 machine.txt input.txt")]
struct Cli {
    /// The transition table, one `<state>: <read> <write> <L|R> <next_state>` per line
    config_file: PathBuf,

    /// The input laid out on the tape
    input_file: PathBuf,

    /// Print each step of the execution
    #[clap(short, long)]
    steps: bool,

    /// Length of the tape, sentinels included (defaults to twice the input plus two)
    #[clap(short, long)]
    tape_size: Option<usize>,

    /// Stop a machine that is still running after this many steps
    #[clap(short, long)]
    max_steps: Option<usize>,

    /// Print a JSON report instead of the text rendering
    #[clap(long)]
    json: bool,
}

/// One entry of the step listing in the JSON report.
#[derive(Serialize)]
struct StepRecord {
    step: usize,
    state: State,
    head: usize,
    tape: String,
}

#[derive(Serialize)]
struct Report<'a> {
    configuration: &'a Configuration,
    input: String,
    initial_tape: String,
    final_tape: String,
    head: usize,
    state: State,
    steps: usize,
    outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    trace: Vec<StepRecord>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let input = ProgramLoader::load_input(&cli.input_file)?;
    let config = ProgramLoader::load_configuration(&cli.config_file)?;

    let tape = match cli.tape_size {
        Some(length) => Tape::with_length(&input, length)?,
        None => Tape::new(&input),
    };
    let initial_tape = tape.to_string();
    let mut machine = TuringMachine::with_tape(&config, tape);

    let color = !cli.json && atty::is(atty::Stream::Stdout);

    if !cli.json {
        println!("{}", render::configuration(&config));
        print!("{}", render::input(&input));
        println!();
        print!("{}", render::tape(&machine));

        if cli.steps {
            println!();
            println!("{}", render::banner("Steps", machine.tape().len()));
        }
    }

    let mut trace = Vec::new();
    let mut computing_steps = 0;

    let outcome = loop {
        if cli.max_steps.is_some_and(|limit| computing_steps >= limit) {
            warn!(steps = computing_steps, "step limit reached");
            break None;
        }

        if cli.steps {
            if cli.json {
                trace.push(StepRecord {
                    step: computing_steps,
                    state: machine.state(),
                    head: machine.head_position(),
                    tape: machine.tape().to_string(),
                });
            } else {
                println!("{}", render::step(computing_steps, &machine));
            }
        }

        let outcome = machine.step();
        computing_steps += 1;

        if outcome.is_halted() {
            break Some(outcome);
        }
    };

    info!(?outcome, steps = machine.step_count(), "run finished");

    if cli.json {
        let report = Report {
            configuration: &config,
            input: input.iter().collect(),
            initial_tape,
            final_tape: machine.tape().to_string(),
            head: machine.head_position(),
            state: machine.state(),
            steps: machine.step_count(),
            outcome,
            trace,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.steps {
        println!();
        print!("{}", render::tape(&machine));
    }

    println!();
    match outcome {
        Some(outcome) => println!("{}", render::outcome(outcome, color)),
        None => println!(
            "{}",
            render::outcome(Outcome::Running, color)
                + &format!(" Stopped after {computing_steps} steps.")
        ),
    }

    Ok(())
}
