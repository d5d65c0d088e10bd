#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for authoring, running and reviewing ant trail programs.

mod assignment;
mod config;
mod program_text;
mod render;
mod solution_transfer;

use std::{path::PathBuf, thread, time::Duration};

use anyhow::{bail, Context, Result};
use ant_trail_system_playback::{Config as PlaybackConfig, Playback, PlaybackState};
use ant_trail_system_review::review;
use ant_trail_system_simulator::run_program;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{assignment::Assignment, config::CliConfig, solution_transfer::SolutionTransfer};

#[derive(Debug, Parser)]
#[command(
    name = "ant-trail",
    about = "Guide the ant from start to goal with a program of moves"
)]
struct Cli {
    /// Optional TOML file with playback and assignment limit settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enables debug logging for the ant trail crates.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Executes a program and reports where the ant ended up.
    Run {
        /// Assignment file describing the board and available moves.
        #[arg(long)]
        assignment: PathBuf,
        /// Program text, e.g. `1 1 3(2 1) 4`.
        #[arg(long)]
        program: String,
        /// Replays the run one state at a time.
        #[arg(long)]
        animate: bool,
        /// Overrides the configured animation interval in milliseconds.
        #[arg(long = "step-ms", requires = "animate")]
        step_ms: Option<u64>,
    },
    /// Prints the solution string submitted for grading.
    Encode {
        /// Assignment file describing the board and available moves.
        #[arg(long)]
        assignment: PathBuf,
        /// Program text, e.g. `1 1 3(2 1) 4`.
        #[arg(long)]
        program: String,
    },
    /// Replays a submitted solution string and grades it.
    Review {
        /// Assignment file the solution was authored against.
        #[arg(long)]
        assignment: PathBuf,
        /// Solution string produced by `encode`.
        #[arg(long)]
        solution: String,
    },
    /// Lists the moves an assignment offers.
    Moves {
        /// Assignment file describing the board and available moves.
        #[arg(long)]
        assignment: PathBuf,
    },
}

/// Entry point for the ant trail command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        CliCommand::Run {
            assignment,
            program,
            animate,
            step_ms,
        } => {
            let assignment = Assignment::load(&assignment, &config.limits)?;
            let playback_config = animate.then(|| config.playback.playback_config(step_ms));
            let max_iterations = config.limits.max_iterations();
            execute_program(&assignment, &program, max_iterations, playback_config)
        }
        CliCommand::Encode {
            assignment,
            program,
        } => {
            let assignment = Assignment::load(&assignment, &config.limits)?;
            encode_program(&assignment, &program, config.limits.max_iterations())
        }
        CliCommand::Review {
            assignment,
            solution,
        } => {
            let assignment = Assignment::load(&assignment, &config.limits)?;
            review_solution(&assignment, &solution)
        }
        CliCommand::Moves { assignment } => {
            let assignment = Assignment::load(&assignment, &config.limits)?;
            list_moves(&assignment);
            Ok(())
        }
    }
}

const VERBOSE_FILTER: &str = concat!(
    "info,ant_trail_cli=debug,ant_trail_editor=debug,",
    "ant_trail_system_simulator=debug,ant_trail_system_playback=debug,",
    "ant_trail_system_review=debug",
);

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute_program(
    assignment: &Assignment,
    text: &str,
    max_iterations: u32,
    animation: Option<PlaybackConfig>,
) -> Result<()> {
    let program = program_text::build(text, &assignment.catalog, max_iterations)?;
    info!(
        assignment = %assignment.id,
        steps = program.len(),
        moves = program.expanded_len(),
        "running program"
    );
    let result = run_program(&assignment.board, &program);

    println!("{}", assignment.name);
    if let Some(playback_config) = animation {
        let interval = playback_config.step_interval();
        let mut playback = Playback::new(result, playback_config);
        let mut frames = Vec::new();
        let mut elapsed = Duration::ZERO;
        loop {
            frames.clear();
            playback.advance(elapsed, &mut frames);
            for frame in &frames {
                println!("step {}", frame.index);
                print!("{}", render::board(&assignment.board, Some(frame.entry)));
                if let Some(outcome) = frame.outcome {
                    println!("{}", outcome.message());
                }
            }
            if playback.state() != PlaybackState::Playing {
                break;
            }
            thread::sleep(interval);
            elapsed = interval;
        }
    } else {
        print!("{}", render::board(&assignment.board, result.final_state()));
        print!("{}", render::trace(result.trace()));
        println!("{}", result.outcome().message());
    }
    Ok(())
}

fn encode_program(assignment: &Assignment, text: &str, max_iterations: u32) -> Result<()> {
    let program = program_text::build(text, &assignment.catalog, max_iterations)?;
    let transfer = SolutionTransfer {
        assignment: assignment.id.clone(),
        answer: program.encode(),
    };
    let encoded = transfer
        .encode()
        .context("failed to serialise solution payload")?;
    debug!(
        header = solution_transfer::TRANSFER_HEADER,
        moves = transfer.answer.len(),
        "encoded solution"
    );
    println!("{encoded}");
    Ok(())
}

fn review_solution(assignment: &Assignment, solution: &str) -> Result<()> {
    let transfer = SolutionTransfer::decode(solution).context("failed to decode solution")?;
    if transfer.assignment != assignment.id {
        bail!(
            "solution was authored for assignment `{}`, not `{}`",
            transfer.assignment,
            assignment.id
        );
    }

    let report = review(&assignment.board, &assignment.catalog, &transfer.answer)
        .context("solution references moves the assignment does not offer")?;

    println!("{}", assignment.name);
    for (index, name) in report.move_names().iter().enumerate() {
        let marker = if index < report.committed_moves() {
            "ok"
        } else {
            "--"
        };
        println!("{marker} {:>3}. {name}", index + 1);
    }
    print!("{}", render::trace(report.trace()));
    println!(
        "committed {} of {} moves ({} not executed)",
        report.committed_moves(),
        report.submitted_moves(),
        report.unexecuted_moves()
    );
    println!("{}", report.outcome().message());
    println!("{}", if report.is_correct() { "correct" } else { "incorrect" });
    Ok(())
}

fn list_moves(assignment: &Assignment) {
    println!("{}", assignment.name);
    for entry in assignment.catalog.iter() {
        println!(
            "{:>4}  {:<20} dx={:<3} dy={:<3} facing={:?}",
            entry.id().get(),
            entry.name(),
            entry.delta_x(),
            entry.delta_y(),
            entry.facing()
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_line_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn step_interval_requires_animation() {
        let base = ["ant-trail", "run", "--assignment", "a.toml", "--program", "1"];

        let error = Cli::try_parse_from(base.iter().chain(&["--step-ms", "10"]))
            .expect_err("--step-ms without --animate");
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(base.iter().chain(&["--animate", "--step-ms", "10"]))
            .expect("animated run parses");
        assert!(matches!(
            cli.command,
            CliCommand::Run {
                animate: true,
                step_ms: Some(10),
                ..
            }
        ));
    }
}
