#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic simulator that executes an expanded program on a board.
//!
//! The simulator is pure: it reads an immutable [`Board`] and a flat move
//! sequence (see [`ant_trail_core::expand`]) and produces the ordered trace of
//! committed states together with exactly one [`RunOutcome`]. Presentation
//! layers may consume the lazy [`Simulation`] iterator directly or collect the
//! whole [`Run`] eagerly; pacing never influences the result.

use std::{collections::HashSet, iter::FusedIterator};

use ant_trail_core::{
    Board, Cell, Facing, Move, Program, RunOutcome, TraceEntry, INITIAL_FACING,
};
use tracing::{debug, trace};

/// Complete result of executing a program against a board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    trace: Vec<TraceEntry>,
    outcome: RunOutcome,
}

impl Run {
    /// Committed states in execution order, starting with the initial state.
    #[must_use]
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Terminal classification of the run.
    #[must_use]
    pub const fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Number of moves that were committed before the run halted.
    #[must_use]
    pub fn committed_moves(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    /// State the ant occupies once the run halted.
    #[must_use]
    pub fn final_state(&self) -> Option<TraceEntry> {
        self.trace.last().copied()
    }

    /// Consumes the run, yielding the trace and the outcome.
    #[must_use]
    pub fn into_parts(self) -> (Vec<TraceEntry>, RunOutcome) {
        (self.trace, self.outcome)
    }
}

/// Executes the moves against the board and classifies the outcome.
///
/// The trace always starts with the ant on the start cell facing right. A move
/// that would leave the board, enter a wall or revisit a cell halts the run
/// without extending the trace. Reaching the goal halts the run immediately,
/// leaving any remaining moves unconsumed.
#[must_use]
pub fn run(board: &Board, moves: &[Move]) -> Run {
    collect(Simulation::new(board, moves))
}

/// Executes a program, unrolling its repeat blocks only as far as the run gets.
///
/// Produces the same [`Run`] as `run(board, &expand(program))`. A run can never
/// commit more moves than the board has cells, so huge iteration counts cost
/// nothing beyond the moves actually attempted.
#[must_use]
pub fn run_program(board: &Board, program: &Program) -> Run {
    collect(Simulation::from_moves(board, program.moves()))
}

fn collect<'a, I>(mut simulation: Simulation<'a, I>) -> Run
where
    I: Iterator<Item = &'a Move> + Clone,
{
    let trace: Vec<TraceEntry> = simulation.by_ref().collect();
    let outcome = simulation.outcome().unwrap_or(RunOutcome::NotReached);
    debug!(
        %outcome,
        committed = trace.len().saturating_sub(1),
        attempted = simulation.attempted,
        "simulation finished"
    );
    Run { trace, outcome }
}

/// Lazy, restartable execution of a move sequence.
///
/// The iterator yields the initial state followed by one entry per committed
/// move. Once it returns `None` the terminal outcome is available through
/// [`Simulation::outcome`]. Moves are pulled from the source only as the run
/// advances.
#[derive(Clone, Debug)]
pub struct Simulation<'a, I = std::slice::Iter<'a, Move>> {
    board: &'a Board,
    source: I,
    pending: I,
    attempted: usize,
    position: Cell,
    facing: Facing,
    visited: HashSet<Cell>,
    started: bool,
    outcome: Option<RunOutcome>,
}

impl<'a> Simulation<'a> {
    /// Prepares a simulation over a flat move slice, positioned before the initial state.
    #[must_use]
    pub fn new(board: &'a Board, moves: &'a [Move]) -> Self {
        Self::from_moves(board, moves.iter())
    }
}

impl<'a, I> Simulation<'a, I>
where
    I: Iterator<Item = &'a Move> + Clone,
{
    /// Prepares a simulation over any replayable move source.
    #[must_use]
    pub fn from_moves(board: &'a Board, moves: I) -> Self {
        let mut simulation = Self {
            board,
            pending: moves.clone(),
            source: moves,
            attempted: 0,
            position: board.start(),
            facing: INITIAL_FACING,
            visited: HashSet::new(),
            started: false,
            outcome: None,
        };
        simulation.restart();
        simulation
    }

    /// Rewinds the simulation so the next call yields the initial state again.
    pub fn restart(&mut self) {
        self.pending = self.source.clone();
        self.attempted = 0;
        self.position = self.board.start();
        self.facing = INITIAL_FACING;
        self.visited.clear();
        let _ = self.visited.insert(self.position);
        self.started = false;
        self.outcome = None;
    }

    /// Terminal outcome, available once the iterator is exhausted.
    #[must_use]
    pub const fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// Current state of the ant.
    #[must_use]
    pub const fn state(&self) -> TraceEntry {
        TraceEntry::new(self.position, self.facing)
    }

    fn halt(&mut self, outcome: RunOutcome) -> Option<TraceEntry> {
        self.outcome = Some(outcome);
        None
    }

    fn step(&mut self) -> Option<TraceEntry> {
        let Some(entry) = self.pending.next() else {
            return self.halt(RunOutcome::NotReached);
        };
        self.attempted += 1;

        let candidate = match self.position.displaced(entry.delta_x(), entry.delta_y()) {
            Some(cell) if self.board.contains(cell) => cell,
            _ => return self.halt(RunOutcome::OutOfBounds),
        };
        if self.board.is_wall(candidate) {
            return self.halt(RunOutcome::WallCollision);
        }
        if self.visited.contains(&candidate) {
            return self.halt(RunOutcome::RepeatedState);
        }

        self.position = candidate;
        self.facing = entry.facing().resolve(self.facing);
        let _ = self.visited.insert(candidate);
        trace!(
            move_id = %entry.id(),
            cell = %candidate,
            facing = %self.facing,
            "move committed"
        );

        if candidate == self.board.goal() {
            self.outcome = Some(RunOutcome::Success);
        }
        Some(self.state())
    }
}

impl<'a, I> Iterator for Simulation<'a, I>
where
    I: Iterator<Item = &'a Move> + Clone,
{
    type Item = TraceEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            let no_moves = self.pending.clone().next().is_none();
            if no_moves && self.board.start() == self.board.goal() {
                self.outcome = Some(RunOutcome::Success);
            }
            return Some(self.state());
        }

        if self.outcome.is_some() {
            return None;
        }

        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending_initial = usize::from(!self.started);
        if self.outcome.is_some() {
            return (pending_initial, Some(pending_initial));
        }
        let upper = self
            .pending
            .size_hint()
            .1
            .and_then(|remaining| remaining.checked_add(pending_initial));
        (pending_initial, upper)
    }
}

impl<'a, I> FusedIterator for Simulation<'a, I> where I: Iterator<Item = &'a Move> + Clone {}

#[cfg(test)]
mod tests {
    use super::*;
    use ant_trail_core::{FacingChange, MoveId};

    fn board() -> Board {
        Board::new(2, 2, [], Cell::new(1, 1), Cell::new(2, 2)).expect("valid board")
    }

    #[test]
    fn size_hint_bounds_remaining_states() {
        let board = board();
        let moves = vec![Move::new(MoveId::new(1), "Step right", 1, 0, FacingChange::Right)];
        let mut simulation = Simulation::new(&board, &moves);
        assert_eq!(simulation.size_hint(), (1, Some(2)));
        assert!(simulation.next().is_some());
        assert_eq!(simulation.size_hint(), (0, Some(1)));
    }

    #[test]
    fn restart_replays_identical_states() {
        let board = board();
        let moves = vec![
            Move::new(MoveId::new(1), "Step right", 1, 0, FacingChange::Right),
            Move::new(MoveId::new(2), "Step down", 0, -1, FacingChange::Down),
        ];
        let mut simulation = Simulation::new(&board, &moves);
        let first: Vec<_> = simulation.by_ref().collect();
        let first_outcome = simulation.outcome();

        simulation.restart();
        assert_eq!(simulation.outcome(), None);
        let second: Vec<_> = simulation.by_ref().collect();

        assert_eq!(first, second);
        assert_eq!(first_outcome, simulation.outcome());
        assert_eq!(first_outcome, Some(RunOutcome::Success));
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let board = board();
        let moves = Vec::new();
        let mut simulation = Simulation::new(&board, &moves);
        assert!(simulation.next().is_some());
        assert!(simulation.next().is_none());
        assert!(simulation.next().is_none());
        assert_eq!(simulation.outcome(), Some(RunOutcome::NotReached));
    }
}
