#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Review system that replays a submitted answer for a grading reviewer.
//!
//! Submissions arrive as the flat sequence of move identifiers produced by
//! [`ant_trail_core::Program::encode`]. Every identifier is resolved against
//! the assignment's catalog before simulation starts, so a malformed answer
//! never yields a partial trace.

use ant_trail_core::{Board, MoveCatalog, MoveId, RunOutcome, TraceEntry, ValidationError};
use ant_trail_system_simulator::run;
use tracing::debug;

/// Result of replaying a submitted answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewReport {
    outcome: RunOutcome,
    trace: Vec<TraceEntry>,
    move_names: Vec<String>,
}

impl ReviewReport {
    /// Terminal classification of the replayed run.
    #[must_use]
    pub const fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Reports whether the answer drives the ant onto the goal.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.outcome.is_success()
    }

    /// Committed states of the replayed run.
    #[must_use]
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Display names of the submitted moves, in submission order.
    #[must_use]
    pub fn move_names(&self) -> &[String] {
        &self.move_names
    }

    /// Number of moves the learner submitted.
    #[must_use]
    pub fn submitted_moves(&self) -> usize {
        self.move_names.len()
    }

    /// Number of moves that were committed before the run halted.
    #[must_use]
    pub fn committed_moves(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    /// Number of submitted moves that were never evaluated or were rejected.
    #[must_use]
    pub fn unexecuted_moves(&self) -> usize {
        self.submitted_moves() - self.committed_moves()
    }
}

/// Resolves the answer through the catalog and replays it on the board.
///
/// Fails with [`ValidationError::UnknownMove`] when the answer references a
/// move the assignment does not offer.
pub fn review(
    board: &Board,
    catalog: &MoveCatalog,
    answer: &[MoveId],
) -> Result<ReviewReport, ValidationError> {
    let moves = catalog.resolve_all(answer)?;
    let (trace, outcome) = run(board, &moves).into_parts();
    debug!(%outcome, submitted = answer.len(), "submission reviewed");

    Ok(ReviewReport {
        outcome,
        trace,
        move_names: moves.iter().map(|entry| entry.name().to_owned()).collect(),
    })
}
