#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative program editor state for Ant Trail.
//!
//! The editor owns the learner's program while it is being authored. Adapters
//! translate UI gestures into [`Command`] values, [`apply`] executes them and
//! reports the result as [`Event`] values. Rejected commands leave the program
//! untouched and surface as [`Event::CommandRejected`].

use ant_trail_core::{
    Command, EditError, Event, MoveCatalog, MoveId, Program, RepeatBlock, Step,
};
use tracing::debug;

/// Represents the program being authored against an assignment's catalog.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    catalog: MoveCatalog,
    program: Program,
}

impl Editor {
    /// Creates an editor with an empty program for the provided catalog.
    #[must_use]
    pub fn new(catalog: MoveCatalog) -> Self {
        Self {
            catalog,
            program: Program::new(),
        }
    }

    fn resolve(&self, id: MoveId) -> Result<ant_trail_core::Move, EditError> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or(EditError::UnknownMove(id))
    }

    fn block_mut(&mut self, block: usize) -> Result<&mut RepeatBlock, EditError> {
        let len = self.program.len();
        match self.program.step_mut(block) {
            Some(Step::Repeat(repeat)) => Ok(repeat),
            Some(Step::Move(_)) => Err(EditError::NotARepeatBlock(block)),
            None => Err(EditError::StepOutOfRange { index: block, len }),
        }
    }

    fn execute(&mut self, command: Command) -> Result<Event, EditError> {
        match command {
            Command::AppendMove { id } => {
                let entry = self.resolve(id)?;
                self.program.push(entry);
                Ok(Event::StepAppended {
                    index: self.program.len() - 1,
                })
            }
            Command::AppendRepeatBlock { iterations } => {
                self.program.push(RepeatBlock::new(iterations));
                Ok(Event::StepAppended {
                    index: self.program.len() - 1,
                })
            }
            Command::RemoveStep { index } => {
                let len = self.program.len();
                self.program
                    .remove(index)
                    .map(|_| Event::StepRemoved { index })
                    .ok_or(EditError::StepOutOfRange { index, len })
            }
            Command::AppendMoveToBlock { block, id } => {
                let entry = self.resolve(id)?;
                let repeat = self.block_mut(block)?;
                repeat.push(entry);
                Ok(Event::BlockBodyChanged {
                    block,
                    body_len: repeat.body().len(),
                })
            }
            Command::RemoveMoveFromBlock { block, position } => {
                let repeat = self.block_mut(block)?;
                if repeat.remove(position).is_none() {
                    return Err(EditError::BodyPositionOutOfRange { block, position });
                }
                Ok(Event::BlockBodyChanged {
                    block,
                    body_len: repeat.body().len(),
                })
            }
            Command::SetIterations { block, iterations } => {
                let repeat = self.block_mut(block)?;
                let iterations = repeat.set_iterations(iterations);
                Ok(Event::IterationsChanged { block, iterations })
            }
            Command::ClearProgram => {
                self.program.clear();
                Ok(Event::ProgramCleared)
            }
        }
    }
}

/// Applies the provided command to the editor, mutating the program deterministically.
pub fn apply(editor: &mut Editor, command: Command, out_events: &mut Vec<Event>) {
    match editor.execute(command) {
        Ok(event) => out_events.push(event),
        Err(reason) => {
            debug!(?command, %reason, "edit command rejected");
            out_events.push(Event::CommandRejected { command, reason });
        }
    }
}

/// Query functions that provide read-only access to the editor state.
pub mod query {
    use ant_trail_core::{expand, Move, MoveCatalog, MoveId, Program};

    use super::Editor;

    /// Provides read-only access to the program being authored.
    #[must_use]
    pub fn program(editor: &Editor) -> &Program {
        &editor.program
    }

    /// Provides read-only access to the moves the assignment offers.
    #[must_use]
    pub fn catalog(editor: &Editor) -> &MoveCatalog {
        &editor.catalog
    }

    /// Flattens the current program into the sequence the simulator executes.
    #[must_use]
    pub fn expanded_moves(editor: &Editor) -> Vec<Move> {
        expand(&editor.program)
    }

    /// Encodes the current program for submission.
    #[must_use]
    pub fn encoded_solution(editor: &Editor) -> Vec<MoveId> {
        editor.program.encode()
    }
}
