//! Compact textual program syntax accepted on the command line.
//!
//! Steps are whitespace-separated move ids. `N(ids...)` wraps ids in a repeat
//! block executed `N` times, e.g. `1 1 3(2 1) 4`. Blocks do not nest.

use anyhow::{bail, Result};
use ant_trail_core::{Command, Event, MoveCatalog, MoveId, Program};
use ant_trail_editor::{self as editor, query, Editor};
use thiserror::Error;

/// Syntax errors in program text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ProgramTextError {
    /// A token is neither a move id nor a parenthesis.
    #[error("`{0}` is not a move id")]
    InvalidToken(String),
    /// An opening parenthesis is not preceded by an iteration count.
    #[error("repeat block is missing its iteration count")]
    MissingIterations,
    /// A closing parenthesis has no matching block.
    #[error("`)` does not close a repeat block")]
    UnexpectedClose,
    /// A block was opened inside another block.
    #[error("repeat blocks cannot be nested")]
    NestedBlock,
    /// The text ended inside a block.
    #[error("repeat block is not closed")]
    UnclosedBlock,
}

/// Translates program text into the editor commands that author it.
pub(crate) fn parse(text: &str) -> Result<Vec<Command>, ProgramTextError> {
    let spaced = text.replace('(', " ( ").replace(')', " ) ");
    let tokens: Vec<&str> = spaced.split_whitespace().collect();

    let mut commands = Vec::new();
    let mut open_block: Option<usize> = None;
    let mut step_count = 0;
    let mut index = 0;
    while let Some(token) = tokens.get(index) {
        match *token {
            "(" => return Err(ProgramTextError::MissingIterations),
            ")" => {
                if open_block.take().is_none() {
                    return Err(ProgramTextError::UnexpectedClose);
                }
            }
            value => {
                let number: u32 = value
                    .parse()
                    .map_err(|_| ProgramTextError::InvalidToken(value.to_owned()))?;
                if tokens.get(index + 1) == Some(&"(") {
                    if open_block.is_some() {
                        return Err(ProgramTextError::NestedBlock);
                    }
                    commands.push(Command::AppendRepeatBlock { iterations: number });
                    open_block = Some(step_count);
                    step_count += 1;
                    index += 1;
                } else if let Some(block) = open_block {
                    commands.push(Command::AppendMoveToBlock {
                        block,
                        id: MoveId::new(number),
                    });
                } else {
                    commands.push(Command::AppendMove {
                        id: MoveId::new(number),
                    });
                    step_count += 1;
                }
            }
        }
        index += 1;
    }

    if open_block.is_some() {
        return Err(ProgramTextError::UnclosedBlock);
    }
    Ok(commands)
}

/// Authors a program from text through the editor.
///
/// Unknown moves and repeat blocks asking for more than `max_iterations`
/// passes are rejected before anything is expanded.
pub(crate) fn build(text: &str, catalog: &MoveCatalog, max_iterations: u32) -> Result<Program> {
    let commands = parse(text)?;
    for command in &commands {
        if let Command::AppendRepeatBlock { iterations } = *command {
            if iterations > max_iterations {
                bail!("repeat block asks for {iterations} iterations, limit is {max_iterations}");
            }
        }
    }
    let mut editor = Editor::new(catalog.clone());
    let mut events = Vec::new();
    for command in commands {
        editor::apply(&mut editor, command, &mut events);
    }

    for event in &events {
        if let Event::CommandRejected { reason, .. } = event {
            bail!("program rejected: {reason}");
        }
    }
    Ok(query::program(&editor).clone())
}
