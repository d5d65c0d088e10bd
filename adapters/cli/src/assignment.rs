use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use ant_trail_core::{Board, BoardDefinition, MoveCatalog, MoveDefinition};
use serde::Deserialize;

use crate::config::AssignmentLimits;

const SUPPORTED_ASSIGNMENT_VERSION: u32 = 1;

/// Puzzle loaded from an assignment file: board plus the moves it offers.
#[derive(Clone, Debug)]
pub(crate) struct Assignment {
    /// Identifier echoed in solution transfer strings.
    pub(crate) id: String,
    /// Title shown to the learner.
    pub(crate) name: String,
    /// Validated board layout.
    pub(crate) board: Board,
    /// Moves the learner may use.
    pub(crate) catalog: MoveCatalog,
}

impl Assignment {
    /// Loads and validates the assignment stored at `path`.
    pub(crate) fn load(path: impl AsRef<Path>, limits: &AssignmentLimits) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read assignment at {}", path.display()))?;
        Self::parse(&contents, limits)
            .with_context(|| format!("invalid assignment at {}", path.display()))
    }

    fn parse(contents: &str, limits: &AssignmentLimits) -> Result<Self> {
        let file: AssignmentFile =
            toml::from_str(contents).context("failed to parse assignment toml contents")?;
        if file.version != SUPPORTED_ASSIGNMENT_VERSION {
            bail!(
                "unsupported assignment version {}; expected {}",
                file.version,
                SUPPORTED_ASSIGNMENT_VERSION
            );
        }
        if file.id.is_empty() || file.id.contains(':') {
            bail!("assignment id `{}` must be non-empty and contain no ':'", file.id);
        }

        limits.check(file.board.width, file.board.height)?;
        let board = Board::try_from(file.board).context("assignment board is malformed")?;
        let catalog =
            MoveCatalog::from_definitions(file.moves).context("assignment moves are malformed")?;
        if catalog.is_empty() {
            bail!("assignment offers no moves");
        }

        Ok(Self {
            id: file.id,
            name: file.name,
            board,
            catalog,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AssignmentFile {
    version: u32,
    id: String,
    name: String,
    board: BoardDefinition,
    #[serde(default)]
    moves: Vec<MoveDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ant_trail_core::{Cell, FacingChange, MoveId, ValidationError};

    const AROUND_THE_WALL: &str = include_str!("../assignments/around-the-wall.toml");

    #[test]
    fn bundled_assignment_loads() {
        let assignment =
            Assignment::parse(AROUND_THE_WALL, &AssignmentLimits::default()).expect("valid");

        assert_eq!(assignment.id, "around-the-wall");
        assert_eq!(assignment.board.start(), Cell::new(1, 1));
        assert_eq!(assignment.board.goal(), Cell::new(3, 1));
        assert!(assignment.board.is_wall(Cell::new(2, 2)));
        assert_eq!(
            assignment
                .catalog
                .get(MoveId::new(4))
                .map(|entry| entry.facing()),
            Some(FacingChange::Down)
        );
    }

    #[test]
    fn wall_on_start_is_reported_as_validation_error() {
        let contents = r#"
            version = 1
            id = "broken"
            name = "Broken"

            [board]
            width = 2
            height = 2
            start = { x = 1, y = 1 }
            goal = { x = 2, y = 2 }
            walls = [{ x = 1, y = 1 }]

            [[moves]]
            id = 1
            name = "Step right"
            delta_x = 1
            delta_y = 0
        "#;

        let error = Assignment::parse(contents, &AssignmentLimits::default())
            .expect_err("start on wall must fail");
        assert_eq!(
            error.downcast_ref::<ValidationError>(),
            Some(&ValidationError::StartOnWall(Cell::new(1, 1)))
        );
    }

    #[test]
    fn oversized_boards_and_unknown_facings_are_rejected() {
        let oversized = AROUND_THE_WALL.replace("width = 3", "width = 40");
        assert!(Assignment::parse(&oversized, &AssignmentLimits::default()).is_err());

        let spin = concat!(
            "[[moves]]\nid = 9\nname = \"Spin\"\n",
            "delta_x = 0\ndelta_y = 0\nfacing = \"around\"\n",
        );
        let bad_facing = format!("{AROUND_THE_WALL}\n{spin}");
        let error = Assignment::parse(&bad_facing, &AssignmentLimits::default())
            .expect_err("unknown facing must fail");
        assert!(matches!(
            error.downcast_ref::<ValidationError>(),
            Some(ValidationError::UnknownFacing { .. })
        ));
    }
}
