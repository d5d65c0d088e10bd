#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ant Trail workspace.
//!
//! This crate defines the board, the learner-authored program model and the
//! message surface of the program editor. Adapters submit [`Command`] values
//! describing desired program edits, the editor applies those commands through
//! its `apply` entry point and broadcasts [`Event`] values. Systems receive an
//! immutable [`Board`] together with an expanded move list and respond with
//! traces and [`RunOutcome`] values; they never mutate shared state.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    iter::FusedIterator,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction the ant faces before executing its first move.
pub const INITIAL_FACING: Facing = Facing::Right;

/// Location of a single board cell expressed with 1-based coordinates.
///
/// Coordinates are signed so candidate cells produced by negative
/// displacements stay representable until the boundary check rejects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the cell, counted from 1 at the left edge.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the cell, counted from 1 at the top edge.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Applies a move displacement using the board's top-left origin.
    ///
    /// The horizontal delta is added and the vertical delta subtracted, so a
    /// positive `delta_y` moves the ant up the screen. Returns `None` when the
    /// arithmetic overflows, which callers treat as leaving the board.
    #[must_use]
    pub fn displaced(self, delta_x: i32, delta_y: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(delta_x)?,
            y: self.y.checked_sub(delta_y)?,
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Role a cell plays on the board, used when reporting validation failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellRole {
    /// The cell the ant starts on.
    Start,
    /// The cell the ant must reach.
    Goal,
    /// An impassable wall cell.
    Wall,
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Start => "start",
            Self::Goal => "goal",
            Self::Wall => "wall",
        };
        f.write_str(label)
    }
}

/// Immutable puzzle board: dimensions, walls, start and goal.
///
/// Boards are validated on construction and on deserialisation, so a `Board`
/// value always satisfies its invariants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardDefinition", into = "BoardDefinition")]
pub struct Board {
    width: u32,
    height: u32,
    walls: BTreeSet<Cell>,
    start: Cell,
    goal: Cell,
}

impl Board {
    /// Validates the provided layout and constructs a board.
    pub fn new(
        width: u32,
        height: u32,
        walls: impl IntoIterator<Item = Cell>,
        start: Cell,
        goal: Cell,
    ) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::EmptyBoard { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(ValidationError::BoardTooLarge { width, height });
        }

        let board = Self {
            width,
            height,
            walls: walls.into_iter().collect(),
            start,
            goal,
        };

        for (role, cell) in [(CellRole::Start, start), (CellRole::Goal, goal)]
            .into_iter()
            .chain(board.walls.iter().map(|wall| (CellRole::Wall, *wall)))
        {
            if !board.contains(cell) {
                return Err(ValidationError::CellOutOfBounds {
                    role,
                    cell,
                    width,
                    height,
                });
            }
        }

        if board.is_wall(start) {
            return Err(ValidationError::StartOnWall(start));
        }
        if board.is_wall(goal) {
            return Err(ValidationError::GoalOnWall(goal));
        }

        Ok(board)
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell the ant occupies before the program runs.
    #[must_use]
    pub const fn start(&self) -> Cell {
        self.start
    }

    /// Cell the ant must reach for the run to succeed.
    #[must_use]
    pub const fn goal(&self) -> Cell {
        self.goal
    }

    /// Iterator over the wall cells in deterministic order.
    pub fn walls(&self) -> impl Iterator<Item = Cell> + '_ {
        self.walls.iter().copied()
    }

    /// Reports whether the cell lies within `[1, width] x [1, height]`.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x() >= 1
            && cell.y() >= 1
            && i64::from(cell.x()) <= i64::from(self.width)
            && i64::from(cell.y()) <= i64::from(self.height)
    }

    /// Reports whether the cell is an impassable wall.
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }
}

/// Unvalidated board layout as supplied by assignment data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardDefinition {
    /// Number of columns on the board.
    pub width: u32,
    /// Number of rows on the board.
    pub height: u32,
    /// Impassable cells.
    #[serde(default)]
    pub walls: Vec<Cell>,
    /// Cell the ant starts on.
    pub start: Cell,
    /// Cell the ant must reach.
    pub goal: Cell,
}

impl TryFrom<BoardDefinition> for Board {
    type Error = ValidationError;

    fn try_from(definition: BoardDefinition) -> Result<Self, Self::Error> {
        Board::new(
            definition.width,
            definition.height,
            definition.walls,
            definition.start,
            definition.goal,
        )
    }
}

impl From<Board> for BoardDefinition {
    fn from(board: Board) -> Self {
        Self {
            width: board.width,
            height: board.height,
            walls: board.walls.into_iter().collect(),
            start: board.start,
            goal: board.goal,
        }
    }
}

/// Direction the ant is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Facing increasing columns.
    Right,
    /// Facing decreasing columns.
    Left,
    /// Facing decreasing rows.
    Up,
    /// Facing increasing rows.
    Down,
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(label)
    }
}

/// Facing the ant assumes after executing a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingChange {
    /// Turn to face right.
    Right,
    /// Turn to face left.
    Left,
    /// Turn to face up.
    Up,
    /// Turn to face down.
    Down,
    /// Keep the current facing.
    #[default]
    Unchanged,
}

impl FacingChange {
    /// Resolves the facing that results from applying this change.
    #[must_use]
    pub const fn resolve(self, current: Facing) -> Facing {
        match self {
            Self::Right => Facing::Right,
            Self::Left => Facing::Left,
            Self::Up => Facing::Up,
            Self::Down => Facing::Down,
            Self::Unchanged => current,
        }
    }

    /// Infers the facing change from a legacy move label.
    ///
    /// Assignment catalogs historically encoded the facing only in the move's
    /// display name ("Step right", "Jump left", "Шаг вверх"). The match is
    /// case-insensitive and falls back to [`FacingChange::Unchanged`].
    #[must_use]
    pub fn from_legacy_name(name: &str) -> Self {
        const KEYWORDS: [(&str, FacingChange); 8] = [
            ("right", FacingChange::Right),
            ("вправо", FacingChange::Right),
            ("left", FacingChange::Left),
            ("влево", FacingChange::Left),
            ("up", FacingChange::Up),
            ("вверх", FacingChange::Up),
            ("down", FacingChange::Down),
            ("вниз", FacingChange::Down),
        ];

        let lowered = name.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map_or(Self::Unchanged, |(_, change)| *change)
    }
}

impl FromStr for FacingChange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "unchanged" => Ok(Self::Unchanged),
            _ => Err(value.to_owned()),
        }
    }
}

/// Opaque identifier the authoring system assigns to a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(u32);

impl MoveId {
    /// Creates a new move identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primitive instruction that displaces the ant and may turn it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    id: MoveId,
    name: String,
    delta_x: i32,
    delta_y: i32,
    facing: FacingChange,
}

impl Move {
    /// Creates a move with an already resolved facing change.
    #[must_use]
    pub fn new(
        id: MoveId,
        name: impl Into<String>,
        delta_x: i32,
        delta_y: i32,
        facing: FacingChange,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            delta_x,
            delta_y,
            facing,
        }
    }

    /// Identifier used when encoding programs for submission.
    #[must_use]
    pub const fn id(&self) -> MoveId {
        self.id
    }

    /// Display label shown to the learner.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Horizontal displacement; positive values move right.
    #[must_use]
    pub const fn delta_x(&self) -> i32 {
        self.delta_x
    }

    /// Vertical displacement; positive values move up the screen.
    #[must_use]
    pub const fn delta_y(&self) -> i32 {
        self.delta_y
    }

    /// Facing the ant assumes after this move.
    #[must_use]
    pub const fn facing(&self) -> FacingChange {
        self.facing
    }
}

/// Raw move tuple supplied by the assignment-data provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoveDefinition {
    /// Identifier of the move.
    pub id: MoveId,
    /// Display label, also the legacy source of the facing.
    pub name: String,
    /// Horizontal displacement.
    pub delta_x: i32,
    /// Vertical displacement; positive values move up the screen.
    pub delta_y: i32,
    /// Explicit facing; inferred from `name` when absent.
    #[serde(default)]
    pub facing: Option<String>,
}

impl TryFrom<MoveDefinition> for Move {
    type Error = ValidationError;

    fn try_from(definition: MoveDefinition) -> Result<Self, Self::Error> {
        let facing = match definition.facing.as_deref() {
            Some(explicit) => {
                explicit
                    .parse()
                    .map_err(|facing| ValidationError::UnknownFacing {
                        id: definition.id,
                        facing,
                    })?
            }
            None => FacingChange::from_legacy_name(&definition.name),
        };

        Ok(Move::new(
            definition.id,
            definition.name,
            definition.delta_x,
            definition.delta_y,
            facing,
        ))
    }
}

/// Moves offered by an assignment, keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveCatalog {
    moves: BTreeMap<MoveId, Move>,
}

impl MoveCatalog {
    /// Builds a catalog from validated moves, rejecting duplicate identifiers.
    pub fn from_moves(moves: impl IntoIterator<Item = Move>) -> Result<Self, ValidationError> {
        let mut catalog = BTreeMap::new();
        for entry in moves {
            let id = entry.id();
            if catalog.insert(id, entry).is_some() {
                return Err(ValidationError::DuplicateMove(id));
            }
        }
        Ok(Self { moves: catalog })
    }

    /// Builds a catalog from raw definitions, resolving every facing once.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = MoveDefinition>,
    ) -> Result<Self, ValidationError> {
        let moves = definitions
            .into_iter()
            .map(Move::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_moves(moves)
    }

    /// Returns the move registered under the identifier, if any.
    #[must_use]
    pub fn get(&self, id: MoveId) -> Option<&Move> {
        self.moves.get(&id)
    }

    /// Resolves an identifier, failing for moves the assignment does not offer.
    pub fn resolve(&self, id: MoveId) -> Result<Move, ValidationError> {
        self.get(id).cloned().ok_or(ValidationError::UnknownMove(id))
    }

    /// Resolves an encoded answer into moves, failing on the first unknown id.
    pub fn resolve_all(&self, ids: &[MoveId]) -> Result<Vec<Move>, ValidationError> {
        ids.iter().map(|id| self.resolve(*id)).collect()
    }

    /// Iterator over the catalog in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.values()
    }

    /// Number of moves in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Reports whether the catalog offers no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Fixed number of repetitions wrapping a flat sequence of moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepeatBlock {
    iterations: u32,
    #[serde(default)]
    body: Vec<Move>,
}

impl RepeatBlock {
    /// Creates an empty block; the iteration count is clamped to at least one.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
            body: Vec::new(),
        }
    }

    /// Creates a block with the provided body; the count is clamped to at least one.
    #[must_use]
    pub fn with_body(iterations: u32, body: Vec<Move>) -> Self {
        Self {
            iterations: iterations.max(1),
            body,
        }
    }

    /// Number of times the body is executed.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Moves executed on every iteration.
    #[must_use]
    pub fn body(&self) -> &[Move] {
        &self.body
    }

    /// Updates the iteration count, clamping to at least one, and returns the stored value.
    pub fn set_iterations(&mut self, iterations: u32) -> u32 {
        self.iterations = iterations.max(1);
        self.iterations
    }

    /// Appends a move to the end of the body.
    pub fn push(&mut self, entry: Move) {
        self.body.push(entry);
    }

    /// Removes the move at `position` from the body.
    pub fn remove(&mut self, position: usize) -> Option<Move> {
        (position < self.body.len()).then(|| self.body.remove(position))
    }

    /// Number of moves this block contributes once expanded.
    ///
    /// A deserialised block with zero iterations contributes nothing.
    #[must_use]
    pub fn expanded_len(&self) -> usize {
        self.body.len().saturating_mul(self.iterations as usize)
    }
}

/// Single entry of a program.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// A primitive move.
    Move(Move),
    /// A repeat block wrapping a flat body of moves.
    Repeat(RepeatBlock),
}

impl From<Move> for Step {
    fn from(entry: Move) -> Self {
        Self::Move(entry)
    }
}

impl From<RepeatBlock> for Step {
    fn from(block: RepeatBlock) -> Self {
        Self::Repeat(block)
    }
}

/// Ordered sequence of steps authored by the learner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    steps: Vec<Step>,
}

impl Program {
    /// Creates an empty program.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Creates a program from the provided steps.
    #[must_use]
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Steps in authoring order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Appends a step to the end of the program.
    pub fn push(&mut self, step: impl Into<Step>) {
        self.steps.push(step.into());
    }

    /// Removes the step at `index`, shifting later steps forward.
    pub fn remove(&mut self, index: usize) -> Option<Step> {
        (index < self.steps.len()).then(|| self.steps.remove(index))
    }

    /// Mutable access to the step at `index`.
    pub fn step_mut(&mut self, index: usize) -> Option<&mut Step> {
        self.steps.get_mut(index)
    }

    /// Removes every step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Number of authored steps; repeat blocks count once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Reports whether the program has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Lazily walks the expansion of the program, one move at a time.
    ///
    /// Repeat blocks are unrolled as the iterator advances, so a consumer that
    /// stops early never pays for the remaining iterations.
    #[must_use]
    pub fn moves(&self) -> Moves<'_> {
        Moves {
            steps: self.steps.iter(),
            body: &[],
            position: 0,
            passes_left: 0,
        }
    }

    /// Number of moves produced by [`expand`] without allocating them.
    #[must_use]
    pub fn expanded_len(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Move(_) => 1,
                Step::Repeat(block) => block.expanded_len(),
            })
            .fold(0, usize::saturating_add)
    }

    /// Encodes the program for submission as the ordered ids of its expansion.
    #[must_use]
    pub fn encode(&self) -> Vec<MoveId> {
        self.moves().map(Move::id).collect()
    }
}

/// Iterator over the expanded moves of a [`Program`], see [`Program::moves`].
#[derive(Clone, Debug)]
pub struct Moves<'a> {
    steps: std::slice::Iter<'a, Step>,
    body: &'a [Move],
    position: usize,
    passes_left: u32,
}

impl<'a> Iterator for Moves<'a> {
    type Item = &'a Move;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.body.get(self.position) {
                self.position += 1;
                return Some(entry);
            }
            if self.passes_left > 0 {
                self.passes_left -= 1;
                self.position = 0;
                continue;
            }
            match self.steps.next()? {
                Step::Move(entry) => return Some(entry),
                Step::Repeat(block) => {
                    self.position = 0;
                    if block.iterations() == 0 || block.body().is_empty() {
                        self.body = &[];
                        self.passes_left = 0;
                    } else {
                        self.body = block.body();
                        self.passes_left = block.iterations() - 1;
                    }
                }
            }
        }
    }
}

impl FusedIterator for Moves<'_> {}

/// Flattens a program into the move sequence the simulator executes.
///
/// Every repeat block is replaced by `iterations` copies of its body; all other
/// steps keep their relative order.
#[must_use]
pub fn expand(program: &Program) -> Vec<Move> {
    program.moves().cloned().collect()
}

/// State of the ant recorded after the start and after every committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Cell the ant occupies.
    pub position: Cell,
    /// Direction the ant faces.
    pub facing: Facing,
}

impl TraceEntry {
    /// Creates a trace entry.
    #[must_use]
    pub const fn new(position: Cell, facing: Facing) -> Self {
        Self { position, facing }
    }
}

/// Terminal classification of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The ant reached the goal.
    Success,
    /// A move would have left the board.
    OutOfBounds,
    /// A move would have entered a wall.
    WallCollision,
    /// A move would have revisited a cell occupied earlier in the run.
    RepeatedState,
    /// The program ran out of moves before the ant reached the goal.
    NotReached,
}

impl RunOutcome {
    /// Reports whether the outcome is [`RunOutcome::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Message shown to the learner for this outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => "Success! The ant reached the goal.",
            Self::OutOfBounds => "The ant overstepped the boundary!",
            Self::WallCollision => "The ant ran into a wall!",
            Self::RepeatedState => "The ant got stuck in a loop!",
            Self::NotReached => "The ant did not reach the goal.",
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Data-integrity faults detected before a run starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The board has a zero dimension.
    #[error("board dimensions must be positive, got {width}x{height}")]
    EmptyBoard {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// The board dimensions exceed the representable coordinate range.
    #[error("board dimensions {width}x{height} exceed the supported coordinate range")]
    BoardTooLarge {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// A start, goal or wall cell lies outside the board.
    #[error("{role} cell {cell} lies outside the {width}x{height} board")]
    CellOutOfBounds {
        /// Role of the offending cell.
        role: CellRole,
        /// The offending cell.
        cell: Cell,
        /// Number of columns on the board.
        width: u32,
        /// Number of rows on the board.
        height: u32,
    },
    /// The start cell is a wall.
    #[error("start cell {0} is a wall")]
    StartOnWall(Cell),
    /// The goal cell is a wall.
    #[error("goal cell {0} is a wall")]
    GoalOnWall(Cell),
    /// A move definition names a facing outside the supported set.
    #[error("move {id} declares unknown facing `{facing}`")]
    UnknownFacing {
        /// Identifier of the offending move.
        id: MoveId,
        /// The unrecognised facing label.
        facing: String,
    },
    /// Two move definitions share an identifier.
    #[error("move {0} is defined more than once")]
    DuplicateMove(MoveId),
    /// A program or answer references a move the assignment does not offer.
    #[error("move {0} is not offered by this assignment")]
    UnknownMove(MoveId),
}

/// Reasons the program editor rejects a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum EditError {
    /// The command references a move the catalog does not offer.
    #[error("move {0} is not offered by this assignment")]
    UnknownMove(MoveId),
    /// The step index lies beyond the end of the program.
    #[error("step {index} does not exist in a program of {len} steps")]
    StepOutOfRange {
        /// Requested step index.
        index: usize,
        /// Number of steps in the program.
        len: usize,
    },
    /// The targeted step is a plain move rather than a repeat block.
    #[error("step {0} is not a repeat block")]
    NotARepeatBlock(usize),
    /// The position lies beyond the end of the block's body.
    #[error("block {block} has no move at position {position}")]
    BodyPositionOutOfRange {
        /// Index of the repeat block.
        block: usize,
        /// Requested body position.
        position: usize,
    },
}

/// Commands that express all permissible program edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Appends a catalog move to the end of the program.
    AppendMove {
        /// Identifier of the move to append.
        id: MoveId,
    },
    /// Appends an empty repeat block to the end of the program.
    AppendRepeatBlock {
        /// Requested iteration count; clamped to at least one.
        iterations: u32,
    },
    /// Removes the step at the provided index.
    RemoveStep {
        /// Index of the step to remove.
        index: usize,
    },
    /// Appends a catalog move to the body of a repeat block.
    AppendMoveToBlock {
        /// Index of the repeat block.
        block: usize,
        /// Identifier of the move to append.
        id: MoveId,
    },
    /// Removes a move from the body of a repeat block.
    RemoveMoveFromBlock {
        /// Index of the repeat block.
        block: usize,
        /// Position of the move inside the body.
        position: usize,
    },
    /// Updates the iteration count of a repeat block.
    SetIterations {
        /// Index of the repeat block.
        block: usize,
        /// Requested iteration count; clamped to at least one.
        iterations: u32,
    },
    /// Removes every step from the program.
    ClearProgram,
}

/// Events broadcast by the editor after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a step was appended.
    StepAppended {
        /// Index the new step occupies.
        index: usize,
    },
    /// Confirms that a step was removed.
    StepRemoved {
        /// Index the removed step occupied.
        index: usize,
    },
    /// Confirms that the body of a repeat block changed.
    BlockBodyChanged {
        /// Index of the repeat block.
        block: usize,
        /// Number of moves in the body after the change.
        body_len: usize,
    },
    /// Confirms that the iteration count of a repeat block changed.
    IterationsChanged {
        /// Index of the repeat block.
        block: usize,
        /// Iteration count stored after clamping.
        iterations: u32,
    },
    /// Confirms that the program was emptied.
    ProgramCleared,
    /// Reports that a command was rejected.
    CommandRejected {
        /// The rejected command.
        command: Command,
        /// Specific reason the command failed.
        reason: EditError,
    },
}
