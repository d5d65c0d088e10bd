use ant_trail_core::{
    Board, Cell, MoveCatalog, MoveDefinition, MoveId, RunOutcome, ValidationError,
};
use ant_trail_system_review::review;

fn definition(id: u32, name: &str, delta_x: i32, delta_y: i32) -> MoveDefinition {
    MoveDefinition {
        id: MoveId::new(id),
        name: name.to_owned(),
        delta_x,
        delta_y,
        facing: None,
    }
}

fn catalog() -> MoveCatalog {
    MoveCatalog::from_definitions([
        definition(1, "Step right", 1, 0),
        definition(2, "Step left", -1, 0),
        definition(3, "Step up", 0, 1),
        definition(4, "Step down", 0, -1),
    ])
    .expect("catalog is valid")
}

fn board() -> Board {
    Board::new(3, 3, [Cell::new(2, 2)], Cell::new(1, 1), Cell::new(3, 1)).expect("valid board")
}

fn ids(values: &[u32]) -> Vec<MoveId> {
    values.iter().copied().map(MoveId::new).collect()
}

#[test]
fn correct_answer_is_accepted() {
    let report = review(&board(), &catalog(), &ids(&[1, 1])).expect("answer resolves");

    assert!(report.is_correct());
    assert_eq!(report.outcome(), RunOutcome::Success);
    assert_eq!(report.move_names(), ["Step right", "Step right"]);
    assert_eq!(report.unexecuted_moves(), 0);
}

#[test]
fn wrong_answer_reports_where_it_stopped() {
    let report = review(&board(), &catalog(), &ids(&[4, 1, 1, 3])).expect("answer resolves");

    assert!(!report.is_correct());
    assert_eq!(report.outcome(), RunOutcome::WallCollision);
    assert_eq!(report.committed_moves(), 1);
    assert_eq!(report.submitted_moves(), 4);
    assert_eq!(report.unexecuted_moves(), 3);
}

#[test]
fn unknown_move_fails_before_simulation() {
    let error = review(&board(), &catalog(), &ids(&[1, 42, 1])).expect_err("unknown id");

    assert_eq!(error, ValidationError::UnknownMove(MoveId::new(42)));
}

#[test]
fn empty_answer_does_not_reach_the_goal() {
    let report = review(&board(), &catalog(), &[]).expect("empty answer resolves");

    assert_eq!(report.outcome(), RunOutcome::NotReached);
    assert_eq!(report.trace().len(), 1);
}
