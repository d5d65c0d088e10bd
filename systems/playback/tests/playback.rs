use std::time::Duration;

use ant_trail_core::{Board, Cell, FacingChange, Move, MoveId, RunOutcome};
use ant_trail_system_playback::{Config, Frame, Playback, PlaybackState};
use ant_trail_system_simulator::{run, Run};

fn three_step_run() -> Run {
    let board = Board::new(4, 1, [], Cell::new(1, 1), Cell::new(4, 1)).expect("valid board");
    let right = Move::new(MoveId::new(1), "Step right", 1, 0, FacingChange::Right);
    run(&board, &[right.clone(), right.clone(), right])
}

fn indices(frames: &[Frame]) -> Vec<usize> {
    frames.iter().map(|frame| frame.index).collect()
}

#[test]
fn initial_state_is_released_immediately() {
    let mut playback = Playback::new(three_step_run(), Config::default());
    let mut frames = Vec::new();

    playback.advance(Duration::ZERO, &mut frames);

    assert_eq!(indices(&frames), vec![0]);
    assert_eq!(frames[0].entry.position, Cell::new(1, 1));
    assert_eq!(frames[0].outcome, None);
    assert_eq!(playback.state(), PlaybackState::Playing);
}

#[test]
fn frames_follow_the_step_interval() {
    let mut playback = Playback::new(three_step_run(), Config::new(Duration::from_millis(500)));
    let mut frames = Vec::new();

    playback.advance(Duration::from_millis(300), &mut frames);
    assert_eq!(indices(&frames), vec![0]);

    playback.advance(Duration::from_millis(300), &mut frames);
    assert_eq!(indices(&frames), vec![0, 1]);

    playback.advance(Duration::from_millis(1_000), &mut frames);
    assert_eq!(indices(&frames), vec![0, 1, 2, 3]);
    assert_eq!(frames[3].outcome, Some(RunOutcome::Success));
    assert_eq!(playback.state(), PlaybackState::Finished);

    playback.advance(Duration::from_secs(10), &mut frames);
    assert_eq!(frames.len(), 4, "finished playback must not emit");
}

#[test]
fn zero_interval_releases_everything_at_once() {
    let mut playback = Playback::new(three_step_run(), Config::new(Duration::ZERO));
    let mut frames = Vec::new();

    playback.advance(Duration::ZERO, &mut frames);

    assert_eq!(indices(&frames), vec![0, 1, 2, 3]);
    assert_eq!(playback.current().map(|entry| entry.position), Some(Cell::new(4, 1)));
}

#[test]
fn cancel_discards_pending_frames_without_touching_the_run() {
    let mut playback = Playback::new(three_step_run(), Config::default());
    let mut frames = Vec::new();

    playback.advance(Duration::from_millis(500), &mut frames);
    playback.cancel();
    playback.advance(Duration::from_secs(5), &mut frames);

    assert_eq!(indices(&frames), vec![0, 1]);
    assert_eq!(playback.state(), PlaybackState::Cancelled);
    assert_eq!(playback.outcome(), RunOutcome::Success);
    assert_eq!(playback.current().map(|entry| entry.position), Some(Cell::new(2, 1)));
}

#[test]
fn restart_replays_the_same_frames() {
    let mut playback = Playback::new(three_step_run(), Config::default());
    let mut first = Vec::new();
    playback.advance(Duration::from_secs(2), &mut first);

    playback.restart();
    assert_eq!(playback.current(), None);
    let mut second = Vec::new();
    playback.advance(Duration::from_secs(2), &mut second);

    assert_eq!(first, second);
}

#[test]
fn single_state_run_finishes_on_first_frame() {
    let board = Board::new(2, 2, [], Cell::new(1, 1), Cell::new(1, 1)).expect("valid board");
    let mut playback = Playback::new(run(&board, &[]), Config::default());
    let mut frames = Vec::new();

    playback.advance(Duration::ZERO, &mut frames);

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].outcome, Some(RunOutcome::Success));
    assert_eq!(playback.state(), PlaybackState::Finished);
}
