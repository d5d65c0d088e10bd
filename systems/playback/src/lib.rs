#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Paced replay of a precomputed simulation run.
//!
//! Pacing is purely cosmetic: the run is computed up front and playback only
//! decides how many of its states have become visible after a given amount of
//! elapsed time. Cancelling stops consumption and never alters the run.

use std::time::Duration;

use ant_trail_core::{RunOutcome, TraceEntry};
use ant_trail_system_simulator::Run;
use tracing::debug;

/// Interval between successive frames used by the learner-facing animation.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration parameters required to construct the playback system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    step_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided frame cadence.
    ///
    /// A zero interval releases every remaining frame on the next advance.
    #[must_use]
    pub const fn new(step_interval: Duration) -> Self {
        Self { step_interval }
    }

    /// Time that must elapse between two frames.
    #[must_use]
    pub const fn step_interval(&self) -> Duration {
        self.step_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_INTERVAL)
    }
}

/// Lifecycle of a playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Frames are still pending.
    Playing,
    /// Every frame was emitted.
    Finished,
    /// The viewer stopped the playback early.
    Cancelled,
}

/// Single state released to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Position of the state within the run's trace.
    pub index: usize,
    /// State of the ant to display.
    pub entry: TraceEntry,
    /// Outcome of the run, present only on the final frame.
    pub outcome: Option<RunOutcome>,
}

/// Releases the states of a run at a fixed cadence.
#[derive(Debug)]
pub struct Playback {
    trace: Vec<TraceEntry>,
    outcome: RunOutcome,
    step_interval: Duration,
    accumulator: Duration,
    cursor: usize,
    state: PlaybackState,
}

impl Playback {
    /// Creates a playback that has not yet released any frame.
    #[must_use]
    pub fn new(run: Run, config: Config) -> Self {
        let (trace, outcome) = run.into_parts();
        let state = if trace.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing
        };
        Self {
            trace,
            outcome,
            step_interval: config.step_interval,
            accumulator: Duration::ZERO,
            cursor: 0,
            state,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Most recently released state, if any frame was emitted.
    #[must_use]
    pub fn current(&self) -> Option<TraceEntry> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.trace.get(index).copied())
    }

    /// Outcome of the underlying run.
    #[must_use]
    pub const fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Accounts for elapsed time and emits every frame that became due.
    ///
    /// The initial state is released on the first advance regardless of `dt`;
    /// each further state needs one full step interval.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<Frame>) {
        if self.state != PlaybackState::Playing {
            return;
        }

        if self.cursor == 0 {
            self.emit(out);
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        while self.state == PlaybackState::Playing {
            if !self.step_interval.is_zero() {
                if self.accumulator < self.step_interval {
                    break;
                }
                self.accumulator -= self.step_interval;
            }
            self.emit(out);
        }
    }

    /// Stops the playback; pending frames are discarded.
    pub fn cancel(&mut self) {
        if self.state == PlaybackState::Playing {
            debug!(
                released = self.cursor,
                pending = self.trace.len() - self.cursor,
                "playback cancelled"
            );
            self.state = PlaybackState::Cancelled;
        }
    }

    /// Rewinds the playback so the run can be watched again.
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.accumulator = Duration::ZERO;
        self.state = if self.trace.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing
        };
    }

    fn emit(&mut self, out: &mut Vec<Frame>) {
        let Some(entry) = self.trace.get(self.cursor).copied() else {
            self.state = PlaybackState::Finished;
            return;
        };
        let index = self.cursor;
        self.cursor += 1;
        let last = self.cursor == self.trace.len();
        out.push(Frame {
            index,
            entry,
            outcome: last.then_some(self.outcome),
        });
        if last {
            self.state = PlaybackState::Finished;
            self.accumulator = Duration::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_matches_animation_interval() {
        assert_eq!(Config::default().step_interval(), Duration::from_millis(500));
    }
}
