//! Countdown for the closing HIIT sequence.
//!
//! The timer is a plain state machine advanced one second per [`FinisherTimer::tick`];
//! callers own the clock.
use serde::{Deserialize, Serialize};

use crate::constants::{FINISHER_MOVE_SECONDS, FINISHER_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// What a single one-second tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is not running; nothing changed.
    Stopped,
    Counting { remaining: u32 },
    NextMove { remaining: u32, index: usize },
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinisherTimer {
    moves: Vec<String>,
    remaining: u32,
    move_index: usize,
    state: TimerState,
}

impl FinisherTimer {
    #[must_use]
    pub const fn new(moves: Vec<String>) -> Self {
        Self {
            moves,
            remaining: FINISHER_SECONDS,
            move_index: 0,
            state: TimerState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn move_index(&self) -> usize {
        self.move_index
    }

    /// Movement on screen; `None` once finished or with no moves.
    #[must_use]
    pub fn current_move(&self) -> Option<&str> {
        if self.state == TimerState::Finished {
            return None;
        }
        self.moves.get(self.move_index).map(String::as_str)
    }

    /// Begin or resume counting. Returns whether the timer is now running.
    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                true
            }
            TimerState::Running => true,
            TimerState::Finished => false,
        }
    }

    pub fn toggle_pause(&mut self) -> TimerState {
        self.state = match self.state {
            TimerState::Running => TimerState::Paused,
            TimerState::Paused if self.remaining > 0 => TimerState::Running,
            other => other,
        };
        self.state
    }

    pub fn reset(&mut self) {
        self.remaining = FINISHER_SECONDS;
        self.move_index = 0;
        self.state = TimerState::Idle;
    }

    pub fn tick(&mut self) -> TimerTick {
        if self.state != TimerState::Running {
            return TimerTick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Finished;
            return TimerTick::Finished;
        }
        let elapsed = FINISHER_SECONDS - self.remaining;
        if elapsed % FINISHER_MOVE_SECONDS == 0 && !self.moves.is_empty() {
            self.move_index = (self.move_index + 1) % self.moves.len();
            return TimerTick::NextMove {
                remaining: self.remaining,
                index: self.move_index,
            };
        }
        TimerTick::Counting {
            remaining: self.remaining,
        }
    }
}

/// `MM:SS` rendering of a second count.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
