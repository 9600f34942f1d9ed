//! Per-round answer countdown
//!
//! The timer never sleeps on its own. Like every other timed event in the
//! engine, it asks the caller to deliver an [`AlarmMessage`] after a delay
//! and reacts when that alarm comes back. One tick is scheduled per second
//! until the countdown reaches zero or the round is resolved.
//!
//! The timer state doubles as the round latch: a player answer may only go
//! through by moving the timer from `Running` to `Cancelled`, an expiry only
//! by moving it from `Running` to `Expired`. Whichever happens first wins the
//! round and the other becomes a no-op.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::timer::TICK_SECONDS;

/// Lifecycle of the countdown for one round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimerState {
    /// No question is being timed
    #[default]
    Idle,
    /// Counting down, the round is unresolved
    Running,
    /// The player answered before the countdown ended
    Cancelled,
    /// The countdown ended before the player answered
    Expired,
}

/// Alarm messages for timed events
///
/// These are handed to the scheduler and delivered back to the engine once
/// their delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One second of the countdown has elapsed
    Tick {
        /// Identifies the countdown that scheduled this tick
        generation: u64,
        /// Round the countdown was started for
        round: usize,
    },
}

/// What a delivered tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a countdown that is no longer running
    Stale,
    /// The countdown advanced and this many seconds remain
    Counting(u64),
    /// The countdown reached zero and won the round
    Expired,
}

/// Cancelable countdown coupled to the current round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTimer {
    /// Length of a full countdown
    time_limit: Duration,
    /// Bumped every time a countdown starts or stops
    generation: u64,
    /// Round the current countdown belongs to
    round: usize,
    /// Whole seconds left on the current countdown
    remaining: u64,
    state: TimerState,
}

impl RoundTimer {
    /// Creates an idle timer whose countdowns last `time_limit`
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            generation: 0,
            round: 0,
            remaining: time_limit.as_secs(),
            state: TimerState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Round the latest countdown was started for
    pub fn round(&self) -> usize {
        self.round
    }

    /// Whole seconds left before the countdown expires
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining
    }

    /// Length of a full countdown
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Attempts to transition from one timer state to another
    ///
    /// Returns `true` if the timer was in `before` and is now in `after`,
    /// `false` if it was in any other state and nothing changed.
    fn change_state(&mut self, before: TimerState, after: TimerState) -> bool {
        if self.state == before {
            self.state = after;

            true
        } else {
            false
        }
    }

    fn schedule_tick<S: FnMut(crate::AlarmMessage, web_time::Duration)>(
        &self,
        mut schedule_message: S,
    ) {
        schedule_message(
            AlarmMessage::Tick {
                generation: self.generation,
                round: self.round,
            },
            Duration::from_secs(TICK_SECONDS),
        );
    }

    /// Starts a fresh countdown for `round`
    ///
    /// Any previous countdown is discarded, however it ended; ticks it
    /// already scheduled will be reported as [`TickOutcome::Stale`].
    pub fn start<S: FnMut(crate::AlarmMessage, web_time::Duration)>(
        &mut self,
        round: usize,
        schedule_message: S,
    ) {
        self.generation = self.generation.wrapping_add(1);
        self.round = round;
        self.remaining = self.time_limit.as_secs();
        self.state = TimerState::Running;

        tracing::trace!(round, seconds = self.remaining, "countdown started");

        self.schedule_tick(schedule_message);
    }

    /// Claims the round for a player answer
    ///
    /// Returns `true` if the countdown was running and is now cancelled. A
    /// `false` means the round was already resolved (or never started) and
    /// the answer must be dropped.
    pub fn cancel(&mut self) -> bool {
        self.change_state(TimerState::Running, TimerState::Cancelled)
    }

    /// Abandons the current countdown without resolving the round
    ///
    /// Used when the game screen is left; pending ticks become stale.
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = TimerState::Idle;
    }

    /// Handles a delivered tick
    ///
    /// Ticks from an earlier countdown, or arriving after the round was
    /// resolved, are ignored. Otherwise one second is taken off the clock and
    /// either the next tick is scheduled or the countdown expires.
    pub fn receive_alarm<S: FnMut(crate::AlarmMessage, web_time::Duration)>(
        &mut self,
        message: &crate::AlarmMessage,
        schedule_message: S,
    ) -> TickOutcome {
        let AlarmMessage::Tick { generation, round } = *message;

        if generation != self.generation || self.state != TimerState::Running {
            tracing::trace!(round, generation, "stale tick ignored");
            return TickOutcome::Stale;
        }

        self.remaining = self.remaining.saturating_sub(TICK_SECONDS);

        if self.remaining > 0 {
            self.schedule_tick(schedule_message);
            TickOutcome::Counting(self.remaining)
        } else if self.change_state(TimerState::Running, TimerState::Expired) {
            tracing::debug!(round, "countdown expired");
            TickOutcome::Expired
        } else {
            TickOutcome::Stale
        }
    }
}
