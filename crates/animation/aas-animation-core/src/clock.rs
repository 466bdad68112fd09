//! Playback clock: steps a timeline's selection every `interval` game ticks.
//!
//! The clock does not own a timer. It owns a *pending poll* (a deadline) and the
//! host calls [`PlaybackClock::poll`] from whatever loop it runs, typically once
//! per display frame. Polls that arrive before the deadline are ignored, so the
//! effective polling granularity is [`POLL_INTERVAL_MILLIS`] regardless of the
//! host frame rate, while selection advances happen every
//! `interval_ticks * TICK_MILLIS` milliseconds.
//!
//! Stopping, disposing or dropping the clock cancels the pending poll.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::time::{AnimationTime, TICK_MILLIS};
use crate::timeline::Timeline;

/// Default wall-clock granularity at which a running clock checks for advances.
pub const POLL_INTERVAL_MILLIS: u64 = 16;

/// State of a playback clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockState {
    /// Not advancing; no poll pending
    Stopped,
    /// Advancing; a poll is pending
    Running,
    /// Torn down; every further call is ignored
    Disposed,
}

impl ClockState {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Disposed => "disposed",
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// What a call to [`PlaybackClock::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock is stopped or disposed
    Idle,
    /// Running, but the pending poll is not due yet
    NotDue,
    /// Poll fired; the interval has not elapsed yet
    Waiting,
    /// Poll fired and the selection moved to this index
    Advanced(usize),
}

#[derive(Debug, Clone, Copy)]
struct PendingPoll {
    due: AnimationTime,
}

#[derive(Debug)]
pub struct PlaybackClock {
    state: ClockState,
    interval_ticks: u32,
    tick_length: AnimationTime,
    poll_interval: AnimationTime,
    last_advance: AnimationTime,
    pending: Option<PendingPoll>,
}

impl PlaybackClock {
    /// Clock with the plugin's tick length (50 ms) and default poll interval.
    pub fn new(interval_ticks: u32) -> Self {
        Self::with_timing(interval_ticks, TICK_MILLIS, POLL_INTERVAL_MILLIS)
    }

    /// Custom tick length and poll interval, each at least one millisecond.
    pub fn with_timing(interval_ticks: u32, tick_millis: u64, poll_millis: u64) -> Self {
        if tick_millis == 0 || poll_millis == 0 {
            warn!("zero tick ({tick_millis} ms) or poll ({poll_millis} ms) length raised to 1 ms");
        }
        Self {
            state: ClockState::Stopped,
            interval_ticks: interval_ticks.max(1),
            tick_length: AnimationTime::from_millis(tick_millis.max(1) as f64),
            poll_interval: AnimationTime::from_millis(poll_millis.max(1) as f64),
            last_advance: AnimationTime::zero(),
            pending: None,
        }
    }

    #[inline]
    pub fn state(&self) -> ClockState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[inline]
    pub fn interval_ticks(&self) -> u32 {
        self.interval_ticks
    }

    /// Change the interval; takes effect at the next poll. Clamped to at least 1.
    pub fn set_interval_ticks(&mut self, ticks: u32) {
        self.interval_ticks = ticks.max(1);
    }

    /// Span between selection advances.
    pub fn interval(&self) -> AnimationTime {
        AnimationTime::from_nanos(
            self.tick_length
                .as_nanos()
                .saturating_mul(u64::from(self.interval_ticks)),
        )
    }

    /// When the host should poll next, if running.
    pub fn next_poll_due(&self) -> Option<AnimationTime> {
        self.pending.map(|p| p.due)
    }

    /// Toggle between stopped and running. Returns the resulting state.
    pub fn play(&mut self, now: AnimationTime) -> ClockState {
        match self.state {
            ClockState::Stopped => self.start(now),
            ClockState::Running => self.stop(),
            ClockState::Disposed => warn!("play() on a disposed playback clock ignored"),
        }
        self.state
    }

    /// Start advancing from `now`. No effect when already running or disposed.
    pub fn start(&mut self, now: AnimationTime) {
        if self.state != ClockState::Stopped {
            return;
        }
        self.state = ClockState::Running;
        self.last_advance = now;
        self.pending = Some(PendingPoll { due: now });
        debug!(
            "playback started, advancing every {} ticks",
            self.interval_ticks
        );
    }

    /// Stop advancing and cancel the pending poll.
    pub fn stop(&mut self) {
        if self.state != ClockState::Running {
            return;
        }
        self.pending = None;
        self.state = ClockState::Stopped;
        debug!("playback stopped");
    }

    /// Terminal: cancel the pending poll and ignore all further calls.
    pub fn dispose(&mut self) {
        if self.state == ClockState::Disposed {
            return;
        }
        if self.pending.take().is_some() {
            debug!("cancelled pending playback poll");
        }
        self.state = ClockState::Disposed;
    }

    /// Run the pending poll if it is due, advancing `timeline` when a full
    /// interval has elapsed since the last advance.
    ///
    /// The timeline length is read on every advance, so keyframes added or
    /// removed while playing are honoured by the very next step.
    pub fn poll(&mut self, now: AnimationTime, timeline: &mut Timeline) -> TickOutcome {
        let Some(pending) = self.pending else {
            return TickOutcome::Idle;
        };
        if now < pending.due {
            return TickOutcome::NotDue;
        }
        self.pending = Some(PendingPoll {
            due: now + self.poll_interval,
        });

        if now.saturating_since(self.last_advance) < self.interval() {
            return TickOutcome::Waiting;
        }
        self.last_advance = now;
        match timeline.advance_selection() {
            Some(index) => TickOutcome::Advanced(index),
            None => TickOutcome::Waiting,
        }
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.dispose();
    }
}
