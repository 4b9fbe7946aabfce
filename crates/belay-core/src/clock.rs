//! Elapsed-time clock for the active session.
//!
//! The clock is a monotonic stopwatch advanced by wall-clock deltas between
//! observations, so it stays correct when the host throttles or suspends
//! refreshes. Time comes from an injectable [`TimeSource`] so tests can
//! simulate elapsed time deterministically.

use chrono::{DateTime, Duration, Utc};

/// Provides the current wall-clock time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Stopwatch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// No session; elapsed time is zero.
    Stopped,
    /// Elapsed time advances on every tick.
    Running,
    /// Elapsed time is frozen until resumed.
    Paused,
}

/// A start/pause/resume stopwatch rendered at 1-second granularity.
///
/// While `Running`, each `tick` adds the full wall-clock delta since the
/// previous observation: if the host suspends rendering for 30 seconds, the
/// next tick adds 30 seconds, not one.
#[derive(Debug, Clone)]
pub struct SessionClock {
    state: ClockState,
    elapsed: Duration,
    last_observed: Option<DateTime<Utc>>,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClock {
    /// Creates a stopped clock at zero.
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped,
            elapsed: Duration::zero(),
            last_observed: None,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Starts the clock from zero.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.state = ClockState::Running;
        self.elapsed = Duration::zero();
        self.last_observed = Some(now);
    }

    /// Restarts the clock as if it had been running continuously since
    /// `started_at`. Used when resuming a session after a restart; any time
    /// that was paused before the restart is deliberately not preserved.
    pub fn resume_from(&mut self, started_at: DateTime<Utc>, now: DateTime<Utc>) {
        self.state = ClockState::Running;
        self.elapsed = (now - started_at).max(Duration::zero());
        self.last_observed = Some(now);
    }

    /// Freezes elapsed time. No-op unless running.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.state == ClockState::Running {
            self.tick(now);
            self.state = ClockState::Paused;
        }
    }

    /// Resumes a paused clock. No-op unless paused.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
            self.last_observed = Some(now);
        }
    }

    /// Stops the clock and resets elapsed time to zero.
    pub fn reset(&mut self) {
        self.state = ClockState::Stopped;
        self.elapsed = Duration::zero();
        self.last_observed = None;
    }

    /// Advances elapsed time by the wall-clock delta since the previous
    /// observation. Only advances while running; negative deltas (clock
    /// adjustments) are ignored.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.state != ClockState::Running {
            return;
        }
        if let Some(last) = self.last_observed {
            let delta = now - last;
            if delta > Duration::zero() {
                self.elapsed += delta;
            }
        }
        self.last_observed = Some(now);
    }

    /// Total elapsed whole seconds.
    pub fn elapsed_seconds(&self) -> i64 {
        self.elapsed.num_seconds().max(0)
    }

    /// Zero-padded `HH:MM:SS` display of the elapsed time.
    pub fn display(&self) -> String {
        let total = self.elapsed_seconds();
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}
