use crate::clock::{Clock, MonotonicClock};
use crate::error::{reject, TransitionError};
use crate::report::Report;
use crate::state::{Operation, State};
use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Init,
    Running { start: Duration },
    Stopped { start: Duration, end: Duration },
}

/// Measures elapsed time across explicit start, stop and reset transitions.
///
/// Every operation has a form that reads the watch's [`Clock`] and an `_at`
/// form that takes the current instant explicitly. Resuming a stopped watch
/// keeps the original start time, so the elapsed time includes any pause.
#[derive(Debug, Clone)]
pub struct StopWatch<C = MonotonicClock> {
    phase: Phase,
    clock: C,
}

impl StopWatch {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::default())
    }
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StopWatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            phase: Phase::Init,
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> State {
        match self.phase {
            Phase::Init => State::Init,
            Phase::Running { .. } => State::Running,
            Phase::Stopped { .. } => State::Stopped,
        }
    }

    /// The instant of the first start since the last reset.
    pub fn start_time(&self) -> Option<Duration> {
        match self.phase {
            Phase::Init => None,
            Phase::Running { start } | Phase::Stopped { start, .. } => Some(start),
        }
    }

    /// The instant of the last stop, only while stopped.
    pub fn end_time(&self) -> Option<Duration> {
        match self.phase {
            Phase::Stopped { end, .. } => Some(end),
            _ => None,
        }
    }

    pub fn start(&mut self) -> Result<(), TransitionError> {
        let now = self.clock.now();
        self.start_at(now)
    }

    pub fn start_at(&mut self, now: Duration) -> Result<(), TransitionError> {
        self.phase = match self.phase {
            Phase::Init => Phase::Running { start: now },
            Phase::Stopped { start, .. } => Phase::Running { start },
            Phase::Running { .. } => {
                return Err(reject(Operation::Start, self.state()))
            }
        };

        tracing::debug!(?now, start = ?self.start_time(), "stopwatch started");
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), TransitionError> {
        let now = self.clock.now();
        self.stop_at(now)
    }

    pub fn stop_at(&mut self, now: Duration) -> Result<(), TransitionError> {
        let Phase::Running { start } = self.phase else {
            return Err(reject(Operation::Stop, self.state()));
        };

        let end = now.max(start);
        self.phase = Phase::Stopped { start, end };

        tracing::debug!(?end, elapsed = ?(end - start), "stopwatch stopped");
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.phase, Phase::Stopped { .. }) {
            return Err(reject(Operation::Reset, self.state()));
        }

        self.phase = Phase::Init;

        tracing::debug!("stopwatch reset");
        Ok(())
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(self.clock.now())
    }

    /// Zero in init, the stopped interval when stopped, and the live reading
    /// against `now` while running.
    pub fn elapsed_at(&self, now: Duration) -> Duration {
        match self.phase {
            Phase::Init => Duration::ZERO,
            Phase::Running { start } => now.saturating_sub(start),
            Phase::Stopped { start, end } => end - start,
        }
    }

    pub fn report(&self) -> Report {
        self.report_at(self.clock.now())
    }

    pub fn report_at(&self, now: Duration) -> Report {
        Report::new(
            self.state(),
            self.start_time(),
            self.end_time(),
            self.elapsed_at(now),
            &[],
        )
    }
}

impl<C: Clock> Display for StopWatch<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.report().fmt(f)
    }
}
