use crate::clock::{Clock, MonotonicClock};
use crate::error::{reject, TransitionError};
use crate::report::Report;
use crate::state::{Operation, State};
use crate::stopwatch::StopWatch;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// A [`StopWatch`] that also splits the running time into laps.
///
/// Laps are only materialized by [`lap`](Self::lap), or by `stop` once at
/// least one lap exists. A watch that never calls `lap` keeps an empty log.
#[derive(Debug, Clone)]
pub struct LapStopWatch<C = MonotonicClock> {
    watch: StopWatch<C>,
    lap_start: Duration,
    laps: Vec<Duration>,
}

impl LapStopWatch {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::default())
    }
}

impl Default for LapStopWatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> LapStopWatch<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            watch: StopWatch::with_clock(clock),
            lap_start: Duration::ZERO,
            laps: Vec::new(),
        }
    }

    pub fn clock(&self) -> &C {
        self.watch.clock()
    }

    pub fn state(&self) -> State {
        self.watch.state()
    }

    pub fn start_time(&self) -> Option<Duration> {
        self.watch.start_time()
    }

    pub fn end_time(&self) -> Option<Duration> {
        self.watch.end_time()
    }

    /// The beginning of the open lap, once the watch has left init.
    pub fn lap_start_time(&self) -> Option<Duration> {
        self.watch.start_time().map(|_| self.lap_start)
    }

    /// The completed laps, without the open one.
    pub fn laps(&self) -> &[Duration] {
        &self.laps
    }

    pub fn start(&mut self) -> Result<(), TransitionError> {
        let now = self.clock().now();
        self.start_at(now)
    }

    pub fn start_at(&mut self, now: Duration) -> Result<(), TransitionError> {
        let fresh = self.state() == State::Init;
        self.watch.start_at(now)?;

        if fresh {
            self.lap_start = now;
        }

        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), TransitionError> {
        let now = self.clock().now();
        self.stop_at(now)
    }

    /// Stops the watch, closing the open lap if any lap was already recorded.
    pub fn stop_at(&mut self, now: Duration) -> Result<(), TransitionError> {
        self.watch.stop_at(now)?;

        if !self.laps.is_empty() {
            let end = self.watch.end_time().unwrap_or(now);
            let lap = end.saturating_sub(self.lap_start);
            self.laps.push(lap);

            tracing::debug!(?lap, count = self.laps.len(), "closed final lap");
        }

        Ok(())
    }

    pub fn lap(&mut self) -> Result<Duration, TransitionError> {
        let now = self.clock().now();
        self.lap_at(now)
    }

    /// Records the open lap and starts a new one at `now`.
    pub fn lap_at(&mut self, now: Duration) -> Result<Duration, TransitionError> {
        if self.state() != State::Running {
            return Err(reject(Operation::Lap, self.state()));
        }

        let now = now.max(self.lap_start);
        let lap = now - self.lap_start;
        self.laps.push(lap);
        self.lap_start = now;

        tracing::debug!(?lap, count = self.laps.len(), "recorded lap");
        Ok(lap)
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.watch.reset()?;
        self.laps.clear();
        Ok(())
    }

    pub fn elapsed(&self) -> Duration {
        self.watch.elapsed()
    }

    pub fn elapsed_at(&self, now: Duration) -> Duration {
        self.watch.elapsed_at(now)
    }

    pub fn laps_elapsed_time(&self) -> Vec<Duration> {
        self.laps_elapsed_time_at(self.clock().now())
    }

    /// The lap log, followed by the live open lap while running.
    ///
    /// Empty until the first lap is recorded. The stored log is never modified.
    pub fn laps_elapsed_time_at(&self, now: Duration) -> Vec<Duration> {
        if self.laps.is_empty() {
            return Vec::new();
        }

        match self.state() {
            State::Init => Vec::new(),
            State::Stopped => self.laps.clone(),
            State::Running => {
                let mut laps = Vec::with_capacity(self.laps.len() + 1);
                laps.extend_from_slice(&self.laps);
                laps.push(now.saturating_sub(self.lap_start));
                laps
            }
        }
    }

    pub fn report(&self) -> Report {
        self.report_at(self.clock().now())
    }

    pub fn report_at(&self, now: Duration) -> Report {
        Report::new(
            self.state(),
            self.start_time(),
            self.end_time(),
            self.elapsed_at(now),
            &self.laps,
        )
    }
}

impl<C: Clock> Display for LapStopWatch<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.report().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn millis(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn watch() -> (ManualClock, LapStopWatch<ManualClock>) {
        let clock = ManualClock::new(Duration::from_secs(20));
        (clock.clone(), LapStopWatch::with_clock(clock))
    }

    #[test]
    fn fresh_watch_has_no_laps() {
        let (_, watch) = watch();

        assert_eq!(watch.state(), State::Init);
        assert!(watch.laps().is_empty());
        assert!(watch.laps_elapsed_time().is_empty());
        assert_eq!(watch.lap_start_time(), None);
    }

    #[test]
    fn lap_outside_running_is_rejected() {
        let (clock, mut watch) = watch();
        assert_eq!(
            watch.lap().unwrap_err(),
            TransitionError::new(Operation::Lap, State::Init)
        );

        watch.start().unwrap();
        clock.advance(millis(10));
        watch.stop().unwrap();

        assert_eq!(
            watch.lap().unwrap_err(),
            TransitionError::new(Operation::Lap, State::Stopped)
        );
        assert!(watch.laps().is_empty());
    }

    #[test]
    fn laps_then_stop_closes_final_lap() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();

        clock.advance(millis(300));
        assert_eq!(watch.lap().unwrap(), millis(300));
        assert_eq!(watch.laps(), &[millis(300)]);

        clock.advance(millis(200));
        watch.lap().unwrap();
        assert_eq!(watch.laps(), &[millis(300), millis(200)]);

        clock.advance(millis(100));
        watch.stop().unwrap();

        assert_eq!(watch.laps(), &[millis(300), millis(200), millis(100)]);
        let total: Duration = watch.laps().iter().sum();
        assert_eq!(total, watch.elapsed());
    }

    #[test]
    fn final_lap_uses_the_stop_instant() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(40));
        watch.lap().unwrap();
        clock.advance(millis(75));

        let lap_start = watch.lap_start_time().unwrap();
        watch.stop().unwrap();
        let end = watch.end_time().unwrap();

        assert_eq!(watch.laps().last().copied(), Some(end - lap_start));
    }

    #[test]
    fn stop_without_laps_records_nothing() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(50));
        watch.stop().unwrap();
        watch.reset().unwrap();
        watch.start().unwrap();
        clock.advance(millis(50));
        watch.stop().unwrap();

        assert!(watch.laps().is_empty());
        assert!(watch.laps_elapsed_time().is_empty());
    }

    #[test]
    fn live_read_appends_open_lap_without_mutating() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(100));
        watch.lap().unwrap();

        clock.advance(millis(30));
        let first = watch.laps_elapsed_time();
        clock.advance(millis(30));
        let second = watch.laps_elapsed_time();

        assert_eq!(first, vec![millis(100), millis(30)]);
        assert_eq!(second, vec![millis(100), millis(60)]);
        assert_eq!(watch.laps(), &[millis(100)]);

        clock.advance(millis(40));
        assert_eq!(watch.lap().unwrap(), millis(100));
    }

    #[test]
    fn live_read_before_first_lap_is_empty() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(70));

        assert!(watch.laps_elapsed_time().is_empty());
        assert!(watch.laps_elapsed_time_at(Duration::from_secs(30)).is_empty());

        clock.advance(millis(30));
        assert_eq!(watch.lap().unwrap(), millis(100));
        assert_eq!(watch.laps_elapsed_time(), vec![millis(100), Duration::ZERO]);
    }

    #[test]
    fn resume_continues_the_open_lap() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(100));
        watch.lap().unwrap();
        clock.advance(millis(20));
        watch.stop().unwrap();
        clock.advance(millis(30));
        watch.start().unwrap();
        clock.advance(millis(10));

        // The stop closed a lap but did not move the lap boundary.
        assert_eq!(watch.laps(), &[millis(100), millis(20)]);
        assert_eq!(watch.lap().unwrap(), millis(60));
    }

    #[test]
    fn reset_clears_laps() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(5));
        watch.lap().unwrap();
        watch.stop().unwrap();

        assert!(watch.reset().is_ok());
        assert_eq!(watch.state(), State::Init);
        assert_eq!(watch.elapsed(), Duration::ZERO);
        assert!(watch.laps().is_empty());
    }

    #[test]
    fn reset_from_running_keeps_laps() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(5));
        watch.lap().unwrap();

        assert!(watch.reset().is_err());
        assert_eq!(watch.laps(), &[millis(5)]);
    }

    #[test]
    fn stopped_reads_are_repeatable() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(5));
        watch.lap().unwrap();
        clock.advance(millis(5));
        watch.stop().unwrap();

        let first = (watch.elapsed(), watch.laps_elapsed_time(), watch.to_string());
        clock.advance(millis(500));
        let second = (watch.elapsed(), watch.laps_elapsed_time(), watch.to_string());

        assert_eq!(first, second);
    }

    #[test]
    fn display_lists_recorded_laps() {
        let (clock, mut watch) = watch();
        watch.start().unwrap();
        clock.advance(millis(500));
        watch.lap().unwrap();

        assert_eq!(
            watch.to_string(),
            "StopWatch State: running\n\
             Start Time:          20.000000\n\
             End   Time:                  -\n\
             Lap 1:           0.500000"
        );
    }
}
