use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::state::curve::linspace;

/// Precomputed time values fed to the update step, one per tick
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSequence {
    times: Vec<f64>,
}

impl TimeSequence {
    pub fn new(times: Vec<f64>) -> Result<Self> {
        if times.is_empty() {
            return Err(Error::EmptySequence("time sequence"));
        }
        Ok(Self { times })
    }

    pub fn evenly_spaced(start: f64, end: f64, frames: usize) -> Result<Self> {
        Self::new(linspace(start, end, frames))
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.times.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Steps through a `TimeSequence` at a fixed wall-clock interval.
///
/// The scheduler never sleeps. The host loop calls `poll` whenever it wakes
/// and uses `time_until_next` as its input poll timeout.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    sequence: TimeSequence,
    interval: Duration,
    looping: bool,
    cursor: usize,
    /// Index of the last delivered tick
    last: Option<usize>,
    next_due: Option<Instant>,
    state: PlaybackState,
}

impl FrameScheduler {
    pub fn new(sequence: TimeSequence, interval: Duration) -> Self {
        Self {
            sequence,
            interval,
            looping: true,
            cursor: 0,
            last: None,
            next_due: None,
            state: PlaybackState::Stopped,
        }
    }

    /// Stop at the last element instead of wrapping around
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Replace the sequence and interval, and begin playing from the first element.
    /// The first tick is due immediately.
    pub fn start(&mut self, sequence: TimeSequence, interval: Duration, now: Instant) {
        self.sequence = sequence;
        self.interval = interval;
        self.restart(now);
    }

    /// Rewind to the first element and play
    pub fn restart(&mut self, now: Instant) {
        self.cursor = 0;
        self.last = None;
        self.next_due = Some(now);
        self.state = PlaybackState::Playing;
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.next_due = None;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.next_due = None;
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
            self.next_due = Some(now);
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Index of the next element to be delivered
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Time of the most recently delivered tick, or the first element before any tick
    pub fn current_time(&self) -> f64 {
        self.last
            .and_then(|i| self.sequence.get(i))
            .or_else(|| self.sequence.get(0))
            .unwrap_or_default()
    }

    /// How long the host may wait before the next tick is due
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .filter(|_| self.is_playing())
            .map(|due| due.saturating_duration_since(now))
    }

    /// Deliver the due tick, if any. Returns the number of ticks delivered (0 or 1).
    ///
    /// An error from `on_tick` leaves the cursor on the failed element.
    pub fn poll<F>(&mut self, now: Instant, mut on_tick: F) -> Result<usize>
    where
        F: FnMut(f64) -> Result<()>,
    {
        if !self.is_playing() {
            return Ok(0);
        }
        let due = match self.next_due {
            Some(due) if due <= now => due,
            _ => return Ok(0),
        };
        let Some(time) = self.sequence.get(self.cursor) else {
            self.stop();
            return Ok(0);
        };

        on_tick(time)?;
        self.last = Some(self.cursor);

        let next = due + self.interval;
        // Fell behind by more than a frame: drop the missed frames
        self.next_due = Some(if next + self.interval <= now { now + self.interval } else { next });

        self.cursor += 1;
        if self.cursor >= self.sequence.len() {
            if self.looping {
                self.cursor = 0;
            } else {
                self.cursor = self.sequence.len() - 1;
                self.stop();
            }
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(10);

    fn scheduler(times: Vec<f64>) -> FrameScheduler {
        FrameScheduler::new(TimeSequence::new(times).unwrap(), MS)
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(TimeSequence::new(Vec::new()), Err(Error::EmptySequence("time sequence")));
    }

    #[test]
    fn test_three_ticks_then_loop() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0, 0.5, 1.0]);
        sched.restart(t0);

        let mut calls = Vec::new();
        for i in 0..4u32 {
            let now = t0 + MS * i;
            let n = sched
                .poll(now, |t| {
                    calls.push(t);
                    Ok(())
                })
                .unwrap();
            assert_eq!(n, 1);
        }
        assert_eq!(calls, vec![0.0, 0.5, 1.0, 0.0]);
        assert_eq!(sched.cursor(), 1);
    }

    #[test]
    fn test_no_tick_before_due() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0, 1.0]);
        sched.restart(t0);
        assert_eq!(sched.time_until_next(t0), Some(Duration::ZERO));
        let mut count = 0;
        sched
            .poll(t0, |_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        let early = t0 + Duration::from_millis(5);
        sched
            .poll(early, |_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(sched.time_until_next(early), Some(Duration::from_millis(5)));

        // Due exactly one interval after the first tick
        assert_eq!(sched.time_until_next(t0 + MS), Some(Duration::ZERO));
        sched
            .poll(t0 + MS, |_| {
                count += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_lagging_loop_drops_frames() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0, 1.0, 2.0, 3.0]);
        sched.restart(t0);
        let late = t0 + Duration::from_millis(100);
        let mut seen = Vec::new();
        sched
            .poll(late, |t| {
                seen.push(t);
                Ok(())
            })
            .unwrap();
        // At most one tick per poll, and the schedule resets relative to `late`
        assert_eq!(seen, vec![0.0]);
        assert_eq!(sched.time_until_next(late), Some(MS));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0]);
        sched.restart(t0);
        sched.stop();
        sched.stop();
        assert_eq!(sched.state(), PlaybackState::Stopped);
        assert_eq!(sched.time_until_next(t0), None);
        assert_eq!(sched.poll(t0 + MS, |_| Ok(())).unwrap(), 0);
    }

    #[test]
    fn test_pause_keeps_cursor() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0, 1.0, 2.0]);
        sched.restart(t0);
        sched.poll(t0, |_| Ok(())).unwrap();
        sched.pause();
        assert_eq!(sched.poll(t0 + MS * 5, |_| Ok(())).unwrap(), 0);
        assert_eq!(sched.current_time(), 0.0);

        let resumed = t0 + MS * 6;
        sched.resume(resumed);
        let mut seen = None;
        sched
            .poll(resumed, |t| {
                seen = Some(t);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, Some(1.0));
        assert_eq!(sched.current_time(), 1.0);
    }

    #[test]
    fn test_resume_only_from_pause() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0]);
        sched.resume(t0);
        assert_eq!(sched.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_error_keeps_cursor() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0, 1.0]);
        sched.restart(t0);
        let result = sched.poll(t0, |_| Err(Error::RenderSurfaceFailure("gone".into())));
        assert!(result.is_err());
        assert_eq!(sched.cursor(), 0);
    }

    #[test]
    fn test_non_looping_stops_at_end() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0, 1.0]).with_looping(false);
        sched.restart(t0);
        sched.poll(t0, |_| Ok(())).unwrap();
        sched.poll(t0 + MS, |_| Ok(())).unwrap();
        assert_eq!(sched.state(), PlaybackState::Stopped);
        assert_eq!(sched.current_time(), 1.0);
    }

    #[test]
    fn test_start_replaces_sequence() {
        let t0 = Instant::now();
        let mut sched = scheduler(vec![0.0]);
        sched.start(TimeSequence::new(vec![5.0, 6.0]).unwrap(), Duration::from_millis(20), t0);
        assert_eq!(sched.interval(), Duration::from_millis(20));
        let mut seen = None;
        sched
            .poll(t0, |t| {
                seen = Some(t);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, Some(5.0));
    }
}
