use std::time::{Duration, Instant};

/// Owner of the single tick timer.
///
/// At most one tick is pending at a time. The session arms the timer after
/// each committed tick and cancels it before pausing or ending a game.
pub trait Scheduler {
    /// Arms the timer to fire once after `interval`.
    fn schedule_tick(&mut self, interval: Duration);

    /// Drops the pending tick, if any.
    fn cancel(&mut self);

    /// Returns true while a tick is armed and has not fired.
    fn is_pending(&self) -> bool;
}

/// Wall-clock scheduler polled by the terminal loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlineScheduler {
    deadline: Option<Instant>,
}

impl DeadlineScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the pending tick when its deadline has passed.
    ///
    /// Returns true exactly once per armed tick.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns how long until the pending tick is due.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule_tick(&mut self, interval: Duration) {
        self.deadline = Some(Instant::now() + interval);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Scheduler without a clock; the driver fires ticks by hand.
///
/// Used for replays and tests that step the session synchronously.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Option<Duration>,
    history: Vec<Duration>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the pending tick, returning the interval it was armed with.
    pub fn fire(&mut self) -> Option<Duration> {
        self.pending.take()
    }

    /// Returns the interval of the pending tick.
    #[must_use]
    pub fn pending_interval(&self) -> Option<Duration> {
        self.pending
    }

    /// Returns every interval ever scheduled, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Duration] {
        &self.history
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_tick(&mut self, interval: Duration) {
        self.pending = Some(interval);
        self.history.push(interval);
    }

    fn cancel(&mut self) {
        self.pending = None;
    }

    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{DeadlineScheduler, ManualScheduler, Scheduler};

    #[test]
    fn deadline_fires_once_after_interval() {
        let mut scheduler = DeadlineScheduler::new();
        scheduler.schedule_tick(Duration::from_millis(100));
        let start = Instant::now();

        assert!(scheduler.is_pending());
        assert!(!scheduler.fire_if_due(start));
        assert!(scheduler.fire_if_due(start + Duration::from_millis(150)));
        assert!(!scheduler.is_pending());
        assert!(!scheduler.fire_if_due(start + Duration::from_millis(300)));
    }

    #[test]
    fn cancel_clears_deadline() {
        let mut scheduler = DeadlineScheduler::new();
        scheduler.schedule_tick(Duration::ZERO);

        scheduler.cancel();

        assert!(!scheduler.is_pending());
        assert!(!scheduler.fire_if_due(Instant::now() + Duration::from_secs(1)));
        assert_eq!(scheduler.time_until_due(Instant::now()), None);
    }

    #[test]
    fn manual_scheduler_records_intervals() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_tick(Duration::from_millis(100));

        assert_eq!(scheduler.fire(), Some(Duration::from_millis(100)));
        assert_eq!(scheduler.fire(), None);

        scheduler.schedule_tick(Duration::from_millis(125));
        scheduler.cancel();

        assert!(!scheduler.is_pending());
        assert_eq!(
            scheduler.history(),
            &[Duration::from_millis(100), Duration::from_millis(125)]
        );
    }
}
