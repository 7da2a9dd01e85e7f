//! Tick scheduling.
//!
//! A scheduler fires one periodic timer. Timer periods are fixed at arm time,
//! so a speed change is a cancel-and-rearm. Every arm hands out a fresh
//! [`TimerToken`]; a token from a cancelled generation is stale and must be
//! ignored by the caller.

use std::time::{Duration, Instant};

/// Identifies one armed timer generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Periodic timer with explicit cancel/reschedule.
pub trait TickScheduler {
    /// Cancel any armed timer and arm a new one firing every `period`, first at
    /// `now + period`.
    fn arm(&mut self, period: Duration, now: Instant) -> TimerToken;

    /// Cancel the armed timer, if any. Nothing fires until the next `arm`.
    fn cancel(&mut self);

    /// Fire the armed timer if it is due at `now`.
    fn poll(&mut self, now: Instant) -> Option<TimerToken>;

    /// When the armed timer fires next.
    fn next_deadline(&self) -> Option<Instant>;

    fn is_armed(&self) -> bool {
        self.next_deadline().is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    token: TimerToken,
    period: Duration,
    next_due: Instant,
}

/// Deadline-based scheduler for a single-threaded polling loop.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    generation: u64,
    armed: Option<Armed>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.armed.map(|a| a.period)
    }

    /// Time left until the next firing (zero when overdue).
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed.map(|a| a.next_due.saturating_duration_since(now))
    }
}

impl TickScheduler for IntervalScheduler {
    fn arm(&mut self, period: Duration, now: Instant) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TimerToken(self.generation);
        self.armed = Some(Armed {
            token,
            period,
            next_due: now + period,
        });
        token
    }

    fn cancel(&mut self) {
        self.armed = None;
    }

    fn poll(&mut self, now: Instant) -> Option<TimerToken> {
        let armed = self.armed.as_mut()?;
        if now < armed.next_due {
            return None;
        }

        armed.next_due += armed.period;
        // Fell more than a period behind (suspended terminal, slow frame):
        // fire once and realign instead of bursting.
        if armed.next_due <= now {
            armed.next_due = now + armed.period;
        }
        Some(armed.token)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.armed.map(|a| a.next_due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_fires_after_period() {
        let t0 = Instant::now();
        let mut sched = IntervalScheduler::new();
        let token = sched.arm(150 * MS, t0);

        assert_eq!(sched.poll(t0), None);
        assert_eq!(sched.poll(t0 + 149 * MS), None);
        assert_eq!(sched.poll(t0 + 150 * MS), Some(token));
        assert_eq!(sched.poll(t0 + 151 * MS), None);
        assert_eq!(sched.poll(t0 + 300 * MS), Some(token));
    }

    #[test]
    fn test_cancel_stops_firing() {
        let t0 = Instant::now();
        let mut sched = IntervalScheduler::new();
        sched.arm(100 * MS, t0);
        sched.cancel();
        assert!(!sched.is_armed());
        assert_eq!(sched.poll(t0 + 1000 * MS), None);
    }

    #[test]
    fn test_rearm_issues_new_generation() {
        let t0 = Instant::now();
        let mut sched = IntervalScheduler::new();
        let first = sched.arm(100 * MS, t0);
        let second = sched.arm(50 * MS, t0 + 10 * MS);
        assert_ne!(first, second);
        assert!(second.generation() > first.generation());
        assert_eq!(sched.period(), Some(50 * MS));
        assert_eq!(sched.poll(t0 + 60 * MS), Some(second));
    }

    #[test]
    fn test_falling_behind_fires_once() {
        let t0 = Instant::now();
        let mut sched = IntervalScheduler::new();
        let token = sched.arm(100 * MS, t0);
        assert_eq!(sched.poll(t0 + 1000 * MS), Some(token));
        assert_eq!(sched.poll(t0 + 1000 * MS), None);
        assert_eq!(sched.next_deadline(), Some(t0 + 1100 * MS));
    }

    #[test]
    fn test_time_until_due() {
        let t0 = Instant::now();
        let mut sched = IntervalScheduler::new();
        assert_eq!(sched.time_until_due(t0), None);
        sched.arm(100 * MS, t0);
        assert_eq!(sched.time_until_due(t0 + 40 * MS), Some(60 * MS));
        assert_eq!(sched.time_until_due(t0 + 400 * MS), Some(Duration::ZERO));
    }
}
