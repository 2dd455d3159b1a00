//! Tick source for the engine.
//!
//! The scheduler is armed exactly while the engine runs and delivers at
//! most one tick per poll, sequentially, from the host loop. Stopping
//! discards the deadline entirely, so a later restart waits a full fresh
//! period instead of inheriting a half-elapsed one. If the host loop falls
//! behind, missed ticks are skipped, not replayed.

use std::time::{Duration, Instant};

pub struct TickScheduler {
    period: Duration,
    next: Option<Instant>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Arms the scheduler if it isn't already. An armed scheduler keeps
    /// its current deadline.
    pub fn start(&mut self) {
        if self.next.is_none() {
            self.next = Some(Instant::now() + self.period);
        }
    }

    /// Disarms unconditionally. Idempotent.
    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// True when a tick is due. Re-arms from "now" rather than from the
    /// missed deadline, so a stalled host skips ticks instead of bursting.
    pub fn poll(&mut self) -> bool {
        match self.next {
            Some(due) if Instant::now() >= due => {
                self.next = Some(Instant::now() + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const PERIOD: Duration = Duration::from_millis(80);

    fn scheduler() -> TickScheduler {
        TickScheduler::new(PERIOD)
    }

    #[test]
    fn disarmed_scheduler_never_fires() {
        let mut sched = scheduler();
        sleep(Duration::from_millis(100));
        assert!(!sched.poll());
    }

    #[test]
    fn fires_once_per_period() {
        let mut sched = scheduler();
        sched.start();
        assert!(!sched.poll());
        sleep(Duration::from_millis(100));
        assert!(sched.poll());
        // re-armed: not due again immediately
        assert!(!sched.poll());
        sleep(Duration::from_millis(100));
        assert!(sched.poll());
    }

    #[test]
    fn stop_is_idempotent_and_restart_waits_a_full_period() {
        let mut sched = scheduler();
        sched.start();
        sleep(Duration::from_millis(40));
        sched.stop();
        sched.stop();
        assert!(!sched.is_armed());

        // restarting must not inherit the old, nearly-due deadline
        sched.start();
        sleep(Duration::from_millis(40));
        assert!(!sched.poll());
        sleep(Duration::from_millis(100));
        assert!(sched.poll());
    }

    #[test]
    fn start_while_armed_keeps_the_deadline() {
        let mut sched = scheduler();
        sched.start();
        sleep(Duration::from_millis(50));
        sched.start();
        // had start() re-armed, the deadline would now be 80ms out again
        sleep(Duration::from_millis(50));
        assert!(sched.poll());
    }
}
