//! One-second countdown for timed attempts.
//!
//! The timer never schedules anything itself: the host calls [`CountdownTimer::tick`]
//! once per second. There is no pause operation.

/// Snapshot of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub seconds_remaining: u32,
    pub is_expired: bool,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not running (never started, stopped, or already expired).
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this tick. Reported once per timer.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    remaining: u32,
    running: bool,
    expired: bool,
}

impl CountdownTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            remaining: 0,
            running: false,
            expired: false,
        }
    }

    /// Begin counting down from `limit_seconds`. Ignored once the timer has expired.
    pub fn start(&mut self, limit_seconds: u32) {
        if self.expired {
            return;
        }
        self.remaining = limit_seconds;
        self.running = true;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.expired {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expired = true;
            self.running = false;
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining: self.remaining,
        }
    }

    /// Freeze the countdown at its current value.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        TimerState {
            seconds_remaining: self.remaining,
            is_expired: self.expired,
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut timer = CountdownTimer::new();
        timer.start(3);
        assert_eq!(timer.tick(), TickOutcome::Running { remaining: 2 });
        assert_eq!(timer.tick(), TickOutcome::Running { remaining: 1 });
        assert_eq!(timer.tick(), TickOutcome::Expired);
        assert!(timer.is_expired());
        for _ in 0..5 {
            assert_eq!(timer.tick(), TickOutcome::Idle);
        }
        assert_eq!(
            timer.state(),
            TimerState {
                seconds_remaining: 0,
                is_expired: true
            }
        );
    }

    #[test]
    fn zero_limit_expires_on_first_tick() {
        let mut timer = CountdownTimer::new();
        timer.start(0);
        assert_eq!(timer.tick(), TickOutcome::Expired);
    }

    #[test]
    fn restart_after_expiry_is_ignored() {
        let mut timer = CountdownTimer::new();
        timer.start(1);
        timer.tick();
        timer.start(60);
        assert!(timer.is_expired());
        assert_eq!(timer.seconds_remaining(), 0);
        assert_eq!(timer.tick(), TickOutcome::Idle);
    }

    #[test]
    fn stopped_timer_is_frozen() {
        let mut timer = CountdownTimer::new();
        timer.start(10);
        timer.tick();
        timer.stop();
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.seconds_remaining(), 9);
        assert!(!timer.is_expired());
    }

    #[test]
    fn unstarted_timer_is_idle() {
        let mut timer = CountdownTimer::default();
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert!(!timer.is_running());
    }

    #[test]
    fn remaining_never_increases_while_running() {
        let mut timer = CountdownTimer::new();
        timer.start(50);
        let mut last = timer.seconds_remaining();
        while timer.tick() != TickOutcome::Idle {
            assert!(timer.seconds_remaining() <= last);
            last = timer.seconds_remaining();
        }
        assert!(timer.is_expired());
    }
}
