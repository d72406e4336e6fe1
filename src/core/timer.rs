//! Per-turn countdown, driven one second at a time by an external clock.

/// What a single clock tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is cancelled or paused; nothing changed.
    Idle,
    /// One second elapsed; this many remain.
    Running(u8),
    /// The countdown reached zero. The timer disarms itself.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTimer {
    limit: u8,
    remaining: u8,
    paused: bool,
    armed: bool,
}

impl TurnTimer {
    /// A disarmed timer with `limit` seconds per turn.
    pub fn new(limit: u8) -> Self {
        Self {
            limit,
            remaining: limit,
            paused: false,
            armed: false,
        }
    }

    pub fn limit(&self) -> u8 {
        self.limit
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Restart the countdown from the full limit and arm it.
    pub fn reset(&mut self) {
        self.remaining = self.limit;
        self.armed = true;
    }

    /// Disarm the countdown and restore the full limit.
    pub fn cancel(&mut self) {
        self.remaining = self.limit;
        self.armed = false;
    }

    /// Advance by one second unless cancelled or paused.
    pub fn tick(&mut self) -> TimerTick {
        if !self.armed || self.paused {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.armed = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut timer = TurnTimer::new(3);
        timer.reset();
        assert_eq!(timer.tick(), TimerTick::Running(2));
        assert_eq!(timer.tick(), TimerTick::Running(1));
        assert_eq!(timer.tick(), TimerTick::Expired);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert!(!timer.is_armed());
    }

    #[test]
    fn pause_freezes_remaining_time() {
        let mut timer = TurnTimer::new(5);
        timer.reset();
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.remaining(), 4);
        timer.resume();
        assert_eq!(timer.tick(), TimerTick::Running(3));
    }

    #[test]
    fn cancel_restores_limit_and_stops_ticking() {
        let mut timer = TurnTimer::new(2);
        timer.reset();
        timer.tick();
        timer.cancel();
        assert_eq!(timer.remaining(), 2);
        assert_eq!(timer.tick(), TimerTick::Idle);
    }
}
