use std::time::Duration;
use tokio::time::Instant;

/// §4.9 turn timer / time-bank. Mirrors the teacher's `gameroom::Timer`
/// shape (a bare deadline `Option<Instant>`) but adds the time-bank
/// extension and a remaining-seconds accessor for the per-second
/// `timer-update` broadcast.
#[derive(Debug, Clone, Copy)]
pub struct TurnTimer {
    base: Duration,
    deadline: Option<Instant>,
}

/// `use-timebank` extends the current deadline by this much (spec §4.9,
/// §5 "Time-bank chip adds 30 s").
pub const TIME_BANK_EXTENSION: Duration = Duration::from_secs(30);

/// Consecutive timeouts before a seat is flagged `pendingSitOut` (§4.9).
pub const TIMEOUTS_BEFORE_SIT_OUT: u32 = 3;

impl TurnTimer {
    pub fn new(base: Duration) -> Self {
        Self { base, deadline: None }
    }

    pub fn start(&mut self) {
        self.deadline = Some(Instant::now() + self.base);
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }

    pub fn remaining(&self) -> Duration {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining().as_secs()
    }

    /// `use-timebank`: adds a fixed extension on top of whatever deadline is
    /// currently running. Spending a chip with no timer running is a no-op
    /// at this layer — the caller (session controller) only invokes this
    /// while a `your-turn` timer is live.
    pub fn extend(&mut self, by: Duration) {
        if let Some(deadline) = self.deadline {
            self.deadline = Some(deadline + by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_deadline() {
        let timer = TurnTimer::new(Duration::from_secs(30));
        assert!(!timer.is_running());
        assert!(!timer.expired());
    }

    #[test]
    fn start_sets_a_future_deadline() {
        let mut timer = TurnTimer::new(Duration::from_secs(30));
        timer.start();
        assert!(timer.is_running());
        assert!(!timer.expired());
        assert!(timer.remaining_secs() <= 30);
    }

    #[test]
    fn clear_drops_the_deadline() {
        let mut timer = TurnTimer::new(Duration::from_secs(30));
        timer.start();
        timer.clear();
        assert!(!timer.is_running());
    }

    #[test]
    fn extend_pushes_the_deadline_out() {
        let mut timer = TurnTimer::new(Duration::from_millis(10));
        timer.start();
        let before = timer.remaining();
        timer.extend(TIME_BANK_EXTENSION);
        assert!(timer.remaining() > before);
    }

    #[test]
    fn already_expired_timer_reports_expired() {
        let mut timer = TurnTimer::new(Duration::from_millis(0));
        timer.start();
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.expired());
    }
}
