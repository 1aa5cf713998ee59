use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::gameplay::PlayerId;

const WINDOW: Duration = Duration::from_secs(2);
const MAX_ACTIONS_PER_WINDOW: usize = 6;

/// §4.9 rate limit: a sliding 2-second window caps a player id at 6
/// actions; the 7th and later within the window are rejected with
/// `action-invalid` / `"Too many actions"`.
#[derive(Debug, Default)]
pub struct RateLimiter {
    hits: HashMap<PlayerId, Vec<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one action attempt for `player_id` and reports whether it is
    /// within the allowed rate. Rejected attempts are not recorded, so a
    /// client hammering the server doesn't extend its own penalty window.
    pub fn check(&mut self, player_id: &str) -> bool {
        let now = Instant::now();
        let hits = self.hits.entry(player_id.to_string()).or_default();
        hits.retain(|t| now.duration_since(*t) < WINDOW);
        if hits.len() >= MAX_ACTIONS_PER_WINDOW {
            false
        } else {
            hits.push(now);
            true
        }
    }

    pub fn forget(&mut self, player_id: &str) {
        self.hits.remove(player_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_six_actions_in_the_window() {
        let mut limiter = RateLimiter::new();
        for _ in 0..6 {
            assert!(limiter.check("p1"));
        }
        assert!(!limiter.check("p1"));
    }

    #[test]
    fn players_are_rate_limited_independently() {
        let mut limiter = RateLimiter::new();
        for _ in 0..6 {
            assert!(limiter.check("p1"));
        }
        assert!(limiter.check("p2"));
    }

    #[test]
    fn window_expiry_frees_up_capacity() {
        let mut limiter = RateLimiter::new();
        limiter.hits.insert(
            "p1".to_string(),
            vec![Instant::now() - Duration::from_secs(3); 6],
        );
        assert!(limiter.check("p1"));
    }
}
