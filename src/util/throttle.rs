//! Per-user sliding-window rate limiting for command dispatch.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sliding-window rate limiter keyed by Discord user ID.
///
/// Tracks call timestamps per user and allows at most `max_calls` within
/// `window`. State is pruned on each check, so idle users cost nothing
/// beyond their last window.
pub struct RateLimiter {
    max_calls: usize,
    window: Duration,
    calls: Mutex<HashMap<u64, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Records a call for `user_id` if it is within the limit.
    ///
    /// # Returns
    /// - `true` - Call allowed and counted
    /// - `false` - User has exhausted the window
    pub fn is_allowed(&self, user_id: u64) -> bool {
        let now = Instant::now();
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());

        let history = calls.entry(user_id).or_default();
        history.retain(|at| now.duration_since(*at) < self.window);

        if history.len() < self.max_calls {
            history.push(now);
            true
        } else {
            false
        }
    }
}

impl Default for RateLimiter {
    /// Ten calls per minute, the limit applied to bot commands.
    fn default() -> Self {
        Self::new(10, Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));

        assert!(limiter.is_allowed(1));
        assert!(limiter.is_allowed(1));
        assert!(!limiter.is_allowed(1));
    }

    #[test]
    fn tracks_users_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));

        assert!(limiter.is_allowed(1));
        assert!(!limiter.is_allowed(1));
        assert!(limiter.is_allowed(2));
    }

    #[test]
    fn window_expiry_frees_slots() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));

        assert!(limiter.is_allowed(1));
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.is_allowed(1));
    }
}
