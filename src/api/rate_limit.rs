//! Per-client fixed window rate limiter.
//!
//! One limiter is built at startup and shared by every request. Each client
//! identity gets `max_requests` per `window`; the counter resets when the window
//! that started with the client's first request elapses.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RESET: &str = "x-ratelimit-reset";

/// Expired windows are dropped once this many clients are tracked.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

/// Outcome of a single [`RateLimiter::check`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp (seconds) at which the current window ends.
    pub reset_at: i64,
}

impl RateLimitDecision {
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (HEADER_LIMIT, self.limit.to_string()),
            (HEADER_REMAINING, self.remaining.to_string()),
            (HEADER_RESET, self.reset_at.to_string()),
        ] {
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(HeaderName::from_static(name), value);
            }
        }
        headers
    }
}

#[derive(Default)]
struct ClientTable {
    windows: HashMap<String, Window>,
    last_prune: Option<Instant>,
}

pub struct RateLimiter {
    max_requests: u64,
    window: Duration,
    clients: Mutex<ClientTable>,
}

impl RateLimiter {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Mutex::new(ClientTable::default()),
        }
    }

    pub fn check(&self, client: &str) -> RateLimitDecision {
        self.check_at(client, Instant::now())
    }

    /// Counts one request from `client` at `now`.
    pub fn check_at(&self, client: &str, now: Instant) -> RateLimitDecision {
        let mut table = self
            .clients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let ClientTable {
            windows,
            last_prune,
        } = &mut *table;

        // at most one sweep per window
        let prune_due = last_prune
            .map(|at| now.saturating_duration_since(at) >= self.window)
            .unwrap_or(true);
        if windows.len() >= PRUNE_THRESHOLD && prune_due {
            let window = self.window;
            windows.retain(|_, w| now.saturating_duration_since(w.started) < window);
            *last_prune = Some(now);
        }

        let entry = windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.saturating_duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        let allowed = entry.count < self.max_requests;
        if allowed {
            entry.count += 1;
        }

        let until_reset = self
            .window
            .saturating_sub(now.saturating_duration_since(entry.started));
        let reset_at = chrono::Utc::now().timestamp() + until_reset.as_secs_f64().ceil() as i64;

        RateLimitDecision {
            allowed,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_at,
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .windows
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();

        let remaining: Vec<u64> = (0..3)
            .map(|_| limiter.check_at("10.0.0.1", now).remaining)
            .collect();
        assert_eq!(remaining, vec![2, 1, 0]);

        let blocked = limiter.check_at("10.0.0.1", now);
        assert!(!blocked.allowed);
        assert_eq!(blocked.remaining, 0);
        assert_eq!(blocked.limit, 3);
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.check_at("a", now).allowed);
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();

        assert!(limiter.check_at("a", start).allowed);
        assert!(!limiter.check_at("a", start + Duration::from_secs(9)).allowed);
        assert!(limiter.check_at("a", start + Duration::from_secs(10)).allowed);
    }

    #[test]
    fn test_reset_is_in_the_future() {
        let limiter = RateLimiter::new(5, Duration::from_secs(30));
        let before = chrono::Utc::now().timestamp();

        let decision = limiter.check("a");

        assert!(decision.reset_at >= before + 29);
        assert!(decision.reset_at <= before + 31);
    }

    #[test]
    fn test_headers() {
        let decision = RateLimitDecision {
            allowed: true,
            limit: 60,
            remaining: 59,
            reset_at: 1_700_000_000,
        };

        let headers = decision.headers();
        assert_eq!(headers[HEADER_LIMIT], "60");
        assert_eq!(headers[HEADER_REMAINING], "59");
        assert_eq!(headers[HEADER_RESET], "1700000000");
    }

    #[test]
    fn test_expired_windows_are_pruned() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));
        let start = Instant::now();
        for i in 0..PRUNE_THRESHOLD {
            limiter.check_at(&format!("client-{}", i), start);
        }
        assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD);

        limiter.check_at("late", start + Duration::from_secs(2));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_prune_runs_once_per_window() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));
        let start = Instant::now();
        for i in 0..PRUNE_THRESHOLD {
            limiter.check_at(&format!("client-{}", i), start);
        }

        // sweep finds nothing expired yet
        limiter.check_at("a", start + Duration::from_millis(500));
        assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD + 1);

        // everything from `start` has expired, but the last sweep was too recent
        limiter.check_at("b", start + Duration::from_millis(1200));
        assert_eq!(limiter.tracked_clients(), PRUNE_THRESHOLD + 2);

        // a full window after the last sweep only "b" is still live
        limiter.check_at("c", start + Duration::from_millis(1600));
        assert_eq!(limiter.tracked_clients(), 2);
    }
}
