//! Login attempt limiter, keyed by username and client address

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of failed attempts allowed per window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,        // 5 minutes
            ban_duration_seconds: 3600, // 1 hour
        }
    }
}

#[derive(Debug)]
struct RateLimiterEntry {
    attempts: u32,
    window_start: Instant,
    ban_expires: Option<Instant>,
}

/// Rate limiter
///
/// Only failures are recorded, and entries whose window and ban have both
/// run out are dropped on every call, so the map stays bounded by recent
/// failures.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, RateLimiterEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Limiter key for a login attempt. Each client address counts separately,
    /// so one client cannot lock a user out for everyone.
    pub fn login_key(username: &str, client: Option<IpAddr>) -> String {
        match client {
            Some(ip) => format!("{}|{}", username, ip),
            None => format!("{}|unknown", username),
        }
    }

    /// Whether `key` may attempt a login now. Never creates an entry.
    pub async fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now()).await
    }

    /// Count a failed attempt for `key`, banning it once the limit is reached
    pub async fn record_failure(&self, key: &str) {
        self.record_failure_at(key, Instant::now()).await
    }

    /// Forget the failures for `key`, e.g. after a successful login
    pub async fn reset(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }

    async fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.entries.lock().await;
        self.prune(&mut entries, now);

        match entries.get(key).and_then(|entry| entry.ban_expires) {
            Some(ban_expires) => now >= ban_expires,
            None => true,
        }
    }

    async fn record_failure_at(&self, key: &str, now: Instant) {
        let mut entries = self.entries.lock().await;
        self.prune(&mut entries, now);

        let window = Duration::from_secs(self.config.window_seconds);
        let entry = entries.entry(key.to_string()).or_insert(RateLimiterEntry {
            attempts: 0,
            window_start: now,
            ban_expires: None,
        });

        let ban_over = entry.ban_expires.is_some_and(|ban_expires| now >= ban_expires);
        if ban_over || now.duration_since(entry.window_start) >= window {
            entry.attempts = 0;
            entry.window_start = now;
            entry.ban_expires = None;
        }

        entry.attempts += 1;
        if entry.attempts >= self.config.max_attempts {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            warn!(
                "Banned key {} for {} seconds",
                key, self.config.ban_duration_seconds
            );
        }
    }

    fn prune(&self, entries: &mut HashMap<String, RateLimiterEntry>, now: Instant) {
        let window = Duration::from_secs(self.config.window_seconds);
        entries.retain(|_, entry| {
            let banned = entry.ban_expires.is_some_and(|ban_expires| now < ban_expires);
            banned || now.duration_since(entry.window_start) < window
        });
    }

    #[cfg(test)]
    pub(crate) async fn entry_count(&self) -> usize {
        self.entries.lock().await.len()
    }
}
