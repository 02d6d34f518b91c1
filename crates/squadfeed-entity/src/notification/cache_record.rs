//! Session-cached notification list.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::model::Notification;

/// What is stored under the session `notifications` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationCacheRecord {
    /// Cached notifications, newest first.
    pub items: Vec<Notification>,
    /// When `items` was persisted, epoch millis.
    pub ts: i64,
}

impl NotificationCacheRecord {
    /// Record stamped with `ts`.
    pub fn new(items: Vec<Notification>, ts: i64) -> Self {
        Self { items, ts }
    }

    /// Parse a stored record. Malformed input is treated as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Whether the record can be served instead of refetching: non-empty
    /// and strictly younger than `ttl` at `now_ms`.
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        !self.items.is_empty() && now_ms.saturating_sub(self.ts) < ttl_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);
    const NOW: i64 = 1_700_000_000_000;

    fn record(items: usize, age: Duration) -> NotificationCacheRecord {
        let items = (0..items).map(|i| Notification::new(format!("n{i}"))).collect();
        NotificationCacheRecord::new(items, NOW - age.as_millis() as i64)
    }

    #[test]
    fn test_fresh_when_young_and_non_empty() {
        assert!(record(1, Duration::from_secs(4 * 60)).is_fresh(NOW, TTL));
    }

    #[test]
    fn test_stale_past_ttl() {
        assert!(!record(1, Duration::from_secs(5 * 60 + 1)).is_fresh(NOW, TTL));
        assert!(!record(1, TTL).is_fresh(NOW, TTL));
    }

    #[test]
    fn test_empty_is_never_fresh() {
        assert!(!record(0, Duration::ZERO).is_fresh(NOW, TTL));
    }

    #[test]
    fn test_garbage_parses_as_absent() {
        assert!(NotificationCacheRecord::parse("not json").is_none());
        assert!(NotificationCacheRecord::parse("{\"items\": 3}").is_none());
    }
}
