// Short-lived per-key cache in front of Moonraker. Entries are replaced whole; a failed
// refresh leaves the old entry in place but it is never served past its TTL.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Millisecond wall clock; injected so TTL expiry is testable.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Hand-driven clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self(AtomicU64::new(start_millis))
    }

    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_millis() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// One slot per upstream endpoint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    SystemStats,
    TemperatureHistory,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub fetched_at_millis: u64,
}

pub struct TtlCache<T> {
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<CacheKey, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh payload for `key` if `now - fetched_at < ttl`.
    pub fn get(&self, key: CacheKey, ttl: Duration) -> Option<T> {
        let now = self.clock.now_millis();
        let slots = self.slots.lock().ok()?;
        slots
            .get(&key)
            .filter(|e| now.saturating_sub(e.fetched_at_millis) < ttl.as_millis() as u64)
            .map(|e| e.payload.clone())
    }

    /// Serve a fresh entry or run `fetch` and store its result. Errors propagate and leave
    /// the slot untouched. The lock is not held across `fetch`: concurrent misses may each
    /// fetch, last write wins.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: CacheKey,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key, ttl) {
            tracing::trace!(?key, "cache hit");
            return Ok(hit);
        }
        let payload = fetch().await?;
        let entry = CacheEntry {
            payload: payload.clone(),
            fetched_at_millis: self.clock.now_millis(),
        };
        match self.slots.lock() {
            Ok(mut slots) => {
                slots.insert(key, entry);
            }
            Err(e) => tracing::warn!("cache lock poisoned, not storing: {}", e),
        }
        Ok(payload)
    }

    #[cfg(test)]
    pub(crate) fn entry(&self, key: CacheKey) -> Option<CacheEntry<T>> {
        self.slots.lock().ok()?.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    const TTL: Duration = Duration::from_secs(1);

    fn cache_with_clock() -> (TtlCache<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        (TtlCache::new(clock.clone()), clock)
    }

    async fn counted(calls: &AtomicUsize, value: u32) -> Result<u32, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn fetches_once_within_ttl() {
        let (cache, clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);
        let a = cache
            .get_or_fetch(CacheKey::SystemStats, TTL, || counted(&calls, 1))
            .await
            .unwrap();
        clock.advance(Duration::from_millis(999));
        let b = cache
            .get_or_fetch(CacheKey::SystemStats, TTL, || counted(&calls, 2))
            .await
            .unwrap();
        assert_eq!((a, b), (1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refetches_after_expiry() {
        let (cache, clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);
        cache
            .get_or_fetch(CacheKey::SystemStats, TTL, || counted(&calls, 1))
            .await
            .unwrap();
        clock.advance(TTL);
        let v = cache
            .get_or_fetch(CacheKey::SystemStats, TTL, || counted(&calls, 2))
            .await
            .unwrap();
        assert_eq!(v, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            cache.entry(CacheKey::SystemStats).unwrap().fetched_at_millis,
            1_001_000
        );
    }

    #[tokio::test]
    async fn failed_refresh_keeps_entry_but_does_not_serve_it() {
        let (cache, clock) = cache_with_clock();
        cache
            .get_or_fetch(CacheKey::TemperatureHistory, TTL, || async { Ok::<_, String>(7) })
            .await
            .unwrap();
        clock.advance(Duration::from_secs(2));
        let err = cache
            .get_or_fetch(CacheKey::TemperatureHistory, TTL, || async {
                Err::<u32, _>("down".to_string())
            })
            .await
            .unwrap_err();
        assert_eq!(err, "down");
        assert_eq!(cache.entry(CacheKey::TemperatureHistory).unwrap().payload, 7);
        assert!(cache.get(CacheKey::TemperatureHistory, TTL).is_none());
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let (cache, _clock) = cache_with_clock();
        let calls = AtomicUsize::new(0);
        cache
            .get_or_fetch(CacheKey::SystemStats, TTL, || counted(&calls, 1))
            .await
            .unwrap();
        let v = cache
            .get_or_fetch(CacheKey::TemperatureHistory, TTL, || counted(&calls, 2))
            .await
            .unwrap();
        assert_eq!(v, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
