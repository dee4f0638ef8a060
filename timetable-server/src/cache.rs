//! Caching layer for built timetables.
//!
//! A timetable depends only on the immutable catalog, the stop directory,
//! the target and the date, so entries never go stale while the process
//! runs. The TTL and capacity only bound memory use.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::timetable::{Timetable, TimetableError, TimetableTarget};

/// Cache key for timetables: (stop or group, date).
type TimetableKey = (TimetableTarget, NaiveDate);

/// Configuration for the timetable cache.
#[derive(Debug, Clone)]
pub struct TimetableCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for TimetableCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache of built timetables.
pub struct TimetableCache {
    timetables: MokaCache<TimetableKey, Arc<Timetable>>,
}

impl TimetableCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &TimetableCacheConfig) -> Self {
        let timetables = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { timetables }
    }

    /// Return the cached timetable for `(target, date)`, building it on a miss.
    ///
    /// Concurrent misses for the same key share one build. Only successful
    /// builds are stored; an error is returned to every waiting caller and
    /// the next request builds again.
    pub async fn get_or_build<F>(
        &self,
        target: TimetableTarget,
        date: NaiveDate,
        build: F,
    ) -> Result<Arc<Timetable>, TimetableError>
    where
        F: FnOnce() -> Result<Timetable, TimetableError>,
    {
        self.timetables
            .try_get_with((target, date), async move { build().map(Arc::new) })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.timetables.entry_count()
    }
}
