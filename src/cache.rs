//! Memoisation of window computations.
//!
//! A dashboard recomputes its downsampled view whenever the visible window,
//! the channel selection, the bucket count or the underlying data change.
//! [`WindowCache`] holds the result for the most recent [`CacheKey`] and
//! recomputes as soon as any part of the key differs.

use crate::telemetry::{ChannelId, TimeWindow};

// ============================================================================
// Cache Key
// ============================================================================

/// Everything a downsampled window depends on.
///
/// Window edges are stored as raw bits so the key is `Eq` and `Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    window_start: u64,
    window_end: u64,
    channels: Vec<ChannelId>,
    bucket_count: usize,
    source_version: u64,
}

impl CacheKey {
    pub fn new(
        window: TimeWindow,
        channels: &[ChannelId],
        bucket_count: usize,
        source_version: u64,
    ) -> Self {
        Self {
            window_start: window.start.to_bits(),
            window_end: window.end.to_bits(),
            channels: channels.to_vec(),
            bucket_count,
            source_version,
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(
            f64::from_bits(self.window_start),
            f64::from_bits(self.window_end),
        )
    }

    pub fn source_version(&self) -> u64 {
        self.source_version
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Hit/miss counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-entry memo keyed by [`CacheKey`]
#[derive(Debug)]
pub struct WindowCache<T> {
    entry: Option<(CacheKey, T)>,
    stats: CacheStats,
}

impl<T> Default for WindowCache<T> {
    fn default() -> Self {
        Self {
            entry: None,
            stats: CacheStats::default(),
        }
    }
}

impl<T> WindowCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it first on a miss
    pub fn get_or_compute<F>(&mut self, key: CacheKey, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        match self.entry.take() {
            Some((cached, value)) if cached == key => {
                self.stats.hits += 1;
                &self.entry.insert((cached, value)).1
            }
            _ => {
                self.stats.misses += 1;
                tracing::debug!(
                    "Recomputing window {:?} (bucket count {}, source version {})",
                    key.window(),
                    key.bucket_count,
                    key.source_version
                );
                let value = compute();
                &self.entry.insert((key, value)).1
            }
        }
    }

    /// Cached value if it was computed for exactly `key`
    pub fn get(&self, key: &CacheKey) -> Option<&T> {
        self.entry
            .as_ref()
            .filter(|(cached, _)| cached == key)
            .map(|(_, value)| value)
    }

    pub fn is_cached(&self, key: &CacheKey) -> bool {
        self.get(key).is_some()
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
