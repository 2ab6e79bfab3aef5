use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::rate::RateSnapshot;

/// Counters shared by the manager, queue and executor.
#[derive(Debug, Default)]
pub struct TranslationStats {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    external_calls: AtomicU64,
    failed_attempts: AtomicU64,
    fallbacks: AtomicU64,
}

impl TranslationStats {
    pub fn inc_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_cache_misses(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_external_calls(&self) {
        self.external_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failed_attempts(&self) {
        self.failed_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_fallbacks(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, queued: usize, cached: usize, rate: RateSnapshot) -> TranslationStatsSnapshot {
        TranslationStatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            external_calls: self.external_calls.load(Ordering::Relaxed),
            failed_attempts: self.failed_attempts.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            queued,
            cached,
            rate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationStatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub external_calls: u64,
    pub failed_attempts: u64,
    pub fallbacks: u64,
    pub queued: usize,
    pub cached: usize,
    pub rate: RateSnapshot,
}
