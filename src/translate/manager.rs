use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::cache::TranslationCache;
use super::client::MyMemoryClient;
use super::executor::TranslationExecutor;
use super::fallback::FallbackDictionary;
use super::interface::{Language, TranslationTransport};
use super::queue::RequestQueue;
use super::rate::{RateLimitConfig, RatePolicy, RetryPolicy};
use super::stats::{TranslationStats, TranslationStatsSnapshot};
use crate::config::TranslationConfig;

/// Process-wide entry point for translations.
///
/// Cheap to clone; every clone shares one cache, one rate window and one
/// request queue, so external calls stay serialized across all callers.
#[derive(Clone)]
pub struct TranslationManager {
    cache: Arc<TranslationCache>,
    rate: Arc<Mutex<RatePolicy>>,
    queue: Arc<RequestQueue>,
    fallback: Arc<FallbackDictionary>,
    stats: Arc<TranslationStats>,
}

impl TranslationManager {
    pub fn builder(transport: Arc<dyn TranslationTransport>) -> TranslationManagerBuilder {
        TranslationManagerBuilder {
            transport,
            fallback: None,
            rate: RateLimitConfig::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Build the production manager talking to MyMemory.
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        info!(
            "Initializing translation manager: {} (limit {}/window, min interval {} ms)",
            config.api_url, config.hourly_limit, config.min_interval_ms
        );

        let transport = MyMemoryClient::new(
            config.api_url.clone(),
            Duration::from_millis(config.timeout_ms),
        );

        Self::builder(Arc::new(transport))
            .rate_limit(RateLimitConfig {
                hourly_limit: config.hourly_limit,
                window: Duration::from_millis(config.window_ms),
                min_interval: Duration::from_millis(config.min_interval_ms),
            })
            .retry(RetryPolicy {
                max_attempts: config.max_attempts,
                base_delay: Duration::from_millis(config.retry_base_delay_ms),
            })
            .build()
    }

    /// Translate `text` into `target`. Never fails: when the remote service is
    /// unavailable or the local quota is spent, the fallback substitution is returned.
    pub async fn translate(&self, text: &str, target: Language) -> String {
        if let Some(cached) = self.cache.get(text, target) {
            debug!("Using cached translation ({})", target);
            self.stats.inc_cache_hits();
            return cached;
        }
        self.stats.inc_cache_misses();

        let receiver = self.queue.enqueue(text, target).await;
        match receiver.await {
            Ok(translated) => translated,
            Err(_) => {
                warn!("Translation request dropped before it was answered, using fallback");
                self.stats.inc_fallbacks();
                self.fallback.substitute(text, target.direction())
            }
        }
    }

    pub async fn stats(&self) -> TranslationStatsSnapshot {
        let queued = self.queue.len().await;
        let rate = self.rate.lock().await.snapshot();
        self.stats.snapshot(queued, self.cache.len(), rate)
    }
}

pub struct TranslationManagerBuilder {
    transport: Arc<dyn TranslationTransport>,
    fallback: Option<FallbackDictionary>,
    rate: RateLimitConfig,
    retry: RetryPolicy,
}

impl TranslationManagerBuilder {
    pub fn fallback(mut self, fallback: FallbackDictionary) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn rate_limit(mut self, rate: RateLimitConfig) -> Self {
        self.rate = rate;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<TranslationManager> {
        let fallback = Arc::new(match self.fallback {
            Some(fallback) => fallback,
            None => FallbackDictionary::builtin()?,
        });
        let cache = Arc::new(TranslationCache::new());
        let rate = Arc::new(Mutex::new(RatePolicy::new(self.rate)));
        let stats = Arc::new(TranslationStats::default());

        let executor = TranslationExecutor::new(
            self.transport,
            rate.clone(),
            fallback.clone(),
            self.retry,
            stats.clone(),
        );
        let queue = Arc::new(RequestQueue::new(cache.clone(), rate.clone(), executor));

        Ok(TranslationManager {
            cache,
            rate,
            queue,
            fallback,
            stats,
        })
    }
}
