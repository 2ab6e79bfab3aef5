use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::fallback::FallbackDictionary;
use super::interface::{Language, TranslationTransport};
use super::rate::{RatePolicy, RetryPolicy};
use super::stats::TranslationStats;
use crate::error::TranslateError;

/// Runs one translation against the transport with bounded retries.
pub struct TranslationExecutor {
    transport: Arc<dyn TranslationTransport>,
    rate: Arc<Mutex<RatePolicy>>,
    fallback: Arc<FallbackDictionary>,
    retry: RetryPolicy,
    stats: Arc<TranslationStats>,
}

impl TranslationExecutor {
    pub fn new(
        transport: Arc<dyn TranslationTransport>,
        rate: Arc<Mutex<RatePolicy>>,
        fallback: Arc<FallbackDictionary>,
        retry: RetryPolicy,
        stats: Arc<TranslationStats>,
    ) -> Self {
        Self {
            transport,
            rate,
            fallback,
            retry,
            stats,
        }
    }

    /// Always yields displayable text: the remote translation, or the
    /// dictionary substitution of `text` once the remote path is exhausted.
    pub async fn execute(&self, text: &str, target: Language) -> String {
        for attempt in 1..=self.retry.max_attempts {
            match self.attempt(text, target).await {
                Ok(translated) => return translated,
                Err(e) if e.is_rate_limit() => {
                    warn!("Translation attempt {} stopped: {}", attempt, e);
                    return self.fallback(text, target);
                }
                Err(e) => {
                    warn!("Translation attempt {} failed: {}", attempt, e);
                    self.stats.inc_failed_attempts();
                    if attempt < self.retry.max_attempts {
                        // A retry is still an external call and must respect pacing.
                        let pacing = self.rate.lock().await.required_delay();
                        let wait = self.retry.backoff(attempt).max(pacing);
                        debug!("Retrying translation in {:?}", wait);
                        tokio::time::sleep(wait).await;
                    }
                }
            }
        }

        self.fallback(text, target)
    }

    async fn attempt(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        {
            let rate = self.rate.lock().await;
            if !rate.can_proceed() {
                return Err(TranslateError::QuotaExhausted(rate.hourly_limit()));
            }
        }

        let outcome = self.transport.translate(text, target).await;
        self.rate.lock().await.record_request();
        self.stats.inc_external_calls();
        outcome
    }

    pub fn fallback(&self, text: &str, target: Language) -> String {
        debug!("Using fallback translation");
        self.stats.inc_fallbacks();
        self.fallback.substitute(text, target.direction())
    }
}
