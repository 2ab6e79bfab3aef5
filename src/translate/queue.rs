use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cache::TranslationCache;
use super::executor::TranslationExecutor;
use super::interface::Language;
use super::rate::RatePolicy;

/// A pending translation and the channel its caller is waiting on.
pub struct TranslationRequest {
    pub id: Uuid,
    pub text: String,
    pub target: Language,
    responder: oneshot::Sender<String>,
}

impl TranslationRequest {
    pub fn new(text: &str, target: Language) -> (Self, oneshot::Receiver<String>) {
        let (responder, receiver) = oneshot::channel();
        let request = Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            target,
            responder,
        };
        (request, receiver)
    }

    fn resolve(self, translated: String) {
        // The caller may have gone away; the result is cached regardless.
        if self.responder.send(translated).is_err() {
            debug!("Translation request {} resolved after its caller left", self.id);
        }
    }
}

/// FIFO of translation requests drained by at most one task at a time.
///
/// Every external call goes through the single drain task, so calls are
/// strictly serialized and paced no matter how many callers enqueue at once.
pub struct RequestQueue {
    pending: Mutex<VecDeque<TranslationRequest>>,
    processing: AtomicBool,
    cache: Arc<TranslationCache>,
    rate: Arc<Mutex<RatePolicy>>,
    executor: TranslationExecutor,
}

impl RequestQueue {
    pub fn new(
        cache: Arc<TranslationCache>,
        rate: Arc<Mutex<RatePolicy>>,
        executor: TranslationExecutor,
    ) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            processing: AtomicBool::new(false),
            cache,
            rate,
            executor,
        }
    }

    pub async fn enqueue(self: &Arc<Self>, text: &str, target: Language) -> oneshot::Receiver<String> {
        let (request, receiver) = TranslationRequest::new(text, target);
        debug!("Queued translation request {} ({})", request.id, target);
        self.pending.lock().await.push_back(request);
        self.start_drain();
        receiver
    }

    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub fn is_draining(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    fn start_drain(self: &Arc<Self>) {
        if !self.try_acquire() {
            return;
        }

        let queue = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                queue.drain().await;
                queue.processing.store(false, Ordering::Release);

                // An enqueue that lost the race for the flag relies on us to pick it up.
                if queue.pending.lock().await.is_empty() || !queue.try_acquire() {
                    break;
                }
            }
        });
    }

    fn try_acquire(&self) -> bool {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    async fn drain(&self) {
        loop {
            let limited = {
                let mut rate = self.rate.lock().await;
                rate.reset_if_window_expired();
                !rate.can_proceed()
            };
            if limited {
                self.drain_with_fallback().await;
                return;
            }

            let Some(request) = self.pending.lock().await.pop_front() else {
                return;
            };

            // A duplicate may have been answered while this one waited.
            if let Some(cached) = self.cache.get(&request.text, request.target) {
                debug!("Translation request {} answered from cache", request.id);
                request.resolve(cached);
                continue;
            }

            let delay = self.rate.lock().await.required_delay();
            if !delay.is_zero() {
                debug!("Pacing translation request {} by {:?}", request.id, delay);
                tokio::time::sleep(delay).await;
            }

            let translated = self.executor.execute(&request.text, request.target).await;
            self.cache.put(&request.text, request.target, translated.clone());
            request.resolve(translated);
            self.rate.lock().await.mark_completed();
        }
    }

    async fn drain_with_fallback(&self) {
        let drained: Vec<TranslationRequest> = self.pending.lock().await.drain(..).collect();
        if drained.is_empty() {
            return;
        }

        warn!(
            "Hourly translation limit reached, answering {} queued requests with fallback",
            drained.len()
        );
        for request in drained {
            let translated = self.executor.fallback(&request.text, request.target);
            self.cache.put(&request.text, request.target, translated.clone());
            request.resolve(translated);
        }
        info!("Fallback drain finished");
    }
}
