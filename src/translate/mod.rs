pub mod cache;
pub mod client;
pub mod executor;
pub mod fallback;
pub mod interface;
pub mod manager;
pub mod queue;
pub mod rate;
pub mod stats;

pub use client::MyMemoryClient;
pub use fallback::FallbackDictionary;
pub use interface::{Direction, Language, TranslateRequest, TranslateResponse, TranslationTransport};
pub use manager::{TranslationManager, TranslationManagerBuilder};
pub use rate::{RateLimitConfig, RetryPolicy};
pub use stats::TranslationStatsSnapshot;
