use thiserror::Error;

/// Why a single translation attempt did not produce text.
///
/// None of these reach callers of `TranslationManager::translate`; the executor
/// turns every variant into a fallback substitution.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation service returned HTTP {0}")]
    Status(u16),

    #[error("translation response not valid: {0}")]
    Malformed(String),

    #[error("translation service is rate limiting us (HTTP 429)")]
    RateLimited,

    #[error("hourly translation quota of {0} requests exhausted")]
    QuotaExhausted(u32),

    #[error("invalid fallback dictionary entry: {0}")]
    Dictionary(#[from] regex::Error),
}

impl TranslateError {
    /// A remote 429 or a local quota hit ends the attempt loop immediately.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited | Self::QuotaExhausted(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
