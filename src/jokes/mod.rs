pub mod backup;
pub mod client;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use backup::{backup_jokes, DEFAULT_JOKE};
pub use client::{JokeClient, DEFAULT_JOKE_API_URL};

use crate::config::JokeConfig;
use crate::translate::{Language, TranslationManager};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub joke: String,
}

impl Joke {
    pub fn new(joke: impl Into<String>) -> Self {
        Self { joke: joke.into() }
    }
}

/// Live jokes when the joke API answers, built-in ones when it does not.
#[derive(Clone)]
pub struct JokeService {
    client: JokeClient,
}

impl JokeService {
    pub fn new(client: JokeClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &JokeConfig, translator: TranslationManager) -> Self {
        info!("Using joke API at {}", config.api_url);
        let client = JokeClient::new(
            config.api_url.clone(),
            Duration::from_millis(config.timeout_ms),
            translator,
        );
        Self::new(client)
    }

    /// Never empty for a non-zero `count`.
    pub async fn jokes_for(&self, language: Language, count: usize) -> Vec<Joke> {
        let jokes = self.client.fetch_jokes(count, language).await;
        if jokes.is_empty() {
            warn!("No jokes fetched, using {} backup jokes", language);
            return backup_jokes(count, language);
        }
        jokes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::executor::tests::ScriptedTransport;
    use std::io::Write;
    use std::sync::Arc;

    #[tokio::test]
    async fn failing_api_falls_back_to_builtin_jokes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let translator = TranslationManager::builder(Arc::new(ScriptedTransport::echo()))
            .build()
            .unwrap();
        let client = JokeClient::new(server.url(), Duration::from_millis(500), translator);
        let service = JokeService::new(client);

        let jokes = service.jokes_for(Language::Hindi, 3).await;
        assert_eq!(jokes.len(), 3);
        assert!(jokes
            .iter()
            .all(|j| backup::pool(Language::Hindi).contains(&j.joke.as_str())));
    }

    #[tokio::test]
    async fn slow_api_times_out_and_uses_builtin_jokes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(500));
                w.write_all(br#"{"joke": "too late"}"#)
            })
            .create_async()
            .await;

        let translator = TranslationManager::builder(Arc::new(ScriptedTransport::echo()))
            .build()
            .unwrap();
        let client = JokeClient::new(server.url(), Duration::from_millis(50), translator);

        assert!(client.fetch_jokes(2, Language::English).await.is_empty());

        let jokes = JokeService::new(client).jokes_for(Language::English, 2).await;
        assert_eq!(jokes.len(), 2);
        assert!(jokes
            .iter()
            .all(|j| backup::pool(Language::English).contains(&j.joke.as_str())));
    }
}
