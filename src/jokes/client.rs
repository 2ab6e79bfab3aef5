use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::backup::DEFAULT_JOKE;
use super::Joke;
use crate::translate::{Language, TranslationManager};

pub const DEFAULT_JOKE_API_URL: &str = "https://v2.jokeapi.dev";

const JOKE_QUERY: &str =
    "joke/Any?blacklistFlags=nsfw,religious,political,racist,sexist,explicit&type=single";

/// Fetches single-part jokes from JokeAPI, translating them when Hindi is asked for.
#[derive(Clone)]
pub struct JokeClient {
    client: Client,
    api_url: String,
    timeout: Duration,
    translator: TranslationManager,
}

impl JokeClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration, translator: TranslationManager) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            timeout,
            translator,
        }
    }

    fn joke_url(&self) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), JOKE_QUERY)
    }

    /// Fetch `count` jokes concurrently. Failed fetches are dropped, so the
    /// result may be shorter than `count` or empty.
    pub async fn fetch_jokes(&self, count: usize, language: Language) -> Vec<Joke> {
        let fetches = (0..count).map(|_| async move {
            match self.fetch_one().await {
                Ok(text) => Some(self.localize(text, language).await),
                Err(e) => {
                    warn!("Individual joke fetch failed: {:#}", e);
                    None
                }
            }
        });

        let jokes: Vec<Joke> = join_all(fetches).await.into_iter().flatten().collect();
        debug!("Fetched {} of {} jokes", jokes.len(), count);
        jokes
    }

    async fn fetch_one(&self) -> Result<String> {
        let response = self
            .client
            .get(self.joke_url())
            .timeout(self.timeout)
            .send()
            .await
            .context("joke request failed")?
            .error_for_status()?;

        let body: Value = response.json().await.context("failed to read joke body")?;
        Ok(body
            .get("joke")
            .and_then(Value::as_str)
            .filter(|joke| !joke.is_empty())
            .unwrap_or(DEFAULT_JOKE)
            .to_string())
    }

    async fn localize(&self, text: String, language: Language) -> Joke {
        match language {
            Language::Hindi => Joke::new(self.translator.translate(&text, Language::Hindi).await),
            Language::English => Joke::new(text),
        }
    }
}
