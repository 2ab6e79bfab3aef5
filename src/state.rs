use std::sync::Arc;

use crate::config::Config;
use crate::jokes::JokeService;
use crate::translate::TranslationManager;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: TranslationManager,
    pub jokes: JokeService,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = TranslationManager::from_config(&config.translation_config)?;
        Ok(Self::with_translator(config, translator))
    }

    /// Wire the app around an existing translator, e.g. one with a stub transport.
    pub fn with_translator(config: Config, translator: TranslationManager) -> Self {
        let jokes = JokeService::from_config(&config.joke_config, translator.clone());
        Self {
            config: Arc::new(config),
            translator,
            jokes,
        }
    }
}
