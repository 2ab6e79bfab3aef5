use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

/// The two languages the page can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en", alias = "english")]
    English,
    #[serde(rename = "hi", alias = "hindi")]
    Hindi,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "hi" | "hindi" => Some(Language::Hindi),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::English,
        }
    }

    /// Direction of a translation whose output is in this language.
    pub fn direction(self) -> Direction {
        match self {
            Language::Hindi => Direction::EnglishToHindi,
            Language::English => Direction::HindiToEnglish,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    EnglishToHindi,
    HindiToEnglish,
}

impl Direction {
    /// Value of the `langpair` query parameter.
    pub fn langpair(self) -> &'static str {
        match self {
            Direction::EnglishToHindi => "en|hi",
            Direction::HindiToEnglish => "hi|en",
        }
    }
}

/// One external translation call. Implementations must not retry or cache;
/// the executor owns both.
#[async_trait]
pub trait TranslationTransport: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_lang: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub target_lang: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!(Language::parse("hi"), Some(Language::Hindi));
        assert_eq!(Language::parse(" Hindi "), Some(Language::Hindi));
        assert_eq!(Language::parse("EN"), Some(Language::English));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn target_language_picks_langpair() {
        assert_eq!(Language::Hindi.direction().langpair(), "en|hi");
        assert_eq!(Language::English.direction().langpair(), "hi|en");
        assert_eq!(Language::Hindi.toggled(), Language::English);
    }

    #[test]
    fn serde_uses_codes_and_accepts_names() {
        let lang: Language = serde_json::from_str("\"hindi\"").unwrap();
        assert_eq!(lang, Language::Hindi);
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
    }
}
