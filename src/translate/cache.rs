use dashmap::DashMap;

use super::interface::Language;

/// Process-lifetime memo of finished translations. Entries are never evicted.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: DashMap<String, String>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(text: &str, target: Language) -> String {
        format!("{}:{}", text, target.code())
    }

    pub fn get(&self, text: &str, target: Language) -> Option<String> {
        self.entries
            .get(&Self::key(text, target))
            .map(|entry| entry.value().clone())
    }

    pub fn put(&self, text: &str, target: Language, translated: String) {
        self.entries.insert(Self::key(text, target), translated);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
