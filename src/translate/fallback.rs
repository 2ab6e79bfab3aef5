use regex::{NoExpand, Regex, RegexBuilder};

use super::interface::Direction;
use crate::error::TranslateError;

/// Authored order matters: each entry is applied to the output of the previous one.
const ENGLISH_TO_HINDI: &[(&str, &str)] = &[
    ("Why", "क्यों"),
    ("What", "क्या"),
    ("How", "कैसे"),
    ("programmer", "प्रोग्रामर"),
    ("developer", "डेवलपर"),
    ("because", "क्योंकि"),
    ("software", "सॉफ्टवेयर"),
    ("computer", "कंप्यूटर"),
];

const HINDI_TO_ENGLISH: &[(&str, &str)] = &[
    ("क्यों", "Why"),
    ("क्या", "What"),
    ("कैसे", "How"),
    ("प्रोग्रामर", "programmer"),
    ("डेवलपर", "developer"),
    ("क्योंकि", "because"),
    ("सॉफ्टवेयर", "software"),
    ("कंप्यूटर", "computer"),
];

#[derive(Debug)]
struct Rule {
    pattern: Regex,
    replacement: String,
}

/// Word-substitution tables used when live translation is unavailable.
///
/// Matching is case-insensitive and not anchored to word boundaries, so
/// "Whyever" becomes "क्योंever". Overlapping keys can be rewritten twice.
#[derive(Debug)]
pub struct FallbackDictionary {
    english_to_hindi: Vec<Rule>,
    hindi_to_english: Vec<Rule>,
}

impl FallbackDictionary {
    pub fn builtin() -> Result<Self, TranslateError> {
        Self::from_pairs(ENGLISH_TO_HINDI, HINDI_TO_ENGLISH)
    }

    pub fn from_pairs(
        english_to_hindi: &[(&str, &str)],
        hindi_to_english: &[(&str, &str)],
    ) -> Result<Self, TranslateError> {
        Ok(Self {
            english_to_hindi: compile(english_to_hindi)?,
            hindi_to_english: compile(hindi_to_english)?,
        })
    }

    pub fn substitute(&self, text: &str, direction: Direction) -> String {
        let rules = match direction {
            Direction::EnglishToHindi => &self.english_to_hindi,
            Direction::HindiToEnglish => &self.hindi_to_english,
        };

        let mut output = text.to_string();
        for rule in rules {
            output = rule
                .pattern
                .replace_all(&output, NoExpand(&rule.replacement))
                .into_owned();
        }
        output
    }

    pub fn len(&self, direction: Direction) -> usize {
        match direction {
            Direction::EnglishToHindi => self.english_to_hindi.len(),
            Direction::HindiToEnglish => self.hindi_to_english.len(),
        }
    }
}

fn compile(pairs: &[(&str, &str)]) -> Result<Vec<Rule>, TranslateError> {
    pairs
        .iter()
        .map(|(key, value)| {
            let pattern = RegexBuilder::new(&regex::escape(key))
                .case_insensitive(true)
                .build()?;
            Ok(Rule {
                pattern,
                replacement: (*value).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> FallbackDictionary {
        FallbackDictionary::builtin().expect("builtin dictionary compiles")
    }

    #[test]
    fn replaces_known_words_case_insensitively() {
        let out = dictionary().substitute(
            "WHY do programmers prefer dark mode? Because light attracts bugs!",
            Direction::EnglishToHindi,
        );
        assert_eq!(
            out,
            "क्यों do प्रोग्रामरs prefer dark mode? क्योंकि light attracts bugs!"
        );
    }

    #[test]
    fn matches_inside_words() {
        let out = dictionary().substitute("Somehow the developers", Direction::EnglishToHindi);
        assert_eq!(out, "Someकैसे the डेवलपरs");
    }

    #[test]
    fn reverse_direction_uses_its_own_table() {
        let out = dictionary().substitute("क्यों? क्योंकि कंप्यूटर!", Direction::HindiToEnglish);
        // "क्यों" is a prefix of "क्योंकि", so the first entry wins and leaves "कि".
        assert_eq!(out, "Why? Whyकि computer!");
    }

    #[test]
    fn later_entries_see_earlier_output() {
        let dict =
            FallbackDictionary::from_pairs(&[("ware", "WARE"), ("software", "x")], &[]).unwrap();
        assert_eq!(dict.substitute("software", Direction::EnglishToHindi), "x");

        let dict = FallbackDictionary::from_pairs(&[("soft", "hard"), ("hardware", "metal")], &[])
            .unwrap();
        assert_eq!(dict.substitute("software", Direction::EnglishToHindi), "metal");
    }

    #[test]
    fn replacement_is_literal() {
        let dict = FallbackDictionary::from_pairs(&[("a.b", "$1")], &[]).unwrap();
        assert_eq!(dict.substitute("a.b axb", Direction::EnglishToHindi), "$1 axb");
    }

    #[test]
    fn unknown_text_passes_through_unchanged() {
        let text = "Knock knock.";
        assert_eq!(dictionary().substitute(text, Direction::EnglishToHindi), text);
        assert_eq!(dictionary().len(Direction::HindiToEnglish), 8);
    }

    #[test]
    fn is_deterministic() {
        let dict = dictionary();
        let text = "What did the JSON say to the JavaScript? You complete me!";
        let first = dict.substitute(text, Direction::EnglishToHindi);
        assert_eq!(first, dict.substitute(text, Direction::EnglishToHindi));
    }
}
