//! Phrase lexicon for the fusion rules
//!
//! The engine owns one [`Lexicon`]. The built-in one is Turkish; another
//! language can be plugged in through a TOML file with the same keys:
//!
//! ```toml
//! negated_negative = ["fena değil", "kötü değil"]
//! strong_positive = ["mutluyum"]
//! strong_negative = ["üzgünüm"]
//! neutral = ["idare eder"]
//! short_filler = ["ok", "tamam"]
//! ```
//!
//! All phrases are stored lowercased; lookups expect lowercased text.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const NEGATED_NEGATIVE: &[&str] = &["fena değil", "kötü değil", "berbat değil", "korkunç değil"];

const STRONG_POSITIVE: &[&str] = &[
    "çok mutluyum", "mutluyum", "mutluluk", "neşeliyim", "sevinçliyim",
    "harika", "mükemmel", "süper", "müthiş", "muhteşem", "fevkalade",
    "seni seviyorum", "aşığım", "bayıldım", "hoşlandım", "beğendim",
    "heyecanlıyım", "coşkuluyum", "enerjik", "keyifli", "neşeli",
    "çok iyi", "harika bir", "mükemmel bir",
];

const STRONG_NEGATIVE: &[&str] = &[
    "üzgünüm", "mutsuzum", "kederliyim", "hüzünlüyüm",
    "kötüyüm", "kötü hissediyorum", "rahatsızım", "hasta",
    "nefret ediyorum", "tiksinme", "iğrenme", "hoşlanmıyorum",
    "korkuyorum", "endişeliyim", "kaygılıyım", "panik",
    "sinirliyim", "kızgınım", "öfkeliyim", "hırslı",
    "bıktım", "sıkıldım", "yoruldum", "bitkinim", "tükenmiş",
    "çok kötü", "berbat", "korkunç",
];

const NEUTRAL: &[&str] = &[
    "normal", "normalim", "normal bir", "ortalama", "standart",
    "sıradan", "olağan", "düz", "vasat", "idare eder",
    "eh işte", "şöyle böyle", "yeterli", "yetişir",
    "kabul edilebilir", "makul", "ortalama bir",
];

const SHORT_FILLER: &[&str] = &["ok", "tamam", "anladım", "olur", "peki", "sağol", "merhaba", "selam"];

/// Immutable phrase lists consulted by the fusion rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    negated_negative: Vec<String>,
    strong_positive: Vec<String>,
    strong_negative: Vec<String>,
    neutral: Vec<String>,
    short_filler: Vec<String>,
}

/// On-disk lexicon layout
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconFile {
    negated_negative: Vec<String>,
    strong_positive: Vec<String>,
    strong_negative: Vec<String>,
    neutral: Vec<String>,
    short_filler: Vec<String>,
}

impl Lexicon {
    /// Built-in Turkish lexicon
    pub fn turkish() -> Self {
        let owned = |list: &[&str]| list.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        Self {
            negated_negative: owned(NEGATED_NEGATIVE),
            strong_positive: owned(STRONG_POSITIVE),
            strong_negative: owned(STRONG_NEGATIVE),
            neutral: owned(NEUTRAL),
            short_filler: owned(SHORT_FILLER),
        }
    }

    /// Build a lexicon from explicit lists
    ///
    /// Phrases are trimmed and lowercased. Blank phrases are rejected since
    /// an empty pattern would match every text.
    pub fn new(
        negated_negative: Vec<String>,
        strong_positive: Vec<String>,
        strong_negative: Vec<String>,
        neutral: Vec<String>,
        short_filler: Vec<String>,
    ) -> Result<Self> {
        Ok(Self {
            negated_negative: normalize_list("negated_negative", negated_negative)?,
            strong_positive: normalize_list("strong_positive", strong_positive)?,
            strong_negative: normalize_list("strong_negative", strong_negative)?,
            neutral: normalize_list("neutral", neutral)?,
            short_filler: normalize_list("short_filler", short_filler)?,
        })
    }

    /// Parse a lexicon from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)?;
        Self::new(
            file.negated_negative,
            file.strong_positive,
            file.strong_negative,
            file.neutral,
            file.short_filler,
        )
    }

    /// Load a lexicon from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            phrases = lexicon.phrase_count(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }

    /// Total number of phrases across all lists
    pub fn phrase_count(&self) -> usize {
        self.negated_negative.len()
            + self.strong_positive.len()
            + self.strong_negative.len()
            + self.neutral.len()
            + self.short_filler.len()
    }

    pub fn matches_negated_negative(&self, text_lower: &str) -> bool {
        contains_any(text_lower, &self.negated_negative)
    }

    pub fn matches_strong_positive(&self, text_lower: &str) -> bool {
        contains_any(text_lower, &self.strong_positive)
    }

    pub fn matches_strong_negative(&self, text_lower: &str) -> bool {
        contains_any(text_lower, &self.strong_negative)
    }

    pub fn matches_neutral(&self, text_lower: &str) -> bool {
        contains_any(text_lower, &self.neutral)
    }

    /// Exact (trimmed) match against the filler word list
    pub fn is_filler(&self, text_lower: &str) -> bool {
        let trimmed = text_lower.trim();
        self.short_filler.iter().any(|word| word == trimmed)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::turkish()
    }
}

// Plain substring containment: "harika" also fires inside "harikaydı".
fn contains_any(text_lower: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| text_lower.contains(phrase.as_str()))
}

fn normalize_list(name: &str, phrases: Vec<String>) -> Result<Vec<String>> {
    phrases
        .into_iter()
        .map(|phrase| {
            let phrase = phrase.trim().to_lowercase();
            if phrase.is_empty() {
                Err(Error::Config(format!("Lexicon list '{}' contains a blank phrase", name)))
            } else {
                Ok(phrase)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_lists_are_lowercase() {
        let lexicon = Lexicon::turkish();
        for phrase in lexicon
            .negated_negative
            .iter()
            .chain(&lexicon.strong_positive)
            .chain(&lexicon.strong_negative)
            .chain(&lexicon.neutral)
            .chain(&lexicon.short_filler)
        {
            assert_eq!(phrase, &phrase.to_lowercase(), "phrase not lowercase: {}", phrase);
        }
        assert_eq!(lexicon.phrase_count(), 4 + 24 + 28 + 17 + 8);
    }

    #[test]
    fn test_substring_matching() {
        let lexicon = Lexicon::turkish();
        assert!(lexicon.matches_strong_positive("bugün harikaydı"));
        assert!(lexicon.matches_negated_negative("film fena değil bence"));
        assert!(lexicon.matches_strong_negative("bu berbat değil"));
        assert!(lexicon.matches_neutral("anormal bir gün"));
        assert!(!lexicon.matches_strong_positive("bugün yağmur var"));
    }

    #[test]
    fn test_filler_is_exact() {
        let lexicon = Lexicon::turkish();
        assert!(lexicon.is_filler("tamam"));
        assert!(lexicon.is_filler("  ok "));
        assert!(!lexicon.is_filler("tamam o zaman"));
        assert!(!lexicon.is_filler("okul"));
    }

    #[test]
    fn test_from_toml_str_lowercases_phrases() {
        let lexicon = Lexicon::from_toml_str(
            r#"
            negated_negative = ["NOT BAD"]
            strong_positive = ["Love it"]
            strong_negative = ["hate"]
            neutral = ["so-so"]
            short_filler = ["OK"]
            "#,
        )
        .unwrap();

        assert!(lexicon.matches_negated_negative("this is not bad"));
        assert!(lexicon.matches_strong_positive("i love it"));
        assert!(lexicon.is_filler("ok"));
        assert_eq!(lexicon.phrase_count(), 5);
    }

    #[test]
    fn test_from_toml_str_rejects_blank_phrase() {
        let result = Lexicon::from_toml_str(
            r#"
            negated_negative = []
            strong_positive = ["  "]
            strong_negative = []
            neutral = []
            short_filler = []
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_toml_str_requires_all_lists() {
        let result = Lexicon::from_toml_str(r#"strong_positive = ["love"]"#);
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
