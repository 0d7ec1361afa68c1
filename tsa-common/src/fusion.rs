//! Decision-fusion engine
//!
//! Combines a classifier verdict with lexical rules that correct known
//! classifier failure modes. Rules are evaluated in fixed order against the
//! lowercased text and the first match wins:
//!
//! 1. Negated-negative phrase ("fena değil") → positive, 0.75
//! 2. Strong positive phrase → positive, max(score, 0.85)
//! 3. Strong negative phrase → negative, max(score, 0.85)
//! 4. Neutral phrase → neutral, score compressed toward 0.5
//! 5. Low confidence + filler word or ≤2 words → neutral, 0.5
//! 6. Model says positive → positive, score
//! 7. Model says negative → negative, score
//! 8. Otherwise → neutral, 0.5
//!
//! Rule 1 must stay ahead of rule 3: every negated-negative phrase contains
//! a negative word.
//!
//! The engine is pure. It never calls the classifier and keeps no state
//! between calls.

use crate::lexicon::Lexicon;
use crate::sentiment::{
    format_percent, round4, AnalysisResult, ClassifierVerdict, DecisionReason, ModelLabel,
    Sentiment,
};
use crate::{Error, Result};

/// Maximum characters kept from the input text
pub const MAX_TEXT_CHARS: usize = 500;

/// Lower bound of every fused score
pub const MIN_SCORE: f64 = 0.1;

/// Upper bound of every fused score
pub const MAX_SCORE: f64 = 0.99;

/// Fixed score for negated-negative phrases
pub const NEGATED_NEGATIVE_SCORE: f64 = 0.75;

/// Floor applied to strong-phrase matches
pub const STRONG_PHRASE_FLOOR: f64 = 0.85;

/// Classifier scores below this count as low confidence
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Texts with at most this many words count as very short
pub const SHORT_TEXT_MAX_WORDS: usize = 2;

/// Neutral score
pub const NEUTRAL_SCORE: f64 = 0.5;

/// How much of the classifier's distance from 0.5 survives a neutral phrase
pub const NEUTRAL_COMPRESSION: f64 = 0.2;

/// Lexical features of one text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PhraseMatches {
    negated_negative: bool,
    strong_positive: bool,
    strong_negative: bool,
    neutral: bool,
    filler: bool,
}

/// Decision-fusion engine
#[derive(Debug, Clone, Default)]
pub struct FusionEngine {
    lexicon: Lexicon,
}

impl FusionEngine {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Trim and truncate raw input
    ///
    /// Truncation counts characters, not bytes, and may cut mid-word.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] if nothing is left after trimming
    pub fn normalize(&self, raw_text: &str) -> Result<String> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(trimmed.chars().take(MAX_TEXT_CHARS).collect())
    }

    /// Normalize `raw_text` and fuse it with `verdict`
    pub fn analyze(&self, raw_text: &str, verdict: ClassifierVerdict) -> Result<AnalysisResult> {
        let text = self.normalize(raw_text)?;
        Ok(self.fuse(text, verdict))
    }

    /// Apply the rule chain to already-normalized text
    pub fn fuse(&self, text: String, verdict: ClassifierVerdict) -> AnalysisResult {
        let text_lower = text.to_lowercase();
        let word_count = text.split_whitespace().count();
        let matches = self.match_phrases(&text_lower);
        let original = verdict.score;

        let (sentiment, score, reason) = decide(&matches, word_count, verdict);
        let score = clamp_score(score);

        AnalysisResult {
            text,
            sentiment,
            score: round4(score),
            original_score: round4(original),
            confidence: format_percent(score * 100.0),
            reason,
            word_count,
            has_strong_emotion: matches.strong_positive || matches.strong_negative,
            has_special_phrase: matches.negated_negative,
        }
    }

    fn match_phrases(&self, text_lower: &str) -> PhraseMatches {
        PhraseMatches {
            negated_negative: self.lexicon.matches_negated_negative(text_lower),
            strong_positive: self.lexicon.matches_strong_positive(text_lower),
            strong_negative: self.lexicon.matches_strong_negative(text_lower),
            neutral: self.lexicon.matches_neutral(text_lower),
            filler: self.lexicon.is_filler(text_lower),
        }
    }
}

fn decide(
    matches: &PhraseMatches,
    word_count: usize,
    verdict: ClassifierVerdict,
) -> (Sentiment, f64, DecisionReason) {
    let original = verdict.score;
    let low_confidence = original < LOW_CONFIDENCE_THRESHOLD;
    let very_short = word_count <= SHORT_TEXT_MAX_WORDS;

    if matches.negated_negative {
        (Sentiment::Positive, NEGATED_NEGATIVE_SCORE, DecisionReason::NegatedNegativePhrase)
    } else if matches.strong_positive {
        (
            Sentiment::Positive,
            original.max(STRONG_PHRASE_FLOOR),
            DecisionReason::StrongPositivePhrase,
        )
    } else if matches.strong_negative {
        (
            Sentiment::Negative,
            original.max(STRONG_PHRASE_FLOOR),
            DecisionReason::StrongNegativePhrase,
        )
    } else if matches.neutral {
        (
            Sentiment::Neutral,
            NEUTRAL_SCORE + (original - NEUTRAL_SCORE) * NEUTRAL_COMPRESSION,
            DecisionReason::NeutralPhrase,
        )
    } else if low_confidence && (matches.filler || very_short) {
        (Sentiment::Neutral, NEUTRAL_SCORE, DecisionReason::ShortTextLowConfidence)
    } else {
        match verdict.label {
            ModelLabel::Positive => (Sentiment::Positive, original, DecisionReason::ModelPositive),
            ModelLabel::Negative => (Sentiment::Negative, original, DecisionReason::ModelNegative),
            ModelLabel::Unknown => (Sentiment::Neutral, NEUTRAL_SCORE, DecisionReason::FallbackNeutral),
        }
    }
}

/// Clamp to [MIN_SCORE, MAX_SCORE]; NaN ends up at MIN_SCORE
fn clamp_score(score: f64) -> f64 {
    // f64::max drops NaN, f64::clamp would propagate it
    score.max(MIN_SCORE).min(MAX_SCORE)
}
