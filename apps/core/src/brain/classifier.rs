//! Mood classification by keyword scoring.
//!
//! Each mood scores one point per DISTINCT keyword found as a substring of the
//! lower-cased input. The highest score wins; on equal scores the mood
//! declared first in the lexicon wins. No match at all yields no mood.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::lexicon::{KeywordLexicon, LexiconKind};
use crate::models::Mood;

/// Confidence reported by the sentiment lexicon when nothing matched.
pub const NEUTRAL_CONFIDENCE: f32 = 0.5;

/// Added to the winning share for sentiment classification.
pub const SENTIMENT_CONFIDENCE_BOOST: f32 = 0.3;

// NOTE: expect() is acceptable here, the pattern is a compile-time constant
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace pattern"));

/// Result of mood classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning mood, `None` when no keyword matched
    pub mood: Option<Mood>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Distinct-keyword score for every mood of the lexicon
    pub score_breakdown: BTreeMap<Mood, u32>,
    /// Keywords that matched, in lexicon order
    pub matched_keywords: Vec<String>,
}

impl ClassificationResult {
    /// A result with no detected mood and a zero score for every mood of `lexicon`.
    pub fn empty(lexicon: &KeywordLexicon) -> Self {
        Self {
            mood: None,
            confidence: match lexicon.kind() {
                LexiconKind::Chat => 0.0,
                LexiconKind::Sentiment => NEUTRAL_CONFIDENCE,
            },
            score_breakdown: lexicon.entries().iter().map(|e| (e.mood, 0)).collect(),
            matched_keywords: vec![],
        }
    }

    pub fn total_score(&self) -> u32 {
        self.score_breakdown.values().sum()
    }
}

/// Anything that turns an input into a mood reading.
///
/// The keyword classifier is the only implementation shipped here; a learned
/// emotion or sentiment model can sit behind the same contract.
pub trait MoodDetector: Send + Sync {
    fn classify(&self, input: &str) -> ClassificationResult;
}

/// Lower-cases and collapses runs of whitespace so multi-word keywords match.
pub fn normalize(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Scores `text` against `lexicon`.
pub fn classify(text: &str, lexicon: &KeywordLexicon) -> ClassificationResult {
    let text = normalize(text);

    if text.is_empty() {
        return ClassificationResult::empty(lexicon);
    }

    let mut score_breakdown = BTreeMap::new();
    let mut matched_keywords = Vec::new();
    let mut best: Option<(Mood, u32)> = None;

    for entry in lexicon.entries() {
        let mut score = 0;
        for keyword in entry.keywords {
            if text.contains(keyword) {
                score += 1;
                matched_keywords.push(keyword.to_string());
            }
        }
        score_breakdown.insert(entry.mood, score);

        // Strict comparison: the first-declared mood keeps a tie
        let better = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if better {
            best = Some((entry.mood, score));
        }
    }

    let total: u32 = score_breakdown.values().sum();
    let (mood, winning) = match best {
        Some((mood, score)) if score > 0 => (Some(mood), score),
        _ => (None, 0),
    };

    let confidence = match lexicon.kind() {
        LexiconKind::Chat => {
            if mood.is_some() {
                1.0
            } else {
                0.0
            }
        }
        LexiconKind::Sentiment => {
            if total > 0 {
                (winning as f32 / total as f32 + SENTIMENT_CONFIDENCE_BOOST).min(1.0)
            } else {
                NEUTRAL_CONFIDENCE
            }
        }
    };

    ClassificationResult {
        mood,
        confidence,
        score_breakdown,
        matched_keywords,
    }
}

/// Keyword classifier bound to one lexicon
#[derive(Debug, Clone, Copy)]
pub struct MoodClassifier {
    lexicon: KeywordLexicon,
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::chat()
    }
}

impl MoodClassifier {
    pub fn new(lexicon: KeywordLexicon) -> Self {
        Self { lexicon }
    }

    /// Classifier for chat messages
    pub fn chat() -> Self {
        Self::new(KeywordLexicon::chat())
    }

    /// Classifier for sentiment descriptions
    pub fn sentiment() -> Self {
        Self::new(KeywordLexicon::sentiment())
    }

    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    pub fn classify(&self, text: &str) -> ClassificationResult {
        classify(text, &self.lexicon)
    }
}

impl MoodDetector for MoodClassifier {
    fn classify(&self, input: &str) -> ClassificationResult {
        classify(input, &self.lexicon)
    }
}
