//! Mood Analyzer - orchestrator for one detection pass.
//!
//! Classifies an input with the right detector, maps the result to content
//! actions and decides whether a mood switch should be offered.
//!
//! Inputs come from three places:
//! 1. Chat messages (chat lexicon, present/absent confidence)
//! 2. Sentiment descriptions (sentiment lexicon, share-based confidence)
//! 3. Emotion labels from an external model (camera, voice)

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use super::actions::{ActionDispatcher, DispatchPlan};
use super::classifier::{ClassificationResult, MoodClassifier, MoodDetector};
use super::lexicon::emotion_to_mood;
use crate::models::{Mood, Timestamp};

/// Where a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingSource {
    Chat,
    Sentiment,
    Emotion,
}

/// Complete outcome of one analysis pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodReading {
    /// Raw input (text or emotion label)
    pub input: String,

    pub source: ReadingSource,

    /// Detected mood with confidence and score breakdown
    pub classification: ClassificationResult,

    /// Actions for the UI and the optional mood switch
    pub plan: DispatchPlan,

    /// Mood that was current when the input arrived
    pub current_mood: Mood,

    /// Processing time in microseconds
    pub processing_time_us: u64,

    pub timestamp: Timestamp,
}

impl MoodReading {
    pub fn detected(&self) -> Option<Mood> {
        self.classification.mood
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Source: {:?}, Mood: {} ({:.0}%), Actions: {}, Switch: {}",
            self.source,
            self.classification
                .mood
                .map(|m| m.to_string())
                .unwrap_or_else(|| "none".to_string()),
            self.classification.confidence * 100.0,
            self.plan.actions.len(),
            self.plan
                .switch_to
                .map(|m| m.to_string())
                .unwrap_or_else(|| "no".to_string())
        )
    }
}

/// Main analyzer that ties detection and dispatch together
pub struct MoodAnalyzer {
    chat: Box<dyn MoodDetector>,
    sentiment: Box<dyn MoodDetector>,
    dispatcher: ActionDispatcher,
}

impl Default for MoodAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodAnalyzer {
    /// Create an analyzer backed by the keyword lexicons
    pub fn new() -> Self {
        Self::with_detectors(
            Box::new(MoodClassifier::chat()),
            Box::new(MoodClassifier::sentiment()),
        )
    }

    /// Create an analyzer with custom detectors (e.g. a learned model)
    pub fn with_detectors(chat: Box<dyn MoodDetector>, sentiment: Box<dyn MoodDetector>) -> Self {
        Self {
            chat,
            sentiment,
            dispatcher: ActionDispatcher::new(),
        }
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Analyze a chat message
    pub fn analyze_chat(&self, text: &str, current_mood: Mood, now: Timestamp) -> MoodReading {
        let start = Instant::now();
        let classification = self.chat.classify(text);
        self.finish(text, ReadingSource::Chat, classification, current_mood, now, start)
    }

    /// Analyze a sentiment description
    pub fn analyze_sentiment(&self, text: &str, current_mood: Mood, now: Timestamp) -> MoodReading {
        let start = Instant::now();
        let classification = self.sentiment.classify(text);
        self.finish(text, ReadingSource::Sentiment, classification, current_mood, now, start)
    }

    /// Analyze an emotion label produced by an external model.
    ///
    /// The model's own confidence is kept (clamped to 0.0 - 1.0); unknown
    /// labels read as "no mood".
    pub fn analyze_emotion(
        &self,
        label: &str,
        confidence: f32,
        current_mood: Mood,
        now: Timestamp,
    ) -> MoodReading {
        let start = Instant::now();
        let mood = emotion_to_mood(label);
        let classification = ClassificationResult {
            mood,
            confidence: if mood.is_some() {
                confidence.clamp(0.0, 1.0)
            } else {
                0.0
            },
            score_breakdown: Default::default(),
            matched_keywords: mood.map(|_| vec![label.trim().to_lowercase()]).unwrap_or_default(),
        };
        self.finish(label, ReadingSource::Emotion, classification, current_mood, now, start)
    }

    fn finish(
        &self,
        input: &str,
        source: ReadingSource,
        classification: ClassificationResult,
        current_mood: Mood,
        now: Timestamp,
        start: Instant,
    ) -> MoodReading {
        let plan = self.dispatcher.dispatch(
            classification.mood,
            classification.confidence,
            current_mood,
        );

        let reading = MoodReading {
            input: input.to_string(),
            source,
            classification,
            plan,
            current_mood,
            processing_time_us: start.elapsed().as_micros() as u64,
            timestamp: now,
        };
        info!("Mood analysis: {}", reading.summary());
        reading
    }
}
