//! # Brain Module
//!
//! Rule-based mood intelligence for MoodBoost. Everything here is synchronous
//! and deterministic apart from the activity pick, which goes through an
//! injected random source.
//!
//! ## Components
//! - `lexicon`: Keyword tables for chat and sentiment input
//! - `classifier`: Keyword scoring into a mood and confidence
//! - `insights`: Descriptive observations from the behavior profile
//! - `recommendations`: Mood and activity suggestions
//! - `actions`: Mood to content action table
//! - `analyzer`: Main orchestrator (classify, then dispatch)

pub mod actions;
pub mod analyzer;
pub mod classifier;
pub mod insights;
pub mod lexicon;
pub mod recommendations;

// Re-export main types for convenience
pub use actions::{ActionDispatcher, ActionSuggestion, ContentAction, DispatchPlan};
pub use analyzer::{MoodAnalyzer, MoodReading, ReadingSource};
pub use classifier::{ClassificationResult, MoodClassifier, MoodDetector};
pub use insights::{AnalysisContext, Insight, InsightFeed, InsightMiner};
pub use lexicon::{emotion_to_mood, KeywordLexicon, LexiconKind};
pub use recommendations::{
    Recommendation, RecommendationBoard, RecommendationEngine, RecommendationKind,
};
