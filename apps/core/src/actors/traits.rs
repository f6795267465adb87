use async_trait::async_trait;

use crate::actors::messages::{AppError, ProfileSnapshot};
use crate::brain::analyzer::MoodReading;
use crate::journal::{JournalEntry, JournalStats};
use crate::models::{InteractionKind, Mood, MoodTransition};
use crate::session::{AcceptedRecommendation, AnalysisReport};
use crate::transcript::ChatMessage;

/// Defines the public interface for a per-user profile service.
///
/// Implementations serialize every call against one profile, so counters and
/// the last-mood cursor are never updated concurrently.
#[async_trait]
pub trait ProfileService: Send + Sync + 'static {
    async fn select_mood(&self, mood: Mood) -> Result<Option<MoodTransition>, AppError>;

    async fn record_item_interaction(
        &self,
        item_id: String,
        kind: InteractionKind,
    ) -> Result<f64, AppError>;

    async fn record_feature_usage(&self, feature: String) -> Result<u32, AppError>;

    async fn record_session_end(&self, mood: Mood, duration_minutes: u32) -> Result<bool, AppError>;

    async fn end_session(&self) -> Result<Option<u32>, AppError>;

    async fn reset(&self) -> Result<(), AppError>;

    /// Re-derives insights and recommendations.
    async fn analyze(&self) -> Result<AnalysisReport, AppError>;

    async fn accept_recommendation(&self, id: String) -> Result<Option<AcceptedRecommendation>, AppError>;

    async fn chat(&self, text: String) -> Result<Option<ChatMessage>, AppError>;

    async fn clear_chat(&self) -> Result<(), AppError>;

    async fn detect_sentiment(&self, text: String) -> Result<MoodReading, AppError>;

    /// Maps an emotion label from an external detector onto a mood reading.
    async fn detect_emotion(&self, label: String, confidence: f32) -> Result<MoodReading, AppError>;

    async fn add_journal_entry(&self, entry: JournalEntry) -> Result<(), AppError>;

    async fn journal_stats(&self) -> Result<Option<JournalStats>, AppError>;

    async fn snapshot(&self) -> Result<ProfileSnapshot, AppError>;
}
