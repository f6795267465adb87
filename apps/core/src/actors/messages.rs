use serde::Serialize;
use tokio::sync::oneshot;

use crate::brain::analyzer::MoodReading;
use crate::journal::{JournalEntry, JournalStats};
use crate::models::{BehaviorProfile, InteractionKind, Mood, MoodTransition};
use crate::session::{AcceptedRecommendation, AnalysisReport};
use crate::transcript::ChatMessage;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// A generic internal error within an actor (closed channel, dropped reply).
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

type Responder<T> = oneshot::Sender<Result<T, AppError>>;

/// A consistent copy of the session state at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshot {
    pub current_mood: Mood,
    pub profile: BehaviorProfile,
}

/// Messages that can be sent to the profile actor.
///
/// Every message carries a responder; the actor answers each one exactly once.
#[derive(Debug)]
pub enum ProfileMessage {
    SelectMood {
        mood: Mood,
        responder: Responder<Option<MoodTransition>>,
    },
    RecordItemInteraction {
        item_id: String,
        kind: InteractionKind,
        responder: Responder<f64>,
    },
    RecordFeatureUsage {
        feature: String,
        responder: Responder<u32>,
    },
    RecordSessionEnd {
        mood: Mood,
        duration_minutes: u32,
        responder: Responder<bool>,
    },
    EndSession {
        responder: Responder<Option<u32>>,
    },
    Reset {
        responder: Responder<()>,
    },
    Analyze {
        responder: Responder<AnalysisReport>,
    },
    AcceptRecommendation {
        id: String,
        responder: Responder<Option<AcceptedRecommendation>>,
    },
    Chat {
        text: String,
        responder: Responder<Option<ChatMessage>>,
    },
    ClearChat {
        responder: Responder<()>,
    },
    DetectSentiment {
        text: String,
        responder: Responder<MoodReading>,
    },
    DetectEmotion {
        label: String,
        confidence: f32,
        responder: Responder<MoodReading>,
    },
    AddJournalEntry {
        entry: JournalEntry,
        responder: Responder<()>,
    },
    JournalStats {
        responder: Responder<Option<JournalStats>>,
    },
    Snapshot {
        responder: Responder<ProfileSnapshot>,
    },
}
