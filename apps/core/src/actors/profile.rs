use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::actors::messages::{ActorError, AppError, ProfileMessage, ProfileSnapshot};
use crate::actors::traits::ProfileService;
use crate::brain::analyzer::MoodReading;
use crate::journal::{JournalEntry, JournalStats};
use crate::models::{InteractionKind, Mood, MoodTransition};
use crate::session::{AcceptedRecommendation, AnalysisReport, MoodSession};
use crate::transcript::ChatMessage;

/// How long a caller waits for the actor to answer.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A handle to the profile actor.
///
/// The actor owns one `MoodSession` and handles messages one at a time, which
/// makes it the only writer of that profile. Clones share the same actor.
#[derive(Clone)]
pub struct ProfileActorHandle {
    sender: mpsc::Sender<ProfileMessage>,
}

impl ProfileActorHandle {
    /// Spawns the actor on the current tokio runtime.
    pub fn new(session: MoodSession) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = ProfileActorRunner::new(receiver, session);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, AppError>>) -> ProfileMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|_| AppError::Actor(ActorError::Internal("Profile Actor closed".to_string())))?;

        let reply = tokio::time::timeout(REQUEST_TIMEOUT, recv)
            .await
            .map_err(ActorError::from)?;
        reply.map_err(|_| {
            AppError::Actor(ActorError::Internal("Profile Actor failed to respond".to_string()))
        })?
    }
}

#[async_trait]
impl ProfileService for ProfileActorHandle {
    async fn select_mood(&self, mood: Mood) -> Result<Option<MoodTransition>, AppError> {
        self.request(|responder| ProfileMessage::SelectMood { mood, responder })
            .await
    }

    async fn record_item_interaction(
        &self,
        item_id: String,
        kind: InteractionKind,
    ) -> Result<f64, AppError> {
        self.request(|responder| ProfileMessage::RecordItemInteraction {
            item_id,
            kind,
            responder,
        })
        .await
    }

    async fn record_feature_usage(&self, feature: String) -> Result<u32, AppError> {
        self.request(|responder| ProfileMessage::RecordFeatureUsage { feature, responder })
            .await
    }

    async fn record_session_end(&self, mood: Mood, duration_minutes: u32) -> Result<bool, AppError> {
        self.request(|responder| ProfileMessage::RecordSessionEnd {
            mood,
            duration_minutes,
            responder,
        })
        .await
    }

    async fn end_session(&self) -> Result<Option<u32>, AppError> {
        self.request(|responder| ProfileMessage::EndSession { responder })
            .await
    }

    async fn reset(&self) -> Result<(), AppError> {
        self.request(|responder| ProfileMessage::Reset { responder })
            .await
    }

    async fn analyze(&self) -> Result<AnalysisReport, AppError> {
        self.request(|responder| ProfileMessage::Analyze { responder })
            .await
    }

    async fn accept_recommendation(&self, id: String) -> Result<Option<AcceptedRecommendation>, AppError> {
        self.request(|responder| ProfileMessage::AcceptRecommendation { id, responder })
            .await
    }

    async fn chat(&self, text: String) -> Result<Option<ChatMessage>, AppError> {
        self.request(|responder| ProfileMessage::Chat { text, responder })
            .await
    }

    async fn clear_chat(&self) -> Result<(), AppError> {
        self.request(|responder| ProfileMessage::ClearChat { responder })
            .await
    }

    async fn detect_sentiment(&self, text: String) -> Result<MoodReading, AppError> {
        self.request(|responder| ProfileMessage::DetectSentiment { text, responder })
            .await
    }

    async fn detect_emotion(&self, label: String, confidence: f32) -> Result<MoodReading, AppError> {
        self.request(|responder| ProfileMessage::DetectEmotion {
            label,
            confidence,
            responder,
        })
        .await
    }

    async fn add_journal_entry(&self, entry: JournalEntry) -> Result<(), AppError> {
        self.request(|responder| ProfileMessage::AddJournalEntry { entry, responder })
            .await
    }

    async fn journal_stats(&self) -> Result<Option<JournalStats>, AppError> {
        self.request(|responder| ProfileMessage::JournalStats { responder })
            .await
    }

    async fn snapshot(&self) -> Result<ProfileSnapshot, AppError> {
        self.request(|responder| ProfileMessage::Snapshot { responder })
            .await
    }
}

// --- Actor Runner (Internal Logic) ---
struct ProfileActorRunner {
    receiver: mpsc::Receiver<ProfileMessage>,
    session: MoodSession,
}

impl ProfileActorRunner {
    fn new(receiver: mpsc::Receiver<ProfileMessage>, session: MoodSession) -> Self {
        Self { receiver, session }
    }

    async fn run(mut self) {
        info!("Profile Actor started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }
        info!("Profile Actor stopped");
    }

    // A dropped responder means the caller gave up; the mutation still stands.
    fn handle_message(&mut self, msg: ProfileMessage) {
        match msg {
            ProfileMessage::SelectMood { mood, responder } => {
                let _ = responder.send(self.session.select_mood(mood));
            }
            ProfileMessage::RecordItemInteraction {
                item_id,
                kind,
                responder,
            } => {
                let _ = responder.send(self.session.record_item_interaction(&item_id, kind));
            }
            ProfileMessage::RecordFeatureUsage { feature, responder } => {
                let _ = responder.send(self.session.record_feature_usage(&feature));
            }
            ProfileMessage::RecordSessionEnd {
                mood,
                duration_minutes,
                responder,
            } => {
                let _ = responder.send(self.session.record_session_end(mood, duration_minutes));
            }
            ProfileMessage::EndSession { responder } => {
                let _ = responder.send(self.session.end_session());
            }
            ProfileMessage::Reset { responder } => {
                let _ = responder.send(self.session.reset());
            }
            ProfileMessage::Analyze { responder } => {
                let _ = responder.send(Ok(self.session.analyze()));
            }
            ProfileMessage::AcceptRecommendation { id, responder } => {
                let _ = responder.send(self.session.accept_recommendation(&id));
            }
            ProfileMessage::Chat { text, responder } => {
                let _ = responder.send(self.session.chat(&text));
            }
            ProfileMessage::ClearChat { responder } => {
                let _ = responder.send(self.session.clear_chat());
            }
            ProfileMessage::DetectSentiment { text, responder } => {
                let _ = responder.send(Ok(self.session.detect_sentiment(&text)));
            }
            ProfileMessage::DetectEmotion {
                label,
                confidence,
                responder,
            } => {
                let _ = responder.send(Ok(self.session.detect_emotion(&label, confidence)));
            }
            ProfileMessage::AddJournalEntry { entry, responder } => {
                let _ = responder.send(self.session.add_journal_entry(entry));
            }
            ProfileMessage::JournalStats { responder } => {
                let _ = responder.send(Ok(self.session.journal_stats()));
            }
            ProfileMessage::Snapshot { responder } => {
                debug!("Profile snapshot requested");
                let _ = responder.send(Ok(ProfileSnapshot {
                    current_mood: self.session.current_mood(),
                    profile: self.session.profile().clone(),
                }));
            }
        }
    }
}
