//! One user's mood session: state, collaborators and write-through persistence.
//!
//! Every mutating call works on a copy, saves the full snapshot and only then
//! keeps the copy. Memory never runs ahead of the store: a failed save leaves
//! the session as it was.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::brain::actions::ActionSuggestion;
use crate::brain::analyzer::{MoodAnalyzer, MoodReading};
use crate::brain::insights::{AnalysisContext, Insight, InsightFeed, InsightMiner};
use crate::brain::recommendations::{
    Recommendation, RecommendationBoard, RecommendationEngine, RecommendationKind,
};
use crate::config::MoodConfig;
use crate::error::Result;
use crate::fs_manager::DataPaths;
use crate::journal::{Journal, JournalEntry, JournalStats};
use crate::models::{
    BehaviorProfile, InteractionKind, Mood, MoodTransition, PersonalizationLevel, Timestamp,
};
use crate::sources::{Clock, RandomSource, SystemClock, ThreadRandom};
use crate::store::{
    load_or_default, save_json, JsonFileStore, KeyValueStore, CHAT_HISTORY_KEY, JOURNAL_KEY,
    PROFILE_KEY,
};
use crate::tracker::{BehaviorTracker, RetentionPolicy};
use crate::transcript::{bot_reply, greeting, ChatMessage, ChatTranscript};

/// Mood shown before the user picks one.
pub const DEFAULT_MOOD: Mood = Mood::Happy;

/// Fresh results of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
}

/// A recommendation taken off the board together with what it triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedRecommendation {
    pub recommendation: Recommendation,
    pub actions: Vec<ActionSuggestion>,
}

pub struct MoodSession {
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    engine: RecommendationEngine,
    analyzer: MoodAnalyzer,
    miner: InsightMiner,
    tracker: BehaviorTracker,
    profile: BehaviorProfile,
    feed: InsightFeed,
    board: RecommendationBoard,
    transcript: ChatTranscript,
    journal: Journal,
    current_mood: Mood,
    session_started: Timestamp,
}

impl MoodSession {
    /// Opens a session over `store`, loading whatever snapshots it holds.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
        config: &MoodConfig,
    ) -> Result<Self> {
        let profile: BehaviorProfile = load_or_default(store.as_ref(), PROFILE_KEY)?;
        let transcript: ChatTranscript = load_or_default(store.as_ref(), CHAT_HISTORY_KEY)?;
        let journal: Journal = load_or_default(store.as_ref(), JOURNAL_KEY)?;
        let session_started = clock.now();
        let tracker = BehaviorTracker::resume(&profile, config.retention());
        let current_mood = tracker.last_mood().unwrap_or(DEFAULT_MOOD);

        info!(
            selections = profile.total_selections(),
            messages = transcript.len(),
            journal_entries = journal.len(),
            "Mood session opened"
        );

        Ok(Self {
            store,
            clock,
            engine: RecommendationEngine::new(rng),
            analyzer: MoodAnalyzer::new(),
            miner: InsightMiner::new(),
            tracker,
            profile,
            feed: InsightFeed::new(config.insight_cap),
            board: RecommendationBoard::new(),
            transcript,
            journal,
            current_mood,
            session_started,
        })
    }

    /// Opens the on-disk session described by `config`.
    pub fn from_config(config: &MoodConfig) -> Result<Self> {
        let paths = DataPaths::new(config.data_dir.clone());
        paths.init()?;
        let store = JsonFileStore::new(paths.store_dir())?;
        Self::open(
            Box::new(store),
            Box::new(SystemClock),
            Box::new(ThreadRandom),
            config,
        )
    }

    pub fn profile(&self) -> &BehaviorProfile {
        &self.profile
    }

    pub fn current_mood(&self) -> Mood {
        self.current_mood
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.tracker.retention()
    }

    pub fn personalization_level(&self) -> PersonalizationLevel {
        self.profile.personalization_level()
    }

    pub fn insights(&self) -> &[Insight] {
        self.feed.insights()
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        self.board.active()
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Applies `update` to copies of the tracker and profile, saves the new
    /// profile and only then swaps the copies in. A failed save changes nothing.
    fn commit<T>(
        &mut self,
        update: impl FnOnce(&mut BehaviorTracker, &mut BehaviorProfile) -> T,
    ) -> Result<T> {
        let mut tracker = self.tracker.clone();
        let mut profile = self.profile.clone();
        let outcome = update(&mut tracker, &mut profile);

        save_json(self.store.as_ref(), PROFILE_KEY, &profile)?;
        self.tracker = tracker;
        self.profile = profile;
        Ok(outcome)
    }

    fn context(&self) -> AnalysisContext {
        AnalysisContext::new(self.current_mood, self.clock.now())
    }

    /// Makes `mood` the current mood and records the selection.
    #[instrument(skip(self))]
    pub fn select_mood(&mut self, mood: Mood) -> Result<Option<MoodTransition>> {
        let now = self.clock.now();
        let transition =
            self.commit(|tracker, profile| tracker.record_mood_selection(profile, mood, now))?;
        self.current_mood = mood;
        Ok(transition)
    }

    /// Like [`select_mood`](Self::select_mood) for a mood named by the caller.
    /// Unknown names fail with `InvalidMood` and leave the profile untouched.
    pub fn select_mood_named(&mut self, name: &str) -> Result<Option<MoodTransition>> {
        let mood: Mood = name.parse()?;
        self.select_mood(mood)
    }

    pub fn record_item_interaction(&mut self, item_id: &str, kind: InteractionKind) -> Result<f64> {
        self.commit(|tracker, profile| tracker.record_item_interaction(profile, item_id, kind))
    }

    pub fn record_feature_usage(&mut self, feature: &str) -> Result<u32> {
        self.commit(|tracker, profile| tracker.record_feature_usage(profile, feature))
    }

    pub fn record_session_end(&mut self, mood: Mood, duration_minutes: u32) -> Result<bool> {
        if duration_minutes == 0 {
            return Ok(false);
        }
        self.commit(|tracker, profile| tracker.record_session_end(profile, mood, duration_minutes))
    }

    /// Closes the running session under the current mood and starts a new one.
    ///
    /// Returns the whole minutes recorded, `None` if under a minute elapsed.
    #[instrument(skip(self))]
    pub fn end_session(&mut self) -> Result<Option<u32>> {
        let now = self.clock.now();
        let elapsed = (now - self.session_started).num_minutes().max(0);
        let minutes = u32::try_from(elapsed).unwrap_or(u32::MAX);
        let recorded = self.record_session_end(self.current_mood, minutes)?;
        self.session_started = now;
        Ok(recorded.then_some(minutes))
    }

    /// Clears all behavior history, derived insights and recommendations.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear(PROFILE_KEY)?;
        self.tracker.reset(&mut self.profile);
        self.feed.clear();
        self.board.clear();
        info!("Personalization data cleared");
        Ok(())
    }

    /// Re-derives insights and recommendations from the current profile.
    ///
    /// Insights are merged into the feed; recommendations replace the board.
    #[instrument(skip(self))]
    pub fn analyze(&mut self) -> AnalysisReport {
        let ctx = self.context();
        let insights = self.miner.derive_insights(&self.profile, &ctx);
        let recommendations = self.engine.derive_recommendations(&self.profile, &ctx);

        self.feed.merge(insights.clone());
        self.board.replace(recommendations.clone());

        info!(
            insights = insights.len(),
            recommendations = recommendations.len(),
            "Pattern analysis complete"
        );
        AnalysisReport {
            insights,
            recommendations,
        }
    }

    /// Runs [`analyze`](Self::analyze) only once the profile holds enough history.
    pub fn analyze_if_ready(&mut self) -> Option<AnalysisReport> {
        if RecommendationEngine::ready_for_analysis(&self.profile) {
            Some(self.analyze())
        } else {
            None
        }
    }

    /// Takes a recommendation off the board. Mood recommendations switch the
    /// current mood.
    pub fn accept_recommendation(&mut self, id: &str) -> Result<Option<AcceptedRecommendation>> {
        let Some(recommendation) = self.board.get(id).cloned() else {
            return Ok(None);
        };

        // the board keeps it if the mood switch cannot be saved
        if recommendation.kind == RecommendationKind::Mood {
            self.select_mood(recommendation.target_mood)?;
        }
        self.board.accept(id);
        let actions = self
            .analyzer
            .dispatcher()
            .actions_for_recommendation(&recommendation);

        info!(id, kind = ?recommendation.kind, target = %recommendation.target_mood, "Recommendation accepted");
        Ok(Some(AcceptedRecommendation {
            recommendation,
            actions,
        }))
    }

    /// Handles a chat message and returns the bot's reply.
    ///
    /// The reply carries the content actions for the detected mood and, when
    /// the mood differs from the current one, a switch prompt. The current
    /// mood itself is not changed.
    #[instrument(skip(self, text))]
    pub fn chat(&mut self, text: &str) -> Result<Option<ChatMessage>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let now = self.clock.now();
        let mut transcript = self.transcript.clone();
        if transcript.is_empty() {
            let hello = greeting(self.engine.random());
            transcript.push(ChatMessage::bot(hello, now));
        }
        transcript.push(ChatMessage::user(text, now));

        let reading = self.analyzer.analyze_chat(text, self.current_mood, now);
        let detected = reading.detected();

        let mut reply = ChatMessage::bot(bot_reply(detected, self.engine.random()), now);
        reply.mood = detected;
        reply.actions = reading.plan.actions;
        if let Some(mood) = detected.filter(|m| *m != self.current_mood) {
            reply.suggestions.push(format!("Switch to {} mode", mood));
        }
        transcript.push(reply.clone());

        save_json(self.store.as_ref(), CHAT_HISTORY_KEY, &transcript)?;
        self.transcript = transcript;
        Ok(Some(reply))
    }

    /// Clears the chat history.
    pub fn clear_chat(&mut self) -> Result<()> {
        self.store.clear(CHAT_HISTORY_KEY)?;
        self.transcript.clear();
        Ok(())
    }

    /// Classifies a sentiment description against the current mood. No state changes.
    pub fn detect_sentiment(&self, text: &str) -> MoodReading {
        self.analyzer
            .analyze_sentiment(text, self.current_mood, self.clock.now())
    }

    /// Maps an external emotion label against the current mood. No state changes.
    pub fn detect_emotion(&self, label: &str, confidence: f32) -> MoodReading {
        self.analyzer
            .analyze_emotion(label, confidence, self.current_mood, self.clock.now())
    }

    pub fn add_journal_entry(&mut self, entry: JournalEntry) -> Result<()> {
        let mut journal = self.journal.clone();
        journal.upsert(entry)?;
        save_json(self.store.as_ref(), JOURNAL_KEY, &journal)?;
        self.journal = journal;
        Ok(())
    }

    /// Journal statistics as of today on the session clock.
    pub fn journal_stats(&self) -> Option<JournalStats> {
        self.journal.stats(self.clock.now().date_naive())
    }
}
