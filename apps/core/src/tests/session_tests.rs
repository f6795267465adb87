//! Session Tests
//!
//! The session facade driven with a pinned clock and random source.

use crate::brain::recommendations::RecommendationRule;
use crate::config::MoodConfig;
use crate::journal::JournalEntry;
use crate::models::{BehaviorProfile, InteractionKind, Mood, PersonalizationLevel};
use crate::session::MoodSession;
use crate::sources::{Clock, FixedClock, FixedPick};
use crate::error::{AppError, Result};
use crate::store::{load_or_default, KeyValueStore, MemoryStore, PROFILE_KEY};
use chrono::{Duration, Local, TimeZone};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clock handle shared between the test and the session.
#[derive(Clone)]
struct SharedClock(Arc<FixedClock>);

impl Clock for SharedClock {
    fn now(&self) -> crate::models::Timestamp {
        self.0.now()
    }
}

fn setup() -> (MoodSession, MemoryStore, Arc<FixedClock>) {
    let store = MemoryStore::new();
    let clock = Arc::new(FixedClock::new(
        Local.with_ymd_and_hms(2026, 10, 14, 14, 0, 0).unwrap(),
    ));
    let session = MoodSession::open(
        Box::new(store.clone()),
        Box::new(SharedClock(clock.clone())),
        Box::new(FixedPick(0)),
        &MoodConfig::default(),
    )
    .unwrap();
    (session, store, clock)
}

#[cfg(test)]
mod tracking_tests {
    use super::*;

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut session, store, _) = setup();

        session.select_mood(Mood::Calm).unwrap();
        session
            .record_item_interaction("song-1", InteractionKind::Complete)
            .unwrap();
        session.record_feature_usage("playlist").unwrap();
        session.record_session_end(Mood::Calm, 7).unwrap();

        let saved: BehaviorProfile = load_or_default(&store, PROFILE_KEY).unwrap();
        assert_eq!(saved, *session.profile());
        assert_eq!(saved.item_interactions["song-1"], 2.0);
        assert_eq!(saved.session_durations[&Mood::Calm], vec![7]);
    }

    #[test]
    fn test_end_session_uses_clock() {
        let (mut session, _, clock) = setup();
        session.select_mood(Mood::Focused).unwrap();

        clock.advance(Duration::seconds(30));
        assert_eq!(session.end_session().unwrap(), None);

        clock.advance(Duration::minutes(25));
        assert_eq!(session.end_session().unwrap(), Some(25));
        assert_eq!(session.profile().session_durations[&Mood::Focused], vec![25]);
    }

    #[test]
    fn test_reset_clears_store_and_derived_state() {
        let (mut session, store, _) = setup();
        for _ in 0..12 {
            session.select_mood(Mood::Happy).unwrap();
        }
        session.analyze();
        assert!(!session.insights().is_empty());

        session.reset().unwrap();
        assert!(session.profile().is_empty());
        assert!(session.insights().is_empty());
        assert!(session.recommendations().is_empty());
        assert!(store.load(PROFILE_KEY).unwrap().is_none());

        let report = session.analyze();
        assert!(report.insights.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_personalization_level_grows() {
        let (mut session, _, _) = setup();
        assert_eq!(session.personalization_level(), PersonalizationLevel::Basic);

        for _ in 0..31 {
            session.select_mood(Mood::Creative).unwrap();
        }
        assert_eq!(session.personalization_level(), PersonalizationLevel::Intermediate);
    }
}

#[cfg(test)]
mod analysis_tests {
    use super::*;

    #[test]
    fn test_analyze_if_ready_waits_for_history() {
        let (mut session, _, _) = setup();
        for _ in 0..5 {
            session.select_mood(Mood::Calm).unwrap();
        }
        assert!(session.analyze_if_ready().is_none());

        session.select_mood(Mood::Calm).unwrap();
        assert!(session.analyze_if_ready().is_some());
    }

    #[test]
    fn test_accept_time_recommendation_switches_mood() {
        let (mut session, _, clock) = setup();
        // focused at 14:00 yesterday, happy this morning
        clock.set(Local.with_ymd_and_hms(2026, 10, 13, 14, 0, 0).unwrap());
        session.select_mood(Mood::Focused).unwrap();
        clock.set(Local.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap());
        session.select_mood(Mood::Happy).unwrap();

        clock.set(Local.with_ymd_and_hms(2026, 10, 14, 14, 30, 0).unwrap());
        let report = session.analyze();
        let rec = report
            .recommendations
            .iter()
            .find(|r| r.rule == RecommendationRule::TimeOfDay)
            .expect("time-of-day recommendation")
            .clone();
        assert_eq!(rec.target_mood, Mood::Focused);

        let accepted = session.accept_recommendation(&rec.id).unwrap().unwrap();
        assert_eq!(accepted.recommendation.id, rec.id);
        assert!(!accepted.actions.is_empty());
        assert_eq!(session.current_mood(), Mood::Focused);
        assert!(session.recommendations().iter().all(|r| r.id != rec.id));

        // one-shot
        assert!(session.accept_recommendation(&rec.id).unwrap().is_none());
    }

    #[test]
    fn test_insight_feed_cap_from_config() {
        let store = MemoryStore::new();
        let config = MoodConfig {
            insight_cap: 2,
            ..MoodConfig::default()
        };
        let mut session = MoodSession::open(
            Box::new(store),
            Box::new(FixedClock::new(Local.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap())),
            Box::new(FixedPick(0)),
            &config,
        )
        .unwrap();

        for _ in 0..11 {
            session.select_mood(Mood::Energetic).unwrap();
        }
        session.record_feature_usage("games").unwrap();
        for _ in 0..3 {
            session.analyze();
        }
        assert_eq!(session.insights().len(), 2);
    }
}

#[cfg(test)]
mod detection_tests {
    use super::*;

    #[test]
    fn test_detect_sentiment_does_not_mutate() {
        let (session, store, _) = setup();

        let reading = session.detect_sentiment("time for a workout, let's go");
        assert_eq!(reading.detected(), Some(Mood::Energetic));
        assert_eq!(reading.plan.switch_to, Some(Mood::Energetic));
        assert!(session.profile().is_empty());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_detect_emotion() {
        let (session, _, _) = setup();

        let reading = session.detect_emotion("relaxed", 0.4);
        assert_eq!(reading.detected(), Some(Mood::Calm));
        assert_eq!(reading.plan.switch_to, None);
    }

    #[test]
    fn test_chat_history_capped() {
        let (mut session, _, _) = setup();
        for i in 0..30 {
            session.chat(&format!("message number {}", i)).unwrap();
        }
        assert_eq!(session.transcript().len(), 50);
    }

    #[test]
    fn test_journal_through_session() {
        let (mut session, _, _) = setup();
        let today = Local.with_ymd_and_hms(2026, 10, 14, 0, 0, 0).unwrap().date_naive();

        session
            .add_journal_entry(JournalEntry::for_mood(today - Duration::days(1), Mood::Calm))
            .unwrap();
        session
            .add_journal_entry(JournalEntry::for_mood(today, Mood::Happy))
            .unwrap();

        let stats = session.journal_stats().unwrap();
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.total_entries, 2);
        assert!((stats.average_score - 7.5).abs() < 1e-9);

        assert!(session
            .add_journal_entry(JournalEntry::new(today, Mood::Sad, 0))
            .is_err());
    }
}

// ============================================================================
// Store failures
// ============================================================================

/// A memory store whose writes can be switched off.
#[derive(Clone, Default)]
struct FlakyStore {
    inner: MemoryStore,
    failing: Arc<AtomicBool>,
}

impl FlakyStore {
    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Io(std::io::Error::other("disk full")));
        }
        Ok(())
    }
}

impl KeyValueStore for FlakyStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.inner.save(key, value)
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.check()?;
        self.inner.clear(key)
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    fn flaky_setup() -> (MoodSession, FlakyStore, Arc<FixedClock>) {
        let store = FlakyStore::default();
        let clock = Arc::new(FixedClock::new(
            Local.with_ymd_and_hms(2026, 10, 14, 14, 0, 0).unwrap(),
        ));
        let session = MoodSession::open(
            Box::new(store.clone()),
            Box::new(SharedClock(clock.clone())),
            Box::new(FixedPick(0)),
            &MoodConfig::default(),
        )
        .unwrap();
        (session, store, clock)
    }

    #[test]
    fn test_failed_save_leaves_profile_untouched() {
        let (mut session, store, clock) = flaky_setup();
        session.select_mood(Mood::Focused).unwrap();
        let before = session.profile().clone();

        store.set_failing(true);
        for _ in 0..3 {
            assert!(session.select_mood(Mood::Calm).is_err());
        }
        assert!(session.record_feature_usage("player").is_err());
        assert!(session
            .record_item_interaction("song-1", InteractionKind::Favorite)
            .is_err());
        clock.advance(Duration::minutes(20));
        assert!(session.end_session().is_err());
        assert!(session.chat("so tired").is_err());
        let today = Local.with_ymd_and_hms(2026, 10, 14, 0, 0, 0).unwrap().date_naive();
        assert!(session
            .add_journal_entry(JournalEntry::for_mood(today, Mood::Calm))
            .is_err());
        assert!(session.reset().is_err());

        assert_eq!(*session.profile(), before);
        assert_eq!(session.current_mood(), Mood::Focused);
        assert!(session.transcript().is_empty());
        assert!(session.journal().is_empty());

        // a retry after recovery counts once
        store.set_failing(false);
        session.select_mood(Mood::Calm).unwrap();
        assert_eq!(session.profile().total_selections(), 2);
        assert_eq!(session.profile().mood_transitions.len(), 1);
        assert_eq!(session.end_session().unwrap(), Some(20));
    }

    #[test]
    fn test_failed_accept_keeps_recommendation() {
        let (mut session, store, clock) = flaky_setup();
        clock.set(Local.with_ymd_and_hms(2026, 10, 13, 14, 0, 0).unwrap());
        session.select_mood(Mood::Focused).unwrap();
        clock.set(Local.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap());
        session.select_mood(Mood::Happy).unwrap();
        clock.set(Local.with_ymd_and_hms(2026, 10, 14, 14, 30, 0).unwrap());
        let rec = session
            .analyze()
            .recommendations
            .into_iter()
            .find(|r| r.rule == RecommendationRule::TimeOfDay)
            .expect("time-of-day recommendation");

        store.set_failing(true);
        assert!(session.accept_recommendation(&rec.id).is_err());
        assert_eq!(session.current_mood(), Mood::Happy);
        assert!(session.recommendations().iter().any(|r| r.id == rec.id));

        store.set_failing(false);
        let accepted = session.accept_recommendation(&rec.id).unwrap().unwrap();
        assert_eq!(accepted.recommendation.target_mood, Mood::Focused);
        assert_eq!(session.current_mood(), Mood::Focused);
    }
}
