//! Behavior tracking.
//!
//! [`BehaviorTracker`] is the only writer of a [`BehaviorProfile`]. It owns the
//! "last mood" cursor used to detect transitions and applies the retention
//! cap to every history list it appends to.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{BehaviorProfile, InteractionKind, Mood, MoodTransition, Timestamp};

/// Default number of entries kept in each history list.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// How many entries each append-only history list may hold.
///
/// Applies per weekday in `daily_patterns`, per mood in `session_durations`,
/// and to `mood_transitions` as a whole. The oldest entries go first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub max_entries: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl RetentionPolicy {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
        }
    }

    fn trim<T>(&self, entries: &mut Vec<T>) {
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }
    }
}

/// Hour-of-day key used by `time_of_day_preferences`.
pub fn hour_of(now: &Timestamp) -> u32 {
    now.hour()
}

/// Weekday key used by `daily_patterns` ("Monday", "Tuesday", ...).
pub fn weekday_name(now: &Timestamp) -> String {
    now.format("%A").to_string()
}

/// Applies behavior events to a profile.
#[derive(Debug, Clone, Default)]
pub struct BehaviorTracker {
    last_mood: Option<Mood>,
    retention: RetentionPolicy,
}

impl BehaviorTracker {
    /// A tracker whose cursor is set by the first mood it sees.
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            last_mood: None,
            retention,
        }
    }

    /// A tracker resuming from a known current mood.
    pub fn with_cursor(last_mood: Mood, retention: RetentionPolicy) -> Self {
        Self {
            last_mood: Some(last_mood),
            retention,
        }
    }

    /// A tracker resuming over a persisted profile.
    ///
    /// The cursor is the target of the last recorded transition. Without
    /// transitions every selection so far was the same mood, so that mood is
    /// the cursor; an empty profile leaves it unset.
    pub fn resume(profile: &BehaviorProfile, retention: RetentionPolicy) -> Self {
        let last_mood = match profile.mood_transitions.last() {
            Some(transition) => Some(transition.to),
            None => {
                let mut selected = profile
                    .mood_selections
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(mood, _)| *mood);
                match (selected.next(), selected.next()) {
                    (Some(mood), None) => Some(mood),
                    _ => None,
                }
            }
        };
        Self {
            last_mood,
            retention,
        }
    }

    pub fn last_mood(&self) -> Option<Mood> {
        self.last_mood
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Records a mood selection and returns the transition it produced, if any.
    pub fn record_mood_selection(
        &mut self,
        profile: &mut BehaviorProfile,
        mood: Mood,
        now: Timestamp,
    ) -> Option<MoodTransition> {
        *profile.mood_selections.entry(mood).or_insert(0) += 1;
        profile
            .time_of_day_preferences
            .insert(hour_of(&now), mood);

        let day = profile.daily_patterns.entry(weekday_name(&now)).or_default();
        day.push(mood);
        self.retention.trim(day);

        let transition = match self.last_mood {
            Some(previous) if previous != mood => {
                let transition = MoodTransition {
                    from: previous,
                    to: mood,
                    timestamp: now,
                };
                profile.mood_transitions.push(transition.clone());
                self.retention.trim(&mut profile.mood_transitions);
                Some(transition)
            }
            _ => None,
        };
        self.last_mood = Some(mood);

        debug!(
            mood = %mood,
            hour = hour_of(&now),
            transition = transition.is_some(),
            "Tracked mood selection"
        );
        transition
    }

    /// Adds the weight of `kind` to the item and returns its new total.
    pub fn record_item_interaction(
        &self,
        profile: &mut BehaviorProfile,
        item_id: &str,
        kind: InteractionKind,
    ) -> f64 {
        let weight = profile
            .item_interactions
            .entry(item_id.to_string())
            .or_insert(0.0);
        *weight += kind.weight();
        debug!(item_id, ?kind, weight = *weight, "Tracked item interaction");
        *weight
    }

    /// Increments the usage count of `feature` and returns it.
    pub fn record_feature_usage(&self, profile: &mut BehaviorProfile, feature: &str) -> u32 {
        let count = profile.feature_usage.entry(feature.to_string()).or_insert(0);
        *count += 1;
        debug!(feature, count = *count, "Tracked feature usage");
        *count
    }

    /// Appends a session length for `mood`. Zero-minute sessions are ignored.
    pub fn record_session_end(
        &self,
        profile: &mut BehaviorProfile,
        mood: Mood,
        duration_minutes: u32,
    ) -> bool {
        if duration_minutes == 0 {
            return false;
        }
        let sessions = profile.session_durations.entry(mood).or_default();
        sessions.push(duration_minutes);
        self.retention.trim(sessions);
        debug!(mood = %mood, duration_minutes, "Tracked session end");
        true
    }

    /// Replaces the profile with the empty one. The cursor is left alone: the
    /// current mood on screen does not change when history is cleared.
    pub fn reset(&self, profile: &mut BehaviorProfile) {
        *profile = BehaviorProfile::default();
        debug!("Behavior profile reset");
    }
}
