//! Action dispatch: turns a mood into content actions for the UI layer.
//!
//! A fixed table, no state and no randomness. The UI decides what "play calm
//! music" means; this module only names the action and its payload.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::recommendations::{Recommendation, RecommendationKind};
use crate::models::Mood;

/// Detected moods above this confidence suggest switching the current mood.
pub const MOOD_SWITCH_THRESHOLD: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteKind {
    Inspiration,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeditationKind {
    General,
    Breathing,
    Healing,
    Sleep,
    Mindfulness,
}

/// What the UI should do. Serialized as `{"type": ..., "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ContentAction {
    PlayMusic {
        mood: Mood,
    },
    ShowQuote {
        #[serde(rename = "type")]
        kind: QuoteKind,
    },
    StartMeditation {
        #[serde(rename = "type")]
        kind: MeditationKind,
    },
    SuggestActivity {
        activities: Vec<String>,
    },
}

/// A labelled action, ready to render as a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSuggestion {
    pub label: String,
    pub action: ContentAction,
}

impl ActionSuggestion {
    fn new(label: &str, action: ContentAction) -> Self {
        Self {
            label: label.to_string(),
            action,
        }
    }

    fn music(label: &str, mood: Mood) -> Self {
        Self::new(label, ContentAction::PlayMusic { mood })
    }

    fn quote(label: &str, kind: QuoteKind) -> Self {
        Self::new(label, ContentAction::ShowQuote { kind })
    }

    fn meditation(label: &str, kind: MeditationKind) -> Self {
        Self::new(label, ContentAction::StartMeditation { kind })
    }

    fn activities(label: &str, activities: &[&str]) -> Self {
        Self::new(
            label,
            ContentAction::SuggestActivity {
                activities: activities.iter().map(|a| a.to_string()).collect(),
            },
        )
    }
}

/// Actions for a detected mood plus an optional mood switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub actions: Vec<ActionSuggestion>,
    /// Set when the detection is confident and differs from the current mood
    pub switch_to: Option<Mood>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionDispatcher;

impl ActionDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// The canned actions for `mood`, in display order.
    pub fn map_mood_to_actions(&self, mood: Mood) -> Vec<ActionSuggestion> {
        use ActionSuggestion as A;

        match mood {
            Mood::Happy => vec![
                A::music("Play Happy Music", Mood::Happy),
                A::activities("Fun Activities", &["dance", "party games"]),
            ],
            Mood::Sad => vec![
                A::music("Gentle Music", Mood::Calm),
                A::quote("Comforting Quote", QuoteKind::Inspiration),
                A::meditation("Healing Meditation", MeditationKind::Healing),
            ],
            Mood::Stressed => vec![
                A::meditation("Breathing Exercise", MeditationKind::Breathing),
                A::music("Calming Sounds", Mood::Peaceful),
                A::activities("Stress Relief", &["walk", "stretch"]),
            ],
            Mood::Energetic => vec![
                A::music("High Energy Music", Mood::Energetic),
                A::activities("Workout Ideas", &["exercise", "sports"]),
            ],
            Mood::Tired => vec![
                A::meditation("Rest Meditation", MeditationKind::Sleep),
                A::music("Relaxing Music", Mood::Calm),
            ],
            Mood::Calm => vec![
                A::music("Calm Music", Mood::Calm),
                A::meditation("Mindfulness Session", MeditationKind::Mindfulness),
            ],
            Mood::Peaceful => vec![
                A::music("Peaceful Music", Mood::Peaceful),
                A::quote("Inspiring Quote", QuoteKind::Inspiration),
            ],
            Mood::Creative => vec![
                A::music("Creative Flow Music", Mood::Creative),
                A::activities("Creative Ideas", &["art project", "journal"]),
            ],
            Mood::Focused => vec![
                A::music("Focus Music", Mood::Focused),
                A::activities("Focus Ideas", &["deep work", "learning"]),
            ],
        }
    }

    /// Generic actions when no mood could be detected.
    pub fn fallback_actions(&self, current_mood: Mood) -> Vec<ActionSuggestion> {
        vec![
            ActionSuggestion::music("Mood Music", current_mood),
            ActionSuggestion::quote("Daily Quote", QuoteKind::Daily),
            ActionSuggestion::meditation("Quick Meditation", MeditationKind::General),
        ]
    }

    /// Actions for a classification outcome; `None` falls back to the generic set.
    pub fn map_detected_mood_to_actions(
        &self,
        detected: Option<Mood>,
        confidence: f32,
        current_mood: Mood,
    ) -> Vec<ActionSuggestion> {
        match detected {
            Some(mood) => {
                debug!(mood = %mood, confidence, "Mapping detected mood to actions");
                self.map_mood_to_actions(mood)
            }
            None => self.fallback_actions(current_mood),
        }
    }

    pub fn dispatch(&self, detected: Option<Mood>, confidence: f32, current_mood: Mood) -> DispatchPlan {
        let actions = self.map_detected_mood_to_actions(detected, confidence, current_mood);
        let switch_to = detected
            .filter(|mood| *mood != current_mood && confidence > MOOD_SWITCH_THRESHOLD);

        DispatchPlan { actions, switch_to }
    }

    /// Actions triggered by accepting a recommendation.
    pub fn actions_for_recommendation(&self, recommendation: &Recommendation) -> Vec<ActionSuggestion> {
        match recommendation.kind {
            RecommendationKind::Mood => self.map_mood_to_actions(recommendation.target_mood),
            RecommendationKind::Activity => vec![ActionSuggestion::new(
                &recommendation.title,
                ContentAction::SuggestActivity {
                    activities: vec![recommendation.description.clone()],
                },
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mood_has_one_to_three_actions() {
        let dispatcher = ActionDispatcher::new();
        for mood in Mood::ALL {
            let actions = dispatcher.map_mood_to_actions(mood);
            assert!(
                (1..=3).contains(&actions.len()),
                "{} has {} actions",
                mood,
                actions.len()
            );
        }
    }

    #[test]
    fn test_stressed_table() {
        let actions = ActionDispatcher::new().map_mood_to_actions(Mood::Stressed);
        assert_eq!(
            actions[0].action,
            ContentAction::StartMeditation {
                kind: MeditationKind::Breathing
            }
        );
        assert_eq!(actions[1].action, ContentAction::PlayMusic { mood: Mood::Peaceful });
    }

    #[test]
    fn test_fallback_uses_current_mood() {
        let actions = ActionDispatcher::new().map_detected_mood_to_actions(None, 0.0, Mood::Focused);
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].action, ContentAction::PlayMusic { mood: Mood::Focused });
        assert_eq!(actions[1].action, ContentAction::ShowQuote { kind: QuoteKind::Daily });
    }

    #[test]
    fn test_switch_threshold_is_strict() {
        let dispatcher = ActionDispatcher::new();

        let plan = dispatcher.dispatch(Some(Mood::Calm), 0.6, Mood::Happy);
        assert_eq!(plan.switch_to, None);

        let plan = dispatcher.dispatch(Some(Mood::Calm), 0.61, Mood::Happy);
        assert_eq!(plan.switch_to, Some(Mood::Calm));

        let plan = dispatcher.dispatch(Some(Mood::Happy), 1.0, Mood::Happy);
        assert_eq!(plan.switch_to, None);
    }

    #[test]
    fn test_wire_format() {
        let suggestion = ActionSuggestion::music("Play Happy Music", Mood::Happy);
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["action"]["type"], "play_music");
        assert_eq!(json["action"]["data"]["mood"], "happy");

        let quote = serde_json::to_value(ContentAction::ShowQuote {
            kind: QuoteKind::Inspiration,
        })
        .unwrap();
        assert_eq!(quote["data"]["type"], "inspiration");
    }
}
