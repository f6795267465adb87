//! Rule-based recommendations from the behavior profile and the current context.
//!
//! Rules (each independent):
//! 1. time of day: the mood last chosen at this hour differs from the current one
//! 2. transition pattern: the most frequent transition starts at the current mood
//! 3. day of week: today's most frequent mood differs from the current one
//! 4. activity: a random activity for the current mood, once history is rich enough
//!
//! Every call produces a fresh list; recommendations never accumulate.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::insights::{max_first, AnalysisContext};
use crate::models::{BehaviorProfile, Mood};
use crate::sources::{RandomSource, ThreadRandom};
use crate::tracker::{hour_of, weekday_name};

pub const TIME_OF_DAY_CONFIDENCE: f32 = 0.7;
pub const TRANSITION_CONFIDENCE: f32 = 0.6;
pub const DAY_OF_WEEK_CONFIDENCE: f32 = 0.5;
pub const ACTIVITY_CONFIDENCE: f32 = 0.6;

/// Transitions needed before transition patterns are mined.
pub const TRANSITION_MIN_HISTORY: usize = 5;
/// The winning transition must have been seen more often than this.
pub const TRANSITION_MIN_COUNT: u32 = 2;
/// Entries needed in today's pattern before the day-of-week rule applies.
pub const DAY_PATTERN_MIN_ENTRIES: usize = 2;
/// Selections needed before activities are suggested.
pub const ACTIVITY_MIN_SELECTIONS: u32 = 15;
/// Selections needed before periodic analysis is worth running.
pub const ANALYSIS_MIN_SELECTIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Switch to another mood
    Mood,
    /// Do something within the current mood
    Activity,
}

/// Which rule produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationRule {
    TimeOfDay,
    TransitionPattern,
    DayOfWeek,
    Activity,
}

/// A one-shot suggestion. Accepting it removes it from the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub kind: RecommendationKind,
    pub rule: RecommendationRule,
    pub title: String,
    pub description: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Which rule fired and the numbers behind it
    pub reason: String,
    pub target_mood: Mood,
}

impl Recommendation {
    fn new(
        rule: RecommendationRule,
        title: String,
        description: String,
        confidence: f32,
        reason: String,
        target_mood: Mood,
    ) -> Self {
        let (prefix, kind) = match rule {
            RecommendationRule::TimeOfDay => ("time_rec", RecommendationKind::Mood),
            RecommendationRule::TransitionPattern => ("transition_rec", RecommendationKind::Mood),
            RecommendationRule::DayOfWeek => ("daily_rec", RecommendationKind::Mood),
            RecommendationRule::Activity => ("activity_rec", RecommendationKind::Activity),
        };
        Self {
            id: format!("{}_{}", prefix, Uuid::new_v4()),
            kind,
            rule,
            title,
            description,
            confidence,
            reason,
            target_mood,
        }
    }
}

/// Activities suggested per supported mood. Other moods have none.
pub fn activities_for(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &[
            "Share your joy with friends",
            "Try a new creative project",
            "Listen to upbeat music",
        ],
        Mood::Calm => &[
            "Practice meditation",
            "Take a peaceful walk",
            "Listen to nature sounds",
        ],
        Mood::Energetic => &[
            "Do a quick workout",
            "Tackle a challenging task",
            "Listen to pump-up music",
        ],
        Mood::Peaceful => &[
            "Practice gratitude",
            "Read something inspiring",
            "Listen to zen music",
        ],
        Mood::Creative => &[
            "Start an art project",
            "Write in your journal",
            "Explore new music",
        ],
        Mood::Focused => &[
            "Work on important tasks",
            "Learn something new",
            "Listen to focus music",
        ],
        Mood::Sad | Mood::Tired | Mood::Stressed => &[],
    }
}

/// Counts items keeping the order in which each was first seen.
fn count_first_seen<T: PartialEq + Copy>(items: impl IntoIterator<Item = T>) -> Vec<(T, u32)> {
    let mut counts: Vec<(T, u32)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts
}

/// Derives recommendations. Deterministic except for the activity pick.
pub struct RecommendationEngine {
    rng: Box<dyn RandomSource>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Box::new(ThreadRandom))
    }
}

impl RecommendationEngine {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// The injected random source, shared with other pick-one-of-N choices.
    pub fn random(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Whether the profile holds enough history for periodic analysis.
    pub fn ready_for_analysis(profile: &BehaviorProfile) -> bool {
        profile.total_selections() > ANALYSIS_MIN_SELECTIONS
    }

    pub fn derive_recommendations(
        &mut self,
        profile: &BehaviorProfile,
        ctx: &AnalysisContext,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        recommendations.extend(self.time_of_day(profile, ctx));
        recommendations.extend(self.transition_pattern(profile, ctx));
        recommendations.extend(self.day_of_week(profile, ctx));
        recommendations.extend(self.activity(profile, ctx));

        debug!(
            count = recommendations.len(),
            current_mood = %ctx.current_mood,
            "Derived recommendations"
        );
        recommendations
    }

    fn time_of_day(&self, profile: &BehaviorProfile, ctx: &AnalysisContext) -> Option<Recommendation> {
        let hour = hour_of(&ctx.now);
        let preferred = *profile.time_of_day_preferences.get(&hour)?;
        if preferred == ctx.current_mood {
            return None;
        }

        Some(Recommendation::new(
            RecommendationRule::TimeOfDay,
            format!("Switch to {} mood?", preferred),
            format!(
                "Based on your patterns, you usually prefer {} mood around this time",
                preferred
            ),
            TIME_OF_DAY_CONFIDENCE,
            format!(
                "Historical data shows {} preference at {}:00",
                preferred, hour
            ),
            preferred,
        ))
    }

    fn transition_pattern(
        &self,
        profile: &BehaviorProfile,
        ctx: &AnalysisContext,
    ) -> Option<Recommendation> {
        if profile.mood_transitions.len() <= TRANSITION_MIN_HISTORY {
            return None;
        }

        let pairs = count_first_seen(profile.mood_transitions.iter().map(|t| (t.from, t.to)));
        let ((from, to), count) = max_first(pairs)?;
        if from != ctx.current_mood || count <= TRANSITION_MIN_COUNT {
            return None;
        }

        Some(Recommendation::new(
            RecommendationRule::TransitionPattern,
            format!("Ready for {} mood?", to),
            format!("You often transition from {} to {}", from, to),
            TRANSITION_CONFIDENCE,
            format!(
                "Detected pattern: {}->{} ({} of {} transitions)",
                from,
                to,
                count,
                profile.mood_transitions.len()
            ),
            to,
        ))
    }

    fn day_of_week(&self, profile: &BehaviorProfile, ctx: &AnalysisContext) -> Option<Recommendation> {
        let today = weekday_name(&ctx.now);
        let pattern = profile.daily_patterns.get(&today)?;
        if pattern.len() <= DAY_PATTERN_MIN_ENTRIES {
            return None;
        }

        let (preferred, count) = max_first(count_first_seen(pattern.iter().copied()))?;
        if preferred == ctx.current_mood {
            return None;
        }

        Some(Recommendation::new(
            RecommendationRule::DayOfWeek,
            format!("{} vibes: {}", today, preferred),
            format!("You usually prefer {} mood on {}s", preferred, today),
            DAY_OF_WEEK_CONFIDENCE,
            format!(
                "{} pattern analysis: {} chosen {} of {} times",
                today,
                preferred,
                count,
                pattern.len()
            ),
            preferred,
        ))
    }

    fn activity(&mut self, profile: &BehaviorProfile, ctx: &AnalysisContext) -> Option<Recommendation> {
        let total = profile.total_selections();
        if total <= ACTIVITY_MIN_SELECTIONS {
            return None;
        }

        let activities = activities_for(ctx.current_mood);
        if activities.is_empty() {
            return None;
        }
        let activity = activities[self.rng.pick_index(activities.len())];

        Some(Recommendation::new(
            RecommendationRule::Activity,
            "Suggested Activity".to_string(),
            activity.to_string(),
            ACTIVITY_CONFIDENCE,
            format!(
                "Perfect for your {} mood ({} selections recorded)",
                ctx.current_mood, total
            ),
            ctx.current_mood,
        ))
    }
}

/// The active recommendation list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationBoard {
    active: Vec<Recommendation>,
}

impl RecommendationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly derived list.
    pub fn replace(&mut self, recommendations: Vec<Recommendation>) {
        self.active = recommendations;
    }

    pub fn get(&self, id: &str) -> Option<&Recommendation> {
        self.active.iter().find(|r| r.id == id)
    }

    /// Removes and returns the recommendation with `id`.
    pub fn accept(&mut self, id: &str) -> Option<Recommendation> {
        let index = self.active.iter().position(|r| r.id == id)?;
        Some(self.active.remove(index))
    }

    pub fn active(&self) -> &[Recommendation] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
