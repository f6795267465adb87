//! Insight mining over the behavior profile.
//!
//! Three independent rules, evaluated in this order:
//! 1. favorite mood (more than 10 selections recorded)
//! 2. average session length per mood (more than 3 sessions for that mood)
//! 3. most used feature (any usage recorded)

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{BehaviorProfile, Mood, Timestamp};

/// Selections needed before a favorite mood is reported.
pub const FAVORITE_MOOD_MIN_SELECTIONS: u32 = 10;

/// Sessions needed before a per-mood average is reported.
pub const SESSION_AVERAGE_MIN_SESSIONS: usize = 3;

/// Default number of insights a feed keeps.
pub const DEFAULT_INSIGHT_CAP: usize = 10;

/// Where the user is right now; shared by insight mining and recommendations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisContext {
    pub current_mood: Mood,
    pub now: Timestamp,
}

impl AnalysisContext {
    pub fn new(current_mood: Mood, now: Timestamp) -> Self {
        Self { current_mood, now }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    BehaviorInsight,
    TimePattern,
}

/// Numbers behind an insight, one shape per rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum InsightData {
    FavoriteMood {
        mood: Mood,
        count: u32,
        /// Whole percent of all selections
        percentage: u32,
    },
    SessionAverage {
        mood: Mood,
        average_minutes: u32,
        sessions: usize,
    },
    FavoriteFeature {
        feature: String,
        usage: u32,
    },
}

/// A descriptive observation derived from the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    pub actionable: bool,
    pub data: InsightData,
    pub timestamp: Timestamp,
}

impl Insight {
    #[allow(clippy::too_many_arguments)]
    fn new(
        prefix: &str,
        kind: InsightKind,
        title: String,
        description: String,
        confidence: f32,
        actionable: bool,
        data: InsightData,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: format!("{}_{}", prefix, Uuid::new_v4()),
            kind,
            title,
            description,
            confidence: confidence.clamp(0.0, 1.0),
            actionable,
            data,
            timestamp,
        }
    }
}

/// Derives insights from a profile. Pure apart from fresh ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightMiner;

impl InsightMiner {
    pub fn new() -> Self {
        Self
    }

    pub fn derive_insights(&self, profile: &BehaviorProfile, ctx: &AnalysisContext) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(insight) = self.favorite_mood(profile, ctx) {
            insights.push(insight);
        }
        insights.extend(self.session_averages(profile, ctx));
        if let Some(insight) = self.favorite_feature(profile, ctx) {
            insights.push(insight);
        }

        debug!(
            count = insights.len(),
            current_mood = %ctx.current_mood,
            "Derived insights"
        );
        insights
    }

    fn favorite_mood(&self, profile: &BehaviorProfile, ctx: &AnalysisContext) -> Option<Insight> {
        let total = profile.total_selections();
        if total <= FAVORITE_MOOD_MIN_SELECTIONS {
            return None;
        }

        let (mood, count) = max_first(profile.mood_selections.iter().map(|(m, c)| (*m, *c)))?;
        let share = count as f32 / total as f32;
        let percentage = (share * 100.0).round() as u32;
        let title = if mood == ctx.current_mood {
            format!("Your Favorite Mood: {} (active now)", mood)
        } else {
            format!("Your Favorite Mood: {}", mood)
        };

        Some(Insight::new(
            "mood_pattern",
            InsightKind::BehaviorInsight,
            title,
            format!(
                "You choose {} mood {}% of the time. This suggests you're naturally drawn to {} experiences.",
                mood, percentage, mood
            ),
            (2.0 * share).min(1.0),
            true,
            InsightData::FavoriteMood {
                mood,
                count,
                percentage,
            },
            ctx.now,
        ))
    }

    fn session_averages(&self, profile: &BehaviorProfile, ctx: &AnalysisContext) -> Vec<Insight> {
        profile
            .session_durations
            .iter()
            .filter(|(_, durations)| durations.len() > SESSION_AVERAGE_MIN_SESSIONS)
            .map(|(mood, durations)| {
                let sum: u64 = durations.iter().map(|d| u64::from(*d)).sum();
                let average = (sum as f64 / durations.len() as f64).round() as u32;
                Insight::new(
                    &format!("session_{}", mood),
                    InsightKind::TimePattern,
                    format!("{} Sessions: {} min average", mood, average),
                    format!("You typically spend {} minutes in {} mode", average, mood),
                    (durations.len() as f32 / 10.0).min(1.0),
                    false,
                    InsightData::SessionAverage {
                        mood: *mood,
                        average_minutes: average,
                        sessions: durations.len(),
                    },
                    ctx.now,
                )
            })
            .collect()
    }

    fn favorite_feature(&self, profile: &BehaviorProfile, ctx: &AnalysisContext) -> Option<Insight> {
        let (feature, usage) =
            max_first(profile.feature_usage.iter().map(|(f, c)| (f.as_str(), *c)))?;

        Some(Insight::new(
            &format!("feature_{}", feature),
            InsightKind::BehaviorInsight,
            format!("Favorite Feature: {}", feature),
            format!(
                "You've used {} {} times. You're really getting the most out of this feature!",
                feature, usage
            ),
            (usage as f32 / 20.0).min(1.0),
            false,
            InsightData::FavoriteFeature {
                feature: feature.to_string(),
                usage,
            },
            ctx.now,
        ))
    }
}

/// Highest count wins; the first item seen keeps a tie.
pub(crate) fn max_first<K, I>(items: I) -> Option<(K, u32)>
where
    I: IntoIterator<Item = (K, u32)>,
{
    let mut best: Option<(K, u32)> = None;
    for (key, count) in items {
        let replace = match &best {
            Some((_, best_count)) => count > *best_count,
            None => true,
        };
        if replace {
            best = Some((key, count));
        }
    }
    best
}

/// Rolling list of insights, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightFeed {
    insights: Vec<Insight>,
    cap: usize,
}

impl Default for InsightFeed {
    fn default() -> Self {
        Self::new(DEFAULT_INSIGHT_CAP)
    }
}

impl InsightFeed {
    pub fn new(cap: usize) -> Self {
        Self {
            insights: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Puts `fresh` in front of the kept insights and drops the overflow.
    pub fn merge(&mut self, fresh: Vec<Insight>) {
        let mut merged = fresh;
        merged.append(&mut self.insights);
        merged.truncate(self.cap);
        self.insights = merged;
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    pub fn clear(&mut self) {
        self.insights.clear();
    }
}
