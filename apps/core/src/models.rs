use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Wall-clock instant used across the core. Hours and weekdays are read in local time.
pub type Timestamp = DateTime<Local>;

/// A mood label from the fixed closed set.
///
/// Declaration order is significant: maps keyed by `Mood` iterate in this
/// order, which is what every "first wins" tie-break relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Calm,
    Peaceful,
    Energetic,
    Tired,
    Creative,
    Focused,
    Stressed,
}

impl Mood {
    /// Every mood, in declaration order.
    pub const ALL: [Mood; 9] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Calm,
        Mood::Peaceful,
        Mood::Energetic,
        Mood::Tired,
        Mood::Creative,
        Mood::Focused,
        Mood::Stressed,
    ];

    /// The moods that have a theme and a content catalog behind them.
    pub const SUPPORTED: [Mood; 6] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Energetic,
        Mood::Peaceful,
        Mood::Creative,
        Mood::Focused,
    ];

    /// Returns the lower-case label used on the wire and in storage keys
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Calm => "calm",
            Mood::Peaceful => "peaceful",
            Mood::Energetic => "energetic",
            Mood::Tired => "tired",
            Mood::Creative => "creative",
            Mood::Focused => "focused",
            Mood::Stressed => "stressed",
        }
    }

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Maps a detected mood onto the closest mood the theming layer supports.
    pub fn nearest_supported(&self) -> Mood {
        match self {
            Mood::Sad | Mood::Tired => Mood::Calm,
            Mood::Stressed => Mood::Peaceful,
            other => *other,
        }
    }

    /// Default 1-10 journal score for an entry logged with this mood.
    pub fn default_score(&self) -> u8 {
        match self {
            Mood::Energetic => 9,
            Mood::Happy | Mood::Creative => 8,
            Mood::Calm | Mood::Peaceful | Mood::Focused => 7,
            Mood::Tired => 4,
            Mood::Stressed => 3,
            Mood::Sad => 2,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Mood {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Mood::ALL
            .iter()
            .find(|m| m.label() == needle)
            .copied()
            .ok_or_else(|| AppError::InvalidMood(s.to_string()))
    }
}

/// Kinds of interaction a user can have with a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Play,
    Skip,
    Favorite,
    Complete,
}

impl InteractionKind {
    /// Weight added to the item's accumulated score
    pub fn weight(&self) -> f64 {
        match self {
            InteractionKind::Play => 1.0,
            InteractionKind::Skip => -0.5,
            InteractionKind::Favorite => 3.0,
            InteractionKind::Complete => 2.0,
        }
    }
}

impl FromStr for InteractionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "play" => Ok(InteractionKind::Play),
            "skip" => Ok(InteractionKind::Skip),
            "favorite" => Ok(InteractionKind::Favorite),
            "complete" => Ok(InteractionKind::Complete),
            other => Err(AppError::Validation(format!(
                "Unknown interaction kind: {}",
                other
            ))),
        }
    }
}

/// One observed change of the current mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodTransition {
    pub from: Mood,
    pub to: Mood,
    /// Serialized as an RFC 3339 string and parsed back into a timestamp on load.
    pub timestamp: Timestamp,
}

/// How much history the personalization layer has to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalizationLevel {
    Basic,
    Intermediate,
    Advanced,
}

/// The accumulated, persisted record of a user's mood and interaction history.
///
/// Field names follow the camelCase layout of the stored JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorProfile {
    /// Selection count per mood.
    pub mood_selections: BTreeMap<Mood, u32>,
    /// Hour of day (0-23) to the last mood selected at that hour.
    pub time_of_day_preferences: BTreeMap<u32, Mood>,
    /// Weekday name ("Monday", ...) to the moods selected on that weekday, oldest first.
    pub daily_patterns: BTreeMap<String, Vec<Mood>>,
    /// Mood changes, oldest first.
    pub mood_transitions: Vec<MoodTransition>,
    /// Session lengths in minutes, per mood.
    pub session_durations: BTreeMap<Mood, Vec<u32>>,
    /// Accumulated interaction weight per content item. May go negative.
    #[serde(alias = "songInteractions")]
    pub item_interactions: BTreeMap<String, f64>,
    /// Usage count per feature name.
    pub feature_usage: BTreeMap<String, u32>,
}

impl BehaviorProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all mood selections
    pub fn total_selections(&self) -> u32 {
        self.mood_selections.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Richness of the history, used to badge the personalization state.
    pub fn personalization_level(&self) -> PersonalizationLevel {
        match self.total_selections() {
            n if n > 100 => PersonalizationLevel::Advanced,
            n if n > 30 => PersonalizationLevel::Intermediate,
            _ => PersonalizationLevel::Basic,
        }
    }

    /// Items ordered by accumulated weight, strongest first.
    pub fn top_items(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut items: Vec<(&str, f64)> = self
            .item_interactions
            .iter()
            .map(|(id, weight)| (id.as_str(), *weight))
            .collect();
        items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        items.truncate(limit);
        items
    }
}
