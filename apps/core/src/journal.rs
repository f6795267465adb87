//! Daily mood journal: one entry per calendar day plus summary statistics.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::models::Mood;

/// Days looked back when counting the streak.
pub const MAX_STREAK_DAYS: u32 = 365;
/// Score difference between the last two weeks that counts as a trend.
pub const TREND_THRESHOLD: f64 = 0.5;

fn default_energy() -> u8 {
    5
}

fn default_stress() -> u8 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    /// Calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub mood: Mood,
    /// How good the day felt, 1 (worst) to 10 (best).
    #[validate(range(min = 1, max = 10))]
    pub score: u8,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub notes: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default = "default_energy")]
    #[validate(range(max = 10))]
    pub energy: u8,
    #[serde(default = "default_stress")]
    #[validate(range(max = 10))]
    pub stress: u8,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub gratitude: String,
}

impl JournalEntry {
    pub fn new(date: NaiveDate, mood: Mood, score: u8) -> Self {
        Self {
            id: format!("entry_{}", Uuid::new_v4()),
            date,
            mood,
            score,
            notes: String::new(),
            activities: vec![],
            energy: default_energy(),
            stress: default_stress(),
            gratitude: String::new(),
        }
    }

    /// An entry scored with the mood's default score.
    pub fn for_mood(date: NaiveDate, mood: Mood) -> Self {
        Self::new(date, mood, mood.default_score())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub average_score: f64,
    pub total_entries: usize,
    /// Consecutive days with an entry, ending today.
    pub streak: u32,
    pub most_common_mood: Mood,
    pub trend: Trend,
    /// Average of the last 7 entries.
    pub weekly_average: f64,
    /// Average of the last 30 entries.
    pub monthly_average: f64,
}

fn average(entries: &[JournalEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|e| e.score as f64).sum::<f64>() / entries.len() as f64
}

fn last_n(entries: &[JournalEntry], n: usize) -> &[JournalEntry] {
    &entries[entries.len().saturating_sub(n)..]
}

impl JournalStats {
    /// Statistics over `entries` (oldest first). `None` for an empty journal.
    pub fn compute(entries: &[JournalEntry], today: NaiveDate) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let mut streak = 0;
        while streak < MAX_STREAK_DAYS {
            let day = today - Duration::days(streak as i64);
            if !entries.iter().any(|e| e.date == day) {
                break;
            }
            streak += 1;
        }

        let mut counts: Vec<(Mood, u32)> = Vec::new();
        for entry in entries {
            match counts.iter_mut().find(|(mood, _)| *mood == entry.mood) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.mood, 1)),
            }
        }
        let mut most_common = counts[0];
        for candidate in &counts[1..] {
            if candidate.1 > most_common.1 {
                most_common = *candidate;
            }
        }

        let recent = last_n(entries, 7);
        let older = &entries[entries.len().saturating_sub(14)..entries.len() - recent.len()];
        let trend = if older.is_empty() {
            Trend::Stable
        } else {
            let (recent_avg, older_avg) = (average(recent), average(older));
            if recent_avg > older_avg + TREND_THRESHOLD {
                Trend::Up
            } else if recent_avg < older_avg - TREND_THRESHOLD {
                Trend::Down
            } else {
                Trend::Stable
            }
        };

        Some(Self {
            average_score: average(entries),
            total_entries: entries.len(),
            streak,
            most_common_mood: most_common.0,
            trend,
            weekly_average: average(recent),
            monthly_average: average(last_n(entries, 30)),
        })
    }
}

/// Journal entries ordered by date, at most one per day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores `entry`, replacing any entry for the same day.
    pub fn upsert(&mut self, entry: JournalEntry) -> Result<()> {
        entry.validate()?;

        self.entries.retain(|e| e.date != entry.date);
        info!(date = %entry.date, mood = %entry.mood, score = entry.score, "Journal entry saved");
        self.entries.push(entry);
        self.entries.sort_by_key(|e| e.date);
        Ok(())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self, today: NaiveDate) -> Option<JournalStats> {
        JournalStats::compute(&self.entries, today)
    }
}
