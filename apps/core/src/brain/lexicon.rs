//! Keyword lexicons for mood detection.
//!
//! Two independent tables: one for free-text chat messages, one for
//! sentiment/emotion descriptions. They cover different moods and use
//! different keyword sets for the same mood, so they are kept apart.
//! Entry order is the tie-break order of the classifier.

use serde::{Deserialize, Serialize};

use crate::models::Mood;

/// Which lexicon (and therefore which confidence rule) a classification uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LexiconKind {
    /// Chat free text: confidence is present/absent.
    Chat,
    /// Sentiment description: confidence is the winning share plus a boost.
    Sentiment,
}

/// Trigger words for one mood. Matching is case-insensitive substring matching.
#[derive(Debug, Clone, Copy)]
pub struct LexiconEntry {
    pub mood: Mood,
    pub keywords: &'static [&'static str],
}

const CHAT_ENTRIES: &[LexiconEntry] = &[
    LexiconEntry {
        mood: Mood::Happy,
        keywords: &[
            "happy", "joyful", "excited", "great", "amazing", "wonderful", "fantastic",
            "cheerful", "upbeat", "positive",
        ],
    },
    LexiconEntry {
        mood: Mood::Sad,
        keywords: &[
            "sad", "down", "depressed", "upset", "unhappy", "blue", "melancholy",
            "disappointed", "heartbroken",
        ],
    },
    LexiconEntry {
        mood: Mood::Stressed,
        keywords: &[
            "stressed", "anxious", "worried", "overwhelmed", "pressure", "tense", "nervous",
            "frantic", "panic",
        ],
    },
    LexiconEntry {
        mood: Mood::Calm,
        keywords: &[
            "calm", "peaceful", "relaxed", "serene", "tranquil", "quiet", "still", "zen",
            "composed",
        ],
    },
    LexiconEntry {
        mood: Mood::Energetic,
        keywords: &[
            "energetic", "pumped", "motivated", "active", "dynamic", "powerful", "strong",
            "vigorous", "intense",
        ],
    },
    LexiconEntry {
        mood: Mood::Tired,
        keywords: &[
            "tired", "exhausted", "sleepy", "weary", "drained", "fatigued", "worn out",
            "lethargic",
        ],
    },
    LexiconEntry {
        mood: Mood::Creative,
        keywords: &[
            "creative", "artistic", "inspired", "imaginative", "innovative", "expressive",
            "inventive",
        ],
    },
    LexiconEntry {
        mood: Mood::Focused,
        keywords: &[
            "focused", "concentrated", "productive", "determined", "goal-oriented", "driven",
            "dedicated",
        ],
    },
];

const SENTIMENT_ENTRIES: &[LexiconEntry] = &[
    LexiconEntry {
        mood: Mood::Happy,
        keywords: &[
            "happy", "joyful", "excited", "amazing", "wonderful", "great", "fantastic",
            "awesome", "love", "perfect", "brilliant", "excellent", "delighted", "thrilled",
            "cheerful", "glad", "pleased", "elated", "euphoric",
        ],
    },
    LexiconEntry {
        mood: Mood::Energetic,
        keywords: &[
            "energetic", "pumped", "motivated", "driven", "ambitious", "powerful", "strong",
            "intense", "active", "dynamic", "vigorous", "enthusiastic", "fired up", "charged",
            "ready", "go", "action", "workout", "exercise",
        ],
    },
    LexiconEntry {
        mood: Mood::Calm,
        keywords: &[
            "calm", "relaxed", "peaceful", "tranquil", "serene", "quiet", "still", "gentle",
            "soft", "comfortable", "restful", "soothing", "mellow", "laid back", "chill",
            "easy", "smooth", "balanced",
        ],
    },
    LexiconEntry {
        mood: Mood::Peaceful,
        keywords: &[
            "peaceful", "zen", "meditative", "spiritual", "mindful", "centered", "balanced",
            "harmonious", "pure", "enlightened", "wise", "deep", "reflective",
            "contemplative", "sacred", "divine", "inner peace",
        ],
    },
    LexiconEntry {
        mood: Mood::Creative,
        keywords: &[
            "creative", "artistic", "imaginative", "innovative", "inspired", "original",
            "unique", "design", "art", "paint", "draw", "write", "create", "invent", "express",
            "vision", "ideas", "brainstorm",
        ],
    },
    LexiconEntry {
        mood: Mood::Focused,
        keywords: &[
            "focused", "concentrated", "productive", "work", "study", "learn", "think",
            "analyze", "solve", "goal", "target", "objective", "task", "project", "deadline",
            "efficient", "organized", "determined",
        ],
    },
];

/// A static mood → keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordLexicon {
    kind: LexiconKind,
    entries: &'static [LexiconEntry],
}

impl KeywordLexicon {
    /// Lexicon for chat messages (eight moods)
    pub fn chat() -> Self {
        Self {
            kind: LexiconKind::Chat,
            entries: CHAT_ENTRIES,
        }
    }

    /// Lexicon for sentiment descriptions (the six supported moods)
    pub fn sentiment() -> Self {
        Self {
            kind: LexiconKind::Sentiment,
            entries: SENTIMENT_ENTRIES,
        }
    }

    pub fn for_kind(kind: LexiconKind) -> Self {
        match kind {
            LexiconKind::Chat => Self::chat(),
            LexiconKind::Sentiment => Self::sentiment(),
        }
    }

    pub fn kind(&self) -> LexiconKind {
        self.kind
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &'static [LexiconEntry] {
        self.entries
    }

    pub fn keywords_for(&self, mood: Mood) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|e| e.mood == mood)
            .map(|e| e.keywords)
    }

    pub fn moods(&self) -> impl Iterator<Item = Mood> + '_ {
        self.entries.iter().map(|e| e.mood)
    }
}

/// Maps an externally detected emotion label onto a supported mood.
///
/// This is the entry point for camera or voice emotion models: whatever label
/// they emit is folded into the six moods the content layer understands.
pub fn emotion_to_mood(label: &str) -> Option<Mood> {
    let mood = match label.trim().to_lowercase().as_str() {
        "happy" | "joy" | "surprised" => Mood::Happy,
        "excited" | "energetic" | "angry" => Mood::Energetic,
        "calm" | "relaxed" | "sad" | "neutral" | "tired" => Mood::Calm,
        "peaceful" | "stressed" => Mood::Peaceful,
        "focused" | "concentrated" => Mood::Focused,
        "creative" | "inspired" => Mood::Creative,
        _ => return None,
    };
    Some(mood)
}
